//! Recursive-descent parser for a permissive JSON dialect.
//!
//! The parser holds one forward cursor into the input and never backtracks
//! further than the character under the cursor. Whitespace outside strings
//! is insignificant. Commas between elements and members are optional
//! separators: at most one is skipped before each element.
//!
//! Two dialect quirks are load-bearing and covered by tests:
//!
//! - A leading `0` magnitude digit is consumed alone and magnitude
//!   accumulation stops there, so `[01]` parses as the two elements
//!   `0` and `1`.
//! - A number carrying an exponent suffix always becomes a [`Value::Double`],
//!   even when it is mathematically an integer (`5e0` is the double `5.0`).
//!
//! Containers may nest at most [`MAX_NESTING_DEPTH`] levels; deeper input
//! fails with [`ParseError::TooDeep`] instead of exhausting the stack.
//! Parsing stops after the first complete value; trailing input is not
//! examined.

use memchr::memchr2;
use thiserror::Error;

use crate::value::{Array, Object, Value};

/// Maximum container nesting the parser accepts.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Any input-format violation detected while scanning text.
///
/// Parsing is abandoned wholesale on the first error; no partial tree is
/// ever returned.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("array not closed")]
    ArrayNotClosed,
    #[error("object not closed")]
    ObjectNotClosed,
    #[error("string not closed")]
    StringNotClosed,
    #[error("unknown token `{0}`")]
    UnknownToken(String),
    #[error("expected string key in object")]
    ExpectedKey,
    #[error("expected `:` after object key")]
    ExpectedColon,
    #[error("integer magnitude out of range")]
    NumberOutOfRange,
    #[error("containers nested deeper than {} levels", MAX_NESTING_DEPTH)]
    TooDeep,
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse one value from the front of `input`.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    Parser::new(input).parse()
}

/// Single-pass parser state: byte cursor plus container depth.
pub struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            bytes: input.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    /// Parse one complete value, leaving the cursor just past it.
    pub fn parse(mut self) -> Result<Value, ParseError> {
        self.parse_value()
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
    }

    fn enter_nested(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep);
        }
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(ParseError::UnexpectedEnd),
            Some(b'[') => {
                self.pos += 1;
                self.parse_array()
            }
            Some(b'{') => {
                self.pos += 1;
                self.parse_object()
            }
            Some(b'"') => {
                self.pos += 1;
                self.parse_string().map(Value::String)
            }
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => self.parse_literal(),
        }
    }

    /// Elements until `]`, each preceded by at most one optional comma.
    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.enter_nested()?;
        let mut items = Array::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(ParseError::ArrayNotClosed),
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(b',') => {
                    self.pos += 1;
                }
                Some(_) => {}
            }
            items.push(self.parse_value()?);
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    /// `"key" : value` pairs until `}`. A repeated key overwrites the
    /// earlier member without disturbing sorted iteration order.
    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.enter_nested()?;
        let mut members = Object::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(ParseError::ObjectNotClosed),
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(b',') => {
                    self.pos += 1;
                    self.skip_whitespace();
                }
                Some(_) => {}
            }

            match self.bump() {
                Some(b'"') => {}
                Some(_) => return Err(ParseError::ExpectedKey),
                None => return Err(ParseError::ObjectNotClosed),
            }
            let key = self.parse_string()?;

            self.skip_whitespace();
            match self.bump() {
                Some(b':') => {}
                Some(_) => return Err(ParseError::ExpectedColon),
                None => return Err(ParseError::ObjectNotClosed),
            }

            let value = self.parse_value()?;
            members.insert(key, value);
        }

        self.depth -= 1;
        Ok(Value::Object(members))
    }

    /// Body of a string literal; the opening quote is already consumed.
    ///
    /// Recognizes exactly `\"`, `\n`, `\r`, `\t`, `\\`. A backslash before
    /// any other character is preserved literally as the two-character
    /// sequence. Multi-byte UTF-8 passes through untouched.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let mut buf: Vec<u8> = Vec::new();

        loop {
            let rest = &self.bytes[self.pos..];
            // bulk-copy the span up to the next quote or escape
            let Some(stop) = memchr2(b'"', b'\\', rest) else {
                return Err(ParseError::StringNotClosed);
            };
            buf.extend_from_slice(&rest[..stop]);
            self.pos += stop + 1;

            if rest[stop] == b'"' {
                break;
            }
            match self.bump() {
                None => return Err(ParseError::StringNotClosed),
                Some(b'"') => buf.push(b'"'),
                Some(b'n') => buf.push(b'\n'),
                Some(b'r') => buf.push(b'\r'),
                Some(b't') => buf.push(b'\t'),
                Some(b'\\') => buf.push(b'\\'),
                Some(other) => {
                    buf.push(b'\\');
                    buf.push(other);
                }
            }
        }

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Number per the dialect rules; see the module docs for the two
    /// quirks this reproduces.
    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let negative = self.peek() == Some(b'-');
        if negative {
            self.pos += 1;
        }

        let mut magnitude: i64 = 0;
        if self.peek() == Some(b'0') {
            // a leading zero is consumed alone; accumulation stops here
            self.pos += 1;
        } else {
            while let Some(d @ b'0'..=b'9') = self.peek() {
                self.pos += 1;
                magnitude = magnitude
                    .checked_mul(10)
                    .and_then(|m| m.checked_add(i64::from(d - b'0')))
                    .ok_or(ParseError::NumberOutOfRange)?;
            }
        }

        if self.peek() == Some(b'.') {
            self.pos += 1;
            let mut result = magnitude as f64;
            let mut scale = 0.1;
            while let Some(d @ b'0'..=b'9') = self.peek() {
                self.pos += 1;
                result += f64::from(d - b'0') * scale;
                scale *= 0.1;
            }
            let sign = if negative { -1.0 } else { 1.0 };
            Ok(Value::Double(result * sign * self.read_exponent()))
        } else if matches!(self.peek(), Some(b'e' | b'E')) {
            // an exponent suffix always yields a double
            let sign = if negative { -1.0 } else { 1.0 };
            Ok(Value::Double(magnitude as f64 * sign * self.read_exponent()))
        } else {
            Ok(Value::Int(if negative { -magnitude } else { magnitude }))
        }
    }

    /// `10^(signed exponent)` if an `e`/`E` suffix is present, else `1.0`.
    fn read_exponent(&mut self) -> f64 {
        if !matches!(self.peek(), Some(b'e' | b'E')) {
            return 1.0;
        }
        self.pos += 1;

        let mut exp_sign: i32 = 1;
        match self.peek() {
            Some(b'-') => {
                exp_sign = -1;
                self.pos += 1;
            }
            Some(b'+') => {
                self.pos += 1;
            }
            _ => {}
        }

        let mut grade: i32 = 0;
        while let Some(d @ b'0'..=b'9') = self.peek() {
            self.pos += 1;
            grade = grade.saturating_mul(10).saturating_add(i32::from(d - b'0'));
        }

        10f64.powi(grade.saturating_mul(exp_sign))
    }

    /// Bare literal: a greedy run up to the next `,`, `]`, `}` or end of
    /// input, with internal whitespace dropped. Only `true`, `false` and
    /// `null` are valid tokens.
    fn parse_literal(&mut self) -> Result<Value, ParseError> {
        let mut token: Vec<u8> = Vec::new();
        while let Some(b) = self.peek() {
            if matches!(b, b',' | b']' | b'}') {
                break;
            }
            self.pos += 1;
            if !matches!(b, b' ' | b'\t' | b'\r' | b'\n') {
                token.push(b);
            }
        }

        match token.as_slice() {
            b"true" => Ok(Value::Bool(true)),
            b"false" => Ok(Value::Bool(false)),
            b"null" => Ok(Value::Null),
            _ => Err(ParseError::UnknownToken(
                String::from_utf8_lossy(&token).into_owned(),
            )),
        }
    }
}
