//! Serializer from value trees back to text.
//!
//! Output carries no whitespace beyond the structural `,` and `:`
//! separators. Object members are emitted in the mapping's ascending key
//! order, so output is deterministic regardless of how the tree was
//! assembled. Doubles use Rust's shortest round-trip formatting, which
//! keeps a `.0` on integral values - a printed double re-parses as a
//! double, never an integer.
//!
//! Printing a [`Document`] whose root is an array or object appends one
//! newline after the closing bracket; this rendering convention belongs
//! to the document boundary, so bare values never get it.

use std::fmt;
use std::io;

use crate::document::Document;
use crate::value::Value;

/// Serialize a single value. No trailing newline.
pub fn render(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

/// Write a document's serialized form to a byte sink.
pub fn print<W: io::Write>(doc: &Document, sink: &mut W) -> io::Result<()> {
    let mut out = render(doc.root());
    if matches!(doc.root(), Value::Array(_) | Value::Object(_)) {
        out.push('\n');
    }
    sink.write_all(out.as_bytes())
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Double(d) => out.push_str(&format!("{d:?}")),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
            out.push(']');
        }
        Value::Object(members) => {
            out.push('{');
            for (i, (key, member)) in members.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_value(member, out);
            }
            out.push('}');
        }
    }
}

/// Quote and escape text: `"`, `\n`, `\r`, `\t` and `\\` only.
fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('"');
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl fmt::Display for Document {
    /// The serialized document, including the trailing newline for
    /// container roots.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self.root()))?;
        if matches!(self.root(), Value::Array(_) | Value::Object(_)) {
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Object;

    #[test]
    fn test_render_scalars() {
        assert_eq!(render(&Value::Null), "null");
        assert_eq!(render(&Value::Bool(true)), "true");
        assert_eq!(render(&Value::Bool(false)), "false");
        assert_eq!(render(&Value::Int(-42)), "-42");
        assert_eq!(render(&Value::String("hi".into())), "\"hi\"");
    }

    #[test]
    fn test_render_doubles_keep_fraction() {
        assert_eq!(render(&Value::Double(3.14)), "3.14");
        // integral doubles keep the .0 so they re-parse as doubles
        assert_eq!(render(&Value::Double(5.0)), "5.0");
        assert_eq!(render(&Value::Double(-0.5)), "-0.5");
    }

    #[test]
    fn test_render_escapes() {
        assert_eq!(
            render(&Value::String("a\"b\nc\rd\te\\f".into())),
            r#""a\"b\nc\rd\te\\f""#
        );
    }

    #[test]
    fn test_render_array_no_extra_whitespace() {
        let v = Value::Array(vec![Value::Int(1), Value::Null, Value::Bool(true)]);
        assert_eq!(render(&v), "[1,null,true]");
        assert_eq!(render(&Value::Array(vec![])), "[]");
    }

    #[test]
    fn test_object_members_sorted_by_key() {
        let mut map = Object::new();
        map.insert("b".into(), Value::Int(2));
        map.insert("a".into(), Value::Int(1));
        assert_eq!(render(&Value::Object(map)), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_nested_containers() {
        let mut inner = Object::new();
        inner.insert("x".into(), Value::Int(1));
        let mut outer = Object::new();
        outer.insert("arr".into(), Value::Array(vec![Value::Int(1)]));
        outer.insert("obj".into(), Value::Object(inner));
        assert_eq!(
            render(&Value::Object(outer)),
            r#"{"arr":[1],"obj":{"x":1}}"#
        );
    }

    #[test]
    fn test_print_appends_newline_for_container_roots() {
        let mut sink = Vec::new();
        print(&Document::new(Value::Array(vec![])), &mut sink).unwrap();
        assert_eq!(sink, b"[]\n");

        let mut sink = Vec::new();
        print(&Document::new(Value::Object(Object::new())), &mut sink).unwrap();
        assert_eq!(sink, b"{}\n");
    }

    #[test]
    fn test_print_scalar_root_has_no_newline() {
        let mut sink = Vec::new();
        print(&Document::new(Value::Int(7)), &mut sink).unwrap();
        assert_eq!(sink, b"7");
    }

    #[test]
    fn test_display_matches_render() {
        let v = Value::Array(vec![Value::Double(1.5)]);
        assert_eq!(v.to_string(), "[1.5]");
        assert_eq!(Document::new(v).to_string(), "[1.5]\n");
    }
}
