//! Integration tests across the parse / print / build surfaces.
//!
//! Organized around the library's observable guarantees: round trips,
//! deterministic printing, parser/builder agreement, and wholesale
//! rejection of malformed input.

use jdoc_core::{parse, print, render, Builder, Document, ParseError, StructuralError, Value};
use pretty_assertions::assert_eq;

#[test]
fn round_trip_preserves_structure() {
    let samples = [
        "null",
        "true",
        "-17",
        "3.25",
        "5e3",
        r#""a\nb \\ c""#,
        "[1, 2.5, [true, null], \"x\"]",
        r#"{"b": 2, "a": [1.5, {"x": null, "y": "z"}]}"#,
        "[]",
        "{}",
    ];
    for text in samples {
        let first = parse(text).unwrap();
        let reparsed = parse(&render(&first)).unwrap();
        assert_eq!(reparsed, first, "round trip changed structure of {text}");
    }
}

#[test]
fn print_then_parse_yields_equal_tree() {
    let doc = Document::parse(r#"{"pi": 3.14159, "n": 12, "flags": [true, false]}"#).unwrap();

    let mut sink = Vec::new();
    print(&doc, &mut sink).unwrap();
    let reloaded = Document::load(&sink[..]).unwrap();

    assert_eq!(reloaded.root(), doc.root());
}

#[test]
fn printed_form_is_stable_for_double_free_documents() {
    // without doubles there is no formatting round-off: a second
    // print of the reloaded document is byte-identical
    let doc = Document::parse(r#"{"b": [1, "two", null], "a": true}"#).unwrap();

    let mut first = Vec::new();
    print(&doc, &mut first).unwrap();
    let mut second = Vec::new();
    print(&Document::load(&first[..]).unwrap(), &mut second).unwrap();

    assert_eq!(first, second);
}

#[test]
fn malformed_inputs_are_rejected_wholesale() {
    assert!(matches!(parse("[1,2"), Err(ParseError::ArrayNotClosed)));
    assert!(matches!(parse(r#""abc"#), Err(ParseError::StringNotClosed)));
    assert!(matches!(parse("truee"), Err(ParseError::UnknownToken(_))));
    assert!(matches!(parse(r#"{"a":1"#), Err(ParseError::ObjectNotClosed)));
}

#[test]
fn builder_agrees_with_parser() -> Result<(), StructuralError> {
    let mut b = Builder::new();
    b.start_object()?
        .key("a")?
        .value(1)?
        .key("b")?
        .start_array()?
        .value(true)?
        .value(Value::Null)?
        .value("x")?
        .end_array()?
        .end_object()?;
    let built = b.build()?;

    let parsed = parse(r#"{"a": 1, "b": [true, null, "x"]}"#).unwrap();
    assert_eq!(built, parsed);
    Ok(())
}

#[test]
fn members_print_in_key_order_not_insertion_order() -> Result<(), StructuralError> {
    assert_eq!(render(&parse(r#"{"b":2,"a":1}"#).unwrap()), r#"{"a":1,"b":2}"#);

    // the builder inserts b first; the printer still emits a first
    let mut b = Builder::new();
    b.start_object()?
        .key("b")?
        .value(2)?
        .key("a")?
        .value(1)?
        .end_object()?;
    assert_eq!(render(&b.build()?), r#"{"a":1,"b":2}"#);
    Ok(())
}

#[test]
fn int_and_double_stay_distinct_until_widened() {
    let int = parse("3").unwrap();
    let double = parse("3.0").unwrap();
    assert_ne!(int, double);
    assert_eq!(int.as_double().unwrap(), double.as_double().unwrap());
}

#[test]
fn misuse_fails_without_fake_progress() {
    let mut b = Builder::new();
    b.start_array().unwrap();
    assert_eq!(b.key("a").unwrap_err(), StructuralError::MisplacedKey);
    b.end_array().unwrap();
    // nothing from the failed call leaked into the tree
    assert_eq!(b.build().unwrap(), Value::Array(vec![]));
}

#[test]
fn document_print_ends_containers_with_newline() {
    let mut sink = Vec::new();
    print(&Document::parse("[1]").unwrap(), &mut sink).unwrap();
    assert_eq!(sink, b"[1]\n");

    let mut sink = Vec::new();
    print(&Document::parse("12").unwrap(), &mut sink).unwrap();
    assert_eq!(sink, b"12");
}

#[test]
fn dialect_quirks_hold_at_the_document_level() {
    // leading zero ends magnitude accumulation
    let doc = Document::parse("[01]").unwrap();
    assert_eq!(
        doc.root(),
        &Value::Array(vec![Value::Int(0), Value::Int(1)])
    );

    // exponent forces double, and printing keeps it one
    let doc = Document::parse("[5e0]").unwrap();
    assert_eq!(doc.root(), &Value::Array(vec![Value::Double(5.0)]));
    assert_eq!(render(doc.root()), "[5.0]");
}
