//! JDOC Core
//!
//! JSON document trees: a tagged value model, a recursive-descent text
//! parser for a permissive JSON dialect, a deterministic printer, and a
//! stack-checked fluent builder.
//!
//! # Architecture
//!
//! - **value.rs** - `Value` sum type, typed accessors, structural equality
//! - **parser.rs** - text to tree, `ParseError`, the dialect quirks
//! - **printer.rs** - tree to text, ascending-key member order
//! - **builder.rs** - runtime-checked tree assembly over index paths
//! - **document.rs** - immutable root wrapper, the load boundary
//!
//! A completed [`Document`] or [`Value`] is read-only and freely
//! shareable; a [`Parser`] or [`Builder`] in progress is single-writer
//! state and must not be shared.

pub mod builder;
pub mod document;
pub mod parser;
pub mod printer;
pub mod value;

pub use builder::{Builder, StructuralError};
pub use document::Document;
pub use parser::{parse, ParseError, Parser, MAX_NESTING_DEPTH};
pub use printer::{print, render};
pub use value::{Array, Object, TypeMismatch, Value};
