//! # leptjson
//!
//! A small, dependency-light JSON value tree: a parser, a serializer, and
//! a structural editing API, all built around a single tagged [`Value`]
//! type.
//!
//! ## Examples
//!
//! ### Parsing
//!
//! ```
//! use leptjson::{parser::Parser, value::Value};
//!
//! let value = Parser::new(br#"{"name":"Elvis","age":42}"#).parse().unwrap();
//! assert!(value.is_object());
//! assert_eq!(value.object_find(b"name").unwrap().as_string(), Some(&b"Elvis"[..]));
//! ```
//!
//! ### Serializing
//!
//! ```
//! use leptjson::{serializer::to_string, value::Value};
//!
//! let mut array = Value::new_array(0);
//! *array.array_push() = Value::Number(1.0);
//! *array.array_push() = Value::Number(2.0);
//!
//! assert_eq!(to_string(&array), "[1,2]");
//! ```
//!
//! ### Editing
//!
//! ```
//! use leptjson::value::Value;
//!
//! let mut object = Value::new_object(0);
//! *object.object_entry(b"a") = Value::Bool(true);
//! assert_eq!(object.object_find_index(b"a"), Some(0));
//!
//! // repeated entry() calls on the same key do not grow the object
//! object.object_entry(b"a");
//! assert_eq!(object.as_object().unwrap().len(), 1);
//! ```
//!
//! ## Scope
//!
//! This crate parses and emits strict JSON text (RFC 8259): no comments,
//! no trailing commas, no duplicate-key rejection, no schema validation,
//! no preservation of source formatting. It does no I/O of its own —
//! callers hand it byte slices and get byte buffers back.
pub mod array;
pub mod buffer;
pub mod error;
pub mod object;
pub mod options;
pub mod parser;
pub mod serializer;
pub mod value;

#[cfg(feature = "serde_json")]
pub mod serde_interop;

pub use error::ParseError;
pub use options::{ParserOptions, ParserOptionsBuilder};
pub use parser::Parser;
pub use value::{Member, Value};
