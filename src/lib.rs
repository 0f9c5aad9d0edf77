//! Tantu: a composable parser-combinator engine with transactional backtracking.
//!
//! Grammars are built as arenas of symbol nodes and evaluated recursively
//! against a cursor whose nested attempts commit on success and roll back on
//! failure, so alternative interpretations can be tried without corrupting
//! the scan position.
//!
//! # Examples
//!
//! ```rust
//! use tantu::{Grammar, Value};
//!
//! let mut g = Grammar::new();
//! let digit = g.one_of('0'..='9');
//! let number = g.rep_concat(digit, Some(1), None);
//! assert_eq!(
//!     g.try_parse_str(number, "42", true).unwrap(),
//!     Value::Str("42".to_string()),
//! );
//! ```

pub use crate::errors::{Fail, ParseError};
pub use crate::symbol::{Grammar, Maker, SymbolId};
pub use crate::value::Value;

pub mod cli;
pub mod cursor;
pub mod elem;
pub mod errors;
pub mod grammars;
pub mod symbol;
pub mod value;
