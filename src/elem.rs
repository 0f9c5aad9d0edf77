//! The input element abstraction.
//!
//! The engine has one generic code path for character and byte input; `Elem`
//! is the seam between them. It covers scalar conversion into [`Value`],
//! splicing captured fragments into a single `Str`/`Bytes` scalar, and
//! rendering input for diagnostics.

use std::fmt;
use std::hash::Hash;

use miette::SourceSpan;

use crate::value::Value;

/// An input element the engine can scan: a character or a byte.
pub trait Elem: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// The scalar value for a single matched element.
    fn scalar(self) -> Value;

    /// Concatenates captured fragments into one scalar value, recursing
    /// through nested sequences.
    ///
    /// # Panics
    ///
    /// Panics when a fragment is not a scalar or sequence of this element
    /// type; that indicates a concatenating combinator placed over a
    /// non-concatenable child, which is a grammar construction bug.
    fn splice(parts: Vec<Value>) -> Value;

    /// Renders the input for diagnostic source display.
    fn render(input: &[Self]) -> String;

    /// The byte-accurate diagnostic span for the element at `pos` (a
    /// zero-length span at the end of input).
    fn byte_span(input: &[Self], pos: usize) -> SourceSpan;
}

impl Elem for char {
    fn scalar(self) -> Value {
        Value::Char(self)
    }

    fn splice(parts: Vec<Value>) -> Value {
        fn push(buf: &mut String, v: &Value) {
            match v {
                Value::Char(c) => buf.push(*c),
                Value::Str(s) => buf.push_str(s),
                Value::Seq(items) => {
                    for item in items {
                        push(buf, item);
                    }
                }
                other => panic!("cannot splice a {} value into a string", other.type_name()),
            }
        }
        let mut buf = String::new();
        for part in &parts {
            push(&mut buf, part);
        }
        Value::Str(buf)
    }

    fn render(input: &[Self]) -> String {
        input.iter().collect()
    }

    fn byte_span(input: &[Self], pos: usize) -> SourceSpan {
        let offset: usize = input.iter().take(pos).map(|c| c.len_utf8()).sum();
        let len = input.get(pos).map_or(0, |c| c.len_utf8());
        (offset, len).into()
    }
}

impl Elem for u8 {
    fn scalar(self) -> Value {
        Value::Byte(self)
    }

    fn splice(parts: Vec<Value>) -> Value {
        fn push(buf: &mut Vec<u8>, v: &Value) {
            match v {
                Value::Byte(b) => buf.push(*b),
                Value::Bytes(bytes) => buf.extend_from_slice(bytes),
                Value::Seq(items) => {
                    for item in items {
                        push(buf, item);
                    }
                }
                other => panic!(
                    "cannot splice a {} value into a byte sequence",
                    other.type_name()
                ),
            }
        }
        let mut buf = Vec::new();
        for part in &parts {
            push(&mut buf, part);
        }
        Value::Bytes(buf)
    }

    fn render(input: &[Self]) -> String {
        String::from_utf8_lossy(input).into_owned()
    }

    fn byte_span(input: &[Self], pos: usize) -> SourceSpan {
        let len = usize::from(pos < input.len());
        (pos, len).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splice_flattens_nested_char_fragments() {
        let parts = vec![
            Value::Char('-'),
            Value::Str("12".to_string()),
            Value::Seq(vec![Value::Char('.'), Value::Str("5".to_string())]),
        ];
        assert_eq!(char::splice(parts), Value::Str("-12.5".to_string()));
    }

    #[test]
    fn splice_builds_bytes() {
        let parts = vec![Value::Byte(b'h'), Value::Bytes(b"id".to_vec())];
        assert_eq!(u8::splice(parts), Value::Bytes(b"hid".to_vec()));
    }

    #[test]
    fn char_spans_are_byte_accurate() {
        let input: Vec<char> = "aé b".chars().collect();
        // 'é' is two bytes; the element after it starts at byte 3.
        assert_eq!(char::byte_span(&input, 2), (3, 1).into());
        assert_eq!(char::byte_span(&input, 4), (5, 0).into());
    }
}
