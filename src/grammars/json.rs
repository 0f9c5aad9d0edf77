//! A JSON value grammar.
//!
//! Demonstrates the full combinator set: recursive alternation closed with
//! [`Grammar::add_alt`], separator lists via [`Grammar::rep_sep`] (trailing
//! commas are therefore tolerated), escaped string bodies, and makers that
//! shape raw matches into `Value::Map`/numeric scalars. String escapes are
//! verbatim: `\"` yields `"` and `\x` yields `x` — no control-sequence
//! translation.

use once_cell::sync::Lazy;

use crate::errors::ParseError;
use crate::symbol::{Grammar, SymbolId};
use crate::value::Value;

/// The shared JSON grammar, built once on first use.
pub static JSON: Lazy<JsonGrammar> = Lazy::new(JsonGrammar::new);

/// A built JSON grammar with its root symbol.
#[derive(Debug)]
pub struct JsonGrammar {
    grammar: Grammar<char>,
    root: SymbolId,
}

impl JsonGrammar {
    pub fn new() -> Self {
        let mut g = Grammar::new();

        let ws = {
            let sp = g.one_of(" \t\r\n".chars());
            let run = g.rep_concat(sp, Some(1), None);
            g.ignore_opt(run)
        };
        let comma = g.punct(',');

        // The value rule is recursive (arrays and objects contain values),
        // so it starts as an empty alternation and is patched below.
        let value = g.or([]);

        let string = {
            let quote = g.punct('"');
            let body_char = g.not_elem('"');
            let body_char = g.with_escape(body_char, '\\');
            let body = g.rep_concat(body_char, None, None);
            g.seq([quote, body, quote])
        };

        let number = {
            let digit = g.one_of('0'..='9');
            let sign = g.exact('-');
            let opt_sign = g.opt(sign);
            let int_digits = g.rep_concat(digit, Some(1), None);
            let dot = g.exact('.');
            let frac_digits = g.rep_concat(digit, Some(1), None);
            let frac = g.seq([dot, frac_digits]);
            let opt_frac = g.opt(frac);
            let body = g.chain_concat([opt_sign, int_digits, opt_frac]);
            g.with_maker(body, |v| {
                let text = match &v {
                    Value::Str(s) => s,
                    _ => return v,
                };
                if text.contains('.') {
                    match text.parse::<f64>() {
                        Ok(n) => Value::Float(n),
                        Err(_) => v,
                    }
                } else {
                    match text.parse::<i64>() {
                        Ok(n) => Value::Int(n),
                        Err(_) => v,
                    }
                }
            })
        };

        let object = {
            let lbrace = g.punct('{');
            let rbrace = g.punct('}');
            let colon = g.punct(':');
            let member = g.seq([ws, string, ws, colon, ws, value, ws]);
            let members = g.rep_sep(member, comma);
            let body = g.seq([lbrace, members, ws, rbrace]);
            g.with_maker(body, |v| {
                let mut map = im::HashMap::new();
                if let Value::Seq(pairs) = v {
                    for pair in pairs {
                        if let Value::Seq(kv) = pair {
                            let mut kv = kv.into_iter();
                            if let (Some(Value::Str(key)), Some(val)) = (kv.next(), kv.next()) {
                                map.insert(key, val);
                            }
                        }
                    }
                }
                Value::Map(map)
            })
        };

        let array = {
            let lbrack = g.punct('[');
            let rbrack = g.punct(']');
            let item = g.seq([ws, value, ws]);
            let items = g.rep_sep(item, comma);
            g.seq([lbrack, items, ws, rbrack])
        };

        let true_ = g.keyword("true", Value::Bool(true));
        let false_ = g.keyword("false", Value::Bool(false));
        let null = g.keyword("null", Value::Null);

        // First match wins; keywords sit after the structured forms.
        g.add_alt(value, string);
        g.add_alt(value, number);
        g.add_alt(value, object);
        g.add_alt(value, array);
        g.add_alt(value, true_);
        g.add_alt(value, false_);
        g.add_alt(value, null);

        let root = g.seq([ws, value, ws]);
        JsonGrammar { grammar: g, root }
    }

    /// Parses `text` as a single JSON value, requiring all input consumed.
    pub fn parse(&self, text: &str) -> Result<Value, ParseError> {
        self.parse_with(text, true)
    }

    /// Parses `text`, optionally tolerating trailing unparsed input.
    pub fn parse_with(&self, text: &str, use_all: bool) -> Result<Value, ParseError> {
        self.grammar.try_parse_str(self.root, text, use_all)
    }
}

impl Default for JsonGrammar {
    fn default() -> Self {
        Self::new()
    }
}
