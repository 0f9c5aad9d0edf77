// tests/engine_tests.rs
//
// Core combinator properties: terminal matchers, sequence atomicity, ordered
// alternation, repetition bounds, separator lists, escapes, and the two
// optional-value shapes.

use tantu::{Grammar, ParseError, Value};

fn str_val(s: &str) -> Value {
    Value::Str(s.to_string())
}

// ---
// Literals
// ---

#[test]
fn expl_text_round_trips() {
    let mut g = Grammar::new();
    let rule = g.expl_text("piyopiyo");
    assert_eq!(g.try_parse_str(rule, "piyopiyo", true).unwrap(), str_val("piyopiyo"));
}

#[test]
fn expl_text_rejects_non_matches() {
    let mut g = Grammar::new();
    let rule = g.expl_text("piyopiyo");
    assert!(matches!(
        g.try_parse_str(rule, "xyzxyzxy", true),
        Err(ParseError::TryFailed { .. })
    ));
    assert!(matches!(
        g.try_parse_str(rule, "piyoopiyo", true),
        Err(ParseError::TryFailed { .. })
    ));
}

#[test]
fn expl_text_reports_end_of_input_on_short_input() {
    let mut g = Grammar::new();
    let rule = g.expl_text("piyopiyo");
    assert!(matches!(
        g.try_parse_str(rule, "piyo", true),
        Err(ParseError::EndOfInput { .. })
    ));
}

#[test]
fn keyword_yields_its_fixed_value() {
    let mut g = Grammar::new();
    let rule = g.keyword("true", Value::Bool(true));
    assert_eq!(g.try_parse_str(rule, "true", true).unwrap(), Value::Bool(true));
    assert!(g.try_parse_str(rule, "truth", true).is_err());
}

#[test]
fn suppressed_text_contributes_nothing() {
    let mut g = Grammar::new();
    let lit = g.text("ab");
    let rule = g.seq([lit]);
    assert_eq!(g.try_parse_str(rule, "ab", true).unwrap(), Value::Null);
}

// ---
// Ordered alternation
// ---

#[test]
fn or_is_ordered_first_match_wins() {
    let mut g = Grammar::new();
    let first = g.keyword("ab", str_val("first"));
    let second = g.keyword("ab", str_val("second"));
    let rule = g.or([first, second]);
    assert_eq!(g.try_parse_str(rule, "ab", true).unwrap(), str_val("first"));
}

#[test]
fn or_is_not_longest_match() {
    let mut g = Grammar::new();
    let short = g.expl_text("ab");
    let long = g.expl_text("abc");
    let rule = g.or([short, long]);
    assert_eq!(g.try_parse_str(rule, "abc", false).unwrap(), str_val("ab"));
    assert!(matches!(
        g.try_parse_str(rule, "abc", true),
        Err(ParseError::NotAllCharsUsed { .. })
    ));
}

#[test]
fn or_backtracks_a_partially_matched_sequence() {
    let mut g = Grammar::new();
    let ab = {
        let a = g.exact('a');
        let b = g.exact('b');
        g.seq([a, b])
    };
    let ac = {
        let a = g.exact('a');
        let c = g.exact('c');
        g.seq([a, c])
    };
    let rule = g.or([ab, ac]);
    assert_eq!(
        g.try_parse_str(rule, "ac", true).unwrap(),
        Value::Seq(vec![Value::Char('a'), Value::Char('c')])
    );
}

#[test]
fn empty_or_always_fails() {
    let mut g = Grammar::<char>::new();
    let rule = g.or([]);
    assert!(matches!(
        g.try_parse_str(rule, "x", true),
        Err(ParseError::TryFailed { .. })
    ));
}

// ---
// Repetition bounds
// ---

#[test]
fn rep_fails_below_min() {
    let mut g = Grammar::new();
    let a = g.exact('a');
    let rule = g.rep(a, Some(2), Some(4));
    assert!(matches!(
        g.try_parse_str(rule, "", false),
        Err(ParseError::TryFailed { .. })
    ));
    assert!(matches!(
        g.try_parse_str(rule, "ab", false),
        Err(ParseError::TryFailed { .. })
    ));
}

#[test]
fn rep_stops_at_max_and_leaves_the_rest() {
    let mut g = Grammar::new();
    let a = g.exact('a');
    let rule = g.rep(a, Some(2), Some(4));
    let four = vec![Value::Char('a'); 4];
    assert_eq!(g.try_parse_str(rule, "aaaaaa", false).unwrap(), Value::Seq(four));
    assert!(matches!(
        g.try_parse_str(rule, "aaaaaa", true),
        Err(ParseError::NotAllCharsUsed { .. })
    ));
}

#[test]
fn rep_accepts_counts_within_bounds() {
    let mut g = Grammar::new();
    let a = g.exact('a');
    let rule = g.rep(a, Some(2), Some(4));
    let three = vec![Value::Char('a'); 3];
    assert_eq!(g.try_parse_str(rule, "aaa", true).unwrap(), Value::Seq(three));
}

#[test]
fn rep_with_equal_min_and_max_matches_exactly() {
    let mut g = Grammar::new();
    let a = g.exact('a');
    let rule = g.rep(a, Some(3), Some(3));
    let three = vec![Value::Char('a'); 3];
    assert_eq!(g.try_parse_str(rule, "aaa", true).unwrap(), Value::Seq(three));
}

#[test]
fn rep_concat_respects_use_all() {
    let mut g = Grammar::new();
    let digit = g.one_of('0'..='9');
    let rule = g.rep_concat(digit, Some(1), None);
    assert_eq!(g.try_parse_str(rule, "123abc", false).unwrap(), str_val("123"));
    assert!(matches!(
        g.try_parse_str(rule, "123abc", true),
        Err(ParseError::NotAllCharsUsed { .. })
    ));
    assert_eq!(g.try_parse_str(rule, "123", true).unwrap(), str_val("123"));
}

// ---
// Sequences and brackets
// ---

#[test]
fn bracketed_content_keeps_captured_delimiters() {
    let mut g = Grammar::new();
    let open = g.exact('(');
    let inner = g.not_elem(')');
    let body = g.rep_concat(inner, Some(1), None);
    let close = g.exact(')');
    let rule = g.seq([open, body, close]);
    assert_eq!(
        g.try_parse_str(rule, "(hoge)", true).unwrap(),
        Value::Seq(vec![Value::Char('('), str_val("hoge"), Value::Char(')')])
    );
    assert!(g.try_parse_str(rule, "(hoge", true).is_err());
    assert!(g.try_parse_str(rule, "hoge)", true).is_err());
}

#[test]
fn suppressed_delimiters_leave_only_the_content() {
    let mut g = Grammar::new();
    let open = g.punct('(');
    let inner = g.not_elem(')');
    let body = g.rep_concat(inner, Some(1), None);
    let close = g.punct(')');
    let rule = g.seq([open, body, close]);
    // One emitting child: the value passes through without a tuple wrapper.
    assert_eq!(g.try_parse_str(rule, "(hoge)", true).unwrap(), str_val("hoge"));
}

#[test]
fn separator_list_with_mandatory_trailing_separator() {
    let mut g = Grammar::new();
    let open = g.punct('(');
    let close = g.punct(')');
    let sep = g.punct(',');
    let word_char = g.none_of([',', ')']);
    let word = g.rep_concat(word_char, Some(1), None);
    let pair = g.seq([word, sep]);
    let run = g.rep(pair, None, None);
    let rule = g.seq([open, run, close]);
    assert_eq!(
        g.try_parse_str(rule, "(hoge,fuga,)", true).unwrap(),
        Value::Seq(vec![str_val("hoge"), str_val("fuga")])
    );
    assert_eq!(g.try_parse_str(rule, "()", true).unwrap(), Value::Seq(vec![]));
}

#[test]
fn separator_list_shapes_nest_without_suppression() {
    let mut g = Grammar::new();
    let open = g.exact('(');
    let close = g.exact(')');
    let sep = g.exact(',');
    let word_char = g.none_of([',', ')']);
    let word = g.rep_concat(word_char, Some(1), None);
    let pair = g.seq([word, sep]);
    let run = g.rep(pair, None, None);
    let tail = g.opt(word);
    let rule = g.seq([open, run, tail, close]);
    // No trailing separator: the last word lands in the optional tail.
    assert_eq!(
        g.try_parse_str(rule, "(ab,cd)", true).unwrap(),
        Value::Seq(vec![
            Value::Char('('),
            Value::Seq(vec![
                Value::Seq(vec![str_val("ab"), Value::Char(',')]),
            ]),
            Value::Seq(vec![str_val("cd")]),
            Value::Char(')'),
        ])
    );
}

// ---
// RepSep
// ---

#[test]
fn rep_sep_round_trips_with_and_without_trailing_separator() {
    let mut g = Grammar::new();
    let letter = g.one_of('a'..='z');
    let word = g.rep_concat(letter, Some(1), None);
    let comma = g.punct(',');
    let rule = g.rep_sep(word, comma);
    let expected = Value::Seq(vec![str_val("a"), str_val("b"), str_val("c")]);
    assert_eq!(g.try_parse_str(rule, "a,b,c", true).unwrap(), expected);
    assert_eq!(g.try_parse_str(rule, "a,b,c,", true).unwrap(), expected);
}

#[test]
fn rep_sep_accepts_empty_and_singleton_lists() {
    let mut g = Grammar::new();
    let letter = g.one_of('a'..='z');
    let word = g.rep_concat(letter, Some(1), None);
    let comma = g.punct(',');
    let rule = g.rep_sep(word, comma);
    assert_eq!(g.try_parse_str(rule, "", true).unwrap(), Value::Seq(vec![]));
    assert_eq!(
        g.try_parse_str(rule, "one", true).unwrap(),
        Value::Seq(vec![str_val("one")])
    );
}

// ---
// Chain
// ---

#[test]
fn chain_splices_a_rep_and_an_opt_into_one_list() {
    let mut g = Grammar::new();
    let a = g.exact('a');
    let run = g.rep(a, None, None);
    let b = g.exact('b');
    let tail = g.opt(b);
    let rule = g.chain([run, tail]);
    assert_eq!(
        g.try_parse_str(rule, "aab", true).unwrap(),
        Value::Seq(vec![Value::Char('a'), Value::Char('a'), Value::Char('b')])
    );
    assert_eq!(
        g.try_parse_str(rule, "aa", true).unwrap(),
        Value::Seq(vec![Value::Char('a'), Value::Char('a')])
    );
}

#[test]
fn chain_concat_assembles_a_signed_decimal() {
    let mut g = Grammar::new();
    let digit = g.one_of('0'..='9');
    let sign = g.exact('-');
    let opt_sign = g.opt(sign);
    let int_digits = g.rep_concat(digit, Some(1), None);
    let dot = g.exact('.');
    let frac_digits = g.rep_concat(digit, Some(1), None);
    let frac = g.seq([dot, frac_digits]);
    let opt_frac = g.opt(frac);
    let rule = g.chain_concat([opt_sign, int_digits, opt_frac]);
    assert_eq!(g.try_parse_str(rule, "-12.5", true).unwrap(), str_val("-12.5"));
    assert_eq!(g.try_parse_str(rule, "42", true).unwrap(), str_val("42"));
}

// ---
// Optionals: the two no-match shapes
// ---

#[test]
fn opt_defaults_to_the_sequence_shape() {
    let mut g = Grammar::new();
    let pre = g.text("beg");
    let main = g.expl_text("Content");
    let opt = g.opt(main);
    let suf = g.text("end");
    let rule = g.seq([pre, opt, suf]);
    assert_eq!(
        g.try_parse_str(rule, "begContentend", true).unwrap(),
        Value::Seq(vec![str_val("Content")])
    );
    assert_eq!(g.try_parse_str(rule, "begend", true).unwrap(), Value::Seq(vec![]));
}

#[test]
fn opt_or_substitutes_the_sentinel_when_absent() {
    let mut g = Grammar::new();
    let pre = g.text("beg");
    let main = g.expl_text("Content");
    let opt = g.opt_or(main, Value::Null);
    let suf = g.text("end");
    let rule = g.seq([pre, opt, suf]);
    assert_eq!(g.try_parse_str(rule, "begContentend", true).unwrap(), str_val("Content"));
    assert_eq!(g.try_parse_str(rule, "begend", true).unwrap(), Value::Null);
}

#[test]
fn ignore_consumes_captured_children_without_contributing() {
    let mut g = Grammar::new();
    let a = g.exact('a');
    let digit = g.one_of('0'..='9');
    let digits = g.rep_concat(digit, Some(1), None);
    let skip = g.ignore([digits]);
    let b = g.exact('b');
    let rule = g.seq([a, skip, b]);
    assert_eq!(
        g.try_parse_str(rule, "a123b", true).unwrap(),
        Value::Seq(vec![Value::Char('a'), Value::Char('b')])
    );
    // The ignored fragment is still mandatory.
    assert!(g.try_parse_str(rule, "ab", true).is_err());
}

#[test]
fn ignore_opt_suppresses_interstitial_whitespace() {
    let mut g = Grammar::new();
    let a = g.exact('a');
    let sp = g.one_of([' ', '\t']);
    let run = g.rep_concat(sp, Some(1), None);
    let ws = g.ignore_opt(run);
    let b = g.exact('b');
    let rule = g.seq([a, ws, b]);
    let expected = Value::Seq(vec![Value::Char('a'), Value::Char('b')]);
    assert_eq!(g.try_parse_str(rule, "a  b", true).unwrap(), expected);
    assert_eq!(g.try_parse_str(rule, "ab", true).unwrap(), expected);
}

// ---
// Escapes and lookahead
// ---

#[test]
fn escape_lets_an_excluded_delimiter_through() {
    let mut g = Grammar::new();
    let c = g.none_of([')']);
    let c = g.with_escape(c, '\\');
    let rule = g.rep_concat(c, Some(1), None);
    assert_eq!(g.try_parse_str(rule, r"on\)e", true).unwrap(), str_val("on)e"));
}

#[test]
fn escaped_list_contents_keep_their_delimiters() {
    let mut g = Grammar::new();
    let open = g.punct('(');
    let close = g.punct(')');
    let comma = g.punct(',');
    let word_char = g.none_of([',', ')']);
    let word_char = g.with_escape(word_char, '\\');
    let word = g.rep_concat(word_char, Some(1), None);
    let list = g.rep_sep(word, comma);
    let rule = g.seq([open, list, close]);
    assert_eq!(
        g.try_parse_str(rule, r"(on\)e,t\,wo)", true).unwrap(),
        Value::Seq(vec![str_val("on)e"), str_val("t,wo")])
    );
}

#[test]
fn except_expresses_any_symbol_but_the_excluded_one() {
    let mut g = Grammar::new();
    let quote = g.punct('"');
    let any = g.any();
    let quote_mark = g.exact('"');
    let content = g.except(any, quote_mark);
    let body = g.rep_concat(content, Some(1), None);
    let rule = g.seq([quote, body, quote]);
    assert_eq!(g.try_parse_str(rule, "\"hoge\"", true).unwrap(), str_val("hoge"));
    assert!(g.try_parse_str(rule, "\"hoge", true).is_err());
}

// ---
// Byte input
// ---

#[test]
fn byte_grammars_produce_bytes() {
    let mut g: Grammar<u8> = Grammar::new();
    let open = g.punct(b'(');
    let inner = g.not_elem(b')');
    let body = g.rep_concat(inner, Some(1), None);
    let close = g.punct(b')');
    let rule = g.seq([open, body, close]);
    assert_eq!(
        g.try_parse(rule, b"(hoge)", true).unwrap(),
        Value::Bytes(b"hoge".to_vec())
    );
}

#[test]
fn byte_literals_match_exactly() {
    let mut g: Grammar<u8> = Grammar::new();
    let rule = g.expl_bytes(b"\x00\x01ab");
    assert_eq!(
        g.try_parse(rule, b"\x00\x01ab", true).unwrap(),
        Value::Bytes(b"\x00\x01ab".to_vec())
    );
    assert!(g.try_parse(rule, b"\x00\x02ab", true).is_err());
}

#[test]
fn suppressed_byte_magic_leaves_only_the_payload() {
    let mut g: Grammar<u8> = Grammar::new();
    let magic = g.bytes_text(b"\x89PNG");
    let payload = g.any();
    let body = g.rep_concat(payload, Some(1), None);
    let rule = g.seq([magic, body]);
    assert_eq!(
        g.try_parse(rule, b"\x89PNGrest", true).unwrap(),
        Value::Bytes(b"rest".to_vec())
    );
}

// ---
// Makers
// ---

#[test]
fn makers_reshape_raw_matches() {
    let mut g = Grammar::new();
    let digit = g.one_of('0'..='9');
    let digits = g.rep_concat(digit, Some(1), None);
    let rule = g.with_maker(digits, |v| match v.as_str().and_then(|s| s.parse().ok()) {
        Some(n) => Value::Int(n),
        None => v,
    });
    assert_eq!(g.try_parse_str(rule, "128", true).unwrap(), Value::Int(128));
}

#[test]
fn many_makers_receive_the_whole_sequence() {
    let mut g = Grammar::new();
    let a = g.exact('a');
    let run = g.rep(a, Some(1), None);
    let rule = g.with_maker(run, |v| match v.as_seq() {
        Some(items) => Value::Int(items.len() as i64),
        None => v,
    });
    assert_eq!(g.try_parse_str(rule, "aaaa", true).unwrap(), Value::Int(4));
}
