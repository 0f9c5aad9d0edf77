//! Error handling for the combinator engine.
//!
//! Backtracking failures are the hot path, so they are carried as plain
//! `Result` values (`Fail`), never as unwinding. Only an unrecovered failure
//! of the outermost symbol, or leftover input under `use_all`, surfaces to
//! the caller as a `ParseError` diagnostic.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// INTERNAL FAILURE SIGNAL
// ============================================================================

/// Why a single attempt did not match.
///
/// Always intercepted by the nearest enclosing combinator that can
/// legitimately fail partially (sequence, repetition, alternation,
/// lookahead) to drive backtracking; carries no payload beyond the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fail {
    /// The symbol does not match at the current position.
    TryFailed,
    /// The cursor was exhausted while the symbol expected more input.
    EndOfInput,
}

/// Result of one attempt of a symbol against a cursor.
pub type TryResult<T> = Result<T, Fail>;

// ============================================================================
// PUBLIC PARSE ERRORS
// ============================================================================

/// A parse failure surfaced to the caller of `try_parse`.
///
/// Each variant carries a rendering of the input and a span pointing at the
/// relevant position: the furthest position any attempt reached for match
/// failures, or the first unconsumed element for `NotAllCharsUsed`.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    /// The root symbol did not match the input.
    #[error("no grammar rule matched the input")]
    #[diagnostic(
        code(tantu::parse::try_failed),
        help("the deepest partial match ended here; check the grammar's alternatives at this position")
    )]
    TryFailed {
        #[source_code]
        src: NamedSource<String>,
        #[label("match failed by here")]
        at: SourceSpan,
    },

    /// The input ended before the root symbol completed.
    #[error("input ended before the grammar rule completed")]
    #[diagnostic(code(tantu::parse::end_of_input))]
    EndOfInput {
        #[source_code]
        src: NamedSource<String>,
        #[label("more input expected after this point")]
        at: SourceSpan,
    },

    /// The root symbol matched, but unconsumed input remains and the caller
    /// requested that all input be used.
    #[error("the grammar matched, but input remains unconsumed")]
    #[diagnostic(
        code(tantu::parse::not_all_chars_used),
        help("pass use_all = false to accept a leading match and ignore the rest")
    )]
    NotAllCharsUsed {
        #[source_code]
        src: NamedSource<String>,
        #[label("unconsumed input starts here")]
        at: SourceSpan,
    },
}

impl ParseError {
    pub(crate) fn from_fail(fail: Fail, source: String, at: SourceSpan) -> Self {
        let src = NamedSource::new("input", source);
        match fail {
            Fail::TryFailed => ParseError::TryFailed { src, at },
            Fail::EndOfInput => ParseError::EndOfInput { src, at },
        }
    }

    pub(crate) fn not_all_chars_used(source: String, at: SourceSpan) -> Self {
        ParseError::NotAllCharsUsed {
            src: NamedSource::new("input", source),
            at,
        }
    }
}
