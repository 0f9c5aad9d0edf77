//! Example grammars built purely on the public combinator API.
//!
//! Nothing in here has special access to the engine; each grammar is an
//! ordinary consumer of [`Grammar`](crate::Grammar) and doubles as a usage
//! reference.

pub mod json;
