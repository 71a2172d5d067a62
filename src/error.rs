//! Error types for the small ambient surfaces of this crate that can fail.
//!
//! The indexing and subsumption core itself does not originate errors:
//! contract violations there are `debug_assert!`s. The only fallible boundary
//! is parsing terms from the compact textual notation used throughout the
//! tests, modeled on `mcrl2rust-io`'s `IOError`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input while parsing a term")]
    UnexpectedEof,

    #[error("expected '{expected}' at byte offset {offset}, found '{found}'")]
    Expected {
        expected: char,
        found: char,
        offset: usize,
    },

    #[error("trailing input after term: '{0}'")]
    TrailingInput(String),

    #[error("empty identifier at byte offset {0}")]
    EmptyIdentifier(usize),
}
