use std::{fmt, io};

use thiserror::Error;

/// A 1-based line and column within the source being scanned.
///
/// A newline resets the column to 0 before the position counters advance
/// for the next byte, so the newline itself is always reported at column
/// 0 and the first byte of the following line is reported at column 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: u64,
    pub col: u64,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// The kind of syntax error recognized while scanning an annotation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("expected '{{', '[', '(', or start of member after '{token}' token")]
    UnexpectedAfterToken { token: String },
    #[error("unexpected '[' while parsing a prefix")]
    UnexpectedOpenBracket,
    #[error("unexpected newline while parsing a prefix")]
    NewlineInPrefix,
    #[error("prefix content too large (max {max} bytes)")]
    PrefixTooLong { max: usize },
    #[error("member declaration too large (max {max} bytes)")]
    MemberTooLong { max: usize },
    #[error("expected ':' before end of header prefix while parsing an attribute list")]
    DanglingAttributeColon,
}

/// A syntax error at a specific location in the source.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("syntax error [{location}] - {kind}")]
pub struct SyntaxError {
    pub location: Location,
    pub kind: SyntaxErrorKind,
}

/// An error from running the parser/emitter to completion.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
