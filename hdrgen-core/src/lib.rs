//! Streaming scanner that recognizes inline annotations in C-like source
//! text and emits either a companion header view or a stripped-source
//! view, per [`Config::mode`].

mod attrs;
mod config;
mod emit;
mod error;
mod indent;
mod parser;
mod prefixes;
mod state;

pub use config::{Config, Mode};
pub use error::{Error, Location, Result, SyntaxError, SyntaxErrorKind};
pub use parser::parse;
