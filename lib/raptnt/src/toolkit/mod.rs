//! Parsing toolkit: plain Rust lexers and pull parsers able to read files chunk by chunk.
//!
//! The [`Lexer`] owns the input buffer and turns bytes into tokens through a
//! [`TokenRecognizer`]; the [`Parser`] drives the lexer and assembles tokens
//! into statements through a [`RuleRecognizer`]. Both are lazy: nothing is
//! read or decoded before the consumer asks for the next statement.

mod error;
mod lexer;
mod parser;

pub use self::error::{
    AssembleError, IteratorError, LexError, ParseError, SyntaxError, SyntaxErrorKind, TextPosition,
};
pub use self::lexer::{Lexer, TokenOrLineJump, TokenRecognizer, TokenRecognizerError};
pub use self::parser::{FromReadIterator, FromSliceIterator, Parser, RuleRecognizer, RuleRecognizerError};
