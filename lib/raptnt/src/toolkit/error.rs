use std::ops::Range;
use std::{fmt, io};

/// A position in a text i.e. a `line` number starting from 1, a `column` number starting from 1 (in number of code points) and a global file `offset` starting from 0 (in number of bytes).
#[derive(Eq, PartialEq, Debug, Copy, Clone)]
pub struct TextPosition {
    pub line: u64,
    pub column: u64,
    pub offset: u64,
}

impl TextPosition {
    pub(crate) const START: Self = Self {
        line: 1,
        column: 1,
        offset: 0,
    };
}

/// A malformed token: the byte sequence at the current position does not form a valid term.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum LexError {
    /// An escape sequence outside of `\t`, `\n`, `\r`, `\"`, `\\`, `\uXXXX` and `\UXXXXXXXX`.
    #[error("unrecognized escape sequence '{0}'")]
    InvalidEscape(String),
    /// A blank node label that is empty, starts with a dot or contains a character outside of `[A-Za-z0-9_:.-]`.
    #[error("invalid blank node label '_:{0}'")]
    InvalidBlankNodeLabel(String),
    /// A string literal without a closing quote before the end of the line.
    #[error("unterminated string literal: no closing '\"' before the end of the line")]
    UnterminatedLiteral,
    /// A byte that starts none of the N-Triples productions.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// An IRI without a closing '>' before the end of the line.
    #[error("unterminated IRI: no closing '>' before the end of the line")]
    UnterminatedIri,
    /// An IRI that is not a valid absolute IRI.
    #[error("invalid IRI: {0}")]
    InvalidIri(String),
    /// A language tag not matching `[A-Za-z]+(-[A-Za-z0-9]+)*`.
    #[error("invalid language tag")]
    InvalidLanguageTag,
    /// Bytes that are not valid UTF-8.
    #[error("invalid UTF-8 character encoding")]
    InvalidUtf8,
    /// The input stops in the middle of a token.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

/// A malformed statement: the term sequence of a line does not form a valid triple or quad.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum AssembleError {
    /// Fewer than 3 or more than 4 terms before the statement terminator.
    #[error("a statement must have 3 or 4 terms, found {0}")]
    UnexpectedTermCount(usize),
    /// A term of a type that is not allowed at its position.
    #[error("the {position} of a statement must be {expected}")]
    InvalidTermPosition {
        position: &'static str,
        expected: &'static str,
    },
    /// The line (or the input) ended before the statement terminator `.`.
    #[error("missing statement terminator '.' before the end of the line")]
    MissingTerminator,
    /// A token after the statement terminator on the same line.
    #[error("only one statement is allowed per line")]
    TrailingContent,
}

/// An error in the syntax of the parsed file.
///
/// It is composed of an error kind ([`LexError`] or [`AssembleError`]) and
/// the position range in the input at which it occurred.
#[derive(Debug, thiserror::Error)]
pub struct SyntaxError {
    location: Range<TextPosition>,
    kind: SyntaxErrorKind,
}

/// The two families of syntax errors: token-level and statement-level.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum SyntaxErrorKind {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Assemble(#[from] AssembleError),
}

impl SyntaxError {
    pub(crate) fn new(location: Range<TextPosition>, kind: impl Into<SyntaxErrorKind>) -> Self {
        Self {
            location,
            kind: kind.into(),
        }
    }

    /// The location of the error inside of the file.
    #[inline]
    pub fn location(&self) -> Range<TextPosition> {
        self.location.clone()
    }

    /// What production failed.
    #[inline]
    pub fn kind(&self) -> &SyntaxErrorKind {
        &self.kind
    }

    /// The token-level error, if this is one.
    #[inline]
    pub fn lex_error(&self) -> Option<&LexError> {
        if let SyntaxErrorKind::Lex(e) = &self.kind {
            Some(e)
        } else {
            None
        }
    }

    /// The statement-level error, if this is one.
    #[inline]
    pub fn assemble_error(&self) -> Option<&AssembleError> {
        if let SyntaxErrorKind::Assemble(e) = &self.kind {
            Some(e)
        } else {
            None
        }
    }
}

impl fmt::Display for SyntaxError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.start.offset + 1 >= self.location.end.offset {
            write!(
                f,
                "Parser error at line {} column {}: {}",
                self.location.start.line, self.location.start.column, self.kind
            )
        } else if self.location.start.line == self.location.end.line {
            write!(
                f,
                "Parser error at line {} between columns {} and {}: {}",
                self.location.start.line,
                self.location.start.column,
                self.location.end.column,
                self.kind
            )
        } else {
            write!(
                f,
                "Parser error between line {} column {} and line {} column {}: {}",
                self.location.start.line,
                self.location.start.column,
                self.location.end.line,
                self.location.end.column,
                self.kind
            )
        }
    }
}

impl From<SyntaxError> for io::Error {
    #[inline]
    fn from(error: SyntaxError) -> Self {
        Self::new(io::ErrorKind::InvalidData, error)
    }
}

/// A parsing error.
///
/// It is the union of [`SyntaxError`] and [`io::Error`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// I/O error during parsing (file not found...).
    #[error(transparent)]
    Io(#[from] io::Error),
    /// An error in the file syntax.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl From<ParseError> for io::Error {
    #[inline]
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::Syntax(e) => e.into(),
            ParseError::Io(e) => e,
        }
    }
}

/// An error returned by the explicit statement-iterator methods
/// (`next_triple`/`next_quad`).
///
/// Either the iterator is already exhausted or the underlying parse failed.
#[derive(Debug, thiserror::Error)]
pub enum IteratorError {
    /// The iterator has no remaining statement.
    #[error("the statement iterator is exhausted")]
    Exhausted,
    /// The underlying parse failed at the current position.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<SyntaxError> for IteratorError {
    #[inline]
    fn from(error: SyntaxError) -> Self {
        Self::Parse(error.into())
    }
}
