use crate::toolkit::error::{AssembleError, ParseError, SyntaxError};
use crate::toolkit::lexer::{Lexer, TokenOrLineJump, TokenRecognizer};
use std::io::Read;

/// Assembles tokens into statements.
///
/// The recognizer is a state machine: each call to [`recognize_next`](Self::recognize_next)
/// consumes the current state and returns the next one, pushing completed
/// statements to `results` and statement-shape violations to `errors`.
pub trait RuleRecognizer: Sized {
    type TokenRecognizer: TokenRecognizer;
    type Output;
    type Context;

    fn recognize_next(
        self,
        token: TokenOrLineJump<<Self::TokenRecognizer as TokenRecognizer>::Token<'_>>,
        context: &mut Self::Context,
        results: &mut Vec<Self::Output>,
        errors: &mut Vec<RuleRecognizerError>,
    ) -> Self;

    fn recognize_end(
        self,
        context: &mut Self::Context,
        results: &mut Vec<Self::Output>,
        errors: &mut Vec<RuleRecognizerError>,
    );
}

/// A statement-level error raised by a [`RuleRecognizer`].
pub struct RuleRecognizerError {
    pub error: AssembleError,
}

impl From<AssembleError> for RuleRecognizerError {
    fn from(error: AssembleError) -> Self {
        Self { error }
    }
}

/// A pull parser over a [`Lexer`] and a [`RuleRecognizer`].
///
/// Errors are fatal: after the first one, [`read_next`](Self::read_next)
/// always returns `None`. The caller that wants to resume must build a new
/// parser over the input past the failing line.
pub struct Parser<RR: RuleRecognizer> {
    lexer: Lexer<RR::TokenRecognizer>,
    state: Option<RR>,
    context: RR::Context,
    results: Vec<RR::Output>,
    errors: Vec<RuleRecognizerError>,
    failed: bool,
}

impl<RR: RuleRecognizer> Parser<RR> {
    pub fn new(lexer: Lexer<RR::TokenRecognizer>, recognizer: RR, context: RR::Context) -> Self {
        Self {
            lexer,
            state: Some(recognizer),
            context,
            results: vec![],
            errors: vec![],
            failed: false,
        }
    }

    pub fn extend_from_slice(&mut self, other: &[u8]) {
        self.lexer.extend_from_slice(other);
    }

    #[inline]
    pub fn end(&mut self) {
        self.lexer.end();
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.failed
            || (self.state.is_none() && self.results.is_empty() && self.errors.is_empty())
    }

    pub fn read_next(&mut self) -> Option<Result<RR::Output, SyntaxError>> {
        loop {
            if self.failed {
                return None;
            }
            if let Some(error) = self.errors.pop() {
                self.failed = true;
                self.state = None;
                return Some(Err(SyntaxError::new(
                    self.lexer.last_token_location(),
                    error.error,
                )));
            }
            if let Some(result) = self.results.pop() {
                return Some(Ok(result));
            }
            if let Some(result) = self.lexer.read_next() {
                match result {
                    Ok(token) => {
                        self.state = self.state.take().map(|state| {
                            state.recognize_next(
                                token,
                                &mut self.context,
                                &mut self.results,
                                &mut self.errors,
                            )
                        });
                        continue;
                    }
                    Err(e) => {
                        self.failed = true;
                        self.state = None;
                        return Some(Err(e));
                    }
                }
            }
            if self.lexer.is_end() {
                self.state.take()?.recognize_end(
                    &mut self.context,
                    &mut self.results,
                    &mut self.errors,
                );
            } else {
                return None;
            }
        }
    }

    pub fn parse_read<R: Read>(self, read: R) -> FromReadIterator<R, RR> {
        FromReadIterator { read, parser: self }
    }

    pub fn parse_slice(mut self, slice: &[u8]) -> FromSliceIterator<RR> {
        self.extend_from_slice(slice);
        self.end();
        FromSliceIterator { parser: self }
    }
}

/// Parses a file from a [`Read`] implementation, reading it chunk by chunk.
pub struct FromReadIterator<R: Read, RR: RuleRecognizer> {
    read: R,
    parser: Parser<RR>,
}

impl<R: Read, RR: RuleRecognizer> Iterator for FromReadIterator<R, RR> {
    type Item = Result<RR::Output, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.parser.is_end() {
            if let Some(result) = self.parser.read_next() {
                return Some(result.map_err(ParseError::Syntax));
            }
            if let Err(e) = self.parser.lexer.extend_from_read(&mut self.read) {
                self.parser.failed = true;
                return Some(Err(e.into()));
            }
        }
        None
    }
}

/// Parses a file from a byte slice already fully in memory.
pub struct FromSliceIterator<RR: RuleRecognizer> {
    parser: Parser<RR>,
}

impl<RR: RuleRecognizer> Iterator for FromSliceIterator<RR> {
    type Item = Result<RR::Output, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.read_next()
    }
}
