use crate::toolkit::error::{LexError, SyntaxError, TextPosition};
use memchr::memchr2;
use std::cmp::min;
use std::io::{self, Read};
use std::ops::{Range, RangeInclusive};

/// Turns a byte slice into one token.
///
/// Returning `None` means that more data is needed to decide (unless
/// `is_ending` is set, in which case the [`Lexer`] reports an end-of-input
/// error for the leftover bytes).
pub trait TokenRecognizer {
    type Token<'a>
    where
        Self: 'a;

    fn recognize_next_token<'a>(
        &mut self,
        data: &'a [u8],
        is_ending: bool,
    ) -> Option<(usize, Result<Self::Token<'a>, TokenRecognizerError>)>;
}

/// A token-level error with a byte range relative to the token start.
#[derive(Debug)]
pub struct TokenRecognizerError {
    pub position: Range<usize>,
    pub error: LexError,
}

impl From<(Range<usize>, LexError)> for TokenRecognizerError {
    fn from((position, error): (Range<usize>, LexError)) -> Self {
        Self { position, error }
    }
}

#[allow(clippy::range_plus_one)]
impl From<(RangeInclusive<usize>, LexError)> for TokenRecognizerError {
    fn from((position, error): (RangeInclusive<usize>, LexError)) -> Self {
        (*position.start()..*position.end() + 1, error).into()
    }
}

impl From<(usize, LexError)> for TokenRecognizerError {
    fn from((position, error): (usize, LexError)) -> Self {
        (position..=position, error).into()
    }
}

/// Either a proper token or the end of a line.
///
/// Line jumps are significant in line-oriented formats: the statement
/// terminator must be the last token of its line.
#[derive(Debug, Eq, PartialEq)]
pub enum TokenOrLineJump<T> {
    Token(T),
    LineJump,
}

pub struct Lexer<R: TokenRecognizer> {
    parser: R,
    data: Vec<u8>,
    start: usize,
    is_ending: bool,
    position: TextPosition,
    previous_position: TextPosition,
    min_buffer_size: usize,
    max_buffer_size: usize,
    line_comment_start: Option<&'static [u8]>,
}

impl<R: TokenRecognizer> Lexer<R> {
    pub fn new(
        parser: R,
        min_buffer_size: usize,
        max_buffer_size: usize,
        line_comment_start: Option<&'static [u8]>,
    ) -> Self {
        Self {
            parser,
            data: Vec::new(),
            start: 0,
            is_ending: false,
            position: TextPosition::START,
            previous_position: TextPosition::START,
            min_buffer_size,
            max_buffer_size,
            line_comment_start,
        }
    }

    pub fn extend_from_slice(&mut self, other: &[u8]) {
        self.shrink_data();
        self.data.extend_from_slice(other);
    }

    #[inline]
    pub fn end(&mut self) {
        self.is_ending = true;
    }

    pub fn extend_from_read(&mut self, read: &mut impl Read) -> io::Result<()> {
        self.shrink_data();
        if self.data.len() == self.max_buffer_size {
            return Err(io::Error::new(
                io::ErrorKind::OutOfMemory,
                format!(
                    "Reached the buffer maximal size of {}",
                    self.max_buffer_size
                ),
            ));
        }
        let min_end = min(self.data.len() + self.min_buffer_size, self.max_buffer_size);
        let new_start = self.data.len();
        self.data.resize(min_end, 0);
        if self.data.len() < self.data.capacity() {
            // We keep extending to have as much space as available without reallocation
            self.data.resize(self.data.capacity(), 0);
        }
        let read = read.read(&mut self.data[new_start..])?;
        self.data.truncate(new_start + read);
        self.is_ending = read == 0;
        Ok(())
    }

    pub fn read_next(
        &mut self,
    ) -> Option<Result<TokenOrLineJump<R::Token<'_>>, SyntaxError>> {
        self.skip_whitespaces_and_comments()?;
        self.previous_position = self.position;
        match self.data.get(self.start) {
            Some(b'\n') => {
                self.consume_line_jump(1);
                return Some(Ok(TokenOrLineJump::LineJump));
            }
            Some(b'\r') => {
                return if self.data.get(self.start + 1) == Some(&b'\n') {
                    self.consume_line_jump(2);
                    Some(Ok(TokenOrLineJump::LineJump))
                } else if self.data.len() > self.start + 1 || self.is_ending {
                    self.consume_line_jump(1);
                    Some(Ok(TokenOrLineJump::LineJump))
                } else {
                    None // We don't know yet if a \n follows
                };
            }
            _ => (),
        }
        let token_start = self.start;
        let old_position = self.position;
        let Some((consumed, result)) = self
            .parser
            .recognize_next_token(&self.data[self.start..], self.is_ending)
        else {
            return if self.is_ending {
                if self.start == self.data.len() {
                    None // We have finished
                } else {
                    self.position =
                        advance_position(self.position, &self.data[self.start..]);
                    self.start = self.data.len(); // We consume everything
                    Some(Err(SyntaxError::new(
                        old_position..self.position,
                        LexError::UnexpectedEndOfInput,
                    )))
                }
            } else {
                None
            };
        };
        debug_assert!(
            consumed > 0,
            "The lexer must consume at least one byte each time"
        );
        debug_assert!(
            self.start + consumed <= self.data.len(),
            "The lexer tried to consumed {consumed} bytes but only {} bytes are readable",
            self.data.len() - self.start
        );
        self.position = advance_position(
            old_position,
            &self.data[token_start..token_start + consumed],
        );
        self.start += consumed;
        Some(match result {
            Ok(token) => Ok(TokenOrLineJump::Token(token)),
            Err(e) => {
                let error_start = min(e.position.start, consumed);
                let error_end = min(e.position.end.max(error_start), consumed);
                let location_start = advance_position(
                    old_position,
                    &self.data[token_start..token_start + error_start],
                );
                let location_end = advance_position(
                    location_start,
                    &self.data[token_start + error_start..token_start + error_end],
                );
                Err(SyntaxError::new(location_start..location_end, e.error))
            }
        })
    }

    pub fn is_end(&self) -> bool {
        self.is_ending && self.data.len() == self.start
    }

    /// Location of the last token (or line jump) returned by [`read_next`](Self::read_next).
    pub fn last_token_location(&self) -> Range<TextPosition> {
        self.previous_position..self.position
    }

    fn consume_line_jump(&mut self, len: usize) {
        self.start += len;
        self.position.line += 1;
        self.position.column = 1;
        self.position.offset += len as u64;
    }

    fn skip_whitespaces_and_comments(&mut self) -> Option<()> {
        loop {
            self.skip_whitespaces();

            let buf = &self.data[self.start..];
            if let Some(line_comment_start) = self.line_comment_start {
                if buf.starts_with(line_comment_start) {
                    // Comment, ends at the line jump which is kept as a token
                    if let Some(end) = memchr2(b'\r', b'\n', &buf[line_comment_start.len()..]) {
                        let len = end + line_comment_start.len();
                        self.position = advance_position(
                            self.position,
                            &self.data[self.start..self.start + len],
                        );
                        self.start += len;
                        continue;
                    }
                    if self.is_ending {
                        self.position =
                            advance_position(self.position, &self.data[self.start..]);
                        self.start = self.data.len(); // EOF
                        return Some(());
                    }
                    return None; // We need more data
                }
            }
            return Some(());
        }
    }

    fn skip_whitespaces(&mut self) {
        for (i, c) in self.data[self.start..].iter().enumerate() {
            if !matches!(c, b' ' | b'\t') {
                self.start += i;
                self.position.column += i as u64;
                self.position.offset += i as u64;
                return;
            }
        }
        // We only have whitespaces
        let len = self.data.len() - self.start;
        self.position.column += len as u64;
        self.position.offset += len as u64;
        self.start = self.data.len();
    }

    fn shrink_data(&mut self) {
        if self.start > 0 {
            self.data.copy_within(self.start.., 0);
            self.data.truncate(self.data.len() - self.start);
            self.start = 0;
        }
    }
}

/// Advances `position` over `data`, counting line jumps and code points.
fn advance_position(mut position: TextPosition, data: &[u8]) -> TextPosition {
    for (i, c) in data.iter().enumerate() {
        match c {
            b'\n' => {
                position.line += 1;
                position.column = 1;
            }
            b'\r' => {
                // \r\n counts once, at the \n
                if data.get(i + 1) != Some(&b'\n') {
                    position.line += 1;
                    position.column = 1;
                }
            }
            c => {
                // Only count UTF-8 leading bytes
                if *c & 0xC0 != 0x80 {
                    position.column += 1;
                }
            }
        }
        position.offset += 1;
    }
    position
}
