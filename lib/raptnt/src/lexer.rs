use crate::toolkit::{LexError, TokenRecognizer, TokenRecognizerError};
use memchr::memchr2;
use oxiri::Iri;
use std::ops::Range;
use std::str;

#[derive(Debug, PartialEq, Eq)]
pub enum NtToken<'a> {
    IriRef(String),
    BlankNodeLabel(&'a str),
    String(String),
    LangTag(&'a str),
    Punctuation(&'static str),
}

/// Tokenizer for the N-Triples and N-Quads term productions.
///
/// Whitespace, comments and line jumps are handled by the surrounding
/// [`Lexer`](crate::toolkit::Lexer); this recognizer only ever sees data
/// starting at a term.
pub struct NtLexer {
    lenient: bool,
}

impl NtLexer {
    pub fn new(lenient: bool) -> Self {
        Self { lenient }
    }
}

impl TokenRecognizer for NtLexer {
    type Token<'a> = NtToken<'a>;

    fn recognize_next_token<'a>(
        &mut self,
        data: &'a [u8],
        is_ending: bool,
    ) -> Option<(usize, Result<NtToken<'a>, TokenRecognizerError>)> {
        match *data.first()? {
            b'<' => self.recognize_iri(data, is_ending),
            b'_' => match data.get(1) {
                Some(b':') => Self::recognize_blank_node_label(data, is_ending),
                Some(c) => Some((
                    1,
                    Err((1, LexError::UnexpectedCharacter(char::from(*c))).into()),
                )),
                None => {
                    is_ending.then(|| (1, Err((0, LexError::UnexpectedEndOfInput).into())))
                }
            },
            b'"' => Self::recognize_string(data, is_ending),
            b'@' => Self::recognize_lang_tag(data, is_ending),
            b'.' => Some((1, Ok(NtToken::Punctuation(".")))),
            b'^' => match data.get(1) {
                Some(b'^') => Some((2, Ok(NtToken::Punctuation("^^")))),
                Some(_) => Some((1, Err((0, LexError::UnexpectedCharacter('^')).into()))),
                None => is_ending.then(|| (1, Err((0, LexError::UnexpectedCharacter('^')).into()))),
            },
            c => Self::recognize_unexpected_char(data, c, is_ending),
        }
    }
}

impl NtLexer {
    fn recognize_iri(
        &self,
        data: &[u8],
        is_ending: bool,
    ) -> Option<(usize, Result<NtToken<'static>, TokenRecognizerError>)> {
        // IRIREF delimited by '<' and '>', escapes decoded, no raw line jumps
        let mut string = Vec::new();
        let mut i = 1;
        loop {
            let Some(end) = memchr2(b'>', b'\\', &data[i..]) else {
                if let Some(line_jump) = memchr2(b'\n', b'\r', &data[i..]) {
                    return Some((
                        i + line_jump,
                        Err((0..i + line_jump, LexError::UnterminatedIri).into()),
                    ));
                }
                return is_ending.then(|| {
                    (
                        data.len(),
                        Err((0..data.len(), LexError::UnterminatedIri).into()),
                    )
                });
            };
            if let Some(line_jump) = memchr2(b'\n', b'\r', &data[i..i + end]) {
                return Some((
                    i + line_jump,
                    Err((0..i + line_jump, LexError::UnterminatedIri).into()),
                ));
            }
            string.extend_from_slice(&data[i..i + end]);
            i += end;
            match data[i] {
                b'>' => return Some((i + 1, self.parse_iri(string, 0..i + 1))),
                b'\\' => {
                    let (additional, c) = Self::recognize_escape(&data[i..], i, is_ending)?;
                    i += additional + 1;
                    match c {
                        Ok(c) => {
                            let mut buf = [0; 4];
                            string.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                        }
                        Err(e) => return Some((i, Err(e))),
                    }
                }
                _ => unreachable!(),
            }
        }
    }

    fn parse_iri(
        &self,
        iri: Vec<u8>,
        position: Range<usize>,
    ) -> Result<NtToken<'static>, TokenRecognizerError> {
        let iri = String::from_utf8(iri)
            .map_err(|_| TokenRecognizerError::from((position.clone(), LexError::InvalidUtf8)))?;
        Ok(NtToken::IriRef(if self.lenient {
            iri
        } else {
            Iri::parse(iri)
                .map_err(|e| {
                    TokenRecognizerError::from((position, LexError::InvalidIri(e.to_string())))
                })?
                .into_inner()
        }))
    }

    fn recognize_blank_node_label(
        data: &[u8],
        is_ending: bool,
    ) -> Option<(usize, Result<NtToken<'_>, TokenRecognizerError>)> {
        // '_:' followed by [A-Za-z0-9_:.-]+ not starting with '.'.
        // A trailing '.' is the statement terminator, not part of the label.
        let mut i = 2;
        loop {
            match data.get(i) {
                Some(b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b':' | b'.' | b'-') => i += 1,
                None if !is_ending => return None,
                _ => break,
            }
        }
        while i > 2 && data[i - 1] == b'.' {
            i -= 1;
        }
        if i == 2 {
            return Some((
                2,
                Err((0..2, LexError::InvalidBlankNodeLabel(String::new())).into()),
            ));
        }
        if data[2] == b'.' {
            let label = str::from_utf8(&data[2..i]).unwrap_or_default().to_owned();
            return Some((i, Err((0..i, LexError::InvalidBlankNodeLabel(label)).into())));
        }
        match str::from_utf8(&data[2..i]) {
            Ok(label) => Some((i, Ok(NtToken::BlankNodeLabel(label)))),
            Err(_) => Some((i, Err((2..i, LexError::InvalidUtf8).into()))),
        }
    }

    fn recognize_string(
        data: &[u8],
        is_ending: bool,
    ) -> Option<(usize, Result<NtToken<'static>, TokenRecognizerError>)> {
        // STRING_LITERAL_QUOTE with the same escapes as IRIs, no raw line jumps
        let mut string = String::new();
        let mut i = 1;
        loop {
            let Some(end) = memchr2(b'"', b'\\', &data[i..]) else {
                if let Some(line_jump) = memchr2(b'\n', b'\r', &data[i..]) {
                    return Some((
                        i + line_jump,
                        Err((0..i + line_jump, LexError::UnterminatedLiteral).into()),
                    ));
                }
                return is_ending.then(|| {
                    (
                        data.len(),
                        Err((0..data.len(), LexError::UnterminatedLiteral).into()),
                    )
                });
            };
            if let Some(line_jump) = memchr2(b'\n', b'\r', &data[i..i + end]) {
                return Some((
                    i + line_jump,
                    Err((0..i + line_jump, LexError::UnterminatedLiteral).into()),
                ));
            }
            match str::from_utf8(&data[i..i + end]) {
                Ok(s) => string.push_str(s),
                Err(_) => return Some((i + end, Err((i..i + end, LexError::InvalidUtf8).into()))),
            }
            i += end;
            match data[i] {
                b'"' => return Some((i + 1, Ok(NtToken::String(string)))),
                b'\\' => {
                    let (additional, c) = Self::recognize_escape(&data[i..], i, is_ending)?;
                    i += additional + 1;
                    match c {
                        Ok(c) => string.push(c),
                        Err(e) => return Some((i, Err(e))),
                    }
                }
                _ => unreachable!(),
            }
        }
    }

    fn recognize_lang_tag(
        data: &[u8],
        is_ending: bool,
    ) -> Option<(usize, Result<NtToken<'_>, TokenRecognizerError>)> {
        // '@' [A-Za-z]+ ('-' [A-Za-z0-9]+)*
        let mut i = 1;
        while let Some(c) = data.get(i) {
            if c.is_ascii_alphabetic() {
                i += 1;
            } else {
                break;
            }
        }
        if data.get(i).is_none() && !is_ending {
            return None; // The tag may continue
        }
        if i == 1 {
            return Some((1, Err((0..1, LexError::InvalidLanguageTag).into())));
        }
        loop {
            match data.get(i) {
                Some(b'-') => {
                    let mut j = i + 1;
                    while let Some(c) = data.get(j) {
                        if c.is_ascii_alphanumeric() {
                            j += 1;
                        } else {
                            break;
                        }
                    }
                    if data.get(j).is_none() && !is_ending {
                        return None;
                    }
                    if j == i + 1 {
                        return Some((j, Err((0..j, LexError::InvalidLanguageTag).into())));
                    }
                    i = j;
                }
                _ => break,
            }
        }
        match str::from_utf8(&data[1..i]) {
            Ok(tag) => Some((i, Ok(NtToken::LangTag(tag)))),
            Err(_) => Some((i, Err((1..i, LexError::InvalidUtf8).into()))),
        }
    }

    fn recognize_escape(
        data: &[u8],
        position: usize,
        is_ending: bool,
    ) -> Option<(usize, Result<char, TokenRecognizerError>)> {
        // The fixed escape set: \t \n \r \" \\ plus \uXXXX and \UXXXXXXXX
        match data.get(1) {
            Some(b't') => Some((1, Ok('\t'))),
            Some(b'n') => Some((1, Ok('\n'))),
            Some(b'r') => Some((1, Ok('\r'))),
            Some(b'"') => Some((1, Ok('"'))),
            Some(b'\\') => Some((1, Ok('\\'))),
            Some(b'u') => match Self::recognize_hex_char(&data[2..], 4, 'u', position) {
                Ok(c) => Some((5, Ok(c?))),
                Err(e) => Some((5, Err(e))),
            },
            Some(b'U') => match Self::recognize_hex_char(&data[2..], 8, 'U', position) {
                Ok(c) => Some((9, Ok(c?))),
                Err(e) => Some((9, Err(e))),
            },
            Some(c) => Some((
                1,
                Err((
                    position..position + 2,
                    LexError::InvalidEscape(format!("\\{}", char::from(*c))),
                )
                    .into()),
            )),
            None => is_ending
                .then(|| (0, Err((position..position + 1, LexError::UnexpectedEndOfInput).into()))),
        }
    }

    fn recognize_hex_char(
        data: &[u8],
        len: usize,
        escape_char: char,
        position: usize,
    ) -> Result<Option<char>, TokenRecognizerError> {
        if data.len() < len {
            return Ok(None);
        }
        let mut codepoint = 0_u32;
        for (i, &c) in data[..len].iter().enumerate() {
            codepoint = codepoint * 16
                + u32::from(match c {
                    b'0'..=b'9' => c - b'0',
                    b'a'..=b'f' => c - b'a' + 10,
                    b'A'..=b'F' => c - b'A' + 10,
                    _ => {
                        let val = str::from_utf8(&data[..len]).unwrap_or_default();
                        return Err((
                            position + i + 2..position + i + 3,
                            LexError::InvalidEscape(format!("\\{escape_char}{val}")),
                        )
                            .into());
                    }
                });
        }
        let c = char::from_u32(codepoint).ok_or_else(|| {
            let val = str::from_utf8(&data[..len]).unwrap_or_default();
            TokenRecognizerError::from((
                position..position + len + 2,
                LexError::InvalidEscape(format!("\\{escape_char}{val}")),
            ))
        })?;
        Ok(Some(c))
    }

    fn recognize_unexpected_char(
        data: &[u8],
        first: u8,
        is_ending: bool,
    ) -> Option<(usize, Result<NtToken<'static>, TokenRecognizerError>)> {
        if first.is_ascii() {
            return Some((
                1,
                Err((0, LexError::UnexpectedCharacter(char::from(first))).into()),
            ));
        }
        let len = match first {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Some((1, Err((0, LexError::InvalidUtf8).into()))),
        };
        if data.len() < len {
            return is_ending.then(|| (data.len(), Err((0..data.len(), LexError::InvalidUtf8).into())));
        }
        match str::from_utf8(&data[..len]) {
            Ok(s) => {
                let c = s.chars().next()?;
                Some((len, Err((0..len, LexError::UnexpectedCharacter(c)).into())))
            }
            Err(_) => Some((1, Err((0, LexError::InvalidUtf8).into()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_one(data: &[u8]) -> (usize, Result<NtToken<'_>, TokenRecognizerError>) {
        NtLexer::new(false)
            .recognize_next_token(data, true)
            .expect("token expected")
    }

    #[test]
    fn iri_with_escapes() {
        let (consumed, token) = lex_one(b"<http://example.com/\\u0041> ");
        assert_eq!(consumed, "<http://example.com/\\u0041>".len());
        assert_eq!(token.unwrap(), NtToken::IriRef("http://example.com/A".into()));
    }

    #[test]
    fn iri_must_be_absolute() {
        let (_, token) = lex_one(b"<foo>");
        assert!(matches!(token.unwrap_err().error, LexError::InvalidIri(_)));
    }

    #[test]
    fn string_with_escapes() {
        let (_, token) = lex_one(b"\"a\\tb\\\"c\\U0001F600\"");
        assert_eq!(
            token.unwrap(),
            NtToken::String("a\tb\"c\u{1F600}".into())
        );
    }

    #[test]
    fn invalid_escape_in_string() {
        let (_, token) = lex_one(b"\"a\\qb\"");
        assert_eq!(
            token.unwrap_err().error,
            LexError::InvalidEscape("\\q".into())
        );
    }

    #[test]
    fn unterminated_string() {
        let (_, token) = lex_one(b"\"abc\ndef");
        assert_eq!(token.unwrap_err().error, LexError::UnterminatedLiteral);
    }

    #[test]
    fn blank_node_trailing_dot_is_not_part_of_the_label() {
        let (consumed, token) = lex_one(b"_:abc. ");
        assert_eq!(consumed, 5);
        assert_eq!(token.unwrap(), NtToken::BlankNodeLabel("abc"));
    }

    #[test]
    fn blank_node_label_must_not_start_with_a_dot() {
        let (_, token) = lex_one(b"_:.abc ");
        assert_eq!(
            token.unwrap_err().error,
            LexError::InvalidBlankNodeLabel(".abc".into())
        );
    }

    #[test]
    fn lang_tag_with_subtags() {
        let (consumed, token) = lex_one(b"@en-US-1 .");
        assert_eq!(consumed, 8);
        assert_eq!(token.unwrap(), NtToken::LangTag("en-US-1"));
    }

    #[test]
    fn lang_tag_must_start_with_a_letter() {
        let (_, token) = lex_one(b"@1 ");
        assert_eq!(token.unwrap_err().error, LexError::InvalidLanguageTag);
    }

    #[test]
    fn unexpected_character() {
        let (_, token) = lex_one(b"( ");
        assert_eq!(token.unwrap_err().error, LexError::UnexpectedCharacter('('));
    }
}
