//! A [N-Triples](https://www.w3.org/TR/n-triples/) streaming parser implemented by [`NTriplesParser`]
//! and a canonical serializer implemented by [`NTriplesSerializer`].

use crate::line_formats::NQuadsRecognizer;
use crate::toolkit::{
    FromReadIterator, FromSliceIterator, IteratorError, ParseError, Parser, SyntaxError,
};
use raptrdf::Triple;
use std::io::{self, Read, Write};

/// A [N-Triples](https://www.w3.org/TR/n-triples/) streaming parser.
///
/// The parse is strict and fatal: the first malformed line terminates
/// iteration with an error naming its 1-based line number, and nothing after
/// that point is produced. To resume, build a new parser over the input past
/// the failing line.
///
/// Count the number of people:
/// ```
/// use raptrdf::{NamedNodeRef, vocab::rdf};
/// use raptnt::NTriplesParser;
///
/// let file = b"<http://example.com/foo> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .
/// <http://example.com/foo> <http://schema.org/name> \"Foo\" .
/// <http://example.com/bar> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .
/// <http://example.com/bar> <http://schema.org/name> \"Bar\" .";
///
/// let schema_person = NamedNodeRef::new("http://schema.org/Person")?;
/// let mut count = 0;
/// for triple in NTriplesParser::new().parse_read(file.as_ref()) {
///     let triple = triple?;
///     if triple.predicate == rdf::TYPE && triple.object == schema_person.into_owned().into() {
///         count += 1;
///     }
/// }
/// assert_eq!(2, count);
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default, Clone)]
#[must_use]
pub struct NTriplesParser {
    lenient: bool,
}

impl NTriplesParser {
    /// Builds a new [`NTriplesParser`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips IRI validation, assuming the file only contains valid absolute IRIs.
    ///
    /// Note that if the file is actually not valid, broken RDF might be emitted by the parser.
    #[inline]
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// Parses a N-Triples file from a [`Read`] implementation, reading it chunk by chunk.
    ///
    /// The reader is owned until the returned iterator is dropped, and each
    /// call to `next` may block on it.
    pub fn parse_read<R: Read>(self, read: R) -> FromReadNTriplesReader<R> {
        FromReadNTriplesReader {
            inner: NQuadsRecognizer::new_parser(false, self.lenient).parse_read(read),
            peeked: None,
        }
    }

    /// Parses a N-Triples file from a byte slice already fully in memory.
    pub fn parse_slice(self, slice: &[u8]) -> FromSliceNTriplesReader {
        FromSliceNTriplesReader {
            inner: NQuadsRecognizer::new_parser(false, self.lenient).parse_slice(slice),
            peeked: None,
        }
    }

    /// Allows to parse a N-Triples file by using a low-level API.
    ///
    /// ```
    /// use raptnt::NTriplesParser;
    ///
    /// let file: [&[u8]; 2] = [
    ///     b"<http://example.com/foo> <http://schema.org/name> \"Foo\" .\n",
    ///     b"<http://example.com/bar> <http://schema.org/name> \"Bar\" .\n",
    /// ];
    ///
    /// let mut count = 0;
    /// let mut parser = NTriplesParser::new().parse();
    /// let mut file_chunks = file.iter();
    /// while !parser.is_end() {
    ///     // We feed more data to the parser
    ///     if let Some(chunk) = file_chunks.next() {
    ///         parser.extend_from_slice(chunk);
    ///     } else {
    ///         parser.end(); // It's finished
    ///     }
    ///     // We read as many triples from the parser as possible
    ///     while let Some(triple) = parser.read_next() {
    ///         triple?;
    ///         count += 1;
    ///     }
    /// }
    /// assert_eq!(2, count);
    /// # Result::<_,Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn parse(self) -> LowLevelNTriplesReader {
        LowLevelNTriplesReader {
            parser: NQuadsRecognizer::new_parser(false, self.lenient),
        }
    }
}

/// Parses a N-Triples file from a [`Read`] implementation. Can be built using [`NTriplesParser::parse_read`].
#[must_use]
pub struct FromReadNTriplesReader<R: Read> {
    inner: FromReadIterator<R, NQuadsRecognizer>,
    peeked: Option<Option<Result<Triple, ParseError>>>,
}

impl<R: Read> FromReadNTriplesReader<R> {
    /// Non-destructive lookahead: returns `true` while a statement or an error remains to be read.
    pub fn has_next(&mut self) -> bool {
        if self.peeked.is_none() {
            let next = self.inner.next().map(|r| r.map(Triple::from));
            self.peeked = Some(next);
        }
        matches!(self.peeked, Some(Some(_)))
    }

    /// Reads the next triple, failing with [`IteratorError::Exhausted`] past the end of the input.
    pub fn next_triple(&mut self) -> Result<Triple, IteratorError> {
        match self.next() {
            Some(Ok(triple)) => Ok(triple),
            Some(Err(e)) => Err(e.into()),
            None => Err(IteratorError::Exhausted),
        }
    }
}

impl<R: Read> Iterator for FromReadNTriplesReader<R> {
    type Item = Result<Triple, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(peeked) = self.peeked.take() {
            return peeked;
        }
        Some(self.inner.next()?.map(Triple::from))
    }
}

/// Parses a N-Triples file from a byte slice. Can be built using [`NTriplesParser::parse_slice`].
#[must_use]
pub struct FromSliceNTriplesReader {
    inner: FromSliceIterator<NQuadsRecognizer>,
    peeked: Option<Option<Result<Triple, SyntaxError>>>,
}

impl FromSliceNTriplesReader {
    /// Non-destructive lookahead: returns `true` while a statement or an error remains to be read.
    pub fn has_next(&mut self) -> bool {
        if self.peeked.is_none() {
            let next = self.inner.next().map(|r| r.map(Triple::from));
            self.peeked = Some(next);
        }
        matches!(self.peeked, Some(Some(_)))
    }

    /// Reads the next triple, failing with [`IteratorError::Exhausted`] past the end of the input.
    pub fn next_triple(&mut self) -> Result<Triple, IteratorError> {
        match self.next() {
            Some(Ok(triple)) => Ok(triple),
            Some(Err(e)) => Err(e.into()),
            None => Err(IteratorError::Exhausted),
        }
    }
}

impl Iterator for FromSliceNTriplesReader {
    type Item = Result<Triple, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(peeked) = self.peeked.take() {
            return peeked;
        }
        Some(self.inner.next()?.map(Triple::from))
    }
}

/// Parses a N-Triples file by using a low-level API. Can be built using [`NTriplesParser::parse`].
pub struct LowLevelNTriplesReader {
    parser: Parser<NQuadsRecognizer>,
}

impl LowLevelNTriplesReader {
    /// Adds some extra bytes to the parser. Should be called when [`read_next`](Self::read_next) returns [`None`] and there is still unread data.
    pub fn extend_from_slice(&mut self, other: &[u8]) {
        self.parser.extend_from_slice(other);
    }

    /// Tell the parser that the file is finished.
    ///
    /// This triggers the parsing of the final bytes and might lead [`read_next`](Self::read_next) to return some extra values.
    pub fn end(&mut self) {
        self.parser.end();
    }

    /// Returns if the parsing is finished i.e. [`end`](Self::end) has been called and [`read_next`](Self::read_next) is always going to return `None`.
    pub fn is_end(&self) -> bool {
        self.parser.is_end()
    }

    /// Attempt to parse a new triple from the already provided data.
    ///
    /// Returns [`None`] if the parsing is finished or more data is required.
    /// If it is the case more data should be fed using [`extend_from_slice`](Self::extend_from_slice).
    pub fn read_next(&mut self) -> Option<Result<Triple, SyntaxError>> {
        Some(self.parser.read_next()?.map(Triple::from))
    }
}

/// A [canonical](https://www.w3.org/TR/n-triples/#canonical-ntriples) [N-Triples](https://www.w3.org/TR/n-triples/) serializer.
///
/// ```
/// use raptrdf::{NamedNode, Triple};
/// use raptnt::NTriplesSerializer;
///
/// let mut writer = NTriplesSerializer::new().serialize_to_write(Vec::new());
/// writer.write_triple(&Triple::new(
///     NamedNode::new("http://example.com#me")?,
///     NamedNode::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type")?,
///     NamedNode::new("http://schema.org/Person")?,
/// ))?;
/// assert_eq!(
///     b"<http://example.com#me> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .\n",
///     writer.finish().as_slice()
/// );
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default)]
#[must_use]
pub struct NTriplesSerializer;

impl NTriplesSerializer {
    /// Builds a new [`NTriplesSerializer`].
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Writes a N-Triples file to a [`Write`] implementation.
    pub fn serialize_to_write<W: Write>(self, write: W) -> ToWriteNTriplesWriter<W> {
        ToWriteNTriplesWriter {
            write,
            writer: self.serialize(),
        }
    }

    /// Builds a low-level N-Triples writer.
    #[allow(clippy::unused_self)]
    pub fn serialize(self) -> LowLevelNTriplesWriter {
        LowLevelNTriplesWriter
    }
}

/// Writes a N-Triples file to a [`Write`] implementation. Can be built using [`NTriplesSerializer::serialize_to_write`].
#[must_use]
pub struct ToWriteNTriplesWriter<W: Write> {
    write: W,
    writer: LowLevelNTriplesWriter,
}

impl<W: Write> ToWriteNTriplesWriter<W> {
    /// Writes an extra triple.
    pub fn write_triple(&mut self, t: &Triple) -> io::Result<()> {
        self.writer.write_triple(t, &mut self.write)
    }

    /// Ends the write process and returns the underlying [`Write`].
    pub fn finish(self) -> W {
        self.write
    }
}

/// Writes a N-Triples file by using a low-level API. Can be built using [`NTriplesSerializer::serialize`].
pub struct LowLevelNTriplesWriter;

impl LowLevelNTriplesWriter {
    /// Writes an extra triple.
    #[allow(clippy::unused_self)]
    pub fn write_triple(&mut self, t: &Triple, mut write: impl Write) -> io::Result<()> {
        writeln!(write, "{t} .")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raptrdf::{Literal, NamedNode};

    #[test]
    fn lenient_parsing_keeps_relative_iris() {
        let triples = NTriplesParser::new()
            .lenient()
            .parse_slice(b"<foo> <bar> \"baz\" .")
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(
            triples,
            [Triple::new(
                NamedNode::new_unchecked("foo"),
                NamedNode::new_unchecked("bar"),
                Literal::new_simple_literal("baz"),
            )]
        );
    }

    #[test]
    fn strict_parsing_rejects_relative_iris() {
        let error = NTriplesParser::new()
            .parse_slice(b"<foo> <bar> \"baz\" .")
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert!(matches!(
            error.lex_error(),
            Some(crate::toolkit::LexError::InvalidIri(_))
        ));
    }

    #[test]
    fn fourth_term_is_rejected() {
        let error = NTriplesParser::new()
            .parse_slice(
                b"<http://example.com/s> <http://example.com/p> <http://example.com/o> <http://example.com/g> .",
            )
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert_eq!(
            error.assemble_error(),
            Some(&crate::toolkit::AssembleError::UnexpectedTermCount(4))
        );
    }
}
