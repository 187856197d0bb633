//! A [N-Quads](https://www.w3.org/TR/n-quads/) streaming parser implemented by [`NQuadsParser`]
//! and a canonical serializer implemented by [`NQuadsSerializer`].

use crate::line_formats::NQuadsRecognizer;
use crate::toolkit::{
    FromReadIterator, FromSliceIterator, IteratorError, ParseError, Parser, SyntaxError,
};
use raptrdf::Quad;
use std::io::{self, Read, Write};

/// A [N-Quads](https://www.w3.org/TR/n-quads/) streaming parser.
///
/// The graph name is auto-detected per line: a line carries it as an optional
/// fourth term before the terminating dot, so plain N-Triples input is also
/// accepted and ends up in the default graph.
///
/// ```
/// use raptnt::NQuadsParser;
///
/// let file = b"<http://example.com/s> <http://example.com/p> \"o\" <http://example.com/g> .
/// <http://example.com/s> <http://example.com/p> \"o2\" .";
///
/// let quads = NQuadsParser::new()
///     .parse_slice(file)
///     .collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(2, quads.len());
/// assert!(quads[1].graph_name.is_default_graph());
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default, Clone)]
#[must_use]
pub struct NQuadsParser {
    lenient: bool,
}

impl NQuadsParser {
    /// Builds a new [`NQuadsParser`].
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

    /// Parses a N-Quads file from a [`Read`] implementation, reading it chunk by chunk.
    pub fn parse_read<R: Read>(self, read: R) -> FromReadNQuadsReader<R> {
        FromReadNQuadsReader {
            inner: NQuadsRecognizer::new_parser(true, self.lenient).parse_read(read),
            peeked: None,
        }
    }

    /// Parses a N-Quads file from a byte slice already fully in memory.
    pub fn parse_slice(self, slice: &[u8]) -> FromSliceNQuadsReader {
        FromSliceNQuadsReader {
            inner: NQuadsRecognizer::new_parser(true, self.lenient).parse_slice(slice),
            peeked: None,
        }
    }

    /// Allows to parse a N-Quads file by using a low-level API.
    pub fn parse(self) -> LowLevelNQuadsReader {
        LowLevelNQuadsReader {
            parser: NQuadsRecognizer::new_parser(true, self.lenient),
        }
    }
}

/// Parses a N-Quads file from a [`Read`] implementation. Can be built using [`NQuadsParser::parse_read`].
#[must_use]
pub struct FromReadNQuadsReader<R: Read> {
    inner: FromReadIterator<R, NQuadsRecognizer>,
    peeked: Option<Option<Result<Quad, ParseError>>>,
}

impl<R: Read> FromReadNQuadsReader<R> {
    /// Non-destructive lookahead: returns `true` while a statement or an error remains to be read.
    pub fn has_next(&mut self) -> bool {
        if self.peeked.is_none() {
            let next = self.inner.next();
            self.peeked = Some(next);
        }
        matches!(self.peeked, Some(Some(_)))
    }

    /// Reads the next quad, failing with [`IteratorError::Exhausted`] past the end of the input.
    pub fn next_quad(&mut self) -> Result<Quad, IteratorError> {
        match self.next() {
            Some(Ok(quad)) => Ok(quad),
            Some(Err(e)) => Err(e.into()),
            None => Err(IteratorError::Exhausted),
        }
    }
}

impl<R: Read> Iterator for FromReadNQuadsReader<R> {
    type Item = Result<Quad, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(peeked) = self.peeked.take() {
            return peeked;
        }
        self.inner.next()
    }
}

/// Parses a N-Quads file from a byte slice. Can be built using [`NQuadsParser::parse_slice`].
#[must_use]
pub struct FromSliceNQuadsReader {
    inner: FromSliceIterator<NQuadsRecognizer>,
    peeked: Option<Option<Result<Quad, SyntaxError>>>,
}

impl FromSliceNQuadsReader {
    /// Non-destructive lookahead: returns `true` while a statement or an error remains to be read.
    pub fn has_next(&mut self) -> bool {
        if self.peeked.is_none() {
            let next = self.inner.next();
            self.peeked = Some(next);
        }
        matches!(self.peeked, Some(Some(_)))
    }

    /// Reads the next quad, failing with [`IteratorError::Exhausted`] past the end of the input.
    pub fn next_quad(&mut self) -> Result<Quad, IteratorError> {
        match self.next() {
            Some(Ok(quad)) => Ok(quad),
            Some(Err(e)) => Err(e.into()),
            None => Err(IteratorError::Exhausted),
        }
    }
}

impl Iterator for FromSliceNQuadsReader {
    type Item = Result<Quad, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(peeked) = self.peeked.take() {
            return peeked;
        }
        self.inner.next()
    }
}

/// Parses a N-Quads file by using a low-level API. Can be built using [`NQuadsParser::parse`].
pub struct LowLevelNQuadsReader {
    parser: Parser<NQuadsRecognizer>,
}

impl LowLevelNQuadsReader {
    /// Adds some extra bytes to the parser. Should be called when [`read_next`](Self::read_next) returns [`None`] and there is still unread data.
    pub fn extend_from_slice(&mut self, other: &[u8]) {
        self.parser.extend_from_slice(other);
    }

    /// Tell the parser that the file is finished.
    pub fn end(&mut self) {
        self.parser.end();
    }

    /// Returns if the parsing is finished.
    pub fn is_end(&self) -> bool {
        self.parser.is_end()
    }

    /// Attempt to parse a new quad from the already provided data.
    pub fn read_next(&mut self) -> Option<Result<Quad, SyntaxError>> {
        self.parser.read_next()
    }
}

/// A [canonical](https://www.w3.org/TR/n-quads/#canonical-nquads) [N-Quads](https://www.w3.org/TR/n-quads/) serializer.
///
/// ```
/// use raptrdf::{NamedNode, Quad};
/// use raptnt::NQuadsSerializer;
///
/// let mut writer = NQuadsSerializer::new().serialize_to_write(Vec::new());
/// writer.write_quad(&Quad::new(
///     NamedNode::new("http://example.com#me")?,
///     NamedNode::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type")?,
///     NamedNode::new("http://schema.org/Person")?,
///     NamedNode::new("http://example.com")?,
/// ))?;
/// assert_eq!(
///     b"<http://example.com#me> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> <http://example.com> .\n",
///     writer.finish().as_slice()
/// );
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Default)]
#[must_use]
pub struct NQuadsSerializer;

impl NQuadsSerializer {
    /// Builds a new [`NQuadsSerializer`].
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Writes a N-Quads file to a [`Write`] implementation.
    pub fn serialize_to_write<W: Write>(self, write: W) -> ToWriteNQuadsWriter<W> {
        ToWriteNQuadsWriter {
            write,
            writer: self.serialize(),
        }
    }

    /// Builds a low-level N-Quads writer.
    #[allow(clippy::unused_self)]
    pub fn serialize(self) -> LowLevelNQuadsWriter {
        LowLevelNQuadsWriter
    }
}

/// Writes a N-Quads file to a [`Write`] implementation. Can be built using [`NQuadsSerializer::serialize_to_write`].
#[must_use]
pub struct ToWriteNQuadsWriter<W: Write> {
    write: W,
    writer: LowLevelNQuadsWriter,
}

impl<W: Write> ToWriteNQuadsWriter<W> {
    /// Writes an extra quad.
    pub fn write_quad(&mut self, q: &Quad) -> io::Result<()> {
        self.writer.write_quad(q, &mut self.write)
    }

    /// Ends the write process and returns the underlying [`Write`].
    pub fn finish(self) -> W {
        self.write
    }
}

/// Writes a N-Quads file by using a low-level API. Can be built using [`NQuadsSerializer::serialize`].
pub struct LowLevelNQuadsWriter;

impl LowLevelNQuadsWriter {
    /// Writes an extra quad.
    #[allow(clippy::unused_self)]
    pub fn write_quad(&mut self, q: &Quad, mut write: impl Write) -> io::Result<()> {
        writeln!(write, "{q} .")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raptrdf::{GraphName, Literal, NamedNode};

    #[test]
    fn graph_name_is_auto_detected() {
        let quads = NQuadsParser::new()
            .parse_slice(
                b"<http://example.com/s> <http://example.com/p> \"1\" <http://example.com/g> .\n<http://example.com/s> <http://example.com/p> \"2\" .\n",
            )
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(
            quads,
            [
                Quad::new(
                    NamedNode::new_unchecked("http://example.com/s"),
                    NamedNode::new_unchecked("http://example.com/p"),
                    Literal::new_simple_literal("1"),
                    NamedNode::new_unchecked("http://example.com/g"),
                ),
                Quad::new(
                    NamedNode::new_unchecked("http://example.com/s"),
                    NamedNode::new_unchecked("http://example.com/p"),
                    Literal::new_simple_literal("2"),
                    GraphName::DefaultGraph,
                ),
            ]
        );
    }

    #[test]
    fn literal_graph_name_is_rejected() {
        let error = NQuadsParser::new()
            .parse_slice(b"<http://example.com/s> <http://example.com/p> \"1\" \"g\" .")
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert_eq!(
            error.assemble_error(),
            Some(&crate::toolkit::AssembleError::InvalidTermPosition {
                position: "graph name",
                expected: "an IRI or a blank node",
            })
        );
    }
}
