//! Raptnt provides streaming parsers and canonical serializers for the
//! line-oriented RDF serializations [N-Triples](https://www.w3.org/TR/n-triples/)
//! and [N-Quads](https://www.w3.org/TR/n-quads/).
//!
//! Parsing is pull-based and lazy: statements are assembled one at a time,
//! reading only as much of the input as requested, and the input stream and
//! internal buffers are released as soon as the reader is dropped. The parse
//! is strict: the first malformed line fails the whole session with a
//! [`SyntaxError`] carrying the 1-based line and column of the offending
//! production, and no statement is produced after that point.
//!
//! Blank node labels are scoped to one parse session: the same label always
//! resolves to the same [`BlankNode`](raptrdf::BlankNode) within a session,
//! and never to a node of another session.
//!
//! ```
//! use raptnt::NTriplesParser;
//!
//! let file = b"<http://example.com/s> <http://example.com/p> \"foo\"@en .\n";
//! let mut reader = NTriplesParser::new().parse_read(file.as_ref());
//! assert!(reader.has_next());
//! let triple = reader.next_triple()?;
//! assert_eq!("\"foo\"@en", triple.object.to_string());
//! assert!(!reader.has_next());
//! # Result::<_,Box<dyn std::error::Error>>::Ok(())
//! ```

mod lexer;
mod line_formats;
pub mod nquads;
pub mod ntriples;
mod toolkit;

pub use crate::nquads::{NQuadsParser, NQuadsSerializer};
pub use crate::ntriples::{NTriplesParser, NTriplesSerializer};
pub use crate::toolkit::{
    AssembleError, IteratorError, LexError, ParseError, SyntaxError, SyntaxErrorKind, TextPosition,
};

pub(crate) const MIN_BUFFER_SIZE: usize = 4096;
pub(crate) const MAX_BUFFER_SIZE: usize = 4096 * 4096;
