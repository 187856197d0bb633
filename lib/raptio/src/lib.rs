//! Raptio is an RDF parsing front-end backed by the `rapper` command of the
//! [Raptor RDF syntax library](https://librdf.org/raptor/rapper.html).
//!
//! Documents in any of the allow-listed [`RdfFormat`]s are converted to
//! N-Triples into a scoped temporary file and streamed back as
//! [`Quad`](raptrdf::Quad)s through the [`raptnt`] parser, so arbitrarily
//! large documents never have to fit in memory. The temporary files are
//! removed when the returned reader goes out of scope, on every exit path.
//!
//! The `rapper` tool must be installed (package `raptor2-utils` on Debian
//! and friends); [`is_rapper_available`] probes for it.
//!
//! ```no_run
//! use raptio::RdfParser;
//!
//! let turtle = "@prefix ex: <http://example.com/> . ex:s ex:p ex:o .";
//! for quad in RdfParser::new().parse_read(turtle.as_bytes())? {
//!     println!("{}", quad?);
//! }
//! # Result::<_,Box<dyn std::error::Error>>::Ok(())
//! ```

mod error;
mod format;
mod parser;
mod rapper;

pub use crate::error::{RapperError, RdfIoError, UnknownFormatError};
pub use crate::format::RdfFormat;
pub use crate::parser::{QuadReader, RdfParser};
pub use crate::rapper::is_rapper_available;
