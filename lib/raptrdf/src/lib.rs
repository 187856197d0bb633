//! Raptrdf provides datastructures encoding [RDF 1.1 concepts](https://www.w3.org/TR/rdf11-concepts/).
//!
//! This crate is intended to be a basic building block of the other crates of this
//! repository, like the [`raptnt`](https://docs.rs/raptnt) N-Triples and N-Quads streaming parser.
//!
//! Usage example:
//! ```
//! use raptrdf::{Literal, NamedNode, Triple};
//!
//! let triple = Triple::new(
//!     NamedNode::new("http://example.com/s")?,
//!     NamedNode::new("http://example.com/p")?,
//!     Literal::new_language_tagged_literal("foo", "en")?,
//! );
//! assert_eq!(
//!     "<http://example.com/s> <http://example.com/p> \"foo\"@en",
//!     triple.to_string()
//! );
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

mod blank_node;
mod literal;
mod named_node;
mod triple;
pub mod vocab;

pub use crate::blank_node::{BlankNode, BlankNodeIdParseError};
pub use crate::literal::{Literal, print_quoted_str};
pub use crate::named_node::{NamedNode, NamedNodeRef};
pub use crate::triple::{GraphName, NamedOrBlankNode, Quad, Term, Triple};
pub use oxilangtag::LanguageTagParseError;
pub use oxiri::IriParseError;
