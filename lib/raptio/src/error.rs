use std::io;
use std::process::ExitStatus;

/// A format name outside of the fixed allow-list of [`RdfFormat`](crate::RdfFormat).
#[derive(Debug, thiserror::Error)]
#[error(
    "unknown RDF format name '{name}', it must be one of: atom, dot, html, json, json-triples, nquads, ntriples, rdfxml, rdfxml-abbrev, rdfxml-xmp, rss-1.0, turtle"
)]
pub struct UnknownFormatError {
    name: String,
}

impl UnknownFormatError {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The rejected name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An error raised while invoking the `rapper` conversion tool.
#[derive(Debug, thiserror::Error)]
pub enum RapperError {
    /// The `rapper` command is not available on this system.
    #[error("the rapper command is not available (install raptor2-utils)")]
    NotFound,
    /// The conversion process could not be spawned or its files accessed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The conversion process exited with a non-zero status.
    ///
    /// The converted output must not be trusted at this point: it may stop
    /// in the middle of the document.
    #[error("rapper failed with {status}: {stderr}")]
    CommandFailed { status: ExitStatus, stderr: String },
}

/// An error raised while loading and parsing RDF through the conversion front-end.
///
/// It is the union of the conversion errors, plain I/O errors around the
/// temporary files and the delegated N-Quads parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum RdfIoError {
    /// The `rapper` invocation failed.
    #[error(transparent)]
    Rapper(#[from] RapperError),
    /// I/O error around the input or the temporary files.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The converted document could not be parsed.
    #[error(transparent)]
    Parse(#[from] raptnt::ParseError),
}
