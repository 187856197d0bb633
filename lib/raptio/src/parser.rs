use crate::error::{RdfIoError, UnknownFormatError};
use crate::format::RdfFormat;
use crate::rapper;
use log::debug;
use raptnt::nquads::FromReadNQuadsReader;
use raptnt::{IteratorError, NQuadsParser, ParseError};
use raptrdf::Quad;
use std::env;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile, TempPath};

/// An RDF parsing front-end backed by the `rapper` conversion tool.
///
/// Any of the [`RdfFormat`] serializations is first converted to N-Triples
/// into a temporary file, which is then streamed through the
/// [`NQuadsParser`] without ever loading the whole document into memory.
/// With no explicit format, `rapper` guesses it from the input.
///
/// ```no_run
/// use raptio::{RdfFormat, RdfParser};
///
/// let parser = RdfParser::new().with_format(RdfFormat::Turtle);
/// for quad in parser.parse_path("data.ttl")? {
///     println!("{}", quad?);
/// }
/// # Result::<_,Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct RdfParser {
    format: Option<RdfFormat>,
    temp_dir: PathBuf,
}

impl RdfParser {
    /// Builds a new [`RdfParser`] guessing the input format, with temporary
    /// files in the system temporary directory.
    pub fn new() -> Self {
        Self {
            format: None,
            temp_dir: env::temp_dir(),
        }
    }

    /// Sets the input format instead of letting `rapper` guess it.
    #[inline]
    pub fn with_format(mut self, format: RdfFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the input format from its `rapper` name, validated against the
    /// fixed allow-list.
    pub fn with_format_name(self, name: &str) -> Result<Self, UnknownFormatError> {
        Ok(self.with_format(RdfFormat::from_name(name)?))
    }

    /// Directory for the temporary files of the conversion.
    ///
    /// Defaults to [`env::temp_dir`]. The files are removed when the
    /// returned reader is dropped.
    #[inline]
    pub fn with_temp_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.temp_dir = path.into();
        self
    }

    /// Parses the RDF document read from `read`.
    ///
    /// The input is first spooled to a temporary file so that `rapper` can
    /// read it, then converted and streamed back as quads.
    pub fn parse_read(&self, mut read: impl Read) -> Result<QuadReader, RdfIoError> {
        let mut source = Builder::new()
            .prefix("raptor_parser_source_")
            .tempfile_in(&self.temp_dir)?;
        let spooled = io::copy(&mut read, source.as_file_mut())?;
        debug!("spooled {spooled} bytes to {}", source.path().display());
        let (_, source_path) = source.into_parts();
        let source_file = source_path.to_path_buf();
        self.convert_and_stream(&source_file, Some(source_path))
    }

    /// Parses the RDF document stored at `path`.
    pub fn parse_path(&self, path: impl AsRef<Path>) -> Result<QuadReader, RdfIoError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("source file {} does not exist", path.display()),
            )
            .into());
        }
        self.convert_and_stream(path, None)
    }

    fn convert_and_stream(
        &self,
        source: &Path,
        source_guard: Option<TempPath>,
    ) -> Result<QuadReader, RdfIoError> {
        let target: NamedTempFile = Builder::new()
            .prefix("raptor_parser_target_")
            .tempfile_in(&self.temp_dir)?;
        rapper::convert_to_ntriples(source, target.as_file(), self.format)?;
        let (_, target_path) = target.into_parts();
        // A fresh handle, the conversion left the shared cursor at the end
        let converted = File::open(&target_path)?;
        Ok(QuadReader {
            inner: NQuadsParser::new().parse_read(converted),
            _source: source_guard,
            _target: target_path,
        })
    }
}

impl Default for RdfParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Streams the statements of a converted document. Can be built using
/// [`RdfParser::parse_read`] or [`RdfParser::parse_path`].
///
/// The temporary files backing the conversion are owned by this reader and
/// removed when it is dropped, whether iteration completed, failed or was
/// abandoned partway.
#[must_use]
pub struct QuadReader {
    inner: FromReadNQuadsReader<File>,
    _source: Option<TempPath>,
    _target: TempPath,
}

impl QuadReader {
    /// Non-destructive lookahead: returns `true` while a statement or an error remains to be read.
    pub fn has_next(&mut self) -> bool {
        self.inner.has_next()
    }

    /// Reads the next quad, failing with [`IteratorError::Exhausted`] past the end of the input.
    pub fn next_quad(&mut self) -> Result<Quad, IteratorError> {
        self.inner.next_quad()
    }
}

impl Iterator for QuadReader {
    type Item = Result<Quad, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
