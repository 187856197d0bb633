use crate::error::UnknownFormatError;
use std::fmt;

/// The RDF serialization formats the `rapper` tool accepts as input.
///
/// This is a fixed allow-list: format names are mapped through
/// [`RdfFormat::from_name`] and validated at call time, and only the
/// enumerated [`rapper_name`](RdfFormat::rapper_name) values are ever passed
/// to the tool.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum RdfFormat {
    /// [Atom 1.0](https://www.ietf.org/rfc/rfc4287.txt)
    Atom,
    /// [GraphViz DOT](https://graphviz.org/doc/info/lang.html)
    Dot,
    /// HTML table
    Html,
    /// RDF/JSON resource-centric
    Json,
    /// RDF/JSON triples
    JsonTriples,
    /// [N-Quads](https://www.w3.org/TR/n-quads/)
    NQuads,
    /// [N-Triples](https://www.w3.org/TR/n-triples/)
    NTriples,
    /// [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/)
    RdfXml,
    /// RDF/XML, abbreviated
    RdfXmlAbbrev,
    /// RDF/XML, XMP profile
    RdfXmlXmp,
    /// [RSS 1.0](https://web.resource.org/rss/1.0/spec)
    Rss10,
    /// [Turtle](https://www.w3.org/TR/turtle/)
    Turtle,
}

impl RdfFormat {
    const ALL: [Self; 12] = [
        Self::Atom,
        Self::Dot,
        Self::Html,
        Self::Json,
        Self::JsonTriples,
        Self::NQuads,
        Self::NTriples,
        Self::RdfXml,
        Self::RdfXmlAbbrev,
        Self::RdfXmlXmp,
        Self::Rss10,
        Self::Turtle,
    ];

    /// The name understood by `rapper -i`.
    ///
    /// ```
    /// use raptio::RdfFormat;
    ///
    /// assert_eq!(RdfFormat::NTriples.rapper_name(), "ntriples")
    /// ```
    #[inline]
    pub const fn rapper_name(self) -> &'static str {
        match self {
            Self::Atom => "atom",
            Self::Dot => "dot",
            Self::Html => "html",
            Self::Json => "json",
            Self::JsonTriples => "json-triples",
            Self::NQuads => "nquads",
            Self::NTriples => "ntriples",
            Self::RdfXml => "rdfxml",
            Self::RdfXmlAbbrev => "rdfxml-abbrev",
            Self::RdfXmlXmp => "rdfxml-xmp",
            Self::Rss10 => "rss-1.0",
            Self::Turtle => "turtle",
        }
    }

    /// The format name.
    ///
    /// ```
    /// use raptio::RdfFormat;
    ///
    /// assert_eq!(RdfFormat::NTriples.name(), "N-Triples")
    /// ```
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Atom => "Atom 1.0",
            Self::Dot => "GraphViz DOT",
            Self::Html => "HTML Table",
            Self::Json => "RDF/JSON Resource-Centric",
            Self::JsonTriples => "RDF/JSON Triples",
            Self::NQuads => "N-Quads",
            Self::NTriples => "N-Triples",
            Self::RdfXml => "RDF/XML",
            Self::RdfXmlAbbrev => "RDF/XML (Abbreviated)",
            Self::RdfXmlXmp => "RDF/XML (XMP Profile)",
            Self::Rss10 => "RSS 1.0",
            Self::Turtle => "Turtle",
        }
    }

    /// The format [IANA media type](https://tools.ietf.org/html/rfc2046), where one exists.
    ///
    /// ```
    /// use raptio::RdfFormat;
    ///
    /// assert_eq!(RdfFormat::NTriples.media_type(), Some("application/n-triples"))
    /// ```
    #[inline]
    pub const fn media_type(self) -> Option<&'static str> {
        match self {
            Self::Atom => Some("application/atom+xml"),
            Self::Dot => Some("text/vnd.graphviz"),
            Self::Html => Some("text/html"),
            Self::Json | Self::JsonTriples => Some("application/json"),
            Self::NQuads => Some("application/n-quads"),
            Self::NTriples => Some("application/n-triples"),
            Self::RdfXml => Some("application/rdf+xml"),
            Self::RdfXmlAbbrev | Self::RdfXmlXmp => None,
            Self::Rss10 => Some("application/rss+xml"),
            Self::Turtle => Some("text/turtle"),
        }
    }

    /// The usual file extension of the format.
    ///
    /// ```
    /// use raptio::RdfFormat;
    ///
    /// assert_eq!(RdfFormat::NTriples.file_extension(), "nt")
    /// ```
    #[inline]
    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::Atom => "atom",
            Self::Dot => "dot",
            Self::Html => "html",
            Self::Json | Self::JsonTriples => "json",
            Self::NQuads => "nq",
            Self::NTriples => "nt",
            Self::RdfXml | Self::RdfXmlAbbrev | Self::RdfXmlXmp => "rdf",
            Self::Rss10 => "rss",
            Self::Turtle => "ttl",
        }
    }

    /// Looks up a format from its `rapper` name.
    ///
    /// The mapping is fixed and validated here, at call time; unknown names
    /// are a structured error, not something to be normalized away.
    ///
    /// ```
    /// use raptio::RdfFormat;
    ///
    /// assert_eq!(RdfFormat::from_name("turtle")?, RdfFormat::Turtle);
    /// assert!(RdfFormat::from_name("turtle; rm -rf /").is_err());
    /// # Result::<_,raptio::UnknownFormatError>::Ok(())
    /// ```
    pub fn from_name(name: &str) -> Result<Self, UnknownFormatError> {
        Self::ALL
            .into_iter()
            .find(|format| format.rapper_name() == name)
            .ok_or_else(|| UnknownFormatError::new(name))
    }

    /// Looks for a known format from a media type, supporting some aliases.
    ///
    /// ```
    /// use raptio::RdfFormat;
    ///
    /// assert_eq!(
    ///     RdfFormat::from_media_type("text/turtle; charset=utf-8"),
    ///     Some(RdfFormat::Turtle)
    /// )
    /// ```
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let media_type = media_type.split(';').next()?.trim();
        match media_type {
            "application/atom+xml" => Some(Self::Atom),
            "text/vnd.graphviz" => Some(Self::Dot),
            "text/html" | "application/xhtml+xml" => Some(Self::Html),
            "application/json" => Some(Self::Json),
            "application/n-quads" | "text/x-nquads" | "text/nquads" => Some(Self::NQuads),
            "application/n-triples" | "text/plain" => Some(Self::NTriples),
            "application/rdf+xml" | "application/xml" | "text/xml" => Some(Self::RdfXml),
            "application/rss+xml" => Some(Self::Rss10),
            "text/turtle" | "application/turtle" | "application/x-turtle" => Some(Self::Turtle),
            _ => None,
        }
    }

    /// Looks for a known format from a file extension.
    ///
    /// ```
    /// use raptio::RdfFormat;
    ///
    /// assert_eq!(RdfFormat::from_extension("nq"), Some(RdfFormat::NQuads))
    /// ```
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "atom" => Some(Self::Atom),
            "dot" => Some(Self::Dot),
            "html" | "xhtml" => Some(Self::Html),
            "json" => Some(Self::Json),
            "nq" | "nquads" => Some(Self::NQuads),
            "nt" | "ntriples" | "txt" => Some(Self::NTriples),
            "rdf" | "rdfxml" | "owl" | "xml" => Some(Self::RdfXml),
            "rss" => Some(Self::Rss10),
            "ttl" | "turtle" => Some(Self::Turtle),
            _ => None,
        }
    }
}

impl fmt::Display for RdfFormat {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_mapping_is_a_bijection() {
        for format in RdfFormat::ALL {
            assert_eq!(RdfFormat::from_name(format.rapper_name()).unwrap(), format);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        RdfFormat::from_name("").unwrap_err();
        RdfFormat::from_name("n-triples").unwrap_err();
        RdfFormat::from_name("ntriples ").unwrap_err();
        let error = RdfFormat::from_name("--guess").unwrap_err();
        assert!(error.to_string().contains("--guess"));
    }

    #[test]
    fn media_type_lookup_ignores_parameters() {
        assert_eq!(
            RdfFormat::from_media_type("application/rdf+xml;charset=utf-8"),
            Some(RdfFormat::RdfXml)
        );
        assert_eq!(RdfFormat::from_media_type("application/pdf"), None);
    }
}
