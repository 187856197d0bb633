use rand::random;
use std::fmt;

/// An owned RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node).
///
/// The common way to create a new blank node is to use the [`BlankNode::default()`] function,
/// building a node with a fresh identifier that is not going to collide with any other node
/// of the same process.
///
/// It is also possible to create a blank node from a blank node identifier using the
/// [`BlankNode::new()`] function. The identifier must match `[A-Za-z0-9_:.-]+` and must
/// not start with a dot.
///
/// The default string formatter is returning an N-Triples, Turtle, and SPARQL compatible representation:
/// ```
/// use raptrdf::BlankNode;
///
/// assert_eq!("_:a122", BlankNode::new("a122")?.to_string());
/// # Result::<_,raptrdf::BlankNodeIdParseError>::Ok(())
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct BlankNode {
    id: String,
}

impl BlankNode {
    /// Creates a blank node from a unique identifier.
    ///
    /// In most cases, it is much more convenient to create a blank node using
    /// [`BlankNode::default()`] that builds a random ID.
    pub fn new(id: impl Into<String>) -> Result<Self, BlankNodeIdParseError> {
        let id = id.into();
        validate_blank_node_identifier(&id)?;
        Ok(Self::new_unchecked(id))
    }

    /// Creates a blank node from a unique identifier without validation.
    ///
    /// It is the caller's responsibility to ensure that `id` is a valid blank node identifier.
    ///
    /// [`BlankNode::new()`] is a safe version of this constructor and should be used for untrusted data.
    #[inline]
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Returns the underlying ID of this blank node.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Returns the underlying ID of this blank node.
    #[inline]
    pub fn into_string(self) -> String {
        self.id
    }
}

impl fmt::Display for BlankNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.id)
    }
}

impl Default for BlankNode {
    /// Builds a new RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node) with a unique id.
    #[inline]
    fn default() -> Self {
        // The ID may not start with a digit to be also valid with RDF/XML
        loop {
            let id = format!("{:x}", random::<u128>());
            if matches!(id.as_bytes().first(), Some(b'a'..=b'f')) {
                return Self { id };
            }
        }
    }
}

fn validate_blank_node_identifier(id: &str) -> Result<(), BlankNodeIdParseError> {
    if id.is_empty() || id.starts_with('.') {
        return Err(BlankNodeIdParseError {
            id: id.to_owned(),
        });
    }
    for c in id.chars() {
        if !matches!(c, 'A'..='Z' | 'a'..='z' | '0'..='9' | '_' | ':' | '.' | '-') {
            return Err(BlankNodeIdParseError {
                id: id.to_owned(),
            });
        }
    }
    Ok(())
}

/// An error raised during [`BlankNode`] IDs validation.
#[derive(Debug, thiserror::Error)]
#[error("The blank node identifier {id:?} is invalid")]
pub struct BlankNodeIdParseError {
    id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validation() {
        BlankNode::new("a").unwrap();
        BlankNode::new("a.b-c_d:e0").unwrap();
        BlankNode::new("0123").unwrap();
        BlankNode::new("").unwrap_err();
        BlankNode::new(".abc").unwrap_err();
        BlankNode::new("a b").unwrap_err();
        BlankNode::new("a\u{e9}").unwrap_err();
    }

    #[test]
    fn default_is_unique() {
        assert_ne!(BlankNode::default(), BlankNode::default());
    }

    #[test]
    fn default_is_valid() {
        let bnode = BlankNode::default();
        BlankNode::new(bnode.as_str()).unwrap();
    }
}
