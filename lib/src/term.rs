//! The RDF term hierarchy: [`Value`] is any term, [`Resource`] is a term usable
//! as a subject (a [`Uri`] or a [`BlankNode`]).

use crate::literal::Literal;
use crate::uri::Uri;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Common projections of every term.
pub trait Term {
    /// The identity string: the URI, the blank node id or the literal's lexical form.
    fn string_value(&self) -> &str;

    /// The term in SPARQL notation.
    fn sparql(&self) -> String;
}

/// An identifier that is only meaningful inside the document or graph that
/// minted it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankNode {
    id: String,
}

impl BlankNode {
    pub fn new(id: impl Into<String>) -> Self {
        BlankNode { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.id)
    }
}

/// Mints `<prefix><N>` blank node ids from a monotonically increasing counter.
///
/// The generator belongs to whatever scope mints the nodes (a parser, a
/// graph); ids from different generators may collide and must not be mixed.
#[derive(Debug)]
pub struct BlankNodeGenerator {
    prefix: String,
    next: AtomicU64,
}

impl BlankNodeGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        BlankNodeGenerator {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }

    pub fn mint(&self) -> BlankNode {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        BlankNode::new(format!("{}{}", self.prefix, n))
    }

    /// Number of blank nodes minted so far.
    pub fn minted(&self) -> u64 {
        self.next.load(Ordering::Relaxed) - 1
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for BlankNodeGenerator {
    fn default() -> Self {
        BlankNodeGenerator::new("bn")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Uri(Uri),
    BlankNode(BlankNode),
}

impl Resource {
    pub fn as_uri(&self) -> Option<&Uri> {
        match self {
            Resource::Uri(uri) => Some(uri),
            Resource::BlankNode(_) => None,
        }
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, Resource::BlankNode(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Uri(Uri),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl Value {
    /// The resource view of this value; `None` for literals.
    pub fn as_resource(&self) -> Option<Resource> {
        match self {
            Value::Uri(uri) => Some(Resource::Uri(uri.clone())),
            Value::BlankNode(bn) => Some(Resource::BlankNode(bn.clone())),
            Value::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Value::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn as_uri(&self) -> Option<&Uri> {
        match self {
            Value::Uri(uri) => Some(uri),
            _ => None,
        }
    }

    pub fn is_resource(&self) -> bool {
        !matches!(self, Value::Literal(_))
    }

    /// True when this value is the given resource.
    pub fn is_resource_eq(&self, resource: &Resource) -> bool {
        match (self, resource) {
            (Value::Uri(a), Resource::Uri(b)) => a == b,
            (Value::BlankNode(a), Resource::BlankNode(b)) => a == b,
            _ => false,
        }
    }
}

impl Term for Uri {
    fn string_value(&self) -> &str {
        self.as_str()
    }

    fn sparql(&self) -> String {
        Uri::sparql(self)
    }
}

impl Term for BlankNode {
    fn string_value(&self) -> &str {
        &self.id
    }

    fn sparql(&self) -> String {
        self.to_string()
    }
}

impl Term for Resource {
    fn string_value(&self) -> &str {
        match self {
            Resource::Uri(uri) => uri.as_str(),
            Resource::BlankNode(bn) => bn.id(),
        }
    }

    fn sparql(&self) -> String {
        match self {
            Resource::Uri(uri) => Uri::sparql(uri),
            Resource::BlankNode(bn) => bn.to_string(),
        }
    }
}

impl Term for Value {
    fn string_value(&self) -> &str {
        match self {
            Value::Uri(uri) => uri.as_str(),
            Value::BlankNode(bn) => bn.id(),
            Value::Literal(lit) => lit.string_value(),
        }
    }

    fn sparql(&self) -> String {
        match self {
            Value::Uri(uri) => Uri::sparql(uri),
            Value::BlankNode(bn) => bn.to_string(),
            Value::Literal(lit) => lit.sparql(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sparql())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sparql())
    }
}

impl From<Uri> for Resource {
    fn from(uri: Uri) -> Self {
        Resource::Uri(uri)
    }
}

impl From<BlankNode> for Resource {
    fn from(bn: BlankNode) -> Self {
        Resource::BlankNode(bn)
    }
}

impl From<Resource> for Value {
    fn from(resource: Resource) -> Self {
        match resource {
            Resource::Uri(uri) => Value::Uri(uri),
            Resource::BlankNode(bn) => Value::BlankNode(bn),
        }
    }
}

impl From<Uri> for Value {
    fn from(uri: Uri) -> Self {
        Value::Uri(uri)
    }
}

impl From<BlankNode> for Value {
    fn from(bn: BlankNode) -> Self {
        Value::BlankNode(bn)
    }
}

impl From<Literal> for Value {
    fn from(lit: Literal) -> Self {
        Value::Literal(lit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_is_monotonic() {
        let generator = BlankNodeGenerator::default();
        assert_eq!(generator.mint().id(), "bn1");
        assert_eq!(generator.mint().id(), "bn2");
        assert_eq!(generator.minted(), 2);

        let other = BlankNodeGenerator::new("b");
        assert_eq!(other.mint().id(), "b1");
    }

    #[test]
    fn test_value_resource_view() {
        let uri = Uri::parse("http://example.org/apple").unwrap();
        let value = Value::from(uri.clone());
        assert_eq!(value.as_resource(), Some(Resource::Uri(uri.clone())));
        assert!(value.is_resource_eq(&Resource::Uri(uri)));
        assert_eq!(value.sparql(), "<http://example.org/apple>");

        let bn = Value::from(BlankNode::new("x"));
        assert_eq!(bn.sparql(), "_:x");
        assert_eq!(bn.string_value(), "x");
        assert!(Value::from(Literal::from(3i64)).as_resource().is_none());
    }
}
