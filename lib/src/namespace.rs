//! Prefix to namespace bookkeeping for qualified names.

use crate::consts::DEFAULT_NAMESPACES;
use crate::errors::{RdfError, Result};
use crate::uri::Uri;
use log::warn;
use serde::{Deserialize, Serialize};

/// Ordered prefix table. A namespace may own several prefixes; a prefix names
/// exactly one namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceTable {
    entries: Vec<(String, String)>,
}

impl NamespaceTable {
    pub fn new() -> Self {
        NamespaceTable::default()
    }

    /// A table holding the `rdf`, `rdfs`, `owl` and `xsd` prefixes.
    pub fn with_defaults() -> Self {
        NamespaceTable {
            entries: DEFAULT_NAMESPACES
                .iter()
                .map(|(prefix, ns)| (prefix.to_string(), ns.to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(prefix, namespace)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(prefix, ns)| (prefix.as_str(), ns.as_str()))
    }

    pub fn namespace_for_prefix(&self, prefix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, ns)| ns.as_str())
    }

    pub fn prefixes_for_namespace(&self, namespace: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, ns)| ns == namespace)
            .map(|(p, _)| p.as_str())
            .collect()
    }

    /// Registers `namespace` under `prefix` and returns the prefix actually
    /// used. When `prefix` already names a different namespace, the first free
    /// name out of `fallback`, `fallback1`, `fallback2`, ... is taken instead.
    pub fn add(&mut self, prefix: &str, namespace: &str, fallback: &str) -> String {
        match self.namespace_for_prefix(prefix) {
            None => {
                self.entries.push((prefix.to_string(), namespace.to_string()));
                return prefix.to_string();
            }
            Some(existing) if existing == namespace => return prefix.to_string(),
            Some(_) => {}
        }

        let mut counter = 0usize;
        loop {
            let candidate = if counter == 0 {
                fallback.to_string()
            } else {
                format!("{}{}", fallback, counter)
            };
            counter += 1;
            match self.namespace_for_prefix(&candidate) {
                Some(existing) if existing == namespace => return candidate,
                Some(_) => continue,
                None => {
                    warn!(
                        "Prefix '{}' already bound; registering {} as '{}'",
                        prefix, namespace, candidate
                    );
                    self.entries.push((candidate.clone(), namespace.to_string()));
                    return candidate;
                }
            }
        }
    }

    /// Copies every binding of `other`, renaming colliding prefixes.
    pub fn merge(&mut self, other: &NamespaceTable, fallback: &str) {
        for (prefix, ns) in other.iter() {
            self.add(prefix, ns, fallback);
        }
    }

    /// `prefix:local` using the first prefix registered for the URI's namespace.
    pub fn qualified_name(&self, uri: &Uri) -> Option<String> {
        let local = uri.local_name();
        self.entries
            .iter()
            .find(|(_, ns)| ns == uri.namespace())
            .map(|(prefix, _)| format!("{}:{}", prefix, local))
    }

    pub fn all_qualified_names(&self, uri: &Uri) -> Vec<String> {
        let local = uri.local_name();
        self.prefixes_for_namespace(uri.namespace())
            .into_iter()
            .map(|prefix| format!("{}:{}", prefix, local))
            .collect()
    }

    /// Expands `prefix:local` into a full URI.
    pub fn expand(&self, qualified_name: &str) -> Result<Uri> {
        let (prefix, local) = qualified_name.split_once(':').ok_or_else(|| {
            RdfError::malformed_uri(qualified_name, "not a qualified name")
        })?;
        let namespace = self.namespace_for_prefix(prefix).ok_or_else(|| {
            RdfError::malformed_uri(qualified_name, format!("unknown prefix '{}'", prefix))
        })?;
        Uri::parse(&format!("{}{}", namespace, local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_uses_fallback() {
        let mut table = NamespaceTable::new();
        assert_eq!(table.add("ns", "http://a.org/", "ns"), "ns");
        assert_eq!(table.add("ns", "http://b.org/", "ns"), "ns1");
        assert_eq!(table.add("ex", "http://c.org/", "ns"), "ex");
        assert_eq!(table.add("ex", "http://d.org/", "ns"), "ns2");
        // re-registering is a no-op
        assert_eq!(table.add("ns", "http://a.org/", "ns"), "ns");
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_one_namespace_many_prefixes() {
        let mut table = NamespaceTable::with_defaults();
        table.add("ex", "http://example.org/", "ns");
        table.add("eg", "http://example.org/", "ns");
        let uri = Uri::parse("http://example.org/apple").unwrap();
        assert_eq!(table.qualified_name(&uri).unwrap(), "ex:apple");
        assert_eq!(
            table.all_qualified_names(&uri),
            vec!["ex:apple".to_string(), "eg:apple".to_string()]
        );
        assert_eq!(table.expand("eg:apple").unwrap(), uri);
        assert!(table.expand("nope:apple").is_err());
    }
}
