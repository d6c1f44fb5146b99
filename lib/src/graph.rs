//! An ordered, in-memory statement collection with a prefix table and linear
//! pattern queries.

use crate::config::GraphConfig;
use crate::errors::Result;
use crate::namespace::NamespaceTable;
use crate::statement::{Statement, TriplePattern};
use crate::term::{BlankNode, BlankNodeGenerator, Resource, Value};
use crate::uri::Uri;
use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Graph {
    statements: Vec<Statement>,
    name: Option<Resource>,
    namespaces: NamespaceTable,
    resources: Vec<Resource>,
    resource_set: HashSet<Resource>,
    properties: Vec<Uri>,
    property_set: HashSet<Uri>,
    config: GraphConfig,
    blank_nodes: Arc<BlankNodeGenerator>,
}

impl Default for Graph {
    fn default() -> Self {
        Graph::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        let namespaces = if config.default_namespaces {
            NamespaceTable::with_defaults()
        } else {
            NamespaceTable::new()
        };
        let blank_nodes = Arc::new(BlankNodeGenerator::new(config.blank_node_prefix.clone()));
        Graph {
            statements: Vec::new(),
            name: None,
            namespaces,
            resources: Vec::new(),
            resource_set: HashSet::new(),
            properties: Vec::new(),
            property_set: HashSet::new(),
            config,
            blank_nodes,
        }
    }

    /// Names the graph; statements added from now on are tagged with `name`.
    pub fn with_name(mut self, name: impl Into<Resource>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&Resource> {
        self.name.as_ref()
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }

    pub fn contains(&self, statement: &Statement) -> bool {
        self.statements.contains(statement)
    }

    /// Distinct subjects and resource objects, in order of first appearance.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Distinct predicates, in order of first appearance.
    pub fn properties(&self) -> &[Uri] {
        &self.properties
    }

    pub fn add(&mut self, statement: Statement) {
        let position = self.push(statement);
        self.track(position);
    }

    pub fn add_statement(
        &mut self,
        subject: impl Into<Resource>,
        predicate: Uri,
        object: impl Into<Value>,
    ) {
        self.add(Statement::new(subject, predicate, object));
    }

    /// Appends copies of every statement in `other`. When this graph is named
    /// each copy gains the name as an extra tag; tags it already carried stay.
    pub fn add_graph(&mut self, other: &Graph) {
        self.namespaces
            .merge(&other.namespaces, &self.config.fallback_prefix);
        for statement in other.iter() {
            self.add(statement.clone());
        }
    }

    /// Every statement matching `pattern`, in graph order. The result shares
    /// this graph's prefixes and blank node generator but has no name.
    pub fn sub_graph(&self, pattern: &TriplePattern) -> Graph {
        let mut result = self.empty_like();
        for statement in self.statements.iter().filter(|s| pattern.matches(s)) {
            result.add(statement.clone());
        }
        result
    }

    /// Removes every statement matching `pattern` and returns how many went.
    pub fn delete_statements(&mut self, pattern: &TriplePattern) -> usize {
        let before = self.statements.len();
        self.statements.retain(|s| !pattern.matches(s));
        let removed = before - self.statements.len();
        if removed > 0 {
            info!("Deleted {} statements", removed);
            self.rebuild_tracking();
        }
        removed
    }

    pub fn namespaces(&self) -> &NamespaceTable {
        &self.namespaces
    }

    /// Registers a prefix and returns the one actually assigned, which differs
    /// from `prefix` when that was already bound to another namespace.
    pub fn add_namespace(&mut self, prefix: &str, namespace: &str) -> String {
        self.namespaces
            .add(prefix, namespace, &self.config.fallback_prefix)
    }

    pub fn namespace_for_prefix(&self, prefix: &str) -> Option<&str> {
        self.namespaces.namespace_for_prefix(prefix)
    }

    pub fn prefixes_for_namespace(&self, namespace: &str) -> Vec<&str> {
        self.namespaces.prefixes_for_namespace(namespace)
    }

    pub fn qualified_name(&self, uri: &Uri) -> Option<String> {
        self.namespaces.qualified_name(uri)
    }

    pub fn all_qualified_names(&self, uri: &Uri) -> Vec<String> {
        self.namespaces.all_qualified_names(uri)
    }

    pub fn create_uri_from_qualified_name(&self, qualified_name: &str) -> Result<Uri> {
        self.namespaces.expand(qualified_name)
    }

    pub fn create_blank_node(&self) -> BlankNode {
        self.blank_nodes.mint()
    }

    /// An unnamed graph with the same prefixes, config and blank node
    /// generator.
    pub(crate) fn empty_like(&self) -> Graph {
        Graph {
            statements: Vec::new(),
            name: None,
            namespaces: self.namespaces.clone(),
            resources: Vec::new(),
            resource_set: HashSet::new(),
            properties: Vec::new(),
            property_set: HashSet::new(),
            config: self.config.clone(),
            blank_nodes: Arc::clone(&self.blank_nodes),
        }
    }

    /// Appends without touching the resource and property lists.
    pub(crate) fn push(&mut self, mut statement: Statement) -> usize {
        if let Some(name) = &self.name {
            statement.add_named_graph(name.clone());
        }
        self.statements.push(statement);
        self.statements.len() - 1
    }

    pub(crate) fn track(&mut self, position: usize) {
        let Some(statement) = self.statements.get(position) else {
            return;
        };
        let subject = statement.subject().clone();
        let predicate = statement.predicate().clone();
        let object = statement.object().as_resource();

        if self.resource_set.insert(subject.clone()) {
            self.resources.push(subject);
        }
        if let Some(object) = object {
            if self.resource_set.insert(object.clone()) {
                self.resources.push(object);
            }
        }
        if self.property_set.insert(predicate.clone()) {
            self.properties.push(predicate);
        }
    }

    pub(crate) fn clear_tracking(&mut self) {
        self.resources.clear();
        self.resource_set.clear();
        self.properties.clear();
        self.property_set.clear();
    }

    pub(crate) fn rebuild_tracking(&mut self) {
        debug!("Rebuilding resources and properties of {} statements", self.len());
        self.clear_tracking();
        for position in 0..self.statements.len() {
            self.track(position);
        }
    }

    /// Removes the statements at `positions`, which must be sorted.
    pub(crate) fn remove_positions(&mut self, positions: &[usize]) {
        let mut current = 0usize;
        self.statements.retain(|_| {
            let keep = positions.binary_search(&current).is_err();
            current += 1;
            keep
        });
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LABEL, TYPE};
    use crate::literal::Literal;

    fn uri(s: &str) -> Uri {
        Uri::parse(s).unwrap()
    }

    #[test]
    fn test_add_stamps_name() {
        let g = uri("http://ex.org/g");
        let mut graph = Graph::new().with_name(g.clone());
        graph.add_statement(uri("http://ex.org/a"), uri(TYPE), uri("http://ex.org/C"));
        assert!(graph.statements()[0].is_in_named_graph(&Resource::Uri(g)));
        assert_eq!(graph.resources().len(), 2);
        assert_eq!(graph.properties(), &[uri(TYPE)]);
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let mut graph = Graph::new();
        let s = Statement::new(uri("http://ex.org/a"), uri(TYPE), uri("http://ex.org/C"));
        graph.add(s.clone());
        graph.add(s.clone());
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.resources().len(), 2);
    }

    #[test]
    fn test_delete_rebuilds_resources() {
        let mut graph = Graph::new();
        let a = uri("http://ex.org/a");
        graph.add_statement(a.clone(), uri(TYPE), uri("http://ex.org/C"));
        graph.add_statement(
            a.clone(),
            uri(LABEL),
            Literal::with_language("a", "en").unwrap(),
        );
        let removed = graph.delete_statements(&TriplePattern::new().predicate(uri(TYPE)));
        assert_eq!(removed, 1);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.resources(), &[Resource::Uri(a)]);
        assert_eq!(graph.properties(), &[uri(LABEL)]);
    }

    #[test]
    fn test_sub_graph_shares_blank_nodes_and_prefixes() {
        let mut graph = Graph::new();
        graph.add_namespace("ex", "http://ex.org/");
        let first = graph.create_blank_node();
        let sub = graph.sub_graph(&TriplePattern::new());
        let second = sub.create_blank_node();
        assert_ne!(first, second);
        assert_eq!(sub.namespace_for_prefix("ex"), Some("http://ex.org/"));
        assert!(sub.is_empty());
    }

    #[test]
    fn test_remove_positions() {
        let mut graph = Graph::new();
        for i in 0..5 {
            graph.add_statement(
                uri(&format!("http://ex.org/s{}", i)),
                uri(TYPE),
                uri("http://ex.org/C"),
            );
        }
        graph.remove_positions(&[1, 3]);
        let subjects: Vec<String> = graph
            .iter()
            .map(|s| s.subject().to_string())
            .collect();
        assert_eq!(
            subjects,
            vec!["<http://ex.org/s0>", "<http://ex.org/s2>", "<http://ex.org/s4>"]
        );
    }
}
