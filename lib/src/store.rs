use crate::graph::Graph;
use crate::indexed::IndexedGraph;
use crate::statement::{Statement, TriplePattern};
use crate::term::{Resource, Value};
use crate::uri::Uri;

/// The operations format parsers and query code need from a statement store,
/// implemented by both [`Graph`] and [`IndexedGraph`].
pub trait GraphStore {
    /// Returns the statements as a plain graph
    fn graph(&self) -> &Graph;

    /// Appends a statement, tagging it with the store's name if it has one
    fn add(&mut self, statement: Statement);

    /// Registers a prefix and returns the prefix actually assigned
    fn add_namespace(&mut self, prefix: &str, namespace: &str) -> String;

    /// Returns the statements matching the pattern, in insertion order
    fn sub_graph(&self, pattern: &TriplePattern) -> Self
    where
        Self: Sized;

    /// Removes the statements matching the pattern and returns how many were removed
    fn delete_statements(&mut self, pattern: &TriplePattern) -> usize;

    fn add_statement(&mut self, subject: Resource, predicate: Uri, object: Value) {
        self.add(Statement::new(subject, predicate, object));
    }

    /// Copies prefixes and statements of another graph into this store
    fn add_graph(&mut self, other: &Graph) {
        for (prefix, namespace) in other.namespaces().iter() {
            self.add_namespace(prefix, namespace);
        }
        for statement in other.iter() {
            self.add(statement.clone());
        }
    }

    fn len(&self) -> usize {
        self.graph().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, statement: &Statement) -> bool {
        self.graph().contains(statement)
    }
}

impl GraphStore for Graph {
    fn graph(&self) -> &Graph {
        self
    }

    fn add(&mut self, statement: Statement) {
        Graph::add(self, statement)
    }

    fn add_namespace(&mut self, prefix: &str, namespace: &str) -> String {
        Graph::add_namespace(self, prefix, namespace)
    }

    fn sub_graph(&self, pattern: &TriplePattern) -> Self {
        Graph::sub_graph(self, pattern)
    }

    fn add_graph(&mut self, other: &Graph) {
        Graph::add_graph(self, other)
    }

    fn delete_statements(&mut self, pattern: &TriplePattern) -> usize {
        Graph::delete_statements(self, pattern)
    }
}

impl GraphStore for IndexedGraph {
    fn graph(&self) -> &Graph {
        IndexedGraph::graph(self)
    }

    fn add(&mut self, statement: Statement) {
        IndexedGraph::add(self, statement)
    }

    fn add_namespace(&mut self, prefix: &str, namespace: &str) -> String {
        IndexedGraph::add_namespace(self, prefix, namespace)
    }

    fn sub_graph(&self, pattern: &TriplePattern) -> Self {
        IndexedGraph::sub_graph(self, pattern)
    }

    fn add_graph(&mut self, other: &Graph) {
        IndexedGraph::add_graph(self, other)
    }

    fn delete_statements(&mut self, pattern: &TriplePattern) -> usize {
        IndexedGraph::delete_statements(self, pattern)
    }

    fn contains(&self, statement: &Statement) -> bool {
        IndexedGraph::contains(self, statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TYPE;

    fn load<S: GraphStore>(store: &mut S) {
        store.add_namespace("ex", "http://ex.org/");
        for i in 0..3 {
            store.add_statement(
                Resource::Uri(Uri::parse(&format!("http://ex.org/s{}", i)).unwrap()),
                Uri::parse(TYPE).unwrap(),
                Value::Uri(Uri::parse("http://ex.org/C").unwrap()),
            );
        }
    }

    #[test]
    fn test_both_stores_accept_parser_calls() {
        let mut plain = Graph::new();
        let mut indexed = IndexedGraph::new();
        load(&mut plain);
        load(&mut indexed);
        assert_eq!(GraphStore::len(&plain), 3);
        assert_eq!(GraphStore::len(&indexed), 3);
        let pattern = TriplePattern::new().subject(Uri::parse("http://ex.org/s1").unwrap());
        assert_eq!(GraphStore::sub_graph(&plain, &pattern).len(), 1);
        assert_eq!(GraphStore::sub_graph(&indexed, &pattern).len(), 1);
    }
}
