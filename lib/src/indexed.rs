//! A [`Graph`] with subject, predicate, object and named-graph indexes.
//!
//! Indexing is explicit. `add` only queues the new statement; `index()` folds
//! the queue into the indexes and `reindex()` rebuilds them from scratch.
//! Queries stay correct while statements are pending, since queued positions
//! are always scanned alongside the index candidates.

use crate::config::GraphConfig;
use crate::errors::Result;
use crate::graph::Graph;
use crate::namespace::NamespaceTable;
use crate::progress::{NoProgress, ProgressReporter};
use crate::statement::{Statement, TriplePattern};
use crate::term::{BlankNode, Resource, Value};
use crate::uri::Uri;
use log::{debug, info};
use std::collections::HashMap;
use std::hash::Hash;

type Index<K> = HashMap<K, Vec<usize>>;

#[derive(Debug, Clone, Default)]
pub struct IndexedGraph {
    graph: Graph,
    by_subject: Index<Resource>,
    by_predicate: Index<Uri>,
    by_object: Index<Resource>,
    by_named_graph: Index<Resource>,
    unindexed: Vec<usize>,
}

fn bucket<'a, K: Hash + Eq>(index: &'a Index<K>, key: &K) -> &'a [usize] {
    index.get(key).map(Vec::as_slice).unwrap_or(&[])
}

fn unlink<K: Hash + Eq>(index: &mut Index<K>, key: &K, position: usize) {
    if let Some(positions) = index.get_mut(key) {
        positions.retain(|p| *p != position);
        if positions.is_empty() {
            index.remove(key);
        }
    }
}

// Maps each surviving position to its place after `deleted` (sorted) are gone.
fn shift_positions(positions: &mut [usize], deleted: &[usize]) {
    for position in positions.iter_mut() {
        *position -= deleted.partition_point(|d| *d < *position);
    }
}

impl IndexedGraph {
    pub fn new() -> Self {
        IndexedGraph::from_graph(Graph::new())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        IndexedGraph::from_graph(Graph::with_config(config))
    }

    /// Wraps an existing graph. Its statements start out queued.
    pub fn from_graph(mut graph: Graph) -> Self {
        graph.clear_tracking();
        let unindexed = (0..graph.len()).collect();
        IndexedGraph {
            graph,
            by_subject: HashMap::new(),
            by_predicate: HashMap::new(),
            by_object: HashMap::new(),
            by_named_graph: HashMap::new(),
            unindexed,
        }
    }

    pub fn with_name(mut self, name: impl Into<Resource>) -> Self {
        self.graph = self.graph.with_name(name);
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The underlying graph, with resources and properties covering every
    /// statement.
    pub fn into_graph(mut self) -> Graph {
        self.graph.rebuild_tracking();
        self.graph
    }

    pub fn name(&self) -> Option<&Resource> {
        self.graph.name()
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.graph.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Statement> {
        self.graph.get(index)
    }

    /// True while statements are queued for indexing.
    pub fn needs_indexing(&self) -> bool {
        !self.unindexed.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.unindexed.len()
    }

    /// Resources of indexed statements.
    pub fn resources(&self) -> &[Resource] {
        self.graph.resources()
    }

    /// Properties of indexed statements.
    pub fn properties(&self) -> &[Uri] {
        self.graph.properties()
    }

    pub fn contains(&self, statement: &Statement) -> bool {
        let statements = self.graph.statements();
        bucket(&self.by_subject, statement.subject())
            .iter()
            .chain(self.unindexed.iter())
            .any(|p| statements[*p] == *statement)
    }

    pub fn add(&mut self, statement: Statement) {
        let position = self.graph.push(statement);
        self.unindexed.push(position);
    }

    pub fn add_statement(
        &mut self,
        subject: impl Into<Resource>,
        predicate: Uri,
        object: impl Into<Value>,
    ) {
        self.add(Statement::new(subject, predicate, object));
    }

    pub fn add_graph(&mut self, other: &Graph) {
        for (prefix, namespace) in other.namespaces().iter() {
            self.graph.add_namespace(prefix, namespace);
        }
        for statement in other.iter() {
            self.add(statement.clone());
        }
    }

    pub fn index(&mut self) {
        self.index_with_progress(&mut NoProgress);
    }

    /// Folds queued statements into the indexes, reporting every
    /// `progress_interval` statements and once at the end.
    pub fn index_with_progress<R: ProgressReporter + ?Sized>(&mut self, reporter: &mut R) {
        if self.unindexed.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.unindexed);
        let total = pending.len();
        let interval = self.graph.config().progress_interval.max(1);
        debug!("Indexing {} statements", total);
        for (done, position) in pending.into_iter().enumerate() {
            self.index_position(position);
            let completed = done + 1;
            if completed % interval == 0 || completed == total {
                reporter.report(completed, total);
            }
        }
    }

    pub fn reindex(&mut self) {
        self.reindex_with_progress(&mut NoProgress);
    }

    /// Drops every index and rebuilds them from all statements.
    pub fn reindex_with_progress<R: ProgressReporter + ?Sized>(&mut self, reporter: &mut R) {
        info!("Reindexing {} statements", self.graph.len());
        self.by_subject.clear();
        self.by_predicate.clear();
        self.by_object.clear();
        self.by_named_graph.clear();
        self.graph.clear_tracking();
        self.unindexed = (0..self.graph.len()).collect();
        self.index_with_progress(reporter);
    }

    fn index_position(&mut self, position: usize) {
        let Some(statement) = self.graph.get(position) else {
            return;
        };
        let subject = statement.subject().clone();
        let predicate = statement.predicate().clone();
        let object = statement.object().as_resource();
        let named_graphs = statement.named_graphs().to_vec();

        self.by_subject.entry(subject).or_default().push(position);
        self.by_predicate.entry(predicate).or_default().push(position);
        if let Some(object) = object {
            self.by_object.entry(object).or_default().push(position);
        }
        for graph in named_graphs {
            self.by_named_graph.entry(graph).or_default().push(position);
        }
        self.graph.track(position);
    }

    // Positions worth testing against `pattern`: the smallest index bucket
    // among the constrained positions plus everything still queued. `None`
    // when nothing in the pattern is indexable.
    fn candidates(&self, pattern: &TriplePattern) -> Option<Vec<usize>> {
        let mut buckets: Vec<&[usize]> = Vec::new();
        if let Some(subject) = &pattern.subject {
            buckets.push(bucket(&self.by_subject, subject));
        }
        if let Some(predicate) = &pattern.predicate {
            buckets.push(bucket(&self.by_predicate, predicate));
        }
        if let Some(object) = pattern.object.as_ref().and_then(Value::as_resource) {
            buckets.push(bucket(&self.by_object, &object));
        }
        let smallest = buckets.into_iter().min_by_key(|b| b.len());

        let named = (!pattern.named_graphs.is_empty()).then(|| {
            let mut union: Vec<usize> = pattern
                .named_graphs
                .iter()
                .flat_map(|g| bucket(&self.by_named_graph, g).iter().copied())
                .collect();
            union.sort_unstable();
            union.dedup();
            union
        });

        let mut chosen = match (smallest, named) {
            (Some(single), Some(union)) if single.len() <= union.len() => single.to_vec(),
            (_, Some(union)) => union,
            (Some(single), None) => single.to_vec(),
            (None, None) => return None,
        };
        chosen.extend_from_slice(&self.unindexed);
        chosen.sort_unstable();
        chosen.dedup();
        Some(chosen)
    }

    fn matching_positions(&self, pattern: &TriplePattern) -> Vec<usize> {
        let statements = self.graph.statements();
        let predicate_only = pattern.subject.is_none()
            && pattern.object.is_none()
            && pattern.named_graphs.is_empty();
        if let (true, false, Some(predicate)) =
            (predicate_only, self.needs_indexing(), &pattern.predicate)
        {
            return bucket(&self.by_predicate, predicate).to_vec();
        }
        match self.candidates(pattern) {
            Some(candidates) => candidates
                .into_iter()
                .filter(|p| pattern.matches(&statements[*p]))
                .collect(),
            None => (0..statements.len())
                .filter(|p| pattern.matches(&statements[*p]))
                .collect(),
        }
    }

    /// Matching statements in graph order, as an already indexed graph.
    pub fn sub_graph(&self, pattern: &TriplePattern) -> IndexedGraph {
        let mut graph = self.graph.empty_like();
        for position in self.matching_positions(pattern) {
            graph.push(self.graph.statements()[position].clone());
        }
        let mut result = IndexedGraph::from_graph(graph);
        result.index();
        result
    }

    /// Removes every statement matching `pattern`, keeping the indexes and
    /// the queue consistent. Returns the number removed.
    pub fn delete_statements(&mut self, pattern: &TriplePattern) -> usize {
        let deleted = self.matching_positions(pattern);
        if deleted.is_empty() {
            return 0;
        }

        for &position in &deleted {
            let statement = &self.graph.statements()[position];
            unlink(&mut self.by_subject, statement.subject(), position);
            unlink(&mut self.by_predicate, statement.predicate(), position);
            if let Some(object) = statement.object().as_resource() {
                unlink(&mut self.by_object, &object, position);
            }
            for graph in statement.named_graphs() {
                unlink(&mut self.by_named_graph, graph, position);
            }
        }
        self.unindexed.retain(|p| deleted.binary_search(p).is_err());
        self.graph.remove_positions(&deleted);

        for index in [&mut self.by_subject, &mut self.by_object, &mut self.by_named_graph] {
            for positions in index.values_mut() {
                shift_positions(positions, &deleted);
            }
        }
        for positions in self.by_predicate.values_mut() {
            shift_positions(positions, &deleted);
        }
        shift_positions(&mut self.unindexed, &deleted);

        self.graph.clear_tracking();
        let mut queued = self.unindexed.clone();
        queued.sort_unstable();
        for position in 0..self.graph.len() {
            if queued.binary_search(&position).is_err() {
                self.graph.track(position);
            }
        }
        info!("Deleted {} statements", deleted.len());
        deleted.len()
    }

    pub fn namespaces(&self) -> &NamespaceTable {
        self.graph.namespaces()
    }

    pub fn add_namespace(&mut self, prefix: &str, namespace: &str) -> String {
        self.graph.add_namespace(prefix, namespace)
    }

    pub fn qualified_name(&self, uri: &Uri) -> Option<String> {
        self.graph.qualified_name(uri)
    }

    pub fn all_qualified_names(&self, uri: &Uri) -> Vec<String> {
        self.graph.all_qualified_names(uri)
    }

    pub fn create_uri_from_qualified_name(&self, qualified_name: &str) -> Result<Uri> {
        self.graph.create_uri_from_qualified_name(qualified_name)
    }

    pub fn create_blank_node(&self) -> BlankNode {
        self.graph.create_blank_node()
    }
}

impl From<Graph> for IndexedGraph {
    fn from(graph: Graph) -> Self {
        IndexedGraph::from_graph(graph)
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

    fn sample() -> IndexedGraph {
        let mut graph = IndexedGraph::new();
        for i in 0..6 {
            let subject = uri(&format!("http://ex.org/s{}", i % 3));
            graph.add_statement(subject, uri(TYPE), uri(&format!("http://ex.org/C{}", i % 2)));
        }
        graph
    }

    #[test]
    fn test_add_defers_indexing() {
        let mut graph = sample();
        assert!(graph.needs_indexing());
        assert_eq!(graph.pending(), 6);
        assert!(graph.resources().is_empty());
        graph.index();
        assert!(!graph.needs_indexing());
        assert_eq!(graph.resources().len(), 5);
    }

    #[test]
    fn test_queries_see_pending_statements() {
        let mut graph = sample();
        graph.index();
        graph.add_statement(uri("http://ex.org/s0"), uri(LABEL), Literal::from(1i64));
        let sub = graph.sub_graph(&TriplePattern::new().subject(uri("http://ex.org/s0")));
        assert_eq!(sub.len(), 3);
        let labels = graph.sub_graph(&TriplePattern::new().predicate(uri(LABEL)));
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn test_progress_reports() {
        let config = GraphConfig::builder()
            .progress_interval(4usize)
            .build()
            .unwrap();
        let mut graph = IndexedGraph::with_config(config);
        for i in 0..10 {
            graph.add_statement(uri(&format!("http://ex.org/s{}", i)), uri(TYPE), uri("http://ex.org/C"));
        }
        let mut seen = Vec::new();
        graph.index_with_progress(&mut |done: usize, total: usize| seen.push((done, total)));
        assert_eq!(seen, vec![(4, 10), (8, 10), (10, 10)]);
    }

    #[test]
    fn test_delete_remaps_positions() {
        let mut graph = sample();
        graph.index();
        let removed = graph.delete_statements(&TriplePattern::new().subject(uri("http://ex.org/s1")));
        assert_eq!(removed, 2);
        assert_eq!(graph.len(), 4);
        for statement in graph.iter() {
            assert!(graph.contains(statement));
        }
        let c1 = graph.sub_graph(&TriplePattern::new().object(uri("http://ex.org/C1")));
        assert_eq!(c1.len(), 2);
        let fresh = graph.clone().into_graph().sub_graph(&TriplePattern::new().object(uri("http://ex.org/C1")));
        assert_eq!(fresh.len(), 2);
    }
}
