use crate::term::{Resource, Term, Value};
use crate::uri::Uri;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A subject, predicate, object triple. The term fields are fixed at
/// construction; the named-graph list grows as the statement is added to
/// named graphs and takes no part in equality.
#[derive(Debug, Clone)]
pub struct Statement {
    subject: Resource,
    predicate: Uri,
    object: Value,
    named_graphs: Vec<Resource>,
}

impl Statement {
    pub fn new(subject: impl Into<Resource>, predicate: Uri, object: impl Into<Value>) -> Self {
        Statement {
            subject: subject.into(),
            predicate,
            object: object.into(),
            named_graphs: Vec::new(),
        }
    }

    pub fn in_graphs(mut self, graphs: impl IntoIterator<Item = Resource>) -> Self {
        for graph in graphs {
            self.add_named_graph(graph);
        }
        self
    }

    pub fn subject(&self) -> &Resource {
        &self.subject
    }

    pub fn predicate(&self) -> &Uri {
        &self.predicate
    }

    pub fn object(&self) -> &Value {
        &self.object
    }

    pub fn named_graphs(&self) -> &[Resource] {
        &self.named_graphs
    }

    /// Tags the statement with `graph`; tagging twice is a no-op.
    pub fn add_named_graph(&mut self, graph: Resource) {
        if !self.named_graphs.contains(&graph) {
            self.named_graphs.push(graph);
        }
    }

    pub fn is_in_named_graph(&self, graph: &Resource) -> bool {
        self.named_graphs.contains(graph)
    }

    /// `<s> <p> <o> .`
    pub fn sparql(&self) -> String {
        format!(
            "{} {} {} .",
            self.subject.sparql(),
            self.predicate.sparql(),
            self.object.sparql()
        )
    }
}

impl PartialEq for Statement {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject
            && self.predicate == other.predicate
            && self.object == other.object
    }
}

impl Eq for Statement {}

impl Hash for Statement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.subject.hash(state);
        self.predicate.hash(state);
        self.object.hash(state);
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sparql())
    }
}

/// A sub-graph query. `None` matches anything in that position; a non-empty
/// `named_graphs` list matches statements tagged with at least one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: Option<Resource>,
    pub predicate: Option<Uri>,
    pub object: Option<Value>,
    pub named_graphs: Vec<Resource>,
}

impl TriplePattern {
    pub fn new() -> Self {
        TriplePattern::default()
    }

    pub fn subject(mut self, subject: impl Into<Resource>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn predicate(mut self, predicate: Uri) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn object(mut self, object: impl Into<Value>) -> Self {
        self.object = Some(object.into());
        self
    }

    pub fn named_graph(mut self, graph: impl Into<Resource>) -> Self {
        self.named_graphs.push(graph.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.predicate.is_none()
            && self.object.is_none()
            && self.named_graphs.is_empty()
    }

    pub fn matches(&self, statement: &Statement) -> bool {
        self.subject
            .as_ref()
            .map_or(true, |s| statement.subject() == s)
            && self
                .predicate
                .as_ref()
                .map_or(true, |p| statement.predicate() == p)
            && self
                .object
                .as_ref()
                .map_or(true, |o| statement.object() == o)
            && (self.named_graphs.is_empty()
                || self
                    .named_graphs
                    .iter()
                    .any(|g| statement.is_in_named_graph(g)))
    }
}
