extern crate derive_builder;

pub mod config;
pub mod consts;
pub mod datatype;
pub mod decimal;
pub mod duration;
pub mod errors;
pub mod graph;
pub mod gregorian;
pub mod indexed;
pub mod literal;
pub mod namespace;
pub mod progress;
pub mod statement;
pub mod store;
pub mod term;
pub mod uri;
pub mod util;

pub use crate::config::GraphConfig;
pub use crate::datatype::Datatype;
pub use crate::decimal::Decimal;
pub use crate::duration::Duration;
pub use crate::errors::{RdfError, Result};
pub use crate::graph::Graph;
pub use crate::gregorian::{DateKind, GregorianDate};
pub use crate::indexed::IndexedGraph;
pub use crate::literal::Literal;
pub use crate::namespace::NamespaceTable;
pub use crate::progress::{LogProgress, NoProgress, ProgressReporter};
pub use crate::statement::{Statement, TriplePattern};
pub use crate::store::GraphStore;
pub use crate::term::{BlankNode, BlankNodeGenerator, Resource, Term, Value};
pub use crate::uri::Uri;

/// Initializes logging by reading the `RDFGRAPH_LOG` environment variable.
/// If `RDFGRAPH_LOG` is set, `RUST_LOG` is set to its value. `RDFGRAPH_LOG` takes
/// precedence over `RUST_LOG`. The logger itself (e.g. `env_logger::init()`) must be
/// initialized after this function for the level to take effect.
pub fn init_logging() {
    if let Ok(log_level) = std::env::var("RDFGRAPH_LOG") {
        std::env::set_var("RUST_LOG", log_level);
    }
}
