use anyhow::Result;

use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::consts::XSD_NS;
use crate::graph::Graph;

/// Writes the graph as Turtle: one `@prefix` line per registered prefix
/// (`xsd` always included, since literals render as `xsd:` names), then one
/// statement per line.
pub fn write_graph<W: Write>(graph: &Graph, writer: W) -> Result<()> {
    let mut out = BufWriter::new(writer);
    let mut wrote_xsd = false;
    for (prefix, namespace) in graph.namespaces().iter() {
        if prefix == "xsd" {
            if namespace != XSD_NS {
                continue;
            }
            wrote_xsd = true;
        }
        writeln!(out, "@prefix {}: <{}> .", prefix, namespace)?;
    }
    if !wrote_xsd {
        writeln!(out, "@prefix xsd: <{}> .", XSD_NS)?;
    }
    writeln!(out)?;
    for statement in graph.iter() {
        writeln!(out, "{}", statement.sparql())?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_graph_to_file(graph: &Graph, file: &Path) -> Result<()> {
    info!(
        "Writing graph to file: {} with length {}",
        file.display(),
        graph.len()
    );
    let file = std::fs::File::create(file)?;
    write_graph(graph, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LABEL;
    use crate::literal::Literal;
    use crate::uri::Uri;

    #[test]
    fn test_dump_lists_prefixes_then_statements() {
        let mut graph = Graph::new();
        graph.add_statement(
            Uri::parse("http://ex.org/apple").unwrap(),
            Uri::parse(LABEL).unwrap(),
            Literal::with_language("appel", "nl").unwrap(),
        );
        let mut buffer = Vec::new();
        write_graph(&graph, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("@prefix rdf: "));
        assert_eq!(text.matches("@prefix xsd:").count(), 1);
        assert!(text.ends_with(
            "<http://ex.org/apple> <http://www.w3.org/2000/01/rdf-schema#label> \"appel\"@nl .\n"
        ));
    }

    #[test]
    fn test_dump_without_default_prefixes_still_declares_xsd() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ttl");
        let config = crate::config::GraphConfig::builder()
            .default_namespaces(false)
            .build()
            .unwrap();
        let graph = Graph::with_config(config);
        write_graph_to_file(&graph, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("@prefix xsd: <http://www.w3.org/2001/XMLSchema#> ."));
    }
}
