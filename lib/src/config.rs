//! Defines the configuration shared by `Graph` and `IndexedGraph`: prefix
//! fallback naming, blank node ids, default namespaces and progress reporting.

use anyhow::Result;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use std::path::Path;

#[derive(Builder, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[builder(default, setter(into))]
#[serde(default)]
pub struct GraphConfig {
    // base name for prefixes assigned on collision (ns, ns1, ns2, ...)
    pub fallback_prefix: String,
    // prefix of minted blank node ids
    pub blank_node_prefix: String,
    // register rdf, rdfs, owl and xsd on new graphs
    pub default_namespaces: bool,
    // statements between two progress reports while indexing
    pub progress_interval: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            fallback_prefix: "ns".to_string(),
            blank_node_prefix: "bn".to_string(),
            default_namespaces: true,
            progress_interval: 1000,
        }
    }
}

impl GraphConfig {
    pub fn builder() -> GraphConfigBuilder {
        GraphConfigBuilder::default()
    }

    pub fn save_to_file(&self, file: &Path) -> Result<()> {
        let config_str = serde_json::to_string_pretty(&self)?;
        let mut file = std::fs::File::create(file)?;
        file.write_all(config_str.as_bytes())?;
        Ok(())
    }

    pub fn from_file(file: &Path) -> Result<Self> {
        let file = std::fs::File::open(file)?;
        let reader = BufReader::new(file);
        let mut config: GraphConfig = serde_json::from_reader(reader)?;
        if config.progress_interval == 0 {
            config.progress_interval = GraphConfig::default().progress_interval;
        }
        Ok(config)
    }

    /// Prints out the current GraphConfig in a clear and readable way for command line output.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  Fallback prefix: {}", self.fallback_prefix);
        println!("  Blank node prefix: {}", self.blank_node_prefix);
        println!("  Default namespaces: {}", self.default_namespaces);
        println!("  Progress interval: {}", self.progress_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_defaults() {
        let config = GraphConfig::builder()
            .fallback_prefix("gen")
            .build()
            .unwrap();
        assert_eq!(config.fallback_prefix, "gen");
        assert_eq!(config.blank_node_prefix, "bn");
        assert!(config.default_namespaces);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let config = GraphConfig::builder()
            .default_namespaces(false)
            .progress_interval(10usize)
            .build()
            .unwrap();
        config.save_to_file(&path).unwrap();
        assert_eq!(GraphConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: GraphConfig = serde_json::from_str(r#"{"fallback_prefix": "p"}"#).unwrap();
        assert_eq!(config.fallback_prefix, "p");
        assert_eq!(config.progress_interval, 1000);
    }
}
