//! TOML configuration file support for the convert command.
//!
//! Instead of editing cuts on the command line, settings can be kept in a file:
//!
//! ```toml
//! # mille.toml
//! [output]
//! text = false
//! keep_zeros = false
//! capacity = 5000
//!
//! [selection]
//! max_chi2 = 2000.0
//! min_pz = 100.0
//! max_pz = 5000.0
//! min_hits = 15
//!
//! [hierarchy]
//! six_dof_modules = false
//! layers = true
//! six_dof_layers = true
//! layer_z = false
//! stations = false
//! six_dof_stations = true
//! merge_sides = false
//! ```
//!
//! Omitted keys keep their defaults. The `--text` and `--zero` flags switch
//! their settings on regardless of the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use mille::tracks::{AlignmentConfig, Hierarchy, SelectionCuts};
use mille::writer::{Encoding, WriterConfig};

/// Root configuration structure for mille.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Record output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Track and hit cuts.
    #[serde(default)]
    pub selection: SelectionCuts,

    /// Label hierarchy.
    #[serde(default)]
    pub hierarchy: Hierarchy,
}

/// Settings of the record writer.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Write text records.
    pub text: Option<bool>,

    /// Keep zero-valued derivatives.
    pub keep_zeros: Option<bool>,

    /// Maximum entries per record.
    pub capacity: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Writer settings, with command-line switches applied on top
    pub fn writer_config(&self, text: bool, keep_zeros: bool) -> WriterConfig {
        let defaults = WriterConfig::default();
        let encoding = if text || self.output.text.unwrap_or(false) {
            Encoding::Text
        } else {
            Encoding::Binary
        };
        WriterConfig {
            encoding,
            keep_zeros: keep_zeros || self.output.keep_zeros.unwrap_or(defaults.keep_zeros),
            capacity: self.output.capacity.unwrap_or(defaults.capacity),
        }
    }

    /// Cuts and hierarchy for the track converter
    pub fn alignment(&self) -> AlignmentConfig {
        AlignmentConfig {
            selection: self.selection.clone(),
            hierarchy: self.hierarchy.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [output]
            text = true
            keep_zeros = true
            capacity = 800

            [selection]
            max_chi2 = 150.0
            min_hits = 8

            [hierarchy]
            layer_z = true
            stations = true
            six_dof_stations = false
            merge_sides = true
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.output.text, Some(true));
        assert_eq!(config.output.capacity, Some(800));

        let writer = config.writer_config(false, false);
        assert_eq!(writer.encoding, Encoding::Text);
        assert!(writer.keep_zeros);
        assert_eq!(writer.capacity, 800);

        let alignment = config.alignment();
        assert_eq!(alignment.selection.max_chi2, 150.0);
        assert_eq!(alignment.selection.min_hits, 8);
        assert_eq!(alignment.selection.max_pz, 5000.0);
        assert!(alignment.hierarchy.layers);
        assert!(alignment.hierarchy.layer_z);
        assert!(alignment.hierarchy.stations);
        assert!(!alignment.hierarchy.six_dof_stations);
        assert!(alignment.hierarchy.six_dof_layers);
        assert!(!alignment.hierarchy.six_dof_modules);
        assert!(alignment.hierarchy.merge_sides);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [output]
            capacity = 100
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.output.text, None);
        assert_eq!(config.alignment(), AlignmentConfig::default());

        let writer = config.writer_config(false, false);
        assert_eq!(writer.encoding, Encoding::Binary);
        assert_eq!(writer.capacity, 100);
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config::from_str("[output]\ntext = false\nkeep_zeros = false\n").unwrap();
        let writer = config.writer_config(true, true);
        assert_eq!(writer.encoding, Encoding::Text);
        assert!(writer.keep_zeros);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.output.capacity, None);

        let writer = config.writer_config(false, false);
        assert_eq!(writer.capacity, mille::writer::DEFAULT_CAPACITY);
        assert!(!writer.keep_zeros);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_str("[selection]\nmin_hits = \"many\"\n").is_err());
    }
}
