//! # Settings Module
//!
//! ## Purpose
//! Configuration of the batch tools: where the model records live, where the reaction count
//! report goes, which models a batch run takes, how model lines are recognized and which
//! external simulator answers the oscillation question during pruning.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "store_path": "models.json",
//!   "report_path": "reaction_counts.csv",
//!   "criteria": { "num_nodes": 3 },
//!   "log_level": "info",
//!   "syntax": { "comment_marker": "#", "floating_species_prefix": "var" },
//!   "oracle": { "program": "python3", "args": ["damped_analysis.py"] }
//! }
//! ```
//! Every field is optional; a missing configuration file means the defaults.
//!
//! ## Usage Pattern
//! ```rust
//! use OsciNet::settings::AnalysisConfig;
//!
//! let config = AnalysisConfig::load("no_such_config.json").unwrap();
//! assert_eq!(config.store_path, "models.json");
//! ```
use crate::Networks::antimony_model::ModelSyntax;
use crate::Networks::errors::NetworkError;
use crate::Networks::oracle::{CommandOracle, Oracle, ReplayOracle};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use simplelog::LevelFilter;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "oscinet_config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// JSON array of model records
    pub store_path: String,
    /// CSV file of the reaction count report
    pub report_path: String,
    /// models taken by batch runs
    pub criteria: Value,
    pub log_level: String,
    pub syntax: ModelSyntax,
    /// external simulator used as oracle
    pub oracle: Option<CommandOracle>,
    /// recorded verdicts used instead of a simulator
    pub replay_verdicts: Option<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            store_path: "models.json".to_string(),
            report_path: "reaction_counts.csv".to_string(),
            criteria: json!({}),
            log_level: "info".to_string(),
            syntax: ModelSyntax::default(),
            oracle: None,
            replay_verdicts: None,
        }
    }
}

impl AnalysisConfig {
    /// Loads configuration from a JSON file; a missing file gives the defaults.
    pub fn load<P: AsRef<Path>>(config_file: P) -> Result<Self, NetworkError> {
        let config_file = config_file.as_ref();
        if !config_file.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(config_file)?;
        let config: AnalysisConfig = serde_json::from_str(&content)?;
        info!("configuration loaded from '{}'", config_file.display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_file: P) -> Result<(), NetworkError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_file, content)?;
        Ok(())
    }

    /// unknown level names fall back to Info
    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        }
    }

    /// the simulator if one is configured, else the recorded verdicts
    pub fn oracle(&self) -> Result<Oracle, NetworkError> {
        match (&self.oracle, &self.replay_verdicts) {
            (Some(command), _) => Ok(Oracle::from(command.clone())),
            (None, Some(path)) => Ok(Oracle::from(ReplayOracle::from_file(path)?)),
            (None, None) => Err(NetworkError::Oracle(
                "neither 'oracle' nor 'replay_verdicts' is configured".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = AnalysisConfig::load("surely_missing_config.json").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.level_filter(), LevelFilter::Info);
        assert!(config.oracle().is_err());
    }

    #[test]
    fn test_partial_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{"report_path": "out.csv", "log_level": "debug",
                "syntax": {{"initial_condition_prefix": "X"}},
                "oracle": {{"program": "simulate"}}}}"#
        )
        .unwrap();
        let config = AnalysisConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.report_path, "out.csv");
        assert_eq!(config.store_path, "models.json");
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        assert_eq!(config.syntax.initial_condition_prefix, "X");
        assert_eq!(config.syntax.comment_marker, "#");
        assert!(matches!(config.oracle().unwrap(), Oracle::Command(_)));
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut config = AnalysisConfig::default();
        config.criteria = json!({"num_nodes": 3});
        config.save(temp_file.path()).unwrap();
        let loaded = AnalysisConfig::load(temp_file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let mut first = AnalysisConfig::default();
        let second = AnalysisConfig::default();
        first.criteria["ID"] = json!("1");
        assert_eq!(second.criteria, json!({}));
    }
}
