//! Configuration for the qpad CLI.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QPAD_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file (`--config`, else `~/.qpad/config.yaml` if present)
//! 3. Default values
//!
//! Command-line flags on `run` and `grid` override all of the above.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use qpad_adapter_sim::{OutputMode, Simulator};
use qpad_source::CellCodeTable;

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QpadConfig {
    /// Simulation defaults
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Grid cell code table
    #[serde(default)]
    pub grid: CellCodeTable,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Simulation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of shots sampled in counts mode
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Output mode: "statevector", "counts" or "memory"
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Fixed sampler seed
    #[serde(default)]
    pub seed: Option<u64>,

    /// Largest circuit the simulator accepts
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_shots() -> u32 {
    1024
}

fn default_mode() -> String {
    "counts".to_string()
}

fn default_max_qubits() -> u32 {
    qpad_adapter_sim::DEFAULT_MAX_QUBITS
}

fn default_log_level() -> String {
    "warn".to_string()
}

const MAX_QUBITS_CEILING: u32 = qpad_adapter_sim::MAX_QUBITS;

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            shots: default_shots(),
            mode: default_mode(),
            seed: None,
            max_qubits: default_max_qubits(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl QpadConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;

        let config: QpadConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Environment variable overrides
    /// 2. The given file, or the default file if it exists
    /// 3. Defaults
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(path)?,
                _ => QpadConfig::default(),
            },
        };

        config = config.merge_env();

        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// Only variables that are set and parse override the current values.
    fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        // Simulation
        if let Some(val) = var("QPAD_SHOTS").and_then(|v| v.parse().ok()) {
            self.simulation.shots = val;
        }
        if let Some(v) = var("QPAD_MODE") {
            self.simulation.mode = v;
        }
        if let Some(val) = var("QPAD_SEED").and_then(|v| v.parse().ok()) {
            self.simulation.seed = Some(val);
        }
        if let Some(val) = var("QPAD_MAX_QUBITS").and_then(|v| v.parse().ok()) {
            self.simulation.max_qubits = val;
        }

        // Logging
        if let Some(v) = var("QPAD_LOG_LEVEL") {
            self.logging.level = v;
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate output mode
        self.output_mode()?;

        // Validate qubit limit
        if self.simulation.max_qubits == 0 || self.simulation.max_qubits > MAX_QUBITS_CEILING {
            return Err(ConfigError::ValidationError(format!(
                "max_qubits must be between 1 and {MAX_QUBITS_CEILING}, got {}",
                self.simulation.max_qubits
            )));
        }

        // Validate log level
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        // Validate grid codes
        if self.grid.gates.contains_key(&self.grid.empty) {
            return Err(ConfigError::ValidationError(format!(
                "Grid code {} is used both as empty and as a gate",
                self.grid.empty
            )));
        }

        Ok(())
    }

    /// The configured output mode.
    pub fn output_mode(&self) -> Result<OutputMode, ConfigError> {
        self.simulation
            .mode
            .parse()
            .map_err(|e: qpad_adapter_sim::SimError| ConfigError::ValidationError(e.to_string()))
    }

    /// A simulator honouring the configured limit and seed.
    pub fn simulator(&self) -> Simulator {
        let sim = Simulator::new().with_max_qubits(self.simulation.max_qubits);
        match self.simulation.seed {
            Some(seed) => sim.with_seed(seed),
            None => sim,
        }
    }
}

/// Return the default configuration file path (~/.qpad/config.yaml).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".qpad").join("config.yaml"))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpad_source::GateKeyword;
    use std::io::Write;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn test_default_config() {
        let config = QpadConfig::default();
        assert_eq!(config.simulation.shots, 1024);
        assert_eq!(config.simulation.mode, "counts");
        assert_eq!(config.simulation.seed, None);
        assert_eq!(config.simulation.max_qubits, 16);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.grid, CellCodeTable::default());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = QpadConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_mode() {
        let mut config = QpadConfig::default();
        config.simulation.mode = "histogram".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = QpadConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_max_qubits_bounds() {
        let mut config = QpadConfig::default();
        config.simulation.max_qubits = 0;
        assert!(config.validate().is_err());
        config.simulation.max_qubits = 31;
        assert!(config.validate().is_err());
        config.simulation.max_qubits = 30;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_grid_empty_collision() {
        let mut config = QpadConfig::default();
        config.grid.gates.insert(0, GateKeyword::H);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = QpadConfig::default().merge_vars(vars(&[
            ("QPAD_SHOTS", "77"),
            ("QPAD_MODE", "memory"),
            ("QPAD_SEED", "5"),
            ("QPAD_MAX_QUBITS", "8"),
            ("QPAD_LOG_LEVEL", "debug"),
        ]));
        assert_eq!(config.simulation.shots, 77);
        assert_eq!(config.output_mode().unwrap(), OutputMode::Memory);
        assert_eq!(config.simulation.seed, Some(5));
        assert_eq!(config.simulation.max_qubits, 8);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_unparsable_env_ignored() {
        let config = QpadConfig::default().merge_vars(vars(&[("QPAD_SHOTS", "many")]));
        assert_eq!(config.simulation.shots, 1024);
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "simulation:\n  shots: 10\n  seed: 3\ngrid:\n  empty: -1\n  gates:\n    5: x\n"
        )
        .unwrap();

        let config = QpadConfig::from_file(file.path()).unwrap();
        assert_eq!(config.simulation.shots, 10);
        assert_eq!(config.simulation.seed, Some(3));
        assert_eq!(config.simulation.mode, "counts");
        assert_eq!(config.grid.lookup(5), Some(GateKeyword::X));
        assert_eq!(config.grid.lookup(1), None);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_from_file_missing() {
        let result = QpadConfig::from_file("/nonexistent/qpad.yaml");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_from_file_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "simulation: [1, 2").unwrap();
        assert!(matches!(
            QpadConfig::from_file(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_simulator_from_config() {
        let mut config = QpadConfig::default();
        config.simulation.max_qubits = 4;
        config.simulation.seed = Some(1);
        let sim = config.simulator();
        assert_eq!(sim.max_qubits(), 4);
        assert_eq!(sim.seed(), Some(1));
    }
}
