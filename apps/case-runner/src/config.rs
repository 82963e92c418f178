use anyhow::Result;
use config::{Config, File};
use serde::Deserialize;
use simple_testing::{
    ColorChoice, ConfigError, EvaluatorConfig, LoggerConfig, ReportMode, DEFAULT_LOG_FILE,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub level: u32,
    pub log_file: String,
    pub color: ColorChoice,
    pub timestamps: bool,
    pub strict: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        let logger = LoggerConfig::default();
        Self {
            level: logger.level,
            log_file: DEFAULT_LOG_FILE.to_string(),
            color: logger.color,
            timestamps: logger.timestamps,
            strict: false,
        }
    }
}

impl RunnerConfig {
    /// Load from a TOML/JSON/YAML file; a missing file yields the defaults.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let load_error = |e: config::ConfigError| ConfigError::Load {
            path: path.to_string(),
            msg: e.to_string(),
        };

        Config::builder()
            .add_source(File::with_name(path).required(false))
            .build()
            .map_err(load_error)?
            .try_deserialize()
            .map_err(load_error)
    }

    pub fn to_evaluator_config(&self) -> Result<EvaluatorConfig> {
        let logger = LoggerConfig::new(self.level)
            .with_log_file(PathBuf::from(&self.log_file))
            .with_color(self.color)
            .with_timestamps(self.timestamps);
        logger.validate()?;

        Ok(EvaluatorConfig {
            logger,
            report_mode: if self.strict {
                ReportMode::Strict
            } else {
                ReportMode::Explicit
            },
        })
    }
}
