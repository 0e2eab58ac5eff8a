use crate::conf::error::ConfigError;
use crate::conf::types::LogtallyConfig;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub fn load_config(path: &Path) -> Result<LogtallyConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_config(path, &s)
}

pub fn parse_config(path: &Path, s: &str) -> Result<LogtallyConfig, ConfigError> {
    let cfg: LogtallyConfig = hcl::from_str(s).map_err(|e| ConfigError::parse(path, e))?;
    validate_config(&cfg)?;
    Ok(cfg)
}

pub fn validate_config(cfg: &LogtallyConfig) -> Result<(), ConfigError> {
    if cfg.report.top_n == 0 {
        return Err(ConfigError::invalid("report.top_n", "must be at least 1"));
    }

    if cfg.analysis.jobs == 0 {
        return Err(ConfigError::invalid("analysis.jobs", "must be at least 1"));
    }

    if let Err(e) = EnvFilter::try_new(&cfg.logging.level) {
        return Err(ConfigError::invalid("logging.level", e.to_string()));
    }

    if let Some(file) = &cfg.logging.file {
        if file.file_name().is_none() {
            return Err(ConfigError::invalid(
                "logging.file",
                format!("'{}' does not name a file", file.display()),
            ));
        }
    }

    Ok(())
}
