mod error;
mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, parse_config, validate_config};
pub use types::{AnalysisConfig, LoggingConfig, LogtallyConfig, ReportConfig};
