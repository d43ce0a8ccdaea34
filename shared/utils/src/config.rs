use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub extraction: ExtractionConfig,
    pub comparison: ComparisonConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Token delimiter for `.txt` inputs; whitespace runs when unset.
    pub txt_delimiter: Option<String>,
    /// Treat the first `.txt` line as a header when it names both a part
    /// number and a quantity column. PDF text and document paragraphs are
    /// always positional.
    pub promote_header_row: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub max_targets: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty_json: bool,
    pub export_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("BOMDIFF").separator("__"));

        config.build()?.try_deserialize()
    }

    /// Load a single explicit file, still honouring environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .add_source(File::from(path))
            .add_source(Environment::with_prefix("BOMDIFF").separator("__"))
            .build()?
            .try_deserialize()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            file_path: None,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            txt_delimiter: None,
            promote_header_row: false,
        }
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self { max_targets: 5 }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            export_dir: None,
        }
    }
}
