//! Configuration structures and loading.

use crate::error::{ConfigError, ConfigResult};
use crate::paths::AppPaths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub quality: QualityConfig,

    #[serde(default)]
    pub dify: DifyConfig,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> ConfigResult<Self> {
        let paths = AppPaths::new().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&paths.config_file)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Create a default config file with comments.
    pub fn create_default_file(path: &PathBuf) -> ConfigResult<()> {
        let default_config = Self::default_config_string();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, default_config)?;
        Ok(())
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.quality.min_score) {
            return Err(ConfigError::Invalid(format!(
                "quality.min_score must be in [0, 1], got {}",
                self.quality.min_score
            )));
        }
        Ok(())
    }

    /// Generate a default config file with helpful comments.
    pub fn default_config_string() -> String {
        r#"# Distill Configuration
# Document ingestion pipeline: DOCX -> LLM enrichment -> quality gate -> knowledge store

[paths]
# Directory scanned for incoming .docx files
inbox = "inbox"

# Root of the knowledge store (by_type/ and by_product/ live underneath)
knowledge = "knowledge"

[llm]
# Ollama server address
host = "http://localhost:11434"

# Model used for classification and markdown structuring
model = "gpt-oss:20b"

# Sampling temperature for enrichment calls
temperature = 0.3

# Maximum tokens per generation
max_tokens = 4096

# Request timeout in seconds
timeout_seconds = 120

[quality]
# Minimum quality gate score for a document to be accepted (0-1).
# Raising it makes acceptance stricter.
min_score = 0.7

[dify]
# Forward stored documents to a Dify dataset
enabled = false

# api_url = "https://api.dify.ai/v1"
# api_key = ""
# dataset_id = ""

# Upload timeout in seconds
timeout_seconds = 30
"#
        .to_string()
    }
}

/// Pipeline directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub inbox: PathBuf,
    pub knowledge: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            inbox: PathBuf::from("inbox"),
            knowledge: PathBuf::from("knowledge"),
        }
    }
}

/// LLM enrichment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub host: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: i32,
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            model: "gpt-oss:20b".to_string(),
            temperature: 0.3,
            max_tokens: 4096,
            timeout_seconds: 120,
        }
    }
}

/// Quality gate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Minimum total score for acceptance, in [0, 1].
    pub min_score: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self { min_score: 0.7 }
    }
}

/// Dify dataset upload settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DifyConfig {
    pub enabled: bool,
    pub api_url: String,
    pub api_key: String,
    pub dataset_id: String,
    pub timeout_seconds: u64,
}

impl Default for DifyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: String::new(),
            api_key: String::new(),
            dataset_id: String::new(),
            timeout_seconds: 30,
        }
    }
}
