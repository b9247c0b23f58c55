use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration shared by both services
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub sentiment: SentimentSettings,
    pub summary: SummarySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentimentSettings {
    pub server: ServerSettings,
    pub classifier: ClassifierSettings,
}

/// Hugging Face Inference API settings
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSettings {
    pub endpoint: String,
    pub model: String,
    pub api_token: Option<String>,
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub wait_for_model: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarySettings {
    pub server: ServerSettings,
    pub generator: GeneratorSettings,
}

/// Gemini API settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ClassifierSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl GeneratorSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

pub const DEFAULT_SENTIMENT_MODEL: &str = "nlptown/bert-base-multilingual-uncased-sentiment";
pub const DEFAULT_SUMMARY_MODEL: &str = "gemini-1.5-pro-latest";

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with INSIGHTS_)
    /// 5. Well-known credential variables (GEMINI_API_KEY, GOOGLE_API_KEY, HF_API_TOKEN)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., INSIGHTS_SUMMARY__SERVER__PORT -> summary.server.port
            .add_source(environment())
            .build()?;

        substitute_credentials(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        substitute_credentials(settings)?.try_deserialize()
    }

    /// Parse an in-memory TOML document on top of the built-in defaults
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        with_defaults(Config::builder())?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("INSIGHTS")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("logging.level", default_log_level())?
        .set_default("logging.format", default_log_format())?
        .set_default("sentiment.server.host", "127.0.0.1")?
        .set_default("sentiment.server.port", 5000)?
        .set_default("sentiment.classifier.endpoint", "https://router.huggingface.co/hf-inference")?
        .set_default("sentiment.classifier.model", DEFAULT_SENTIMENT_MODEL)?
        .set_default("sentiment.classifier.wait_for_model", true)?
        .set_default("summary.server.host", "127.0.0.1")?
        .set_default("summary.server.port", 6000)?
        .set_default("summary.generator.endpoint", "https://generativelanguage.googleapis.com")?
        .set_default("summary.generator.model", DEFAULT_SUMMARY_MODEL)
}

/// Pull credentials from the conventional environment variables
///
/// GEMINI_API_KEY wins over GOOGLE_API_KEY. Keys are never read from source.
fn substitute_credentials(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let gemini_key = env::var("GEMINI_API_KEY")
        .or_else(|_| env::var("GOOGLE_API_KEY"))
        .ok()
        .filter(|key| !key.is_empty());
    let hf_token = env::var("HF_API_TOKEN")
        .ok()
        .filter(|token| !token.is_empty());

    let mut builder = Config::builder().add_source(settings);

    if let Some(key) = gemini_key {
        builder = builder.set_override("summary.generator.api_key", key)?;
    }
    if let Some(token) = hf_token {
        builder = builder.set_override("sentiment.classifier.api_token", token)?;
    }

    builder.build()
}
