//! Configuration management for the zodiac consultation CLI.
//!
//! Settings are layered, later layers winning:
//! - Built-in defaults
//! - The workspace config file (`.zodiac/config.yaml`)
//! - Environment variables
//! - Command-line flags
//!
//! Relative paths in any layer resolve against the workspace root.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::logging::LogFormat;

/// Providers the LLM factory knows how to build.
pub const KNOWN_PROVIDERS: &[&str] = &["ollama"];

/// Embedding providers the knowledge crate knows how to build.
pub const KNOWN_EMBEDDING_PROVIDERS: &[&str] = &["trigram", "ollama"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .zodiac/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider used for answer generation
    pub provider: String,

    /// Model identifier for answer generation
    pub model: String,

    /// Custom LLM endpoint (provider default when unset)
    pub endpoint: Option<String>,

    /// Sampling temperature for answers
    pub temperature: f32,

    /// Maximum tokens per answer
    pub max_tokens: u32,

    /// HTTP timeout for the LLM and embedding services, in seconds
    pub timeout_secs: u64,

    /// Reference document and index settings
    pub knowledge: KnowledgeSettings,

    /// Optional CSV sign table replacing the built-in one
    pub signs_table: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Log output format
    pub log_format: LogFormat,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Settings for the reference document and its index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeSettings {
    /// Document ingested at startup
    pub document: PathBuf,

    /// Chunk capacity in characters
    pub chunk_size: usize,

    /// Characters shared by neighbouring chunks
    pub chunk_overlap: usize,

    /// Embedding provider settings
    pub embedding: EmbeddingSettings,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            document: PathBuf::from("zodiac_info.md"),
            chunk_size: 1000,
            chunk_overlap: 200,
            embedding: EmbeddingSettings::default(),
        }
    }
}

/// Embedding provider settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingSettings {
    /// Provider name: "trigram" or "ollama"
    pub provider: String,

    /// Model identifier (provider-specific)
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// Custom endpoint for remote providers
    pub endpoint: Option<String>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "trigram".to_string(),
            model: "trigram-v1".to_string(),
            dimensions: 384,
            endpoint: None,
        }
    }
}

/// Overrides collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub workspace: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub document: Option<PathBuf>,
    pub signs_table: Option<PathBuf>,
    pub log_level: Option<String>,
    pub verbose: bool,
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    llm: Option<LlmSection>,
    knowledge: Option<KnowledgeSection>,
    signs: Option<SignsSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KnowledgeSection {
    document: Option<PathBuf>,
    chunk_size: Option<usize>,
    chunk_overlap: Option<usize>,
    embedding: Option<EmbeddingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmbeddingSection {
    provider: Option<String>,
    model: Option<String>,
    dimensions: Option<usize>,
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SignsSection {
    table: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
    format: Option<LogFormat>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "ollama".to_string(), // Local-first default
            model: "llama3.2".to_string(),
            endpoint: None,
            temperature: 0.7,
            max_tokens: 2048,
            timeout_secs: 60,
            knowledge: KnowledgeSettings::default(),
            signs_table: None,
            log_level: None,
            log_format: LogFormat::Pretty,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from all layers.
    ///
    /// Environment variables:
    /// - `ZODIAC_WORKSPACE`: Override workspace path
    /// - `ZODIAC_CONFIG`: Path to config file
    /// - `ZODIAC_PROVIDER`: LLM provider
    /// - `ZODIAC_MODEL`: Model identifier
    /// - `ZODIAC_ENDPOINT`: LLM endpoint
    /// - `ZODIAC_DOCUMENT`: Reference document
    /// - `ZODIAC_SIGNS`: CSV sign table
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use zodiac_core::config::{AppConfig, ConfigOverrides};
    ///
    /// let config = AppConfig::load(ConfigOverrides::default()).expect("Failed to load config");
    /// println!("Document: {:?}", config.document_path());
    /// ```
    pub fn load(overrides: ConfigOverrides) -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("ZODIAC_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }
        if let Ok(config_file) = std::env::var("ZODIAC_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }
        if let Some(ref workspace) = overrides.workspace {
            config.workspace = workspace.clone();
        }
        if let Some(ref config_file) = overrides.config_file {
            config.config_file = Some(config_file.clone());
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => config.resolve_path(cf),
            None => config.zodiac_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        config.apply_env();
        config.apply_overrides(overrides);

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &Path) -> AppResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        self.merge_file(file);
        tracing::debug!("Merged config file {:?}", path);
        Ok(())
    }

    fn merge_file(&mut self, file: ConfigFile) {
        if let Some(llm) = file.llm {
            if let Some(provider) = llm.provider {
                self.provider = provider;
            }
            if let Some(model) = llm.model {
                self.model = model;
            }
            if llm.endpoint.is_some() {
                self.endpoint = llm.endpoint;
            }
            if let Some(temperature) = llm.temperature {
                self.temperature = temperature;
            }
            if let Some(max_tokens) = llm.max_tokens {
                self.max_tokens = max_tokens;
            }
            if let Some(timeout) = llm.timeout {
                self.timeout_secs = timeout;
            }
        }

        if let Some(knowledge) = file.knowledge {
            if let Some(document) = knowledge.document {
                self.knowledge.document = document;
            }
            if let Some(chunk_size) = knowledge.chunk_size {
                self.knowledge.chunk_size = chunk_size;
            }
            if let Some(chunk_overlap) = knowledge.chunk_overlap {
                self.knowledge.chunk_overlap = chunk_overlap;
            }
            if let Some(embedding) = knowledge.embedding {
                let target = &mut self.knowledge.embedding;
                if let Some(provider) = embedding.provider {
                    target.provider = provider;
                }
                if let Some(model) = embedding.model {
                    target.model = model;
                }
                if let Some(dimensions) = embedding.dimensions {
                    target.dimensions = dimensions;
                }
                if embedding.endpoint.is_some() {
                    target.endpoint = embedding.endpoint;
                }
            }
        }

        if let Some(table) = file.signs.and_then(|s| s.table) {
            self.signs_table = Some(table);
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
            if let Some(format) = logging.format {
                self.log_format = format;
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(provider) = std::env::var("ZODIAC_PROVIDER") {
            self.provider = provider;
        }
        if let Ok(model) = std::env::var("ZODIAC_MODEL") {
            self.model = model;
        }
        if let Ok(endpoint) = std::env::var("ZODIAC_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }
        if let Ok(document) = std::env::var("ZODIAC_DOCUMENT") {
            self.knowledge.document = PathBuf::from(document);
        }
        if let Ok(table) = std::env::var("ZODIAC_SIGNS") {
            self.signs_table = Some(PathBuf::from(table));
        }
        if let Ok(level) = std::env::var("RUST_LOG") {
            self.log_level = Some(level);
        }
        if std::env::var("NO_COLOR").is_ok() {
            self.no_color = true;
        }
    }

    /// Apply CLI overrides, which take precedence over everything else.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(provider) = overrides.provider {
            self.provider = provider;
        }
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(document) = overrides.document {
            self.knowledge.document = document;
        }
        if let Some(table) = overrides.signs_table {
            self.signs_table = Some(table);
        }
        if let Some(level) = overrides.log_level {
            self.log_level = Some(level);
        }
        if overrides.verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }
        if overrides.no_color {
            self.no_color = true;
        }
    }

    /// Get the path to the .zodiac directory.
    pub fn zodiac_dir(&self) -> PathBuf {
        self.workspace.join(".zodiac")
    }

    /// Resolve a possibly relative path against the workspace root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    /// Absolute path of the reference document.
    pub fn document_path(&self) -> PathBuf {
        self.resolve_path(&self.knowledge.document)
    }

    /// Absolute path of the CSV sign table, if one is configured.
    pub fn signs_table_path(&self) -> Option<PathBuf> {
        self.signs_table.as_deref().map(|p| self.resolve_path(p))
    }

    /// Validate provider names and chunking parameters.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        let embedding = &self.knowledge.embedding;
        if !KNOWN_EMBEDDING_PROVIDERS.contains(&embedding.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                embedding.provider,
                KNOWN_EMBEDDING_PROVIDERS.join(", ")
            )));
        }
        if embedding.dimensions == 0 {
            return Err(AppError::Config(
                "Embedding dimensions must be positive".to_string(),
            ));
        }

        if self.knowledge.chunk_size == 0 {
            return Err(AppError::Config("Chunk size must be positive".to_string()));
        }
        if self.knowledge.chunk_overlap >= self.knowledge.chunk_size {
            return Err(AppError::Config(format!(
                "Chunk overlap ({}) must be smaller than chunk size ({})",
                self.knowledge.chunk_overlap, self.knowledge.chunk_size
            )));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::Config(format!(
                "Temperature {} is outside 0.0-2.0",
                self.temperature
            )));
        }

        Ok(())
    }
}
