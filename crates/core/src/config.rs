//! Configuration management for the RAG assistant.
//!
//! Configuration is layered, later sources winning:
//! - Built-in defaults (local backend, extractive answers)
//! - Config file (`.ragassist/config.yaml` or an explicit path)
//! - Environment variables
//! - Command-line flags
//!
//! The configuration is workspace-centric: documents and the vector store
//! are resolved relative to the workspace root unless given as absolute paths.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Name of the per-workspace state directory.
pub const APP_DIR: &str = ".ragassist";

/// Embedding providers understood by the knowledge crate.
pub const EMBEDDING_PROVIDERS: [&str; 3] = ["trigram", "ollama", "openai"];

/// Language model providers understood by the LLM crate.
pub const LLM_PROVIDERS: [&str; 2] = ["ollama", "openai"];

/// Deployment backend preset.
///
/// A backend selects a coherent embedding/LLM pair in one switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Local trigram embeddings, no language model (extractive answers)
    Local,
    /// OpenAI embeddings and chat completions
    OpenAi,
}

impl Backend {
    /// Parse a backend name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Some(Self::Local),
            "openai" => Some(Self::OpenAi),
            _ => None,
        }
    }

    /// Canonical backend name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::OpenAi => "openai",
        }
    }
}

/// Embedding model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// Provider name ("trigram", "ollama", "openai")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Embedding vector dimension
    pub dimensions: usize,

    /// Optional API endpoint override
    pub endpoint: Option<String>,

    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
}

impl EmbeddingSettings {
    fn local() -> Self {
        Self {
            provider: "trigram".to_string(),
            model: "trigram-v1".to_string(),
            dimensions: 384,
            endpoint: None,
            api_key_env: None,
        }
    }

    fn openai() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
            endpoint: None,
            api_key_env: Some("OPENAI_API_KEY".to_string()),
        }
    }
}

/// Language model settings. Absent when answers are extractive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Provider name ("ollama", "openai")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Optional API endpoint override
    pub endpoint: Option<String>,

    /// Environment variable holding the API key
    pub api_key_env: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl LlmSettings {
    fn openai() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            endpoint: None,
            api_key_env: Some("OPENAI_API_KEY".to_string()),
            timeout_secs: 60,
            temperature: 0.1,
            max_tokens: None,
        }
    }

    fn ollama() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "llama3.2".to_string(),
            endpoint: None,
            api_key_env: None,
            timeout_secs: 60,
            temperature: 0.1,
            max_tokens: None,
        }
    }

    /// Default settings for a provider name.
    pub fn for_provider(provider: &str) -> Self {
        match provider {
            "ollama" => Self::ollama(),
            _ => Self {
                provider: provider.to_string(),
                ..Self::openai()
            },
        }
    }
}

/// Retrieval and chunking settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalSettings {
    /// Number of candidate chunks fetched from the index per question
    pub top_k: usize,

    /// Chunk size in characters
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: 4,
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// HTTP service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .ragassist/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Backend preset the embedding/LLM settings were derived from
    pub backend: Backend,

    /// Directory holding the documents to index
    pub docs_dir: PathBuf,

    /// Directory holding the vector store
    pub store_dir: PathBuf,

    /// Embedding settings
    pub embedding: EmbeddingSettings,

    /// Language model settings; `None` selects extractive answers
    pub llm: Option<LlmSettings>,

    /// Retrieval settings
    pub retrieval: RetrievalSettings,

    /// HTTP service settings
    pub server: ServerSettings,

    /// Log level override
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    pub log_json: bool,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// On-disk configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    backend: Option<String>,
    docs_dir: Option<String>,
    store_dir: Option<String>,
    embeddings: Option<EmbeddingsSection>,
    llm: Option<LlmSection>,
    retrieval: Option<RetrievalSection>,
    server: Option<ServerSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmbeddingsSection {
    provider: String,
    model: Option<String>,
    dimensions: Option<usize>,
    endpoint: Option<String>,
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmSection {
    /// "none" disables generation
    provider: String,
    model: Option<String>,
    endpoint: Option<String>,
    api_key_env: Option<String>,
    timeout: Option<u64>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalSection {
    top_k: Option<usize>,
    chunk_size: Option<usize>,
    chunk_overlap: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
    json: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            backend: Backend::Local,
            docs_dir: PathBuf::from("data/docs"),
            store_dir: PathBuf::from(APP_DIR).join("store"),
            embedding: EmbeddingSettings::local(),
            llm: None,
            retrieval: RetrievalSettings::default(),
            server: ServerSettings::default(),
            log_level: None,
            log_json: false,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file, environment and defaults.
    ///
    /// Environment variables:
    /// - `RAG_WORKSPACE`: Override workspace path
    /// - `RAG_CONFIG`: Path to config file
    /// - `RAG_BACKEND`: Backend preset (`local` or `openai`)
    /// - `RAG_LLM_PROVIDER`: Language model provider (`none` disables it)
    /// - `RAG_LLM_MODEL`: Language model identifier
    /// - `OPENAI_EMBED_MODEL`: Embedding model for the OpenAI provider
    /// - `PORT`: HTTP port
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use ragassist_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Docs: {:?}", config.docs_path());
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration using a custom environment lookup.
    pub fn load_with<F>(env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(workspace) = env("RAG_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Some(config_file) = env("RAG_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.app_dir().join("config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        config.apply_env(env)?;

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();
        result.merge_file(file)?;

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    fn merge_file(&mut self, file: ConfigFile) -> AppResult<()> {
        // The backend preset goes first so explicit sections can refine it
        if let Some(backend) = file.backend {
            self.apply_backend(parse_backend(&backend)?);
        }

        if let Some(docs_dir) = file.docs_dir {
            self.docs_dir = PathBuf::from(docs_dir);
        }

        if let Some(store_dir) = file.store_dir {
            self.store_dir = PathBuf::from(store_dir);
        }

        if let Some(section) = file.embeddings {
            let base = if section.provider == "openai" {
                EmbeddingSettings::openai()
            } else if section.provider == self.embedding.provider {
                self.embedding.clone()
            } else {
                EmbeddingSettings {
                    provider: section.provider.clone(),
                    ..EmbeddingSettings::local()
                }
            };

            self.embedding = EmbeddingSettings {
                provider: section.provider,
                model: section.model.unwrap_or(base.model),
                dimensions: section.dimensions.unwrap_or(base.dimensions),
                endpoint: section.endpoint.or(base.endpoint),
                api_key_env: section.api_key_env.or(base.api_key_env),
            };
        }

        if let Some(section) = file.llm {
            if section.provider.eq_ignore_ascii_case("none") {
                self.llm = None;
            } else {
                let base = LlmSettings::for_provider(&section.provider);
                self.llm = Some(LlmSettings {
                    provider: section.provider,
                    model: section.model.unwrap_or(base.model),
                    endpoint: section.endpoint.or(base.endpoint),
                    api_key_env: section.api_key_env.or(base.api_key_env),
                    timeout_secs: section.timeout.unwrap_or(base.timeout_secs),
                    temperature: section.temperature.unwrap_or(base.temperature),
                    max_tokens: section.max_tokens.or(base.max_tokens),
                });
            }
        }

        if let Some(retrieval) = file.retrieval {
            if let Some(top_k) = retrieval.top_k {
                self.retrieval.top_k = top_k;
            }
            if let Some(chunk_size) = retrieval.chunk_size {
                self.retrieval.chunk_size = chunk_size;
            }
            if let Some(chunk_overlap) = retrieval.chunk_overlap {
                self.retrieval.chunk_overlap = chunk_overlap;
            }
        }

        if let Some(server) = file.server {
            if let Some(host) = server.host {
                self.server.host = host;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
            if let Some(json) = logging.json {
                self.log_json = json;
            }
        }

        Ok(())
    }

    /// Apply environment variable overrides.
    fn apply_env<F>(&mut self, env: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = env("RAG_BACKEND") {
            self.apply_backend(parse_backend(&backend)?);
        }

        if let Some(provider) = env("RAG_LLM_PROVIDER") {
            if provider.eq_ignore_ascii_case("none") {
                self.llm = None;
            } else if self.llm.as_ref().map(|l| l.provider.as_str()) != Some(provider.as_str()) {
                self.llm = Some(LlmSettings::for_provider(&provider));
            }
        }

        if let Some(model) = env("RAG_LLM_MODEL") {
            if let Some(llm) = self.llm.as_mut() {
                llm.model = model;
            }
        }

        if self.embedding.provider == "openai" {
            if let Some(model) = env("OPENAI_EMBED_MODEL") {
                self.embedding.model = model;
            }
        }

        if let Some(port) = env("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid PORT value: {}", port)))?;
        }

        if let Some(level) = env("RUST_LOG") {
            self.log_level = Some(level);
        }

        if env("NO_COLOR").is_some() {
            self.no_color = true;
        }

        Ok(())
    }

    /// Replace embedding and LLM settings with a backend preset.
    pub fn apply_backend(&mut self, backend: Backend) {
        self.backend = backend;
        match backend {
            Backend::Local => {
                self.embedding = EmbeddingSettings::local();
                self.llm = None;
            }
            Backend::OpenAi => {
                self.embedding = EmbeddingSettings::openai();
                self.llm = Some(LlmSettings::openai());
            }
        }
    }

    /// Apply CLI logging overrides to the configuration.
    ///
    /// Workspace, config file and backend shape what is loaded, so the CLI
    /// passes them through [`AppConfig::load_with`] instead.
    pub fn with_overrides(
        mut self,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
        log_json: bool,
    ) -> Self {
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        if log_json {
            self.log_json = true;
        }

        self
    }

    /// Get the path to the .ragassist directory.
    pub fn app_dir(&self) -> PathBuf {
        self.workspace.join(APP_DIR)
    }

    /// Ensure the .ragassist directory exists.
    pub fn ensure_app_dir(&self) -> AppResult<()> {
        let app_dir = self.app_dir();
        if !app_dir.exists() {
            std::fs::create_dir_all(&app_dir).map_err(|e| {
                AppError::Config(format!("Failed to create {} directory: {}", APP_DIR, e))
            })?;
        }
        Ok(())
    }

    /// Absolute path of the documents directory.
    pub fn docs_path(&self) -> PathBuf {
        self.resolve(&self.docs_dir)
    }

    /// Absolute path of the vector store directory.
    pub fn store_path(&self) -> PathBuf {
        self.resolve(&self.store_dir)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    /// Resolve an API key from the named environment variable.
    pub fn resolve_api_key(&self, api_key_env: Option<&str>) -> Option<String> {
        api_key_env
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Validate the configuration before any component is built.
    pub fn validate(&self) -> AppResult<()> {
        if !EMBEDDING_PROVIDERS.contains(&self.embedding.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding.provider,
                EMBEDDING_PROVIDERS.join(", ")
            )));
        }

        if self.embedding.dimensions == 0 {
            return Err(AppError::Config(
                "Embedding dimensions must be greater than zero".to_string(),
            ));
        }

        if self.embedding.provider == "openai" {
            self.require_api_key(self.embedding.api_key_env.as_deref())?;
        }

        if let Some(ref llm) = self.llm {
            if !LLM_PROVIDERS.contains(&llm.provider.as_str()) {
                return Err(AppError::Config(format!(
                    "Unknown LLM provider: {}. Supported: {}",
                    llm.provider,
                    LLM_PROVIDERS.join(", ")
                )));
            }

            if llm.provider == "openai" {
                self.require_api_key(llm.api_key_env.as_deref())?;
            }
        }

        if self.retrieval.top_k == 0 {
            return Err(AppError::Config("topK must be greater than zero".to_string()));
        }

        if self.retrieval.chunk_overlap >= self.retrieval.chunk_size {
            return Err(AppError::Config(format!(
                "chunkOverlap ({}) must be smaller than chunkSize ({})",
                self.retrieval.chunk_overlap, self.retrieval.chunk_size
            )));
        }

        Ok(())
    }

    fn require_api_key(&self, api_key_env: Option<&str>) -> AppResult<()> {
        let var = api_key_env.ok_or_else(|| {
            AppError::Config("apiKeyEnv must be set for the openai provider".to_string())
        })?;

        if self.resolve_api_key(Some(var)).is_none() {
            return Err(AppError::Config(format!(
                "API key not found in environment variable: {}",
                var
            )));
        }

        Ok(())
    }
}

fn parse_backend(value: &str) -> AppResult<Backend> {
    Backend::parse(value).ok_or_else(|| {
        AppError::Config(format!(
            "Unknown backend: {}. Supported: local, openai",
            value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.backend, Backend::Local);
        assert_eq!(config.embedding.provider, "trigram");
        assert!(config.llm.is_none());
        assert_eq!(config.retrieval.top_k, 4);
        assert_eq!(config.retrieval.chunk_size, 1000);
        assert_eq!(config.retrieval.chunk_overlap, 200);
        assert!(!config.verbose);
    }

    #[test]
    fn test_app_dir_and_paths() {
        let mut config = AppConfig::default();
        config.workspace = PathBuf::from("/tmp/ws");
        assert!(config.app_dir().ends_with(".ragassist"));
        assert_eq!(config.docs_path(), PathBuf::from("/tmp/ws/data/docs"));

        config.store_dir = PathBuf::from("/var/store");
        assert_eq!(config.store_path(), PathBuf::from("/var/store"));
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!(Backend::parse("LOCAL"), Some(Backend::Local));
        assert_eq!(Backend::parse(" openai "), Some(Backend::OpenAi));
        assert_eq!(Backend::parse("azure"), None);
    }

    #[test]
    fn test_openai_backend_preset() {
        let mut config = AppConfig::default();
        config.apply_backend(Backend::OpenAi);

        assert_eq!(config.embedding.provider, "openai");
        assert_eq!(config.embedding.dimensions, 1536);
        let llm = config.llm.expect("openai backend configures an LLM");
        assert_eq!(llm.model, "gpt-4o-mini");
        assert!((llm.temperature - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(None, true, false, true);

        assert!(overridden.verbose);
        assert!(overridden.log_json);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_load_merges_yaml_then_env() {
        let temp = TempDir::new().unwrap();
        let app_dir = temp.path().join(APP_DIR);
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(
            app_dir.join("config.yaml"),
            r#"
docsDir: knowledge
llm:
  provider: ollama
  model: mistral
retrieval:
  topK: 6
server:
  port: 8080
logging:
  color: false
"#,
        )
        .unwrap();

        let workspace = temp.path().to_string_lossy().to_string();
        let config = AppConfig::load_with(env_from(&[
            ("RAG_WORKSPACE", workspace.as_str()),
            ("PORT", "9000"),
        ]))
        .unwrap();

        assert_eq!(config.docs_dir, PathBuf::from("knowledge"));
        assert_eq!(config.retrieval.top_k, 6);
        assert_eq!(config.server.port, 9000);
        assert!(config.no_color);

        let llm = config.llm.unwrap();
        assert_eq!(llm.provider, "ollama");
        assert_eq!(llm.model, "mistral");
    }

    #[test]
    fn test_env_disables_llm() {
        let temp = TempDir::new().unwrap();
        let workspace = temp.path().to_string_lossy().to_string();
        let config = AppConfig::load_with(env_from(&[
            ("RAG_WORKSPACE", workspace.as_str()),
            ("RAG_BACKEND", "openai"),
            ("RAG_LLM_PROVIDER", "none"),
        ]))
        .unwrap();

        assert_eq!(config.embedding.provider, "openai");
        assert!(config.llm.is_none());
    }

    #[test]
    fn test_backend_preset_keeps_model_env() {
        let temp = TempDir::new().unwrap();
        let workspace = temp.path().to_string_lossy().to_string();
        let config = AppConfig::load_with(env_from(&[
            ("RAG_WORKSPACE", workspace.as_str()),
            ("RAG_BACKEND", "openai"),
            ("OPENAI_EMBED_MODEL", "text-embedding-3-large"),
            ("RAG_LLM_MODEL", "gpt-4o"),
        ]))
        .unwrap();

        assert_eq!(config.backend, Backend::OpenAi);
        assert_eq!(config.embedding.model, "text-embedding-3-large");
        assert_eq!(config.llm.unwrap().model, "gpt-4o");
    }

    #[test]
    fn test_load_rejects_unknown_backend() {
        let temp = TempDir::new().unwrap();
        let workspace = temp.path().to_string_lossy().to_string();
        let result = AppConfig::load_with(env_from(&[
            ("RAG_WORKSPACE", workspace.as_str()),
            ("RAG_BACKEND", "mainframe"),
        ]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_missing_explicit_config_file() {
        let temp = TempDir::new().unwrap();
        let workspace = temp.path().to_string_lossy().to_string();
        let result = AppConfig::load_with(env_from(&[
            ("RAG_WORKSPACE", workspace.as_str()),
            ("RAG_CONFIG", "/nonexistent/config.yaml"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_local() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_unknown_embedding_provider() {
        let mut config = AppConfig::default();
        config.embedding.provider = "word2vec".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_openai_requires_key() {
        let mut config = AppConfig::default();
        config.llm = Some(LlmSettings {
            api_key_env: Some("RAGASSIST_TEST_MISSING_KEY".to_string()),
            ..LlmSettings::for_provider("openai")
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("RAGASSIST_TEST_MISSING_KEY"));
    }

    #[test]
    fn test_validate_overlap() {
        let mut config = AppConfig::default();
        config.retrieval.chunk_overlap = config.retrieval.chunk_size;
        assert!(config.validate().is_err());
    }
}
