// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Stylist Configuration Types
//
// Defines the configuration schema for a VibeCraft stylist node:
// - Kubernetes-style manifest format (apiVersion/kind/metadata/spec)
// - Generation, vision and weather provider slots (all optional)
// - Composer tuning, upload storage, network and logging settings

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const API_VERSION: &str = "vibecraft/v1";
pub const KIND: &str = "StylistConfig";

pub const GENERATION_PROVIDER_TYPES: &[&str] = &["gemini", "openai", "openai-compatible", "ollama"];
pub const VISION_PROVIDER_TYPES: &[&str] = &["openai", "openai-compatible"];
pub const WEATHER_PROVIDER_TYPES: &[&str] = &["openweathermap"];

/// Top-level Kubernetes-style stylist configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylistConfigManifest {
    /// API version (must be "vibecraft/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "StylistConfig")
    pub kind: String,

    pub metadata: ManifestMetadata,

    pub spec: StylistConfigSpec,
}

/// Manifest metadata (Kubernetes-style)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

/// Stylist configuration body (content under spec:)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StylistConfigSpec {
    /// Generative text provider used by the outfit composer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<ProviderConfig>,

    /// Image analysis provider used at upload time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision: Option<ProviderConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<ProviderConfig>,

    #[serde(default)]
    pub composer: ComposerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observability: Option<ObservabilityConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Human-readable provider name (e.g., "gemini", "openai-vision")
    pub name: String,

    /// Provider type
    #[serde(rename = "type")]
    pub provider_type: String, // "gemini", "openai", "openai-compatible", "ollama", "openweathermap"

    /// API endpoint URL, provider default when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// API key (supports "env:VAR_NAME" for environment variables)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model identifier, ignored by weather providers
    #[serde(default)]
    pub model: String,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Upper bound on the generative call before falling back
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded images are written to and served from
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_dir: default_uploads_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network bind address (e.g. "0.0.0.0" or "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP API port
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_api_port(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "trace")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format ("json" or "text")
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for StylistConfigManifest {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ManifestMetadata {
                name: "vibecraft".to_string(),
                version: Some("1.0.0".to_string()),
                labels: None,
            },
            spec: StylistConfigSpec::default(),
        }
    }
}

impl StylistConfigManifest {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. VIBECRAFT_CONFIG_PATH environment variable
    /// 2. ./vibecraft-config.yaml (working directory)
    /// 3. ~/.vibecraft/config.yaml (user home)
    /// 4. /etc/vibecraft/config.yaml (system, Unix) or C:\ProgramData\VibeCraft\config.yaml (Windows)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("VIBECRAFT_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./vibecraft-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".vibecraft").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        let system_config = PathBuf::from("/etc/vibecraft/config.yaml");
        #[cfg(windows)]
        let system_config = PathBuf::from("C:\\ProgramData\\VibeCraft\\config.yaml");

        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// The file `load_or_default` would pick, read without emitting events or
    /// applying environment overrides. Used before logging is installed.
    pub fn peek(cli_path: Option<&Path>) -> Option<Self> {
        let path = cli_path.map(Path::to_path_buf).or_else(Self::discover_config)?;
        Self::from_yaml_file(path).ok()
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit path must load
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load config at {:?}: {}", path, e))?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if self.spec.generation.is_none() && present("GEMINI_API_KEY").is_some() {
            tracing::info!("Environment override: GEMINI_API_KEY enables gemini generation");
            self.spec.generation = Some(ProviderConfig {
                name: "gemini".to_string(),
                provider_type: "gemini".to_string(),
                endpoint: None,
                api_key: Some("env:GEMINI_API_KEY".to_string()),
                model: "gemini-1.5-flash".to_string(),
                enabled: true,
            });
        }

        if self.spec.vision.is_none() && present("OPENAI_API_KEY").is_some() {
            tracing::info!("Environment override: OPENAI_API_KEY enables openai vision");
            self.spec.vision = Some(ProviderConfig {
                name: "openai-vision".to_string(),
                provider_type: "openai".to_string(),
                endpoint: None,
                api_key: Some("env:OPENAI_API_KEY".to_string()),
                model: "gpt-4o-mini".to_string(),
                enabled: true,
            });
        }

        if self.spec.weather.is_none() && present("WEATHER_API_KEY").is_some() {
            tracing::info!("Environment override: WEATHER_API_KEY enables openweathermap");
            self.spec.weather = Some(ProviderConfig {
                name: "openweathermap".to_string(),
                provider_type: "openweathermap".to_string(),
                endpoint: None,
                api_key: Some("env:WEATHER_API_KEY".to_string()),
                model: String::new(),
                enabled: true,
            });
        }

        if let Some(val) = present("PORT") {
            match val.trim().parse::<u16>() {
                Ok(port) => {
                    tracing::info!("Environment override: PORT={}", port);
                    self.spec.network.port = port;
                }
                Err(_) => {
                    tracing::warn!("Invalid value for PORT: '{}'. Expected a port number. Ignoring.", val);
                }
            }
        }
    }

    /// Resolved log level, if the manifest sets one
    pub fn log_level(&self) -> Option<&str> {
        self.spec
            .observability
            .as_ref()
            .and_then(|o| o.logging.as_ref())
            .map(|l| l.level.as_str())
    }

    pub fn log_format(&self) -> &str {
        self.spec
            .observability
            .as_ref()
            .and_then(|o| o.logging.as_ref())
            .map(|l| l.format.as_str())
            .unwrap_or("text")
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!("Invalid apiVersion: '{}'. Must be '{}'", self.api_version, API_VERSION);
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        let slots = [
            ("generation", &self.spec.generation, GENERATION_PROVIDER_TYPES, true),
            ("vision", &self.spec.vision, VISION_PROVIDER_TYPES, true),
            ("weather", &self.spec.weather, WEATHER_PROVIDER_TYPES, false),
        ];

        for (slot, provider, allowed, needs_model) in slots {
            let Some(provider) = provider else { continue };

            if provider.name.is_empty() {
                anyhow::bail!("spec.{}.name cannot be empty", slot);
            }

            if !allowed.contains(&provider.provider_type.as_str()) {
                anyhow::bail!(
                    "Unsupported {} provider type '{}' for: {}. Expected one of: {}",
                    slot,
                    provider.provider_type,
                    provider.name,
                    allowed.join(", ")
                );
            }

            if needs_model && provider.model.is_empty() {
                anyhow::bail!("spec.{}.model cannot be empty for: {}", slot, provider.name);
            }
        }

        if self.spec.storage.max_upload_bytes == 0 {
            anyhow::bail!("spec.storage.max_upload_bytes must be greater than zero");
        }

        Ok(())
    }
}
