//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use alloy::primitives::Address;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::api::ApiConfig as ServerConfig;
use crate::portal::{ClientConfig, PortalKind, RpcConfig};

/// Deployed note portal
pub const DEFAULT_CONTRACT: &str = "0x0Ac0754D287C67cACD6B6C067db89243902C0654";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wallet: WalletConfig,

    #[serde(default)]
    pub portal: PortalConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Wallet provider (JSON-RPC node) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    /// Node URL; empty means no wallet is present
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// 0 waits for inclusion without a bound
    #[serde(default = "default_confirmation_timeout")]
    pub confirmation_timeout_secs: u64,

    #[serde(default = "default_confirmations")]
    pub confirmations: u64,
}

fn default_rpc_url() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_confirmation_timeout() -> u64 {
    120
}

fn default_confirmations() -> u64 {
    1
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            request_timeout_secs: default_request_timeout(),
            confirmation_timeout_secs: default_confirmation_timeout(),
            confirmations: default_confirmations(),
        }
    }
}

impl WalletConfig {
    /// Whether a wallet provider is configured at all
    pub fn is_present(&self) -> bool {
        !self.rpc_url.trim().is_empty()
    }
}

/// Portal contract configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    #[serde(default = "default_kind")]
    pub kind: PortalKind,

    #[serde(default = "default_contract")]
    pub address: String,

    /// Overrides the kind's default gas limit; 0 disables the override
    pub gas_limit: Option<u64>,

    #[serde(default = "default_log_counts")]
    pub log_counts: bool,
}

fn default_kind() -> PortalKind {
    PortalKind::Note
}

fn default_contract() -> String {
    DEFAULT_CONTRACT.to_string()
}

fn default_log_counts() -> bool {
    true
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            address: default_contract(),
            gas_limit: None,
            log_counts: default_log_counts(),
        }
    }
}

impl PortalConfig {
    /// Parsed contract address
    pub fn contract_address(&self) -> Result<Address, ConfigError> {
        Address::from_str(self.address.trim()).map_err(|e| ConfigError::Invalid {
            field: "portal.address".to_string(),
            error: e.to_string(),
        })
    }

    /// Gas limit after applying the kind default
    pub fn effective_gas_limit(&self) -> Option<u64> {
        match self.gas_limit {
            Some(0) => None,
            Some(limit) => Some(limit),
            None => self.kind.default_gas_limit(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("noteportal").join("config.toml")),
            Some(PathBuf::from("/etc/noteportal/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Wallet overrides
        if let Some(url) = lookup("NOTEPORTAL_RPC_URL") {
            self.wallet.rpc_url = url;
        }

        // Portal overrides
        if let Some(address) = lookup("NOTEPORTAL_CONTRACT") {
            self.portal.address = address;
        }
        if let Some(kind) = lookup("NOTEPORTAL_KIND") {
            match kind.parse() {
                Ok(k) => self.portal.kind = k,
                Err(e) => tracing::warn!("Ignoring NOTEPORTAL_KIND: {}", e),
            }
        }
        if let Some(limit) = lookup("NOTEPORTAL_GAS_LIMIT") {
            match limit.parse() {
                Ok(l) => self.portal.gas_limit = Some(l),
                Err(e) => tracing::warn!("Ignoring NOTEPORTAL_GAS_LIMIT {:?}: {}", limit, e),
            }
        }

        // API overrides
        if let Some(host) = lookup("NOTEPORTAL_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("NOTEPORTAL_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(e) => tracing::warn!("Ignoring NOTEPORTAL_API_PORT {:?}: {}", port, e),
            }
        }

        // Logging overrides
        if let Some(level) = lookup("NOTEPORTAL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("NOTEPORTAL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Settings for the JSON-RPC backend, or `None` when no wallet is present
    pub fn rpc_config(&self) -> Result<Option<RpcConfig>, ConfigError> {
        if !self.wallet.is_present() {
            return Ok(None);
        }

        let confirmation_timeout = match self.wallet.confirmation_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Some(RpcConfig {
            rpc_url: self.wallet.rpc_url.trim().to_string(),
            contract: self.portal.contract_address()?,
            kind: self.portal.kind,
            request_timeout: Duration::from_secs(self.wallet.request_timeout_secs),
            confirmation_timeout,
            confirmations: self.wallet.confirmations,
        }))
    }

    /// Settings for the submission client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            kind: self.portal.kind,
            gas_limit: self.portal.effective_gas_limit(),
            log_counts: self.portal.log_counts,
        }
    }

    /// Settings for the HTTP server
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.api.host.clone(), self.api.port)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {field}: {error}")]
    Invalid { field: String, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# NotePortal Configuration
#
# Environment variables override these settings:
# - NOTEPORTAL_RPC_URL
# - NOTEPORTAL_CONTRACT
# - NOTEPORTAL_KIND
# - NOTEPORTAL_GAS_LIMIT
# - NOTEPORTAL_API_HOST
# - NOTEPORTAL_API_PORT
# - NOTEPORTAL_LOG_LEVEL
# - NOTEPORTAL_LOG_FORMAT

[wallet]
# JSON-RPC node that holds the signing accounts (leave empty for no wallet)
rpc_url = "http://127.0.0.1:8545"

# Per-request timeout in seconds
request_timeout_secs = 30

# How long to wait for a submission to be mined (0 = no limit)
confirmation_timeout_secs = 120

# Blocks to wait for after inclusion
confirmations = 1

[portal]
# Contract variant: note or wave
kind = "note"

# Deployed portal contract
address = "0x0Ac0754D287C67cACD6B6C067db89243902C0654"

# Gas limit for submissions (default: 300000 for note, none for wave; 0 = none)
# gas_limit = 300000

# Log the total submission count before and after each write
log_counts = true

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8082

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
