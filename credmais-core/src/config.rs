use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_SESSION_IDLE_SECS: u64 = 8 * 60 * 60;
const DEFAULT_SESSION_MAX_ENTRIES: u64 = 10_000;
const DEFAULT_ADMIN_NAME: &str = "Administrador";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid setting {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// The single administrator address, trimmed and lowercase
    pub admin_email: String,
    pub admin_name: String,
    pub admin_initial_password: Option<String>,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: u64,
    pub session_idle: Duration,
    pub session_max_entries: u64,
    pub database_url: Option<String>,
}

impl CoreConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let kv: HashMap<String, String> = std::env::vars().collect();
        Self::from_kv(&kv)
    }

    pub fn from_kv(kv: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let admin_email = require_nonempty(kv, "CREDMAIS_ADMIN_EMAIL")?.to_lowercase();
        if !admin_email.contains('@') {
            return Err(ConfigError::Invalid {
                key: "CREDMAIS_ADMIN_EMAIL",
                message: "must be an email address".to_string(),
            });
        }

        let admin_name = optional_nonempty(kv, "CREDMAIS_ADMIN_NAME")
            .unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_string());
        let admin_initial_password = optional_nonempty(kv, "CREDMAIS_ADMIN_INITIAL_PASSWORD");

        let upload_dir = optional_nonempty(kv, "CREDMAIS_UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("uploads"));

        let max_upload_bytes = parse_u64(
            kv.get("CREDMAIS_MAX_UPLOAD_BYTES"),
            DEFAULT_MAX_UPLOAD_BYTES,
            "CREDMAIS_MAX_UPLOAD_BYTES",
        )?;
        if max_upload_bytes == 0 {
            return Err(ConfigError::Invalid {
                key: "CREDMAIS_MAX_UPLOAD_BYTES",
                message: "must be >= 1".to_string(),
            });
        }

        let session_idle_secs = parse_u64(
            kv.get("CREDMAIS_SESSION_IDLE_SECS"),
            DEFAULT_SESSION_IDLE_SECS,
            "CREDMAIS_SESSION_IDLE_SECS",
        )?;
        let session_max_entries = parse_u64(
            kv.get("CREDMAIS_SESSION_MAX_ENTRIES"),
            DEFAULT_SESSION_MAX_ENTRIES,
            "CREDMAIS_SESSION_MAX_ENTRIES",
        )?;

        Ok(Self {
            admin_email,
            admin_name,
            admin_initial_password,
            upload_dir,
            max_upload_bytes,
            session_idle: Duration::from_secs(session_idle_secs),
            session_max_entries,
            database_url: optional_nonempty(kv, "CREDMAIS_DATABASE_URL"),
        })
    }
}

fn require_nonempty(kv: &HashMap<String, String>, key: &'static str) -> Result<String, ConfigError> {
    optional_nonempty(kv, key).ok_or(ConfigError::Missing(key))
}

fn optional_nonempty(kv: &HashMap<String, String>, key: &str) -> Option<String> {
    kv.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_u64(value: Option<&String>, default: u64, key: &'static str) -> Result<u64, ConfigError> {
    match value.map(|v| v.trim()).filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::Invalid {
            key,
            message: format!("expected an unsigned integer, got {raw:?}"),
        }),
        None => Ok(default),
    }
}
