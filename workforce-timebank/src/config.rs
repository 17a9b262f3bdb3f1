use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::timebank::{OrgTimeBankPolicy, PolicyError};

pub const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read policy file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse policy file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid policy: {0}")]
    Policy(#[from] PolicyError),
}

/// Runtime settings for the web mode
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub port: u16,
    pub admin_password: String,
    pub policy: OrgTimeBankPolicy,
}

/// Loads and validates an organization policy from a JSON file
pub fn load_policy<P: AsRef<Path>>(path: P) -> Result<OrgTimeBankPolicy, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let policy: OrgTimeBankPolicy = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    policy.validate()?;
    Ok(policy)
}

/// Loads a policy from `path` when given, otherwise the default policy
pub fn load_policy_or_default(path: Option<&str>) -> Result<OrgTimeBankPolicy, ConfigError> {
    match path {
        Some(path) => load_policy(path),
        None => Ok(OrgTimeBankPolicy::default()),
    }
}

impl AppConfig {
    /// Reads `ADMIN_PASSWORD`, `TIMEBANK_BIND_ADDRESS` and `TIMEBANK_POLICY`
    pub fn from_env(port: u16) -> Result<Self, ConfigError> {
        let admin_password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            log::warn!("ADMIN_PASSWORD not set, using the default password");
            "admin123".to_string()
        });
        let bind_address = std::env::var("TIMEBANK_BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
        let policy_path = std::env::var("TIMEBANK_POLICY").ok();
        let policy = load_policy_or_default(policy_path.as_deref())?;

        Ok(Self {
            bind_address,
            port,
            admin_password,
            policy,
        })
    }
}
