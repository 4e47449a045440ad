//! Service configuration.
//!
//! Loaded once at startup from TOML. Resolution order for the file:
//! explicit path, then `SURAT_CONFIG`, then `<config_dir>/surat/config.toml`.
//! A missing file yields the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::variables::Organization;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SURAT_CONFIG";

const PROJECT_NAME: &str = "surat";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuratConfig {
    pub server: ServerConfig,
    pub auth: AuthSettings,
    pub google: GoogleSettings,
    pub sources: SourceSettings,
    pub organization: Organization,
}

/// HTTP listener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Bearer-token validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// When false, requests pass through unauthenticated (local development).
    pub enabled: bool,
    /// Expected OAuth client ID; empty accepts any audience.
    pub audience: String,
    /// Restrict sign-in to one Workspace domain; empty allows any.
    pub domain: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            audience: String::new(),
            domain: String::new(),
        }
    }
}

/// Google API endpoints. Overridable so tests can point at a mock server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    pub sheets_base_url: String,
    pub docs_base_url: String,
    pub drive_base_url: String,
    pub userinfo_url: String,
    pub tokeninfo_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            sheets_base_url: "https://sheets.googleapis.com/v4".to_string(),
            docs_base_url: "https://docs.googleapis.com/v1".to_string(),
            drive_base_url: "https://www.googleapis.com/drive/v3".to_string(),
            userinfo_url: "https://www.googleapis.com/oauth2/v3/userinfo".to_string(),
            tokeninfo_url: "https://oauth2.googleapis.com/tokeninfo".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Where residents and the letter catalog live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub residents_spreadsheet_id: String,
    pub residents_range: String,
    pub catalog_spreadsheet_id: String,
    pub catalog_range: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            residents_spreadsheet_id: String::new(),
            residents_range: "Daftar Penduduk!A1:Y4000".to_string(),
            catalog_spreadsheet_id: String::new(),
            catalog_range: "template-surat!A2:F".to_string(),
        }
    }
}

impl SuratConfig {
    pub fn project_name() -> &'static str {
        PROJECT_NAME
    }

    /// Default location: `<config_dir>/surat/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolve the config file path without checking that it exists.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Load from the resolved path, falling back to defaults when absent.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                log::debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten into `SURAT_<SECTION>_<KEY>` environment variables.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_env("SURAT", &value, &mut vars);
        Ok(vars)
    }

    /// Reject settings the service cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.google.timeout_secs == 0 {
            return Err(Error::config("google.timeout_secs must be greater than zero"));
        }
        if self.sources.residents_spreadsheet_id.trim().is_empty() {
            return Err(Error::config("sources.residents_spreadsheet_id is not set"));
        }
        Ok(())
    }

    /// Catalog spreadsheet, defaulting to the residents spreadsheet.
    pub fn catalog_spreadsheet_id(&self) -> &str {
        if self.sources.catalog_spreadsheet_id.trim().is_empty() {
            &self.sources.residents_spreadsheet_id
        } else {
            &self.sources.catalog_spreadsheet_id
        }
    }
}

fn flatten_env(prefix: &str, value: &toml::Value, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, v) in table {
                let name = format!("{prefix}_{}", key.to_uppercase());
                flatten_env(&name, v, out);
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}
