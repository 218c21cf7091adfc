//! Carga de configuración del cliente desde variables de entorno.
//! Usa el prefijo `STOCKFLOW_`; todas las variables son opcionales.

use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_MONGOSH_BIN: &str = "mongosh";
pub const DEFAULT_MONGO_DB: &str = "lpg_db";
pub const DEFAULT_APPROVE_SCRIPT: &str = "node approve_user.js";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

/// Lectura de una variable; `None` si no existe o está vacía.
pub fn env_var(key: &str) -> Option<String> {
    Lazy::force(&DOTENV_LOADED);
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parsea una variable opcional con `FromStr`, reportando el valor inválido.
pub fn parse_opt<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, ConfigError>
    where T: std::str::FromStr,
          T::Err: std::fmt::Display
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| ConfigError::new(key, raw.clone(), e.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None`: se usa el timeout por defecto del transporte.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout: None }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_var)
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("STOCKFLOW_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = parse_opt::<u64>(lookup, "STOCKFLOW_HTTP_TIMEOUT_SECS")?.map(Duration::from_secs);
        Ok(Self { base_url, timeout })
    }
}

/// Cómo se despacha la aprobación fuera de banda.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalMode {
    Mongosh,
    Script,
    Skip,
}

impl std::str::FromStr for ApprovalMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongosh" => Ok(Self::Mongosh),
            "script" => Ok(Self::Script),
            "skip" | "none" => Ok(Self::Skip),
            _ => Err("expected mongosh, script or skip".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalConfig {
    pub mode: ApprovalMode,
    pub mongosh_bin: String,
    pub mongo_uri: Option<String>,
    pub mongo_db: String,
    /// Programa y argumentos del modo `script`; el email se añade al final.
    pub script: Vec<String>,
}

impl Default for ApprovalConfig {
    fn default() -> Self {
        Self { mode: ApprovalMode::Mongosh,
               mongosh_bin: DEFAULT_MONGOSH_BIN.to_string(),
               mongo_uri: None,
               mongo_db: DEFAULT_MONGO_DB.to_string(),
               script: split_command(DEFAULT_APPROVE_SCRIPT) }
    }
}

impl ApprovalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_var)
    }

    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let mode = parse_opt::<ApprovalMode>(lookup, "STOCKFLOW_APPROVAL")?.unwrap_or(defaults.mode);
        let script = match lookup("STOCKFLOW_APPROVE_SCRIPT") {
            Some(raw) => split_command(&raw),
            None => defaults.script,
        };
        Ok(Self { mode,
                  mongosh_bin: lookup("STOCKFLOW_MONGOSH_BIN").unwrap_or(defaults.mongosh_bin),
                  mongo_uri: lookup("STOCKFLOW_MONGO_URI"),
                  mongo_db: lookup("STOCKFLOW_MONGO_DB").unwrap_or(defaults.mongo_db),
                  script })
    }
}

fn split_command(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
