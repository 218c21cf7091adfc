//! Errores del cliente.
//! Los códigos HTTP no son errores aquí: el cliente los devuelve como
//! respuestas normales. Sólo la construcción del cliente, la configuración y
//! el canal lateral de aprobación tienen tipos de error propios.

use thiserror::Error;

/// Fallo al despachar la aprobación fuera de banda. Es sólo informativo: la
/// verificación real es que el login posterior funcione.
#[derive(Debug, Error)]
pub enum TransportFailure {
    #[error("failed to launch approval tool '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to communicate with approval tool '{program}': {source}")]
    Pipe {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("approval tool '{0}' is not configured")]
    NotConfigured(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid value '{value}' for {key}: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

impl ConfigError {
    pub fn new(key: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into(), reason: reason.into() }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("http client setup failed: {0}")]
    Setup(#[from] reqwest::Error),
}
