//! Cliente del API de inventario.
//!
//! Contrato: `send(method, path, body?, headers?) -> ApiResponse`. Nunca
//! falla por un código HTTP; los errores de transporte y de decodificación
//! se degradan a un payload `{ "error": "<mensaje>" }` para que el step que
//! llama los clasifique como un FAIL limpio.

use log::{debug, warn};
use reqwest::header::{CONTENT_TYPE, SET_COOKIE};
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::error::ClientError;

pub use reqwest::Method;

/// Status usado cuando la petición no llegó a tener respuesta HTTP.
pub const NO_STATUS: u16 = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub payload: Value,
    pub status: u16,
    /// Pares `nombre=valor` de las cabeceras `Set-Cookie`.
    pub cookies: Vec<(String, String)>,
}

impl ApiResponse {
    pub fn new(payload: Value, status: u16) -> Self {
        Self { payload, status, cookies: Vec::new() }
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((name.into(), value.into()));
        self
    }

    /// Respuesta sintética para un fallo sin respuesta HTTP.
    pub fn transport_error(err: impl std::fmt::Display) -> Self {
        Self::new(json!({ "error": err.to_string() }), NO_STATUS)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

/// Transporte de peticiones JSON. `ApiClient` es la implementación real; los
/// tests de steps usan transportes guionizados.
pub trait Transport {
    fn send(&self, method: Method, path: &str, body: Option<&Value>, headers: &[(String, String)]) -> ApiResponse;
}

/// Cabeceras de autenticación: el servicio acepta el token como bearer o
/// como cookie `token`, se envían ambas.
pub fn bearer_headers(token: &str) -> Vec<(String, String)> {
    vec![("Authorization".to_string(), format!("Bearer {token}")),
         ("Cookie".to_string(), format!("token={token}"))]
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let parsed = reqwest::Url::parse(&config.base_url).map_err(|e| ClientError::InvalidBaseUrl { url: config.base_url.clone(),
                                                                                                   reason: e.to_string() })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl { url: config.base_url.clone(),
                                                     reason: format!("unsupported scheme '{}'", parsed.scheme()) });
        }
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self { base_url: config.base_url.trim_end_matches('/').to_string(),
                  http: builder.build()? })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Transport for ApiClient {
    fn send(&self, method: Method, path: &str, body: Option<&Value>, headers: &[(String, String)]) -> ApiResponse {
        let url = self.url(path);
        debug!("{method} {url}");

        let mut request = self.http.request(method, &url).header(CONTENT_TYPE, "application/json");
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            match serde_json::to_vec(body) {
                Ok(bytes) => request = request.body(bytes),
                Err(e) => return ApiResponse::transport_error(e),
            }
        }

        let response = match request.send() {
            Ok(r) => r,
            Err(e) => {
                warn!("request to {url} failed: {e}");
                return ApiResponse::transport_error(e);
            }
        };

        let status = response.status().as_u16();
        let cookies = response.headers()
                              .get_all(SET_COOKIE)
                              .iter()
                              .filter_map(|v| v.to_str().ok())
                              .filter_map(parse_set_cookie)
                              .collect();
        let payload = match response.bytes() {
            Ok(bytes) => decode_payload(&bytes),
            Err(e) => json!({ "error": e.to_string() }),
        };
        debug!("{url} -> {status}");
        ApiResponse { payload, status, cookies }
    }
}

/// Decodifica el cuerpo como JSON o sintetiza `{ "error": ... }`.
pub fn decode_payload(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|e| json!({ "error": e.to_string() }))
}

/// `token=abc; Path=/; HttpOnly` -> `("token", "abc")`
fn parse_set_cookie(raw: &str) -> Option<(String, String)> {
    let pair = raw.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}
