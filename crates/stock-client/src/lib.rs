//! stock-client
//!
//! Colaboradores externos del harness:
//! - `http`: cliente bloqueante del API de inventario que normaliza cada
//!   respuesta a `(payload, status)` sin fallar por códigos HTTP.
//! - `approval`: agente de aprobación fuera de banda (mongosh / script).
//! - `config`: carga de configuración desde .env y variables de entorno.
//! - `error`: errores de transporte y de configuración.

pub mod approval;
pub mod config;
pub mod error;
pub mod http;

pub use approval::{build_agent, ApprovalAgent, Dispatched, MongoshApproval, ScriptApproval, SkipApproval};
pub use config::{init_dotenv, ApprovalConfig, ApprovalMode, ClientConfig};
pub use error::{ClientError, ConfigError, TransportFailure};
pub use http::{bearer_headers, ApiClient, ApiResponse, Method, Transport};
