use stock_client::{ClientError, ConfigError};
use stock_core::FatalStepFailure;
use thiserror::Error;

/// Errores de nivel superior del harness. Cualquiera de ellos termina el
/// proceso con estado 1.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Error de configuración: {0}")]
    Config(#[from] ConfigError),
    #[error("Error al preparar el cliente: {0}")]
    Client(#[from] ClientError),
    #[error("Ejecución abortada: {0}")]
    Fatal(#[from] FatalStepFailure),
    #[error("Modo estricto: {failed} step(s) fallidos, {not_verifiable} no verificables")]
    SoftFailures { failed: usize, not_verifiable: usize },
}
