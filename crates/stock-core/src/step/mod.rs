//! Definiciones relacionadas a Steps.
//!
//! Un step es una unidad del recorrido: hace una o más llamadas al servicio,
//! evalúa la respuesta y, si produce un dato (token, ids), lo deja en el
//! `TestContext`. Este módulo define:
//! - `StepDefinition`: interfaz usada por el secuenciador.
//! - `StepSeverity`: si un fallo aborta, se ignora o sólo se registra.
//! - `StepRunResult` y señales (`StepSignal`).

pub mod definition;
mod run_result;
mod status;

pub use definition::{StepDefinition, StepSeverity};
pub use run_result::{StepRunResult, StepSignal};
pub use status::StepStatus;
