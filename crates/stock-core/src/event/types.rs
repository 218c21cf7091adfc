//! Tipos de evento de una ejecución y estructura `RunEvent`.
//!
//! Rol en la ejecución:
//! - Cada acción del `RunSequencer` emite eventos a un `EventStore`
//!   append-only.
//! - El `RunRepository` reconstruye el estado de la ejecución (replay) a
//!   partir de ellos; el secuenciador no lleva cursores propios.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEventKind {
    /// Primer evento de un `run_id`.
    RunInitialized { step_count: usize, sapcode: String },
    /// Un step comenzó su ejecución. No implica éxito.
    StepStarted { step_index: usize, step_id: String },
    StepPassed {
        step_index: usize,
        step_id: String,
        detail: String,
        observed: Option<Value>,
    },
    StepFailed {
        step_index: usize,
        step_id: String,
        fatal: bool,
        reason: String,
        observed: Option<Value>,
    },
    StepNotVerifiable {
        step_index: usize,
        step_id: String,
        reason: String,
    },
    /// Hito ligero de un step (no altera estado).
    StepSignal {
        step_index: usize,
        step_id: String,
        signal: String,
        data: Value,
    },
    /// Cierre normal: todos los steps se alcanzaron sin aborto.
    RunCompleted { passed: usize, failed: usize, not_verifiable: usize },
    /// Cierre por fallo de un step fatal. Terminal.
    RunAborted { step_id: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEvent {
    pub seq: u64, // asignado por el store (orden append)
    pub run_id: Uuid,
    pub kind: RunEventKind,
    pub ts: DateTime<Utc>,
}
