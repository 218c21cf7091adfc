//! Errores del secuenciador.

use thiserror::Error;

use crate::model::StepResult;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SequencerError {
    #[error("run already completed")] RunCompleted,
    #[error("run was aborted by a fatal step")] RunAborted,
    #[error("invalid step index {0}")] InvalidStepIndex(usize),
    #[error(transparent)] Fatal(#[from] FatalStepFailure),
}

/// Fallo de un step fatal: la ejecución termina aquí.
///
/// Lleva los resultados acumulados hasta el step que abortó (incluido) para
/// que el driver pueda imprimir el resumen antes de salir.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("fatal step '{step_id}' failed: {reason}")]
pub struct FatalStepFailure {
    pub step_id: String,
    pub step_name: String,
    pub reason: String,
    pub results: Vec<StepResult>,
}

impl FatalStepFailure {
    /// Error del propio secuenciador, no atribuible a un step concreto.
    pub fn internal(err: SequencerError, results: Vec<StepResult>) -> Self {
        Self { step_id: "sequencer".to_string(),
               step_name: "sequencer".to_string(),
               reason: err.to_string(),
               results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_failure_display_names_step_and_reason() {
        let f = FatalStepFailure { step_id: "register".into(),
                                   step_name: "Register New Agency".into(),
                                   reason: "status 409".into(),
                                   results: vec![] };
        assert_eq!(f.to_string(), "fatal step 'register' failed: status 409");
        let wrapped: SequencerError = f.into();
        assert_eq!(wrapped.to_string(), "fatal step 'register' failed: status 409");
    }

    #[test]
    fn internal_failure_keeps_cause() {
        let f = FatalStepFailure::internal(SequencerError::RunAborted, vec![]);
        assert_eq!(f.step_id, "sequencer");
        assert_eq!(f.reason, "run was aborted by a fatal step");
    }
}
