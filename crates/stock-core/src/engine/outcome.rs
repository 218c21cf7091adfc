use serde::Serialize;
use uuid::Uuid;

use crate::model::{StepResult, StepVerdict};

/// Resultado de una ejecución que llegó al final sin aborto.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub results: Vec<StepResult>,
}

impl RunOutcome {
    pub fn new(run_id: Uuid, results: Vec<StepResult>) -> Self {
        Self { run_id, results }
    }

    pub fn passed(&self) -> usize {
        self.count(StepVerdict::Pass)
    }

    pub fn failed(&self) -> usize {
        self.count(StepVerdict::Fail)
    }

    pub fn not_verifiable(&self) -> usize {
        self.count(StepVerdict::NotVerifiable)
    }

    /// `true` si todos los steps pasaron, no sólo si no hubo aborto.
    pub fn all_invariants_held(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    fn count(&self, verdict: StepVerdict) -> usize {
        self.results.iter().filter(|r| r.verdict == verdict).count()
    }
}
