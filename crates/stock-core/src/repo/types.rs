//! Tipos de repositorio: estado reconstruido (`RunInstance`) y definición
//! (`RunDefinition`).
//!
//! El repositorio aplica un replay lineal: consume los eventos en orden y
//! actualiza un `RunInstance`. Los resultados por step que ve el driver salen
//! de aquí, no de estado mutable del secuenciador.
use serde_json::Value;
use uuid::Uuid;

use crate::event::{RunEvent, RunEventKind};
use crate::model::{StepResult, StepVerdict};
use crate::step::{StepDefinition, StepSeverity, StepStatus};

pub struct RunInstance {
    pub id: Uuid,
    pub steps: Vec<StepSlot>,
    pub cursor: usize,
    pub completed: bool,
    pub aborted: bool,
}

/// Estado de un step en la instancia.
#[derive(Debug, Clone)]
pub struct StepSlot {
    pub step_id: String,
    pub status: StepStatus,
    pub detail: String,
    pub observed: Option<Value>,
}

impl RunInstance {
    /// Resultados de los steps ya terminados, en orden de ejecución.
    pub fn results(&self, definition: &RunDefinition) -> Vec<StepResult> {
        (0..self.steps.len()).filter_map(|i| self.result_at(i, definition)).collect()
    }

    /// Resultado del step `index` si ya terminó.
    pub fn result_at(&self, index: usize, definition: &RunDefinition) -> Option<StepResult> {
        let slot = self.steps.get(index)?;
        let def = definition.steps.get(index)?;
        let verdict = match slot.status {
            StepStatus::Passed => StepVerdict::Pass,
            StepStatus::Failed => StepVerdict::Fail,
            StepStatus::NotVerifiable => StepVerdict::NotVerifiable,
            StepStatus::Pending | StepStatus::Running => return None,
        };
        Some(StepResult { step_id: slot.step_id.clone(),
                          step_name: def.name().to_string(),
                          passed: verdict == StepVerdict::Pass,
                          fatal: def.severity() == StepSeverity::Fatal,
                          verdict,
                          detail: slot.detail.clone(),
                          observed_value: slot.observed.clone() })
    }

    pub fn is_terminal(&self) -> bool {
        self.completed || self.aborted
    }
}

/// Trait para reconstruir (`replay`) el estado de una ejecución a partir de eventos.
pub trait RunRepository {
    fn load(&self, run_id: Uuid, events: &[RunEvent], definition: &RunDefinition) -> RunInstance;
}

/// Definición inmutable del recorrido: la lista ordenada de steps.
pub struct RunDefinition {
    pub steps: Vec<Box<dyn StepDefinition>>,
}

impl RunDefinition {
    pub fn new(steps: Vec<Box<dyn StepDefinition>>) -> Self {
        Self { steps }
    }
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
    pub fn step_ids(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.id().to_string()).collect()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRunRepository;

impl InMemoryRunRepository {
    pub fn new() -> Self {
        Self
    }
}

impl RunRepository for InMemoryRunRepository {
    fn load(&self, run_id: Uuid, events: &[RunEvent], definition: &RunDefinition) -> RunInstance {
        let mut steps: Vec<StepSlot> = definition.steps
                                                 .iter()
                                                 .map(|s| StepSlot { step_id: s.id().to_string(),
                                                                     status: StepStatus::Pending,
                                                                     detail: String::new(),
                                                                     observed: None })
                                                 .collect();
        let mut completed = false;
        let mut aborted = false;
        for ev in events {
            match &ev.kind {
                RunEventKind::RunInitialized { .. } | RunEventKind::StepSignal { .. } => {}
                RunEventKind::StepStarted { step_index, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Running;
                    }
                }
                RunEventKind::StepPassed { step_index, detail, observed, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Passed;
                        slot.detail = detail.clone();
                        slot.observed = observed.clone();
                    }
                }
                RunEventKind::StepFailed { step_index, reason, observed, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Failed;
                        slot.detail = reason.clone();
                        slot.observed = observed.clone();
                    }
                }
                RunEventKind::StepNotVerifiable { step_index, reason, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::NotVerifiable;
                        slot.detail = reason.clone();
                    }
                }
                RunEventKind::RunCompleted { .. } => completed = true,
                RunEventKind::RunAborted { .. } => aborted = true,
            }
        }
        let cursor = steps.iter()
                          .position(|s| matches!(s.status, StepStatus::Pending))
                          .unwrap_or(steps.len());
        RunInstance { id: run_id,
                      steps,
                      cursor,
                      completed,
                      aborted }
    }
}
