//! Core RunSequencer implementation

use log::{error, info, warn};
use uuid::Uuid;

use crate::engine::{RunOutcome, SequencerBuilder};
use crate::errors::{FatalStepFailure, SequencerError};
use crate::event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
use crate::model::{StepResult, TestContext};
use crate::repo::{InMemoryRunRepository, RunDefinition, RunInstance, RunRepository};
use crate::step::{StepDefinition, StepRunResult, StepSeverity, StepSignal};

/// Secuenciador de steps.
///
/// Recorre la definición en orden fijo, un step por llamada a `next`. El
/// estado (cursor, terminado, abortado) se reconstruye en cada avance a
/// partir del log de eventos.
pub struct RunSequencer<E, R>
    where E: EventStore,
          R: RunRepository
{
    event_store: E,
    repository: R,
    definition: RunDefinition,
    run_id: Uuid,
}

impl RunSequencer<InMemoryEventStore, InMemoryRunRepository> {
    /// Builder con stores en memoria.
    #[inline]
    pub fn new() -> SequencerBuilder<InMemoryEventStore, InMemoryRunRepository> {
        SequencerBuilder::new(InMemoryEventStore::default(), InMemoryRunRepository::new())
    }
}

impl<E, R> RunSequencer<E, R>
    where E: EventStore,
          R: RunRepository
{
    #[inline]
    pub fn builder(event_store: E, repository: R) -> SequencerBuilder<E, R> {
        SequencerBuilder::new(event_store, repository)
    }

    pub fn new_with_stores(event_store: E, repository: R, definition: RunDefinition) -> Self {
        Self { event_store,
               repository,
               definition,
               run_id: Uuid::new_v4() }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    pub fn events(&self) -> Vec<RunEvent> {
        self.event_store.list(self.run_id)
    }

    /// Estado reconstruido de la ejecución.
    pub fn instance(&self) -> RunInstance {
        let events = self.events();
        self.repository.load(self.run_id, &events, &self.definition)
    }

    /// Resultados de los steps terminados hasta ahora.
    pub fn results(&self) -> Vec<StepResult> {
        self.instance().results(&self.definition)
    }

    fn load_or_init(&mut self, ctx: &TestContext) -> Vec<RunEvent> {
        let mut events = self.event_store.list(self.run_id);
        let has_init = events.iter().any(|e| matches!(e.kind, RunEventKind::RunInitialized { .. }));
        if !has_init {
            let ev = self.event_store
                         .append_kind(self.run_id,
                                      RunEventKind::RunInitialized { step_count: self.definition.len(),
                                                                     sapcode: ctx.sapcode().to_string() });
            info!("run {} initialized: {} steps, sapcode {}", self.run_id, self.definition.len(), ctx.sapcode());
            events.push(ev);
        }
        events
    }

    /// Ejecuta la ejecución completa.
    ///
    /// `Ok` significa que todos los steps se alcanzaron sin aborto, aunque
    /// algunos invariantes hayan fallado; `Err` que un step fatal falló y
    /// ningún step posterior se ejecutó.
    pub fn run(&mut self, ctx: &mut TestContext) -> Result<RunOutcome, FatalStepFailure> {
        loop {
            match self.next(ctx) {
                Ok(_) => continue,
                Err(SequencerError::RunCompleted) => {
                    return Ok(RunOutcome::new(self.run_id, self.results()));
                }
                Err(SequencerError::Fatal(failure)) => return Err(failure),
                Err(other) => return Err(FatalStepFailure::internal(other, self.results())),
            }
        }
    }

    /// Ejecuta el siguiente step y devuelve su resultado.
    pub fn next(&mut self, ctx: &mut TestContext) -> Result<StepResult, SequencerError> {
        let events = self.load_or_init(ctx);
        let instance = self.repository.load(self.run_id, &events, &self.definition);

        if instance.aborted {
            return Err(SequencerError::RunAborted);
        }
        if instance.completed {
            return Err(SequencerError::RunCompleted);
        }

        let cursor = instance.cursor;
        if cursor >= self.definition.len() {
            self.complete_run(&instance);
            return Err(SequencerError::RunCompleted);
        }

        let step_id = self.definition.steps[cursor].id().to_string();
        let step_name = self.definition.steps[cursor].name().to_string();
        let severity = self.definition.steps[cursor].severity();

        println!("\n========== STEP {}: {} ==========", cursor + 1, step_name);
        let _started = self.event_store
                           .append_kind(self.run_id,
                                        RunEventKind::StepStarted { step_index: cursor,
                                                                    step_id: step_id.clone() });
        info!("step {step_id} started");

        let run_res = self.definition.steps[cursor].run(ctx);

        match run_res {
            StepRunResult::Passed { detail, observed } => {
                self.handle_step_passed(cursor, &step_id, detail, observed, Vec::new())
            }
            StepRunResult::PassedWithSignals { detail, observed, signals } => {
                self.handle_step_passed(cursor, &step_id, detail, observed, signals)
            }
            StepRunResult::Failed { reason, observed } => {
                self.handle_step_failed(cursor, &step_id, severity, reason, observed)
            }
            StepRunResult::NotVerifiable { reason } => {
                self.handle_step_not_verifiable(cursor, &step_id, severity, reason)
            }
        }
    }

    fn handle_step_passed(&mut self,
                          cursor: usize,
                          step_id: &str,
                          detail: String,
                          observed: Option<serde_json::Value>,
                          signals: Vec<StepSignal>)
                          -> Result<StepResult, SequencerError> {
        for s in signals {
            let _ = self.event_store.append_kind(self.run_id,
                                                 RunEventKind::StepSignal { step_index: cursor,
                                                                            step_id: step_id.to_string(),
                                                                            signal: s.signal,
                                                                            data: s.data });
        }
        println!("[PASS] {detail}");
        info!("step {step_id} passed: {detail}");
        let _ = self.event_store.append_kind(self.run_id,
                                             RunEventKind::StepPassed { step_index: cursor,
                                                                        step_id: step_id.to_string(),
                                                                        detail,
                                                                        observed });
        self.finish_step(cursor)
    }

    fn handle_step_failed(&mut self,
                          cursor: usize,
                          step_id: &str,
                          severity: StepSeverity,
                          reason: String,
                          observed: Option<serde_json::Value>)
                          -> Result<StepResult, SequencerError> {
        let fatal = severity == StepSeverity::Fatal;
        println!("[FAIL] {reason}");
        match severity {
            StepSeverity::Fatal => error!("fatal step {step_id} failed: {reason}"),
            StepSeverity::Advisory => warn!("advisory step {step_id} failed (continuing): {reason}"),
            StepSeverity::Soft => warn!("step {step_id} failed: {reason}"),
        }
        let _ = self.event_store.append_kind(self.run_id,
                                             RunEventKind::StepFailed { step_index: cursor,
                                                                        step_id: step_id.to_string(),
                                                                        fatal,
                                                                        reason: reason.clone(),
                                                                        observed });
        if fatal {
            return Err(self.abort_run(cursor, step_id, reason));
        }
        self.finish_step(cursor)
    }

    fn handle_step_not_verifiable(&mut self,
                                  cursor: usize,
                                  step_id: &str,
                                  severity: StepSeverity,
                                  reason: String)
                                  -> Result<StepResult, SequencerError> {
        println!("[NOT VERIFIABLE] {reason}");
        warn!("step {step_id} not verifiable: {reason}");
        let _ = self.event_store.append_kind(self.run_id,
                                             RunEventKind::StepNotVerifiable { step_index: cursor,
                                                                               step_id: step_id.to_string(),
                                                                               reason: reason.clone() });
        // un step fatal que no puede evaluarse deja igualmente sin precondición al resto
        if severity == StepSeverity::Fatal {
            return Err(self.abort_run(cursor, step_id, reason));
        }
        self.finish_step(cursor)
    }

    /// Devuelve el resultado del step recién terminado y cierra la ejecución
    /// si era el último.
    fn finish_step(&mut self, cursor: usize) -> Result<StepResult, SequencerError> {
        let instance = self.instance();
        let result = instance.result_at(cursor, &self.definition)
                             .ok_or(SequencerError::InvalidStepIndex(cursor))?;
        if cursor + 1 == self.definition.len() {
            self.complete_run(&instance);
        }
        Ok(result)
    }

    fn abort_run(&mut self, cursor: usize, step_id: &str, reason: String) -> SequencerError {
        let _ = self.event_store.append_kind(self.run_id,
                                             RunEventKind::RunAborted { step_id: step_id.to_string(),
                                                                        reason: reason.clone() });
        let step_name = self.definition
                            .steps
                            .get(cursor)
                            .map(|s| s.name().to_string())
                            .unwrap_or_else(|| step_id.to_string());
        SequencerError::Fatal(FatalStepFailure { step_id: step_id.to_string(),
                                                 step_name,
                                                 reason,
                                                 results: self.results() })
    }

    fn complete_run(&mut self, instance: &RunInstance) {
        let results = instance.results(&self.definition);
        let passed = results.iter().filter(|r| r.passed).count();
        let not_verifiable = results.iter()
                                    .filter(|r| r.verdict == crate::model::StepVerdict::NotVerifiable)
                                    .count();
        let failed = results.len() - passed - not_verifiable;
        info!("run {} completed: {passed} passed, {failed} failed, {not_verifiable} not verifiable", self.run_id);
        let _ = self.event_store
                    .append_kind(self.run_id, RunEventKind::RunCompleted { passed, failed, not_verifiable });
    }

    /// Variante compacta de eventos de la ejecución.
    pub fn event_variants(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .map(|e| match e.kind {
                RunEventKind::RunInitialized { .. } => "I",
                RunEventKind::StepStarted { .. } => "S",
                RunEventKind::StepPassed { .. } => "P",
                RunEventKind::StepFailed { .. } => "F",
                RunEventKind::StepNotVerifiable { .. } => "N",
                RunEventKind::StepSignal { .. } => "G",
                RunEventKind::RunCompleted { .. } => "C",
                RunEventKind::RunAborted { .. } => "X",
            })
            .collect()
    }
}

impl<E: EventStore, R: RunRepository> std::fmt::Debug for RunSequencer<E, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunSequencer")
         .field("run_id", &self.run_id)
         .field("steps", &self.definition.step_ids())
         .finish()
    }
}
