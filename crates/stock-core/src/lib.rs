//! stock-core: Secuenciador lineal determinista del harness de stock.
//!
//! El crate no sabe nada de HTTP ni del servicio de inventario: define el
//! contexto de prueba, el contrato de un step, el log de eventos de una
//! ejecución y el motor que recorre los steps en orden fijo.
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod model;
pub mod repo;
pub mod step;

pub use engine::{RunOutcome, RunSequencer, SequencerBuilder};
pub use errors::{FatalStepFailure, SequencerError};
pub use event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
pub use model::{LocationCountExpectation, LocationFilter, StepResult, StepVerdict, TestContext};
pub use repo::{InMemoryRunRepository, RunDefinition, RunInstance, RunRepository};
pub use step::{StepDefinition, StepRunResult, StepSeverity, StepSignal, StepStatus};
