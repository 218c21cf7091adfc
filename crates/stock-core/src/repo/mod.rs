pub mod types;

pub use types::{InMemoryRunRepository, RunDefinition, RunInstance, RunRepository, StepSlot};
