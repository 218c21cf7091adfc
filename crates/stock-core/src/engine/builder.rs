//! Builder para `RunSequencer`.
//!
//! El orden en que se añaden los steps es el orden de ejecución; no hay
//! reordenamiento ni ejecución en paralelo.
//!
//! ```ignore
//! let mut sequencer = RunSequencer::new()
//!     .add_step(RegisterStep::new(api.clone()))
//!     .add_step(LoginStep::new(api.clone()))
//!     .build();
//! ```

use crate::engine::RunSequencer;
use crate::event::EventStore;
use crate::repo::{RunDefinition, RunRepository};
use crate::step::StepDefinition;

pub struct SequencerBuilder<E: EventStore, R: RunRepository> {
    event_store: E,
    repository: R,
    steps: Vec<Box<dyn StepDefinition>>,
}

impl<E: EventStore, R: RunRepository> SequencerBuilder<E, R> {
    pub fn new(event_store: E, repository: R) -> Self {
        Self { event_store,
               repository,
               steps: Vec::new() }
    }

    /// Añade un paso al final del recorrido.
    #[inline]
    pub fn add_step<S>(mut self, step: S) -> Self
        where S: StepDefinition + 'static
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Añade pasos ya encajonados, en el orden dado.
    pub fn add_steps(mut self, steps: impl IntoIterator<Item = Box<dyn StepDefinition>>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Construye el `RunSequencer` final. Consume el builder.
    #[inline]
    pub fn build(self) -> RunSequencer<E, R> {
        RunSequencer::new_with_stores(self.event_store, self.repository, RunDefinition::new(self.steps))
    }
}
