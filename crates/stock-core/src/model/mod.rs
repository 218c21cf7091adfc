//! Modelo de datos del harness: contexto, resultados y expectativas.

pub mod context;
pub mod expectation;
pub mod step_result;

pub use context::TestContext;
pub use expectation::{LocationCountExpectation, LocationFilter};
pub use step_result::{StepResult, StepVerdict};
