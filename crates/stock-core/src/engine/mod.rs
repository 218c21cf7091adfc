//! Engine module for RunSequencer implementation
//!
//! Provides the sequencer, its builder and the run outcome.

pub mod builder;
pub mod core;
pub mod outcome;

pub use builder::SequencerBuilder;
pub use core::RunSequencer;
pub use outcome::RunOutcome;
