//! Selection and transition orchestration for the happiness globe.
//!
//! [`GlobeOrchestrator`] is the facade a host UI drives: it forwards picks to
//! the selection store, runs the reveal/camera/panel sequence, and keeps the
//! camera and region styles consistent with whatever is selected.

pub mod orchestrator;
pub mod sequencer;
pub mod trigger;

pub use orchestrator::*;
pub use sequencer::*;
pub use trigger::*;
