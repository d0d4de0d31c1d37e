//! Toolchange sequencing
//!
//! Callback phases, the scoped motion state wrapped around them and the
//! execution of planned filament steps.

pub mod error;
pub mod guard;
pub mod orchestrator;
pub mod phase;
pub mod runner;

pub use error::{ToolchangeError, ToolchangeErrorKind};
pub use guard::MotionStateGuard;
pub use orchestrator::SequenceOrchestrator;
pub use phase::SequencePhase;
pub use runner::run_plan;
