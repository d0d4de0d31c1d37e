//! Filament path sequencing
//!
//! Pure types and planners for the load/unload state machines.
//!
//! The planners do not know about motors, sensors or the host motion
//! system. Physical execution of each [`FilamentStep`] is delegated to an
//! actuator implemented by the firmware crate, which reports the resulting
//! [`FilamentPosition`] after every step.

pub mod args;
pub mod error;
pub mod plan;
pub mod position;

pub use args::SequenceArgs;
pub use error::SequenceError;
pub use plan::{
    plan_load, plan_unload, FilamentStep, LoadRequest, StepPlan, UnloadRequest, MAX_PLAN_STEPS,
};
pub use position::FilamentPosition;
