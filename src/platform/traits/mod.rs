//! Platform abstraction traits
//!
//! This module defines the traits that a printer integration must provide.

pub mod actuator;
pub mod host;

// Re-export trait interfaces
pub use actuator::FilamentActuator;
pub use host::{Diagnostic, MotionState, MoveTarget, PrinterHost};
