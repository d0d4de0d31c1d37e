//! Platform abstraction layer
//!
//! The printer integration the sequence runs against: host motion and
//! filament actuation. All printer-specific code lives behind these traits.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{HostError, Result};
pub use traits::{Diagnostic, FilamentActuator, MotionState, MoveTarget, PrinterHost};
