//! Sequencing error types
//!
//! Precondition violations raised by the load/unload planners and argument
//! errors raised while decoding invocation parameters.

use super::position::FilamentPosition;

/// Errors raised before any actuation step is attempted.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// Load requested while filament is already gripped by the extruder
    #[error("Can't load - already in extruder (filament at {0})")]
    AlreadyInExtruder(FilamentPosition),

    /// Extruder-only unload requested while filament is not in the extruder
    #[error("Can't unload extruder - already unloaded (filament at {0})")]
    ExtruderAlreadyUnloaded(FilamentPosition),

    /// Unload requested while filament is parked in the gate
    #[error("Can't unload - already unloaded")]
    AlreadyUnloaded,

    /// Float-encoded position that does not name a state
    #[error("Invalid filament position: {0}")]
    InvalidPosition(f32),

    /// Parameter value that could not be parsed
    #[error("Invalid value for {0}")]
    InvalidArgument(&'static str),

    /// Parameter name this sequence does not accept
    #[error("Unknown parameter")]
    UnknownArgument,
}
