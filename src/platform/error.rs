//! Platform error types
//!
//! Failures reported by the printer host or a filament actuator.

/// Result type for host and actuator operations
pub type Result<T> = core::result::Result<T, HostError>;

/// Host-level errors
///
/// Host and actuator implementations map their own failures to these
/// variants. None of them are retried by the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostError {
    /// A toolhead move was rejected or did not complete
    #[error("toolhead move failed")]
    MoveFailed,
    /// Homing did not complete
    #[error("homing failed")]
    HomingFailed,
    /// A user extension body failed
    #[error("command script failed")]
    ScriptFailed,
    /// A filament actuation step failed
    #[error("filament actuation failed: {0}")]
    ActuatorFailed(&'static str),
    /// The ambient motion state could not be restored
    #[error("motion state restore failed")]
    StateRestoreFailed,
}
