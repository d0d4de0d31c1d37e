//! Toolchange error types

use crate::core::filament::SequenceError;
use crate::platform::HostError;

use super::phase::SequencePhase;

/// Cause of a failed toolchange phase
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToolchangeErrorKind {
    /// Precondition or argument error
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    /// Host motion or actuator failure
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Error surfaced to the caller, which is expected to pause the print.
///
/// Park state is left intact so a later resume can restore the toolhead.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("{phase} failed: {kind}")]
pub struct ToolchangeError {
    /// Phase that failed
    pub phase: SequencePhase,
    /// What went wrong
    #[source]
    pub kind: ToolchangeErrorKind,
}

impl ToolchangeError {
    /// Create an error for `phase`
    pub fn new(phase: SequencePhase, kind: impl Into<ToolchangeErrorKind>) -> Self {
        Self {
            phase,
            kind: kind.into(),
        }
    }

    /// Adapter for `map_err`
    pub fn in_phase<E: Into<ToolchangeErrorKind>>(phase: SequencePhase) -> impl FnOnce(E) -> Self {
        move |error| Self::new(phase, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filament::FilamentPosition;

    #[test]
    fn test_display() {
        let error = ToolchangeError::new(
            SequencePhase::LoadSequence,
            SequenceError::AlreadyInExtruder(FilamentPosition::Loaded),
        );
        assert_eq!(
            error.to_string(),
            "LOAD_SEQUENCE failed: Can't load - already in extruder (filament at LOADED(10))"
        );

        let error = ToolchangeError::new(SequencePhase::PreUnload, HostError::HomingFailed);
        assert_eq!(error.to_string(), "PRE_UNLOAD failed: homing failed");
    }

    #[test]
    fn test_in_phase() {
        let result: Result<(), HostError> = Err(HostError::MoveFailed);
        let error = result
            .map_err(ToolchangeError::in_phase(SequencePhase::PostLoad))
            .unwrap_err();
        assert_eq!(error.phase, SequencePhase::PostLoad);
        assert_eq!(error.kind, ToolchangeErrorKind::Host(HostError::MoveFailed));
    }
}
