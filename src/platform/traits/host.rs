//! Printer host interface trait
//!
//! The host motion system as seen by the toolchange sequence: position and
//! homing queries, blocking absolute moves, the ambient G-code state, user
//! extension bodies and a non-fatal diagnostic channel.

use crate::core::motion::{Axes, AxisLimits, Xy, Xyz};
use crate::platform::Result;

/// Absolute move target; `None` axes do not move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveTarget {
    /// X target (mm)
    pub x: Option<f32>,
    /// Y target (mm)
    pub y: Option<f32>,
    /// Z target (mm)
    pub z: Option<f32>,
}

impl MoveTarget {
    /// Vertical move only
    pub const fn z(z: f32) -> Self {
        Self {
            x: None,
            y: None,
            z: Some(z),
        }
    }

    /// Planar move only
    pub const fn xy(position: Xy) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            z: None,
        }
    }
}

/// Ambient G-code state captured around every callback phase.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionState {
    /// Absolute coordinates (G90) rather than relative (G91)
    pub absolute_coord: bool,
    /// Absolute extrusion (M82) rather than relative (M83)
    pub absolute_extrude: bool,
    /// Current feed rate (mm/s)
    pub speed: f32,
    /// Speed override factor (M220)
    pub speed_factor: f32,
    /// Extrusion override factor (M221)
    pub extrude_factor: f32,
    /// Active tool offset (G92 / G-code offset)
    pub offset: Xyz,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            absolute_coord: true,
            absolute_extrude: true,
            speed: 25.0,
            speed_factor: 1.0,
            extrude_factor: 1.0,
            offset: Xyz::default(),
        }
    }
}

/// Non-fatal condition reported by the sequence.
///
/// Diagnostics never abort a phase; the sub-motion concerned is skipped or
/// corrected in place.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Diagnostic {
    /// A motion was requested on axes that are not homed
    AxesNotHomed {
        /// Axes that were required but not homed (`Axes` bits)
        missing: u8,
    },
    /// A reported position was outside the axis limits and was clamped
    PositionClamped {
        /// Position as reported by the host
        reported: Xyz,
        /// Position that was saved
        clamped: Xyz,
    },
    /// Parking is disabled in this print context
    ParkDisabled,
}

impl Diagnostic {
    /// Diagnostic for axes in `required` that are missing from `homed`
    pub fn axes_not_homed(required: Axes, homed: Axes) -> Self {
        Diagnostic::AxesNotHomed {
            missing: required.difference(homed).bits(),
        }
    }
}

/// Printer host interface trait
///
/// Motion commands block until physically complete; the host processes one
/// command stream at a time.
pub trait PrinterHost {
    /// Current toolhead position in G-code coordinates
    fn position(&self) -> Xyz;

    /// Axes that are currently homed
    fn homed_axes(&self) -> Axes;

    /// Configured `position_min` / `position_max`
    fn axis_limits(&self) -> AxisLimits;

    /// Active coordinate origin offset
    fn homing_origin(&self) -> Xyz;

    /// Absolute move to `target` at `speed` (mm/s)
    ///
    /// # Errors
    ///
    /// Returns `HostError::MoveFailed` if the move could not be executed.
    fn move_to(&mut self, target: MoveTarget, speed: f32) -> Result<()>;

    /// Home `axes`
    ///
    /// # Errors
    ///
    /// Returns `HostError::HomingFailed` if homing did not complete.
    fn home(&mut self, axes: Axes) -> Result<()>;

    /// Snapshot the ambient G-code state
    fn motion_state(&self) -> MotionState;

    /// Restore a snapshot taken with [`PrinterHost::motion_state`]
    ///
    /// # Errors
    ///
    /// Returns `HostError::StateRestoreFailed` if the state was not applied.
    fn restore_motion_state(&mut self, state: &MotionState) -> Result<()>;

    /// Switch to absolute coordinates (G90)
    fn set_absolute(&mut self) -> Result<()>;

    /// Run a user extension body verbatim
    ///
    /// # Errors
    ///
    /// Returns `HostError::ScriptFailed` if the body raised an error.
    fn run_script(&mut self, script: &str) -> Result<()>;

    /// Capture a timelapse frame
    fn capture_frame(&mut self) -> Result<()>;

    /// Report a non-fatal diagnostic
    fn report(&mut self, diagnostic: Diagnostic);
}
