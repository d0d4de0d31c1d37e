//! Mock printer host for testing

use heapless::Vec;

use crate::core::motion::{Axes, AxisLimits, Xyz};
use crate::core::parameters::HookBody;
use crate::platform::{
    error::HostError,
    traits::{Diagnostic, MotionState, MoveTarget, PrinterHost},
    Result,
};

/// Maximum recorded commands
pub const MAX_COMMANDS: usize = 64;

/// Maximum recorded diagnostics
pub const MAX_DIAGNOSTICS: usize = 16;

/// Command issued to the mock host
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Absolute move
    Move {
        /// Move target
        target: MoveTarget,
        /// Speed (mm/s)
        speed: f32,
    },
    /// Homing
    Home(Axes),
    /// Switch to absolute coordinates
    SetAbsolute,
    /// Ambient state restored
    RestoreState(MotionState),
    /// User extension body
    Script(HookBody),
    /// Timelapse frame
    CaptureFrame,
}

/// Mock printer host
///
/// Tracks toolhead position, homed axes and the ambient motion state, and
/// records every command and diagnostic for test verification.
#[derive(Debug)]
pub struct MockPrinterHost {
    position: Xyz,
    homed: Axes,
    limits: AxisLimits,
    origin: Xyz,
    state: MotionState,
    commands: Vec<HostCommand, MAX_COMMANDS>,
    diagnostics: Vec<Diagnostic, MAX_DIAGNOSTICS>,
    moves_until_failure: Option<usize>,
    fail_scripts: bool,
    fail_restore: bool,
}

impl MockPrinterHost {
    /// Create a homed host at X100 Y100 Z10 on a 250 x 250 x 200 bed
    pub fn new() -> Self {
        Self {
            position: Xyz::new(100.0, 100.0, 10.0),
            homed: Axes::XYZ,
            limits: AxisLimits::new(Xyz::new(0.0, 0.0, 0.0), Xyz::new(250.0, 250.0, 200.0)),
            origin: Xyz::default(),
            state: MotionState::default(),
            commands: Vec::new(),
            diagnostics: Vec::new(),
            moves_until_failure: None,
            fail_scripts: false,
            fail_restore: false,
        }
    }

    /// Set the reported toolhead position
    pub fn set_position(&mut self, position: Xyz) {
        self.position = position;
    }

    /// Set the homed axes
    pub fn set_homed(&mut self, axes: Axes) {
        self.homed = axes;
    }

    /// Set the axis limits
    pub fn set_limits(&mut self, limits: AxisLimits) {
        self.limits = limits;
    }

    /// Set the coordinate origin offset
    pub fn set_origin(&mut self, origin: Xyz) {
        self.origin = origin;
    }

    /// Replace the ambient motion state (as a user command would)
    pub fn set_motion_state(&mut self, state: MotionState) {
        self.state = state;
    }

    /// Fail the move after `moves` successful ones
    pub fn fail_after_moves(&mut self, moves: usize) {
        self.moves_until_failure = Some(moves);
    }

    /// Make every user extension body fail
    pub fn fail_scripts(&mut self, fail: bool) {
        self.fail_scripts = fail;
    }

    /// Make ambient state restores fail
    pub fn fail_restore(&mut self, fail: bool) {
        self.fail_restore = fail;
    }

    /// Every command issued so far
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    /// Move targets in issue order
    pub fn moves(&self) -> impl Iterator<Item = &MoveTarget> {
        self.commands.iter().filter_map(|command| match command {
            HostCommand::Move { target, .. } => Some(target),
            _ => None,
        })
    }

    /// User extension bodies in issue order
    pub fn scripts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            HostCommand::Script(body) => Some(body.as_str()),
            _ => None,
        })
    }

    /// Diagnostics reported so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Forget recorded commands and diagnostics
    pub fn clear_log(&mut self) {
        self.commands.clear();
        self.diagnostics.clear();
    }

    fn record(&mut self, command: HostCommand) {
        // Recording stops when the buffer is full
        let _ = self.commands.push(command);
    }
}

impl Default for MockPrinterHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PrinterHost for MockPrinterHost {
    fn position(&self) -> Xyz {
        self.position
    }

    fn homed_axes(&self) -> Axes {
        self.homed
    }

    fn axis_limits(&self) -> AxisLimits {
        self.limits
    }

    fn homing_origin(&self) -> Xyz {
        self.origin
    }

    fn move_to(&mut self, target: MoveTarget, speed: f32) -> Result<()> {
        if let Some(remaining) = self.moves_until_failure.as_mut() {
            if *remaining == 0 {
                return Err(HostError::MoveFailed);
            }
            *remaining -= 1;
        }

        self.record(HostCommand::Move { target, speed });
        self.position = Xyz::new(
            target.x.unwrap_or(self.position.x),
            target.y.unwrap_or(self.position.y),
            target.z.unwrap_or(self.position.z),
        );
        self.state.speed = speed;
        Ok(())
    }

    fn home(&mut self, axes: Axes) -> Result<()> {
        self.record(HostCommand::Home(axes));
        self.homed |= axes;
        if axes.contains(Axes::X) {
            self.position.x = self.limits.min.x;
        }
        if axes.contains(Axes::Y) {
            self.position.y = self.limits.min.y;
        }
        Ok(())
    }

    fn motion_state(&self) -> MotionState {
        self.state
    }

    fn restore_motion_state(&mut self, state: &MotionState) -> Result<()> {
        if self.fail_restore {
            return Err(HostError::StateRestoreFailed);
        }
        self.record(HostCommand::RestoreState(*state));
        self.state = *state;
        Ok(())
    }

    fn set_absolute(&mut self) -> Result<()> {
        self.record(HostCommand::SetAbsolute);
        self.state.absolute_coord = true;
        Ok(())
    }

    fn run_script(&mut self, script: &str) -> Result<()> {
        if self.fail_scripts {
            return Err(HostError::ScriptFailed);
        }
        let body = HookBody::try_from(script).map_err(|_| HostError::ScriptFailed)?;
        self.record(HostCommand::Script(body));
        Ok(())
    }

    fn capture_frame(&mut self) -> Result<()> {
        self.record(HostCommand::CaptureFrame);
        Ok(())
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        let _ = self.diagnostics.push(diagnostic);
    }
}
