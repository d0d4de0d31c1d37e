//! Mock filament actuator for testing

use heapless::Vec;

use crate::core::filament::{FilamentPosition, FilamentStep, LoadRequest, UnloadRequest};
use crate::platform::{error::HostError, traits::FilamentActuator, Result};

/// Maximum recorded calls
pub const MAX_CALLS: usize = 32;

/// Call made on the mock actuator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorCall {
    /// A planned step
    Step(FilamentStep),
    /// Tip forming
    FormTip,
    /// Built-in unload
    UnloadBuiltin,
    /// Built-in load
    LoadBuiltin,
}

/// Mock filament actuator
///
/// Simulates where each step leaves the filament and records every call.
/// A named step can be made to fail, or to report a fixed position.
#[derive(Debug)]
pub struct MockActuator {
    position: FilamentPosition,
    tip_park_pos: f32,
    calls: Vec<ActuatorCall, MAX_CALLS>,
    fail_on: Option<&'static str>,
    forced_report: Option<(&'static str, FilamentPosition)>,
}

impl MockActuator {
    /// Create an actuator with filament at `position`
    pub fn new(position: FilamentPosition) -> Self {
        Self {
            position,
            tip_park_pos: 0.0,
            calls: Vec::new(),
            fail_on: None,
            forced_report: None,
        }
    }

    /// Simulated filament position
    pub fn position(&self) -> FilamentPosition {
        self.position
    }

    /// Park position returned by tip forming (mm)
    pub fn set_tip_park_pos(&mut self, park_pos: f32) {
        self.tip_park_pos = park_pos;
    }

    /// Fail the step (or `"form tip"`, `"unload"`, `"load"`) with this name
    pub fn fail_on(&mut self, name: &'static str) {
        self.fail_on = Some(name);
    }

    /// Make the named step report `position` instead of the simulated one
    pub fn force_report(&mut self, name: &'static str, position: FilamentPosition) {
        self.forced_report = Some((name, position));
    }

    /// Every call made so far
    pub fn calls(&self) -> &[ActuatorCall] {
        &self.calls
    }

    /// Planned steps executed so far
    pub fn steps(&self) -> impl Iterator<Item = &FilamentStep> {
        self.calls.iter().filter_map(|call| match call {
            ActuatorCall::Step(step) => Some(step),
            _ => None,
        })
    }

    fn step(&mut self, step: FilamentStep, reached: FilamentPosition) -> Result<FilamentPosition> {
        self.finish(ActuatorCall::Step(step), step.name(), reached)
    }

    fn finish(
        &mut self,
        call: ActuatorCall,
        name: &'static str,
        reached: FilamentPosition,
    ) -> Result<FilamentPosition> {
        let _ = self.calls.push(call);
        if self.fail_on == Some(name) {
            return Err(HostError::ActuatorFailed(name));
        }
        self.position = match self.forced_report {
            Some((forced, position)) if forced == name => position,
            _ => reached,
        };
        Ok(self.position)
    }
}

impl FilamentActuator for MockActuator {
    fn load_gate(&mut self) -> Result<FilamentPosition> {
        self.step(FilamentStep::LoadGate, FilamentPosition::StartBowden)
    }

    fn load_bowden(&mut self, length: f32) -> Result<FilamentPosition> {
        self.step(
            FilamentStep::LoadBowden { length },
            FilamentPosition::EndBowden,
        )
    }

    fn home_extruder(&mut self) -> Result<FilamentPosition> {
        self.step(FilamentStep::HomeExtruder, FilamentPosition::HomedExtruder)
    }

    fn load_toolhead(&mut self, extruder_only: bool) -> Result<FilamentPosition> {
        self.step(
            FilamentStep::LoadToolhead { extruder_only },
            FilamentPosition::Loaded,
        )
    }

    fn unload_toolhead(&mut self, extruder_only: bool, park_pos: f32) -> Result<FilamentPosition> {
        let reached = if extruder_only {
            FilamentPosition::HomedExtruder
        } else {
            FilamentPosition::EndBowden
        };
        self.step(
            FilamentStep::UnloadToolhead {
                extruder_only,
                park_pos,
            },
            reached,
        )
    }

    fn unload_bowden(&mut self, full: bool, length: f32) -> Result<FilamentPosition> {
        self.step(
            FilamentStep::UnloadBowden { full, length },
            FilamentPosition::StartBowden,
        )
    }

    fn unload_gate(&mut self, full: bool) -> Result<FilamentPosition> {
        self.step(FilamentStep::UnloadGate { full }, FilamentPosition::Unloaded)
    }

    fn form_tip(&mut self) -> Result<f32> {
        let _ = self.calls.push(ActuatorCall::FormTip);
        if self.fail_on == Some("form tip") {
            return Err(HostError::ActuatorFailed("form tip"));
        }
        Ok(self.tip_park_pos)
    }

    fn unload_builtin(
        &mut self,
        _current: FilamentPosition,
        _request: &UnloadRequest,
    ) -> Result<FilamentPosition> {
        self.finish(
            ActuatorCall::UnloadBuiltin,
            "unload",
            FilamentPosition::Unloaded,
        )
    }

    fn load_builtin(
        &mut self,
        _current: FilamentPosition,
        request: &LoadRequest,
    ) -> Result<FilamentPosition> {
        let reached = if request.skip_extruder {
            FilamentPosition::EndBowden
        } else {
            FilamentPosition::Loaded
        };
        self.finish(ActuatorCall::LoadBuiltin, "load", reached)
    }
}
