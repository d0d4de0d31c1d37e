//! Filament actuator interface trait
//!
//! The physical filament moves. Each step reports the position the filament
//! ended up in; the sequence trusts the last reported value.

use crate::core::filament::{FilamentPosition, FilamentStep, LoadRequest, UnloadRequest};
use crate::platform::Result;

/// Filament actuator interface trait
///
/// Every method performs physical motion and is fallible. Failures are
/// propagated unchanged; no method is retried by the sequence.
pub trait FilamentActuator {
    /// Move filament from the gate into the bowden
    fn load_gate(&mut self) -> Result<FilamentPosition>;

    /// Fast bowden move of `length` mm towards the extruder
    fn load_bowden(&mut self, length: f32) -> Result<FilamentPosition>;

    /// Home filament to the extruder gears
    fn home_extruder(&mut self) -> Result<FilamentPosition>;

    /// Load from the extruder to the nozzle
    fn load_toolhead(&mut self, extruder_only: bool) -> Result<FilamentPosition>;

    /// Unload out of the extruder, starting from `park_pos` left by tip forming
    fn unload_toolhead(&mut self, extruder_only: bool, park_pos: f32) -> Result<FilamentPosition>;

    /// Fast bowden retraction
    fn unload_bowden(&mut self, full: bool, length: f32) -> Result<FilamentPosition>;

    /// Retract to the gate parking position
    fn unload_gate(&mut self, full: bool) -> Result<FilamentPosition>;

    /// Form (or cut) the filament tip
    ///
    /// Returns the filament position in the extruder after tip forming (mm).
    fn form_tip(&mut self) -> Result<f32>;

    /// Built-in unload used when step sequencing is disabled
    fn unload_builtin(
        &mut self,
        current: FilamentPosition,
        request: &UnloadRequest,
    ) -> Result<FilamentPosition>;

    /// Built-in load used when step sequencing is disabled
    fn load_builtin(
        &mut self,
        current: FilamentPosition,
        request: &LoadRequest,
    ) -> Result<FilamentPosition>;

    /// Execute a planned step
    fn execute(&mut self, step: FilamentStep) -> Result<FilamentPosition> {
        match step {
            FilamentStep::LoadGate => self.load_gate(),
            FilamentStep::LoadBowden { length } => self.load_bowden(length),
            FilamentStep::HomeExtruder => self.home_extruder(),
            FilamentStep::LoadToolhead { extruder_only } => self.load_toolhead(extruder_only),
            FilamentStep::UnloadToolhead {
                extruder_only,
                park_pos,
            } => self.unload_toolhead(extruder_only, park_pos),
            FilamentStep::UnloadBowden { full, length } => self.unload_bowden(full, length),
            FilamentStep::UnloadGate { full } => self.unload_gate(full),
        }
    }
}
