//! Load/Unload Planning
//!
//! Pure decision logic that maps the current [`FilamentPosition`] and the
//! requested mode onto the ordered actuation steps still needed.
//!
//! Every rule is a threshold comparison against the position ordering, so a
//! sequence can be resumed from any intermediate state: steps already
//! satisfied by the current position are simply not planned. Planning never
//! assigns a new position itself. Each step reports where the filament ended
//! up when it is executed.

use heapless::Vec;

use super::error::SequenceError;
use super::position::FilamentPosition;

/// Upper bound on steps in a single plan.
pub const MAX_PLAN_STEPS: usize = 4;

/// Ordered list of steps produced by the planners.
pub type StepPlan = Vec<FilamentStep, MAX_PLAN_STEPS>;

/// A physical actuation step performed by an external collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilamentStep {
    /// Move filament from the gate to the start of the bowden
    LoadGate,
    /// Fast bowden move of `length` mm
    LoadBowden {
        /// Bowden move length (mm)
        length: f32,
    },
    /// Home filament to the extruder gears
    HomeExtruder,
    /// Load from the extruder to the nozzle
    LoadToolhead {
        /// Only the extruder moves (gear stepper not involved)
        extruder_only: bool,
    },
    /// Unload from the nozzle out of the extruder
    UnloadToolhead {
        /// Only the extruder moves (gear stepper not involved)
        extruder_only: bool,
        /// Filament position in the extruder left by tip forming (mm)
        park_pos: f32,
    },
    /// Fast bowden retraction
    UnloadBowden {
        /// Retract the full calibrated bowden length
        full: bool,
        /// Retraction length when not `full` (mm)
        length: f32,
    },
    /// Retract to the gate parking position
    UnloadGate {
        /// Slow, sensor-guided retraction over the full bowden range
        full: bool,
    },
}

impl FilamentStep {
    /// Short name used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            FilamentStep::LoadGate => "load gate",
            FilamentStep::LoadBowden { .. } => "load bowden",
            FilamentStep::HomeExtruder => "home extruder",
            FilamentStep::LoadToolhead { .. } => "load toolhead",
            FilamentStep::UnloadToolhead { .. } => "unload toolhead",
            FilamentStep::UnloadBowden { .. } => "unload bowden",
            FilamentStep::UnloadGate { .. } => "unload gate",
        }
    }

    /// Whether the step moves filament towards the nozzle.
    pub const fn is_load(&self) -> bool {
        matches!(
            self,
            FilamentStep::LoadGate
                | FilamentStep::LoadBowden { .. }
                | FilamentStep::HomeExtruder
                | FilamentStep::LoadToolhead { .. }
        )
    }

    /// Position a load step must reach at minimum.
    ///
    /// This is the threshold the planner gated the step on. Unload steps
    /// move filament backwards and have no lower bound.
    pub const fn minimum_result(&self) -> Option<FilamentPosition> {
        match self {
            FilamentStep::LoadGate => Some(FilamentPosition::HomedGate),
            FilamentStep::LoadBowden { .. } => Some(FilamentPosition::EndBowden),
            FilamentStep::HomeExtruder => Some(FilamentPosition::HomedExtruder),
            FilamentStep::LoadToolhead { .. } => Some(FilamentPosition::Loaded),
            _ => None,
        }
    }
}

/// Parameters of a load request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoadRequest {
    /// Bowden length to move (mm)
    pub length: f32,
    /// Full load requested by the caller (carried, does not alter the plan)
    pub full: bool,
    /// Home to the extruder before loading the toolhead
    pub home_extruder: bool,
    /// Stop before the extruder
    pub skip_extruder: bool,
    /// Only load the extruder (filament already at the extruder)
    pub extruder_only: bool,
}

/// Parameters of an unload request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnloadRequest {
    /// Bowden length to retract (mm)
    pub length: f32,
    /// Only unload the extruder
    pub extruder_only: bool,
    /// Filament position in the extruder left by tip forming (mm)
    pub park_pos: f32,
}

/// Plan the steps that take filament from `current` to loaded.
///
/// # Errors
///
/// [`SequenceError::AlreadyInExtruder`] if filament is already at or past
/// the extruder gears (unless `extruder_only` is requested).
pub fn plan_load(
    current: FilamentPosition,
    request: &LoadRequest,
) -> Result<StepPlan, SequenceError> {
    let mut plan = StepPlan::new();

    if request.extruder_only {
        push(&mut plan, FilamentStep::LoadToolhead { extruder_only: true });
        return Ok(plan);
    }

    if current >= FilamentPosition::PastExtruder {
        return Err(SequenceError::AlreadyInExtruder(current));
    }

    if current <= FilamentPosition::Unloaded {
        push(&mut plan, FilamentStep::LoadGate);
    }
    if current < FilamentPosition::EndBowden {
        push(
            &mut plan,
            FilamentStep::LoadBowden {
                length: request.length,
            },
        );
    }
    if current < FilamentPosition::HomedExtruder && request.home_extruder {
        push(&mut plan, FilamentStep::HomeExtruder);
    }
    if !request.skip_extruder {
        push(&mut plan, FilamentStep::LoadToolhead { extruder_only: false });
    }

    Ok(plan)
}

/// Plan the steps that take filament from `current` back to the gate.
///
/// # Errors
///
/// - [`SequenceError::ExtruderAlreadyUnloaded`] for an extruder-only unload
///   when filament is not past the extruder gears
/// - [`SequenceError::AlreadyUnloaded`] when filament is parked in the gate
pub fn plan_unload(
    current: FilamentPosition,
    request: &UnloadRequest,
) -> Result<StepPlan, SequenceError> {
    let mut plan = StepPlan::new();

    if request.extruder_only {
        if current < FilamentPosition::PastExtruder {
            return Err(SequenceError::ExtruderAlreadyUnloaded(current));
        }
        push(
            &mut plan,
            FilamentStep::UnloadToolhead {
                extruder_only: true,
                park_pos: request.park_pos,
            },
        );
        return Ok(plan);
    }

    if current == FilamentPosition::Unloaded {
        return Err(SequenceError::AlreadyUnloaded);
    }

    if current >= FilamentPosition::PastExtruder {
        push(
            &mut plan,
            FilamentStep::UnloadToolhead {
                extruder_only: false,
                park_pos: request.park_pos,
            },
        );
    }

    // A fast bowden retraction is only safe from a known offset (END_BOWDEN).
    // Otherwise fall back to a full, sensor-guided gate retraction.
    if current >= FilamentPosition::EndBowden {
        push(
            &mut plan,
            FilamentStep::UnloadBowden {
                full: true,
                length: request.length,
            },
        );
        push(&mut plan, FilamentStep::UnloadGate { full: false });
    } else if current >= FilamentPosition::StartBowden {
        push(&mut plan, FilamentStep::UnloadGate { full: true });
    }

    Ok(plan)
}

/// Planners emit at most `MAX_PLAN_STEPS` steps.
fn push(plan: &mut StepPlan, step: FilamentStep) {
    let _ = plan.push(step);
}
