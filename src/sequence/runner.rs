//! Plan execution
//!
//! Runs the steps produced by the planners against a [`FilamentActuator`],
//! trusting the position each step reports.

use crate::core::filament::{FilamentPosition, FilamentStep};
use crate::platform::{FilamentActuator, Result};

/// Execute `plan` in order, updating `position` after every step.
///
/// The first failing step aborts the plan and its error is returned
/// unchanged; `position` then holds the last successfully reported value so
/// the sequence can be resumed. A step reporting less progress than it was
/// planned for is logged but not treated as an error.
pub fn run_plan<A: FilamentActuator + ?Sized>(
    actuator: &mut A,
    position: &mut FilamentPosition,
    plan: &[FilamentStep],
) -> Result<()> {
    for (index, step) in plan.iter().enumerate() {
        crate::log_debug!("Step {}/{}: {}", index + 1, plan.len(), step.name());

        let reported = actuator.execute(*step).inspect_err(|error| {
            crate::log_error!("Step {} failed: {}", step.name(), error);
        })?;

        if step.is_load() && reported < *position {
            crate::log_warn!(
                "Step {} moved filament back from {} to {}",
                step.name(),
                *position,
                reported
            );
        } else if let Some(minimum) = step.minimum_result().filter(|minimum| reported < *minimum) {
            crate::log_warn!(
                "Step {} reported {}, expected at least {}",
                step.name(),
                reported,
                minimum
            );
        }

        *position = reported;
    }

    crate::log_debug!("Filament now at {}", *position);
    Ok(())
}
