//! Park controller
//!
//! Owns the session [`ParkState`] and moves the toolhead out of the way for
//! a toolchange and back again.
//!
//! Motion order is fixed: on park the Z lift comes before the planar move,
//! on restore the transit lift comes first, then the planar restore, then
//! the saved Z. All moves are absolute.

use crate::core::motion::{Axes, Xy};
use crate::core::parameters::{HookParams, ParkParams, RestorePolicy};
use crate::platform::{Diagnostic, MoveTarget, PrinterHost, Result};

use super::{park_enabled, ParkState, SessionContext};

/// Park/save/restore of the toolhead position
#[derive(Debug, Clone, Default)]
pub struct ParkController {
    state: ParkState,
}

impl ParkController {
    /// Controller with fresh session state
    pub const fn new() -> Self {
        Self {
            state: ParkState::new(),
        }
    }

    /// Controller resuming an existing state
    pub const fn with_state(state: ParkState) -> Self {
        Self { state }
    }

    /// Session state
    pub fn state(&self) -> &ParkState {
        &self.state
    }

    /// Compute and persist the safe toolchange travel height
    ///
    /// Bounded above by the reachable Z (less the active origin offset) and
    /// below by `min_toolchange_z`.
    pub fn compute_toolchange_height<H: PrinterHost + ?Sized>(
        &mut self,
        host: &H,
        params: &ParkParams,
    ) -> f32 {
        self.toolchange_height(host, params, params.z_hop)
    }

    fn toolchange_height<H: PrinterHost + ?Sized>(
        &mut self,
        host: &H,
        params: &ParkParams,
        z_hop: f32,
    ) -> f32 {
        let current_z = host.position().z;
        let axis_max_z = host.axis_limits().max.z;
        let origin_z = host.homing_origin().z;
        self.state.compute_toolchange_height(
            current_z,
            z_hop,
            axis_max_z,
            origin_z,
            params.min_toolchange_z,
        )
    }

    /// Park the toolhead if parking applies in `context`
    ///
    /// Without homed X/Y a diagnostic is reported and nothing moves. Without
    /// homed Z the lift is skipped but the planar move still happens. The
    /// planar move is the `park_move` hook when one is defined.
    pub fn park<H: PrinterHost + ?Sized>(
        &mut self,
        host: &mut H,
        params: &ParkParams,
        hooks: &HookParams,
        context: &SessionContext,
        z_hop: Option<f32>,
    ) -> Result<()> {
        if !park_enabled(context, params) {
            crate::log_debug!("Parking disabled in this context");
            host.report(Diagnostic::ParkDisabled);
            return Ok(());
        }

        let homed = host.homed_axes();
        if !homed.contains(Axes::XY) {
            crate::log_warn!("Cannot park: X/Y not homed");
            host.report(Diagnostic::axes_not_homed(Axes::XY, homed));
            return Ok(());
        }

        host.set_absolute()?;

        if homed.contains(Axes::Z) {
            let z = self.toolchange_height(host, params, z_hop.unwrap_or(params.z_hop));
            crate::log_debug!("Park lift to Z {}", z);
            host.move_to(MoveTarget::z(z), params.lift_speed)?;
        } else {
            crate::log_warn!("Z not homed, park lift skipped");
            host.report(Diagnostic::axes_not_homed(Axes::Z, homed));
        }

        match hooks.park_move.as_deref() {
            Some(script) => {
                crate::log_debug!("Custom park move");
                host.run_script(script)?;
            }
            None => {
                crate::log_debug!("Park at X {} Y {}", params.park_xy.x, params.park_xy.y);
                host.move_to(MoveTarget::xy(params.park_xy), params.travel_speed)?;
            }
        }

        Ok(())
    }

    /// Save the current toolhead position
    ///
    /// No-op when a position is already saved or when any axis is not
    /// homed. X/Y are clamped into the axis limits before saving.
    pub fn save_position<H: PrinterHost + ?Sized>(&mut self, host: &mut H) {
        if self.state.has_saved_position() {
            crate::log_trace!("Position already saved");
            return;
        }

        if !host.homed_axes().contains(Axes::XYZ) {
            crate::log_debug!("Axes not homed, position not saved");
            return;
        }

        let reported = host.position();
        let (position, clamped) = host.axis_limits().clamp_xy(reported);
        if clamped {
            crate::log_warn!(
                "Position X {} Y {} outside limits, clamped to X {} Y {}",
                reported.x,
                reported.y,
                position.x,
                position.y
            );
            host.report(Diagnostic::PositionClamped {
                reported,
                clamped: position,
            });
        }

        crate::log_debug!(
            "Saved position X {} Y {} Z {}",
            position.x,
            position.y,
            position.z
        );
        self.state.saved = Some(position);
    }

    /// Restore the toolhead after a toolchange and clear the park state
    ///
    /// Exactly one planar branch runs: the slicer's next position when the
    /// policy is `next` and one is known, else the saved X/Y when the policy
    /// is `last` or no print is running.
    pub fn restore_position<H: PrinterHost + ?Sized>(
        &mut self,
        host: &mut H,
        params: &ParkParams,
        context: &SessionContext,
    ) -> Result<()> {
        let homed = host.homed_axes();
        let saved = self.state.saved;
        let z_restore = saved.is_some() && homed.contains(Axes::Z);

        host.set_absolute()?;

        if z_restore {
            if let Some(z) = self.state.toolchange_z {
                crate::log_debug!("Restore transit at Z {}", z);
                host.move_to(MoveTarget::z(z), params.lift_speed)?;
            }
        }

        if let Some(target) = self.planar_target(params, context) {
            if homed.contains(Axes::XY) {
                crate::log_debug!("Restore X {} Y {}", target.x, target.y);
                host.move_to(MoveTarget::xy(target), params.travel_speed)?;
            } else {
                crate::log_warn!("X/Y not homed, planar restore skipped");
                host.report(Diagnostic::axes_not_homed(Axes::XY, homed));
            }
        }

        if let Some(saved) = saved.filter(|_| z_restore) {
            crate::log_debug!("Restore Z {}", saved.z);
            host.move_to(MoveTarget::z(saved.z), params.lift_speed)?;
        }

        self.state.clear();
        Ok(())
    }

    fn planar_target(&self, params: &ParkParams, context: &SessionContext) -> Option<Xy> {
        if params.restore_policy == RestorePolicy::Next {
            if let Some(next) = self.state.next {
                return Some(next);
            }
        }
        let saved = self.state.saved?;
        (params.restore_policy == RestorePolicy::Last || !context.is_printing()).then_some(saved.xy())
    }

    /// Drop saved and next positions without moving
    pub fn clear_position(&mut self) {
        crate::log_debug!("Park state cleared");
        self.state.clear();
    }

    /// Raise the parking floor to the current Z and `height`
    pub fn record_max_height<H: PrinterHost + ?Sized>(&mut self, host: &H, height: f32) {
        self.state.record_max_height(host.position().z, height);
    }

    /// Record the slicer's next planar position
    pub fn set_next_position(&mut self, next: Xy) {
        self.state.set_next_position(next);
    }

    /// Home X/Y when they are not homed and auto-home is enabled
    pub fn auto_home<H: PrinterHost + ?Sized>(&self, host: &mut H, params: &ParkParams) -> Result<()> {
        if !params.auto_home || host.homed_axes().contains(Axes::XY) {
            return Ok(());
        }
        crate::log_info!("Homing X/Y before toolchange");
        host.home(Axes::XY)
    }
}
