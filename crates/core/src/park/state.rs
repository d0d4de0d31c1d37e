//! Park State
//!
//! Saved and parked toolhead coordinates for the printer session, plus the
//! computed toolchange height. Lives for the whole session (reset at
//! firmware restart, not per print) and is cleared once per completed
//! toolchange on the final restore.

use crate::motion::{Xy, Xyz};

/// Persistent park/save/restore record.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParkState {
    /// Last saved toolhead position (`None` = nothing saved)
    pub saved: Option<Xyz>,
    /// Next planar position supplied by the slicer (restore policy `next`)
    pub next: Option<Xy>,
    /// Starting height recorded by the first park of a toolchange
    pub initial_park_z: Option<f32>,
    /// Rising floor for parking height (sequential / vase prints)
    pub min_lifted_z: f32,
    /// Safe travel height computed by the current toolchange
    pub toolchange_z: Option<f32>,
}

impl ParkState {
    /// Fresh session state (const fn for static initialization).
    pub const fn new() -> Self {
        Self {
            saved: None,
            next: None,
            initial_park_z: None,
            min_lifted_z: 0.0,
            toolchange_z: None,
        }
    }

    /// Whether a toolhead position is currently saved.
    pub fn has_saved_position(&self) -> bool {
        self.saved.is_some()
    }

    /// Compute the safe toolchange travel height and persist it.
    ///
    /// `starting = max(min(saved_z or current_z, initial_park_z), min_lifted_z)`
    /// `toolchange_z = max(min(starting + z_hop, axis_max_z - origin_z), min_toolchange_z)`
    ///
    /// The first call of a toolchange records `starting` as the baseline so
    /// repeated parks within the same toolchange do not ratchet Z upward.
    pub fn compute_toolchange_height(
        &mut self,
        current_z: f32,
        z_hop: f32,
        axis_max_z: f32,
        origin_z: f32,
        min_toolchange_z: f32,
    ) -> f32 {
        let reference_z = self.saved.map_or(current_z, |saved| saved.z);
        let baseline = self.initial_park_z.map_or(reference_z, |z| reference_z.min(z));
        let starting = baseline.max(self.min_lifted_z);

        let toolchange_z = (starting + z_hop)
            .min(axis_max_z - origin_z)
            .max(min_toolchange_z);

        if self.initial_park_z.is_none() {
            self.initial_park_z = Some(starting);
        }
        self.toolchange_z = Some(toolchange_z);
        toolchange_z
    }

    /// Raise the parking floor to at least `current_z` and `height`.
    ///
    /// Never lowers it.
    pub fn record_max_height(&mut self, current_z: f32, height: f32) {
        self.min_lifted_z = self.min_lifted_z.max(current_z).max(height);
    }

    /// Record the slicer's next planar position.
    pub fn set_next_position(&mut self, next: Xy) {
        self.next = Some(next);
    }

    /// Drop saved/next positions, the toolchange baseline and travel height.
    ///
    /// Only `min_lifted_z` survives for the session.
    pub fn clear(&mut self) {
        self.saved = None;
        self.next = None;
        self.initial_park_z = None;
        self.toolchange_z = None;
    }
}

impl Default for ParkState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_park_state_default() {
        let state = ParkState::default();
        assert!(!state.has_saved_position());
        assert_eq!(state.next, None);
        assert_eq!(state.initial_park_z, None);
        assert_eq!(state.toolchange_z, None);
        assert_eq!(state.min_lifted_z, 0.0);
    }

    #[test]
    fn test_toolchange_height_from_saved_position() {
        let mut state = ParkState::new();
        state.saved = Some(Xyz::new(100.0, 100.0, 10.0));
        state.min_lifted_z = 5.0;

        let z = state.compute_toolchange_height(3.0, 2.0, 200.0, 0.0, 1.0);

        assert_eq!(z, 12.0);
        assert_eq!(state.toolchange_z, Some(12.0));
        assert_eq!(state.initial_park_z, Some(10.0));
    }

    #[test]
    fn test_toolchange_height_uses_current_z_without_saved_position() {
        let mut state = ParkState::new();
        let z = state.compute_toolchange_height(7.5, 1.0, 200.0, 0.0, 0.0);
        assert_eq!(z, 8.5);
        assert_eq!(state.initial_park_z, Some(7.5));
    }

    #[test]
    fn test_toolchange_height_does_not_ratchet() {
        let mut state = ParkState::new();
        let first = state.compute_toolchange_height(10.0, 2.0, 200.0, 0.0, 0.0);
        // Head is now parked at the lifted height; parking again must not climb
        let second = state.compute_toolchange_height(first, 2.0, 200.0, 0.0, 0.0);
        assert_eq!(first, 12.0);
        assert_eq!(second, 12.0);
        assert_eq!(state.initial_park_z, Some(10.0));
    }

    #[test]
    fn test_toolchange_height_respects_min_lifted_z() {
        let mut state = ParkState::new();
        state.record_max_height(0.0, 40.0);
        let z = state.compute_toolchange_height(0.4, 1.0, 200.0, 0.0, 0.0);
        assert_eq!(z, 41.0);
    }

    #[test]
    fn test_toolchange_height_limited_by_axis_and_origin() {
        let mut state = ParkState::new();
        let z = state.compute_toolchange_height(199.0, 5.0, 200.0, 2.0, 1.0);
        assert_eq!(z, 198.0);
    }

    #[test]
    fn test_toolchange_height_floor() {
        let mut state = ParkState::new();
        let z = state.compute_toolchange_height(0.2, 0.0, 200.0, 0.0, 1.0);
        assert_eq!(z, 1.0);
    }

    #[test]
    fn test_toolchange_height_bounds_hold_for_grid() {
        let currents = [0.0f32, 0.3, 5.0, 50.0, 199.0, 250.0];
        let hops = [0.0f32, 1.0, 10.0];
        let origins = [-2.0f32, 0.0, 3.0];
        for current in currents {
            for hop in hops {
                for origin in origins {
                    let mut state = ParkState::new();
                    state.record_max_height(0.0, 20.0);
                    let z = state.compute_toolchange_height(current, hop, 200.0, origin, 1.0);
                    assert!(z >= 1.0);
                    assert!(z <= 200.0 - origin);
                }
            }
        }
    }

    #[test]
    fn test_record_max_height_never_decreases() {
        let mut state = ParkState::new();
        let mut previous = state.min_lifted_z;
        for (current_z, height) in [(0.2, 1.0), (5.0, 0.0), (0.0, 3.0), (12.0, 12.5), (1.0, 1.0)] {
            state.record_max_height(current_z, height);
            assert!(state.min_lifted_z >= previous);
            previous = state.min_lifted_z;
        }
        assert_eq!(state.min_lifted_z, 12.5);
    }

    #[test]
    fn test_clear_keeps_only_lifted_floor() {
        let mut state = ParkState::new();
        state.saved = Some(Xyz::new(1.0, 2.0, 3.0));
        state.set_next_position(Xy::new(4.0, 5.0));
        state.record_max_height(0.0, 8.0);
        state.compute_toolchange_height(3.0, 1.0, 200.0, 0.0, 0.0);

        state.clear();

        assert_eq!(state.saved, None);
        assert_eq!(state.next, None);
        assert_eq!(state.initial_park_z, None);
        assert_eq!(state.min_lifted_z, 8.0);
        assert_eq!(state.toolchange_z, None);
    }
}
