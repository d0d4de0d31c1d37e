//! Park Parameter Definitions
//!
//! Toolhead parking used around toolchanges.
//!
//! # Parameters
//!
//! - `PARK_X`, `PARK_Y` - Park coordinates (mm)
//! - `PARK_Z_HOP` - Lift above the starting height before the planar move (mm)
//! - `PARK_LIFT_SPD` - Z lift speed (mm/s)
//! - `PARK_TRAVEL_SPD` - Planar travel speed (mm/s)
//! - `PARK_MIN_TC_Z` - Floor for the toolchange travel height (mm)
//! - `PARK_ENABLE` - Park on normal print toolchanges
//! - `PARK_EN_RUNOUT` - Park on runout toolchanges
//! - `PARK_EN_STANDALN` - Park when no print is running
//! - `PARK_RESTORE_XY` - Planar restore policy (0 = none, 1 = last, 2 = next)
//! - `PARK_AUTO_HOME` - Home X/Y automatically when not homed
//! - `PARK_AFTER_TIP` - Defer parking until after tip forming

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::motion::Xy;

/// Where to return the toolhead after a toolchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i32)]
pub enum RestorePolicy {
    /// No planar restore while printing (saved X/Y still restored otherwise)
    None = 0,
    /// Return to the position saved before parking
    #[default]
    Last = 1,
    /// Move to the slicer-supplied next position when available
    Next = 2,
}

impl RestorePolicy {
    /// Decode the stored integer, unknown values map to `Last`
    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => RestorePolicy::None,
            2 => RestorePolicy::Next,
            _ => RestorePolicy::Last,
        }
    }
}

/// Park parameters loaded from parameter store
#[derive(Debug, Clone, PartialEq)]
pub struct ParkParams {
    /// Park coordinates
    pub park_xy: Xy,
    /// Lift above the starting height (mm)
    pub z_hop: f32,
    /// Z lift speed (mm/s)
    pub lift_speed: f32,
    /// Planar travel speed (mm/s)
    pub travel_speed: f32,
    /// Floor for the toolchange travel height (mm)
    pub min_toolchange_z: f32,
    /// Park on normal print toolchanges
    pub enable_park: bool,
    /// Park on runout toolchanges
    pub enable_park_runout: bool,
    /// Park when no print is running
    pub enable_park_standalone: bool,
    /// Planar restore policy
    pub restore_policy: RestorePolicy,
    /// Home X/Y automatically when not homed
    pub auto_home: bool,
    /// Defer parking until after tip forming
    pub park_after_form_tip: bool,
}

impl Default for ParkParams {
    fn default() -> Self {
        Self {
            park_xy: Xy::new(50.0, 50.0),
            z_hop: 1.0,
            lift_speed: 15.0,
            travel_speed: 200.0,
            min_toolchange_z: 1.0,
            enable_park: true,
            enable_park_runout: true,
            enable_park_standalone: true,
            restore_policy: RestorePolicy::Last,
            auto_home: true,
            park_after_form_tip: false,
        }
    }
}

impl ParkParams {
    /// Register park parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let defaults = Self::default();

        store.register(
            "PARK_X",
            ParamValue::Float(defaults.park_xy.x),
            ParamFlags::empty(),
        )?;
        store.register(
            "PARK_Y",
            ParamValue::Float(defaults.park_xy.y),
            ParamFlags::empty(),
        )?;
        store.register(
            "PARK_Z_HOP",
            ParamValue::Float(defaults.z_hop),
            ParamFlags::empty(),
        )?;
        store.register(
            "PARK_LIFT_SPD",
            ParamValue::Float(defaults.lift_speed),
            ParamFlags::empty(),
        )?;
        store.register(
            "PARK_TRAVEL_SPD",
            ParamValue::Float(defaults.travel_speed),
            ParamFlags::empty(),
        )?;
        store.register(
            "PARK_MIN_TC_Z",
            ParamValue::Float(defaults.min_toolchange_z),
            ParamFlags::empty(),
        )?;
        store.register("PARK_ENABLE", ParamValue::Int(1), ParamFlags::empty())?;
        store.register("PARK_EN_RUNOUT", ParamValue::Int(1), ParamFlags::empty())?;
        store.register("PARK_EN_STANDALN", ParamValue::Int(1), ParamFlags::empty())?;
        store.register(
            "PARK_RESTORE_XY",
            ParamValue::Int(RestorePolicy::Last as i32),
            ParamFlags::empty(),
        )?;
        store.register("PARK_AUTO_HOME", ParamValue::Int(1), ParamFlags::empty())?;
        store.register("PARK_AFTER_TIP", ParamValue::Int(0), ParamFlags::empty())?;

        Ok(())
    }

    /// Load park parameters from parameter store
    ///
    /// Missing or mistyped entries fall back to the defaults.
    pub fn from_store(store: &ParameterStore) -> Self {
        let defaults = Self::default();

        Self {
            park_xy: Xy::new(
                store.get_f32("PARK_X", defaults.park_xy.x),
                store.get_f32("PARK_Y", defaults.park_xy.y),
            ),
            z_hop: store.get_f32("PARK_Z_HOP", defaults.z_hop),
            lift_speed: store.get_f32("PARK_LIFT_SPD", defaults.lift_speed),
            travel_speed: store.get_f32("PARK_TRAVEL_SPD", defaults.travel_speed),
            min_toolchange_z: store.get_f32("PARK_MIN_TC_Z", defaults.min_toolchange_z),
            enable_park: store.get_bool("PARK_ENABLE", defaults.enable_park),
            enable_park_runout: store.get_bool("PARK_EN_RUNOUT", defaults.enable_park_runout),
            enable_park_standalone: store
                .get_bool("PARK_EN_STANDALN", defaults.enable_park_standalone),
            restore_policy: RestorePolicy::from_i32(
                store.get_i32("PARK_RESTORE_XY", defaults.restore_policy as i32),
            ),
            auto_home: store.get_bool("PARK_AUTO_HOME", defaults.auto_home),
            park_after_form_tip: store.get_bool("PARK_AFTER_TIP", defaults.park_after_form_tip),
        }
    }
}
