//! Sequence Parameter Definitions
//!
//! Which toolchange callbacks run and whether the filament path is driven
//! by the step planners or by the actuator's built-in routine.
//!
//! # Parameters
//!
//! - `SEQ_CALLBACKS` - Enabled callback bitmask (see [`Callbacks`])
//! - `SEQ_GCODE_LOAD` - Drive loads through the step planner
//! - `SEQ_GCODE_UNLOAD` - Drive unloads through the step planner
//! - `SEQ_TIMELAPSE` - Capture a timelapse frame after loading

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use bitflags::bitflags;

bitflags! {
    /// Toolchange callbacks that are defined for this installation
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Callbacks: u8 {
        /// Before the unload starts
        const PRE_UNLOAD = 0b00001;
        /// After tip forming, before the filament leaves the extruder
        const POST_FORM_TIP = 0b00010;
        /// After the unload completes
        const POST_UNLOAD = 0b00100;
        /// Before the load starts
        const PRE_LOAD = 0b01000;
        /// After the load completes
        const POST_LOAD = 0b10000;
    }
}

impl Default for Callbacks {
    fn default() -> Self {
        Callbacks::all()
    }
}

/// Sequence parameters loaded from parameter store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequenceParams {
    /// Enabled callbacks
    pub callbacks: Callbacks,
    /// Loads are planned and run step by step
    pub advanced_load: bool,
    /// Unloads are planned and run step by step
    pub advanced_unload: bool,
    /// Capture a timelapse frame in POST_LOAD
    pub timelapse: bool,
}

impl SequenceParams {
    /// Register sequence parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "SEQ_CALLBACKS",
            ParamValue::Int(Callbacks::default().bits() as i32),
            ParamFlags::empty(),
        )?;
        store.register("SEQ_GCODE_LOAD", ParamValue::Int(0), ParamFlags::empty())?;
        store.register("SEQ_GCODE_UNLOAD", ParamValue::Int(0), ParamFlags::empty())?;
        store.register("SEQ_TIMELAPSE", ParamValue::Int(0), ParamFlags::empty())?;
        Ok(())
    }

    /// Load sequence parameters from parameter store
    ///
    /// Unknown callback bits are ignored. A mask outside `0..=255` falls
    /// back to the default.
    pub fn from_store(store: &ParameterStore) -> Self {
        let defaults = Self::default();
        let bits = store.get_i32("SEQ_CALLBACKS", defaults.callbacks.bits() as i32);
        let callbacks =
            u8::try_from(bits).map_or(defaults.callbacks, Callbacks::from_bits_truncate);

        Self {
            callbacks,
            advanced_load: store.get_bool("SEQ_GCODE_LOAD", defaults.advanced_load),
            advanced_unload: store.get_bool("SEQ_GCODE_UNLOAD", defaults.advanced_unload),
            timelapse: store.get_bool("SEQ_TIMELAPSE", defaults.timelapse),
        }
    }

    /// Whether `callback` runs
    pub fn enabled(&self, callback: Callbacks) -> bool {
        self.callbacks.contains(callback)
    }
}
