//! Filament Position
//!
//! Ordered states describing how far filament has travelled along the path
//! gate → bowden → extruder → nozzle.
//!
//! The numeric value is the only thing sequencing logic looks at. States that
//! depend on optional sensors (gate, entry, toolhead) keep their slot in the
//! ordering even when an installation never reports them, so threshold
//! comparisons stay valid.

use core::cmp::Ordering;
use core::fmt;

use super::error::SequenceError;

/// Physical progress of filament, from unloaded to fully loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i8)]
pub enum FilamentPosition {
    /// Position lost (e.g. after a failed move or power cycle)
    #[default]
    Unknown = -1,
    /// Filament parked in the gate
    Unloaded = 0,
    /// Homed at the gate sensor / encoder
    HomedGate = 1,
    /// Just entered the bowden tube, exact offset unknown
    StartBowden = 2,
    /// Somewhere inside the bowden tube
    InBowden = 3,
    /// Reached the end of the bowden tube
    EndBowden = 4,
    /// Homed at the extruder entry sensor
    HomedEntry = 5,
    /// Homed at the extruder gears
    HomedExtruder = 6,
    /// Gripped by the extruder gears
    PastExtruder = 7,
    /// Homed at the toolhead sensor
    HomedToolheadSensor = 8,
    /// Inside the hotend, not yet at the nozzle
    InExtruder = 9,
    /// Loaded to the nozzle
    Loaded = 10,
}

impl FilamentPosition {
    /// Every position in ascending order.
    pub const ALL: [FilamentPosition; 12] = [
        FilamentPosition::Unknown,
        FilamentPosition::Unloaded,
        FilamentPosition::HomedGate,
        FilamentPosition::StartBowden,
        FilamentPosition::InBowden,
        FilamentPosition::EndBowden,
        FilamentPosition::HomedEntry,
        FilamentPosition::HomedExtruder,
        FilamentPosition::PastExtruder,
        FilamentPosition::HomedToolheadSensor,
        FilamentPosition::InExtruder,
        FilamentPosition::Loaded,
    ];

    /// Numeric value of the position.
    pub const fn as_i8(self) -> i8 {
        self as i8
    }

    /// Look up a position by its numeric value.
    pub fn from_i8(value: i8) -> Option<Self> {
        Self::ALL.iter().copied().find(|pos| pos.as_i8() == value)
    }

    /// Decode a float-encoded position as passed in invocation parameters.
    ///
    /// The value must be integral and inside `-1..=10`.
    pub fn from_encoded(value: f32) -> Result<Self, SequenceError> {
        if !value.is_finite() {
            return Err(SequenceError::InvalidPosition(value));
        }
        let whole = value as i32;
        if whole as f32 != value {
            return Err(SequenceError::InvalidPosition(value));
        }
        i8::try_from(whole)
            .ok()
            .and_then(Self::from_i8)
            .ok_or(SequenceError::InvalidPosition(value))
    }

    /// Upper-case name used in logs and console messages.
    pub const fn name(self) -> &'static str {
        match self {
            FilamentPosition::Unknown => "UNKNOWN",
            FilamentPosition::Unloaded => "UNLOADED",
            FilamentPosition::HomedGate => "HOMED_GATE",
            FilamentPosition::StartBowden => "START_BOWDEN",
            FilamentPosition::InBowden => "IN_BOWDEN",
            FilamentPosition::EndBowden => "END_BOWDEN",
            FilamentPosition::HomedEntry => "HOMED_ENTRY",
            FilamentPosition::HomedExtruder => "HOMED_EXTRUDER",
            FilamentPosition::PastExtruder => "PAST_EXTRUDER",
            FilamentPosition::HomedToolheadSensor => "HOMED_TOOLHEAD_SENSOR",
            FilamentPosition::InExtruder => "IN_EXTRUDER",
            FilamentPosition::Loaded => "LOADED",
        }
    }
}

impl PartialOrd for FilamentPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FilamentPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_i8().cmp(&other.as_i8())
    }
}

impl fmt::Display for FilamentPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.as_i8())
    }
}
