//! Toolchange phases

use core::fmt;

/// Phase of a toolchange, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencePhase {
    /// Before unloading
    PreUnload,
    /// Tip forming (external)
    FormTip,
    /// After tip forming
    PostFormTip,
    /// Filament unload
    UnloadSequence,
    /// After unloading
    PostUnload,
    /// Before loading
    PreLoad,
    /// Filament load
    LoadSequence,
    /// After loading
    PostLoad,
}

impl SequencePhase {
    /// Every phase in execution order
    pub const ALL: [SequencePhase; 8] = [
        SequencePhase::PreUnload,
        SequencePhase::FormTip,
        SequencePhase::PostFormTip,
        SequencePhase::UnloadSequence,
        SequencePhase::PostUnload,
        SequencePhase::PreLoad,
        SequencePhase::LoadSequence,
        SequencePhase::PostLoad,
    ];

    /// Phase name as used in logs
    pub const fn name(&self) -> &'static str {
        match self {
            SequencePhase::PreUnload => "PRE_UNLOAD",
            SequencePhase::FormTip => "FORM_TIP",
            SequencePhase::PostFormTip => "POST_FORM_TIP",
            SequencePhase::UnloadSequence => "UNLOAD_SEQUENCE",
            SequencePhase::PostUnload => "POST_UNLOAD",
            SequencePhase::PreLoad => "PRE_LOAD",
            SequencePhase::LoadSequence => "LOAD_SEQUENCE",
            SequencePhase::PostLoad => "POST_LOAD",
        }
    }
}

impl fmt::Display for SequencePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_are_ordered() {
        for pair in SequencePhase::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(SequencePhase::PostFormTip.to_string(), "POST_FORM_TIP");
    }
}
