//! Session context
//!
//! Print/runout context consulted by the park decision and the restore
//! policy. Supplied by the host for every invocation.

use crate::parameters::ParkParams;

/// Print state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PrintState {
    /// A print is running
    Printing,
    /// A print is paused
    Paused,
    /// No print (manual/standalone operation)
    #[default]
    Standalone,
}

/// Context of the current invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionContext {
    /// Current print state
    pub print_state: PrintState,
    /// A runout-triggered toolchange is in progress
    pub runout: bool,
    /// The MMU ended the previous step in an error/paused state
    pub mmu_paused: bool,
}

impl SessionContext {
    /// Context for a running print
    pub const fn printing() -> Self {
        Self {
            print_state: PrintState::Printing,
            runout: false,
            mmu_paused: false,
        }
    }

    /// Context for manual operation with no print
    pub const fn standalone() -> Self {
        Self {
            print_state: PrintState::Standalone,
            runout: false,
            mmu_paused: false,
        }
    }

    /// Whether a print is running
    pub fn is_printing(&self) -> bool {
        self.print_state == PrintState::Printing
    }
}

/// Decide whether parking applies in this context.
///
/// Three independent enables:
/// - normal print toolchange: printing, no runout, `enable_park`
/// - runout: `enable_park_runout`
/// - no print: `enable_park_standalone`
pub fn park_enabled(context: &SessionContext, params: &ParkParams) -> bool {
    let printing = context.is_printing();
    (printing && !context.runout && params.enable_park)
        || (context.runout && params.enable_park_runout)
        || (!printing && params.enable_park_standalone)
}
