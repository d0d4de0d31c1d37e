//! Sequence Configuration
//!
//! Typed snapshot of every block the toolchange sequence reads. Built once
//! per session from the parameter store and never mutated by the sequence.

use super::error::ParameterError;
use super::hooks::HookParams;
use super::park::ParkParams;
use super::sequence::SequenceParams;
use super::storage::ParameterStore;

/// Resolved configuration for the toolchange sequence
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SequenceConfig {
    /// Parking
    pub park: ParkParams,
    /// Callback set and sequencing mode
    pub sequence: SequenceParams,
    /// User extension bodies
    pub hooks: HookParams,
}

impl SequenceConfig {
    /// Register the defaults of every block
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        ParkParams::register_defaults(store)?;
        SequenceParams::register_defaults(store)?;
        HookParams::register_defaults(store)?;
        Ok(())
    }

    /// Build the snapshot from the store
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            park: ParkParams::from_store(store),
            sequence: SequenceParams::from_store(store),
            hooks: HookParams::from_store(store),
        }
    }
}
