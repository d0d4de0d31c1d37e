//! Toolhead parking
//!
//! [`ParkController`] performs the park, save and restore motions against a
//! [`PrinterHost`](crate::platform::PrinterHost). The session state and the
//! pure decisions come from `mmu_sequence_core::park`.

pub mod controller;

pub use controller::ParkController;
pub use mmu_sequence_core::park::{park_enabled, ParkState, PrintState, SessionContext};
