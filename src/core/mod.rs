//! Core sequencing functionality
//!
//! Logging macros plus the pure, platform-agnostic sequencing logic from
//! `mmu_sequence_core`.

pub mod logging;

pub use mmu_sequence_core::{filament, motion, parameters};
