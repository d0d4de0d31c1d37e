#![cfg_attr(not(test), no_std)]

//! mmu_sequence - Toolchange sequencing for a multi-material unit
//!
//! This library drives the filament load/unload state machines and the
//! toolhead park/save/restore logic of an MMU feeding a single extruder.
//! Pure decisions live in `mmu_sequence_core`; this crate performs them
//! against an injected printer host and filament actuator.

// Logging macros and re-exported pure logic
pub mod core;

// Host motion and filament actuation abstraction
pub mod platform;

// Toolhead parking
pub mod park;

// Callback phases and plan execution
pub mod sequence;
