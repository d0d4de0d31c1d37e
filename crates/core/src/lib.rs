//! mmu_sequence_core - Pure no_std sequencing logic for MMU toolchanges
//!
//! This crate contains the platform-agnostic decisions of a toolchange
//! and can be tested on host without any feature flags.
//!
//! # Design Principles
//!
//! - **No behavioural cfg**: only `defmt` derives are feature-gated
//! - **Pure no_std**: No std library dependencies
//! - **No I/O**: motion and filament actuation live in the firmware crate
//!
//! # Modules
//!
//! - [`filament`]: Filament positions, invocation arguments and load/unload planning
//! - [`motion`]: Coordinates, axis sets and axis limits
//! - [`park`]: Park state, toolchange height and the park-enable decision
//! - [`parameters`]: Parameter store and typed configuration blocks

#![no_std]

pub mod filament;
pub mod motion;
pub mod parameters;
pub mod park;
