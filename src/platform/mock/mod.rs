//! Mock printer integration for testing
//!
//! Mock implementations of the platform traits for unit testing without a
//! printer.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use mmu_sequence::core::filament::FilamentPosition;
//! use mmu_sequence::platform::mock::{MockActuator, MockPrinterHost};
//! use mmu_sequence::platform::traits::{FilamentActuator, PrinterHost};
//!
//! let host = MockPrinterHost::new();
//! assert_eq!(host.position().z, 10.0);
//!
//! let mut actuator = MockActuator::new(FilamentPosition::Unloaded);
//! assert_eq!(actuator.load_gate(), Ok(FilamentPosition::StartBowden));
//! ```

#![cfg(any(test, feature = "mock"))]

mod actuator;
mod host;

pub use actuator::{ActuatorCall, MockActuator, MAX_CALLS};
pub use host::{HostCommand, MockPrinterHost, MAX_COMMANDS, MAX_DIAGNOSTICS};
