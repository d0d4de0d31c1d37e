//! Parameter management types and utilities
//!
//! A string-keyed [`ParameterStore`] filled from registered defaults and
//! installation overrides, and the typed blocks read from it once per
//! session.

pub mod config;
pub mod error;
pub mod hooks;
pub mod park;
pub mod sequence;
pub mod storage;

pub use config::SequenceConfig;
pub use error::ParameterError;
pub use hooks::{HookBody, HookParams};
pub use park::{ParkParams, RestorePolicy};
pub use sequence::{Callbacks, SequenceParams};
pub use storage::{ParamFlags, ParamMetadata, ParamValue, ParameterStore};
pub use storage::{MAX_PARAMS, MAX_STRING_LEN, PARAM_NAME_LEN};
