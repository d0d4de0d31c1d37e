//! User Extension Hooks
//!
//! Opaque command bodies injected at fixed points of a toolchange. The
//! content is never parsed; an empty string means the hook is not defined.
//!
//! # Parameters
//!
//! - `HOOK_PRE_UNLOAD` - Runs at the end of PRE_UNLOAD
//! - `HOOK_POST_UNLOAD` - Runs in POST_UNLOAD
//! - `HOOK_PRE_LOAD` - Runs at the end of PRE_LOAD
//! - `HOOK_POST_LOAD` - Runs in POST_LOAD before the position restore
//! - `HOOK_PARK_MOVE` - Replaces the planar move to the park coordinates

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore, MAX_STRING_LEN};
use heapless::String;

/// Opaque command body
pub type HookBody = String<MAX_STRING_LEN>;

/// Hook parameters loaded from parameter store
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HookParams {
    /// Body run at the end of PRE_UNLOAD
    pub pre_unload: Option<HookBody>,
    /// Body run in POST_UNLOAD
    pub post_unload: Option<HookBody>,
    /// Body run at the end of PRE_LOAD
    pub pre_load: Option<HookBody>,
    /// Body run in POST_LOAD
    pub post_load: Option<HookBody>,
    /// Custom planar park move
    pub park_move: Option<HookBody>,
}

const KEYS: [&str; 5] = [
    "HOOK_PRE_UNLOAD",
    "HOOK_POST_UNLOAD",
    "HOOK_PRE_LOAD",
    "HOOK_POST_LOAD",
    "HOOK_PARK_MOVE",
];

impl HookParams {
    /// Register hook parameters (all empty)
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        for key in KEYS {
            store.register(key, ParamValue::string("")?, ParamFlags::empty())?;
        }
        Ok(())
    }

    /// Load hook parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            pre_unload: body(store, "HOOK_PRE_UNLOAD"),
            post_unload: body(store, "HOOK_POST_UNLOAD"),
            pre_load: body(store, "HOOK_PRE_LOAD"),
            post_load: body(store, "HOOK_POST_LOAD"),
            park_move: body(store, "HOOK_PARK_MOVE"),
        }
    }
}

fn body(store: &ParameterStore, key: &str) -> Option<HookBody> {
    let text = store.get_str(key)?.trim();
    if text.is_empty() {
        return None;
    }
    // Stored strings are already bounded by MAX_STRING_LEN
    String::try_from(text).ok()
}
