//! Parameter Storage Types
//!
//! Provides core parameter types and the `ParameterStore` for configuration
//! management. The store is filled once at session start (defaults first,
//! then installation overrides) and read into typed parameter blocks.

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 64;

/// Maximum string parameter length
///
/// Sized for multi-line hook bodies.
pub const MAX_STRING_LEN: usize = 255;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter is read-only (fixed by the installation)
        const READ_ONLY = 0b00000001;
    }
}

/// Parameter value types
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// String parameter (max `MAX_STRING_LEN` bytes)
    String(String<MAX_STRING_LEN>),
    /// Boolean parameter
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

impl ParamValue {
    /// Build a string value, failing if it exceeds `MAX_STRING_LEN`
    pub fn string(value: &str) -> Result<Self, ParameterError> {
        let mut s = String::new();
        s.push_str(value).map_err(|_| ParameterError::ValueTooLong)?;
        Ok(ParamValue::String(s))
    }

    /// Interpret the value as a float
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    /// Interpret the value as an integer
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ParamValue::Int(v) => Some(*v),
            ParamValue::Float(v) => Some(*v as i32),
            ParamValue::Bool(v) => Some(*v as i32),
            ParamValue::String(_) => None,
        }
    }

    /// Interpret the value as a flag (non-zero is true)
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            ParamValue::Int(v) => Some(*v != 0),
            ParamValue::Float(v) => Some(*v != 0.0),
            ParamValue::String(_) => None,
        }
    }

    /// Interpret the value as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Parameter metadata
#[derive(Debug, Clone)]
pub struct ParamMetadata {
    /// Parameter flags
    pub flags: ParamFlags,
}

/// Parameter store for configuration management
///
/// Stores parameters as key-value pairs with metadata (flags).
pub struct ParameterStore {
    /// Parameter values
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, ParamValue, MAX_PARAMS>,
    /// Parameter metadata
    metadata: FnvIndexMap<String<PARAM_NAME_LEN>, ParamMetadata, MAX_PARAMS>,
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
            metadata: FnvIndexMap::new(),
        }
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let key = key(name).ok()?;
        self.parameters.get(&key)
    }

    /// Get a float parameter, falling back to `default`
    pub fn get_f32(&self, name: &str, default: f32) -> f32 {
        self.get(name).and_then(ParamValue::as_f32).unwrap_or(default)
    }

    /// Get an integer parameter, falling back to `default`
    pub fn get_i32(&self, name: &str, default: i32) -> i32 {
        self.get(name).and_then(ParamValue::as_i32).unwrap_or(default)
    }

    /// Get a flag parameter, falling back to `default`
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.get(name).and_then(ParamValue::as_bool).unwrap_or(default)
    }

    /// Get a string parameter (`None` when unset or not a string)
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    /// Set parameter value
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = key(name)?;

        if !self.parameters.contains_key(&key) {
            return Err(ParameterError::Unknown);
        }

        if let Some(meta) = self.metadata.get(&key) {
            if meta.flags.contains(ParamFlags::READ_ONLY) {
                return Err(ParameterError::ReadOnly);
            }
        }

        self.parameters.insert(key, value).ok();
        Ok(())
    }

    /// Register a new parameter with default value and flags
    ///
    /// If the parameter already exists, this is a no-op (idempotent).
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = key(name)?;

        if self.parameters.contains_key(&key) {
            return Ok(());
        }

        self.parameters
            .insert(key.clone(), default_value)
            .map_err(|_| ParameterError::StoreFull)?;
        self.metadata
            .insert(key, ParamMetadata { flags })
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Get parameter count
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

fn key(name: &str) -> Result<String<PARAM_NAME_LEN>, ParameterError> {
    let mut key = String::<PARAM_NAME_LEN>::new();
    key.push_str(name).map_err(|_| ParameterError::NameTooLong)?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_store_new() {
        let store = ParameterStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_parameter_store_register_and_get() {
        let mut store = ParameterStore::new();
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        assert_eq!(store.get("TEST"), Some(&ParamValue::Int(42)));
        assert_eq!(store.get_i32("TEST", 0), 42);
        assert_eq!(store.get_f32("TEST", 0.0), 42.0);
        assert!(store.get_bool("TEST", false));
    }

    #[test]
    fn test_typed_getters_fall_back_to_default() {
        let store = ParameterStore::new();
        assert_eq!(store.get_f32("MISSING", 1.5), 1.5);
        assert_eq!(store.get_i32("MISSING", 7), 7);
        assert!(store.get_bool("MISSING", true));
        assert_eq!(store.get_str("MISSING"), None);
    }

    #[test]
    fn test_parameter_store_set() {
        let mut store = ParameterStore::new();
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        store.set("TEST", ParamValue::Int(100)).unwrap();
        assert_eq!(store.get("TEST"), Some(&ParamValue::Int(100)));
    }

    #[test]
    fn test_parameter_store_set_unknown() {
        let mut store = ParameterStore::new();
        assert_eq!(
            store.set("UNKNOWN", ParamValue::Int(1)),
            Err(ParameterError::Unknown)
        );
    }

    #[test]
    fn test_parameter_name_too_long() {
        let mut store = ParameterStore::new();
        assert_eq!(
            store.register(
                "THIS_NAME_IS_WAY_TOO_LONG",
                ParamValue::Int(1),
                ParamFlags::empty()
            ),
            Err(ParameterError::NameTooLong)
        );
    }

    #[test]
    fn test_parameter_store_register_idempotent() {
        let mut store = ParameterStore::new();
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        store.set("TEST", ParamValue::Int(100)).unwrap();
        // Re-register should not overwrite
        store
            .register("TEST", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        assert_eq!(store.get("TEST"), Some(&ParamValue::Int(100)));
    }

    #[test]
    fn test_parameter_read_only() {
        let mut store = ParameterStore::new();
        store
            .register("READONLY", ParamValue::Int(42), ParamFlags::READ_ONLY)
            .unwrap();
        assert_eq!(
            store.set("READONLY", ParamValue::Int(100)),
            Err(ParameterError::ReadOnly)
        );
    }

    #[test]
    fn test_string_values() {
        let value = ParamValue::string("_MMU_CUT_TIP").unwrap();
        assert_eq!(value.as_str(), Some("_MMU_CUT_TIP"));
        assert_eq!(value.as_bool(), None);

        let long = [b'A'; MAX_STRING_LEN + 1];
        let long = core::str::from_utf8(&long).unwrap();
        assert_eq!(ParamValue::string(long), Err(ParameterError::ValueTooLong));
    }
}
