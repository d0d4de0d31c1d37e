//! Parameter error types
//!
//! Provides error types for parameter store operations.

/// Errors from parameter store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParameterError {
    /// Parameter was never registered
    #[error("unknown parameter")]
    Unknown,
    /// Parameter name exceeds the key length
    #[error("parameter name too long")]
    NameTooLong,
    /// String value exceeds the value length
    #[error("parameter value too long")]
    ValueTooLong,
    /// Store is full
    #[error("parameter store full")]
    StoreFull,
    /// Read-only parameter cannot be modified
    #[error("parameter is read-only")]
    ReadOnly,
}
