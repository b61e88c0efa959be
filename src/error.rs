//! Stable machine-readable error codes shared by every error enum.

/// Maps an error onto a stable code string and a retry hint.
///
/// Codes are part of the JSON result contract, so renaming one is a breaking
/// change for consumers.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
