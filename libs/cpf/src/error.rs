//! Error types for CPF validation.

use thiserror::Error;

/// Errors produced by structural CPF validation.
///
/// These cover the pure validation pipeline only; uniqueness failures are
/// reported separately by [`crate::UniquenessError`] because they involve a
/// store read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CpfError {
    /// After stripping punctuation the input is not exactly 11 digits.
    #[error("CPF must have exactly 11 digits, got {found}")]
    WrongLength { found: usize },

    /// All 11 digits are identical (e.g. `111.111.111-11`). Structurally
    /// well-formed but categorically invalid by convention.
    #[error("CPF with all digits identical is not a valid identifier")]
    RepeatedDigits,

    /// A supplied check digit disagrees with the computed one.
    #[error("CPF check digit at position {position} should be {expected}, got {found}")]
    CheckDigitMismatch {
        position: usize,
        expected: u8,
        found: u8,
    },
}

impl CpfError {
    /// Returns true if this error indicates a length problem.
    pub fn is_wrong_length(&self) -> bool {
        matches!(self, CpfError::WrongLength { .. })
    }

    /// Returns true if this error indicates a checksum failure.
    pub fn is_check_digit_mismatch(&self) -> bool {
        matches!(self, CpfError::CheckDigitMismatch { .. })
    }
}
