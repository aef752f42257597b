//! Error types for the FNFT binding layer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FnftError>;

#[derive(Debug, Error)]
pub enum FnftError {
    /// The shared library could not be located on this system.
    #[error("FNFT library not found: {0}")]
    LibraryNotFound(String),

    /// The shared library exists but the loader refused it.
    #[error("failed to load FNFT library '{path}': {message}")]
    LoadFailed { path: String, message: String },

    /// An entry point is missing from the loaded library (version mismatch,
    /// or a build of FNFT without that transform).
    #[error("symbol '{symbol}' not found in '{library}'")]
    SymbolNotFound { library: String, symbol: String },

    /// An options override lies outside the range the C header declares.
    #[error("invalid value {value} for option '{field}': expected {min}..={max}")]
    OptionOutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// An options override violates a non-range constraint (e.g. a tolerance
    /// that must be -1 or non-negative).
    #[error("invalid value for option '{field}': {message}")]
    OptionInvalid {
        field: &'static str,
        message: String,
    },

    /// Two inputs that must agree in length do not.
    #[error("{what}: expected length {expected}, got {got}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// A foreign call failed at a call site that cannot tolerate partial
    /// results (see the per-call-site policy notes in the variant modules).
    #[error("{entry_point} returned error code {code}")]
    ForeignCall {
        entry_point: &'static str,
        code: i32,
    },
}

impl FnftError {
    pub(crate) fn out_of_range(
        field: &'static str,
        value: impl Into<i64>,
        min: impl Into<i64>,
        max: impl Into<i64>,
    ) -> Self {
        Self::OptionOutOfRange {
            field,
            value: value.into(),
            min: min.into(),
            max: max.into(),
        }
    }

    pub(crate) fn option_invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::OptionInvalid {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn length_mismatch(what: &'static str, expected: usize, got: usize) -> Self {
        Self::LengthMismatch {
            what,
            expected,
            got,
        }
    }
}

/// Default policy for a nonzero foreign return code: log and carry on.
///
/// The C library reports failures through its return value but may still have
/// filled some output buffers; the original interface hands the partial
/// result back to the caller, and so do we. Call sites that chain a second
/// foreign call on the outputs of a first use [`ensure_success`] instead.
pub(crate) fn warn_on_error(entry_point: &str, code: i32) {
    if code != 0 {
        log::warn!("{entry_point} returned nonzero code {code}");
    }
}

/// Strict policy: a nonzero code becomes a hard error.
pub(crate) fn ensure_success(entry_point: &'static str, code: i32) -> Result<()> {
    if code == 0 {
        Ok(())
    } else {
        Err(FnftError::ForeignCall { entry_point, code })
    }
}
