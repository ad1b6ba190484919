//! Core error types (deterministic only)

use thiserror::Error;

/// Core errors: profile construction and input decoding. Classification
/// itself never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Input bytes are not valid UTF-8
    #[error("malformed encoding: invalid UTF-8 at byte {position}")]
    MalformedEncoding {
        /// Length of the longest valid UTF-8 prefix
        position: usize,
    },

    /// A language profile violates a structural invariant
    #[error("invalid language profile '{code}': {reason}")]
    InvalidProfile {
        /// Code of the offending profile
        code: String,
        /// What is wrong with it
        reason: String,
    },

    /// Enclosure limit exceeded
    #[error("too many enclosure pairs: {count} (max {max})")]
    TooManyEnclosurePairs {
        /// Number of pairs supplied
        count: usize,
        /// Maximum supported
        max: usize,
    },
}

impl CoreError {
    pub(crate) fn invalid_profile(code: &str, reason: impl Into<String>) -> Self {
        CoreError::InvalidProfile {
            code: code.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Validate raw bytes as UTF-8 before handing them to the scanner.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| CoreError::MalformedEncoding {
        position: e.valid_up_to(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_utf8() {
        assert_eq!(decode_utf8("ਸੀ। ok".as_bytes()).unwrap(), "ਸੀ। ok");
    }

    #[test]
    fn test_decode_reports_first_invalid_byte() {
        let bytes = [b'A', b'b', 0xFF, b'c'];
        assert_eq!(
            decode_utf8(&bytes),
            Err(CoreError::MalformedEncoding { position: 2 })
        );
    }

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_profile("xx", "no terminators");
        assert_eq!(
            err.to_string(),
            "invalid language profile 'xx': no terminators"
        );
    }
}
