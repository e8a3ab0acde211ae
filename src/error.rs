//! Error types.

use thiserror::Error;

/// Errors returned by checked [`Bimap`](crate::Bimap) lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum BimapError {
    /// No pair holds the requested key on the given side.
    #[error("no pair holds this key on the {side} side")]
    NotFound {
        /// `"left"` or `"right"`.
        side: &'static str,
    },
}

/// Errors raised while loading a [`BimapConfig`](crate::BimapConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The priority seed is not a decimal `u64`.
    #[error("invalid {variable} value '{value}': {message}")]
    InvalidSeed {
        /// The environment variable that was read.
        variable: &'static str,
        /// The raw value.
        value: String,
        /// Why it was rejected.
        message: String,
    },
    /// The environment variable is set but not valid unicode.
    #[error("{variable} is not valid unicode")]
    NotUnicode {
        /// The environment variable that was read.
        variable: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_not_found_names_side() {
        let error = BimapError::NotFound { side: "right" };
        assert_eq!(error.to_string(), "no pair holds this key on the right side");
    }

    #[rstest]
    fn test_invalid_seed_message() {
        let error = ConfigError::InvalidSeed {
            variable: "BIMAP_PRIORITY_SEED",
            value: "abc".to_string(),
            message: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid BIMAP_PRIORITY_SEED value 'abc': invalid digit found in string"
        );
    }
}
