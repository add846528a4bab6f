use thiserror::Error;

use crate::domain::Venue;

/// Everything that can go wrong while encoding one trade.
///
/// The pipeline boundary (`Engine::encode`) converts every variant into a
/// failure envelope; no error escapes it uncaught.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// Client input violates a static precondition. Never retried.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Seed-based address derivation failed and no fallback was possible.
    ///
    /// Normal derivation failures degrade to a fallback address instead of
    /// raising this (see `derive`).
    #[error("address derivation failed (seed={seed}): {reason}")]
    Derivation { seed: String, reason: String },

    /// Instruction or account assembly failed. Fatal to the request.
    #[error("instruction encoding failed (venue={venue}): {reason}")]
    Encoding { venue: Venue, reason: String },

    /// A gateway round trip failed or timed out. Retryable by the caller;
    /// the engine itself never retries.
    #[error("network operation '{operation}' failed: {reason}")]
    Network { operation: &'static str, reason: String },
}

impl EncodeError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        EncodeError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn encoding(venue: Venue, reason: impl Into<String>) -> Self {
        EncodeError::Encoding {
            venue,
            reason: reason.into(),
        }
    }

    pub fn network(operation: &'static str, reason: impl Into<String>) -> Self {
        EncodeError::Network {
            operation,
            reason: reason.into(),
        }
    }

    /// Fixed error-code taxonomy exposed at the API boundary.
    pub fn error_code(&self) -> &'static str {
        match self {
            EncodeError::Validation { .. } => "VALIDATION_ERROR",
            EncodeError::Derivation { .. } => "DERIVATION_ERROR",
            EncodeError::Encoding { .. } => "ENCODING_ERROR",
            EncodeError::Network { .. } => "NETWORK_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_match_taxonomy() {
        assert_eq!(
            EncodeError::validation("amount", "must be positive").error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            EncodeError::encoding(Venue::Raydium, "bad key").error_code(),
            "ENCODING_ERROR"
        );
        assert_eq!(
            EncodeError::network("getLatestBlockhash", "timeout").error_code(),
            "NETWORK_ERROR"
        );
        assert_eq!(
            EncodeError::Derivation {
                seed: "amm_x".into(),
                reason: "max seed length exceeded".into()
            }
            .error_code(),
            "DERIVATION_ERROR"
        );
    }
}
