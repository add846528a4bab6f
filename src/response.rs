//! Uniform result envelope for one encoding request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{EncodedTransaction, Venue};
use crate::error::EncodeError;
use crate::fees;

/// Pipeline outcome: exactly one variant per request. Success always
/// carries a non-empty transaction and a per-request correlation id;
/// failure never carries transaction bytes.
#[derive(Debug)]
pub enum EncodingResult {
    Success {
        transaction: EncodedTransaction,
        estimated_fee_lamports: u64,
        correlation_id: String,
    },
    Failure {
        code: &'static str,
        message: String,
    },
}

impl EncodingResult {
    pub fn success(transaction: EncodedTransaction, estimated_fee_lamports: u64, venue: Venue) -> Self {
        EncodingResult::Success {
            transaction,
            estimated_fee_lamports,
            correlation_id: correlation_id(venue),
        }
    }

    pub fn failure(err: &EncodeError) -> Self {
        EncodingResult::Failure {
            code: err.error_code(),
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, EncodingResult::Success { .. })
    }
}

/// Opaque id unique per request (not across process restarts), prefixed
/// with the venue for log grepping.
fn correlation_id(venue: Venue) -> String {
    format!("{}_{}", venue, Uuid::new_v4().simple())
}

/// The JSON envelope handed to the API layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeResponse {
    pub success: bool,

    /// base64 transaction bytes; present on success only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_data: Option<String>,

    /// Estimated fee in SOL, nine fractional digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_fee: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl From<EncodingResult> for EncodeResponse {
    fn from(result: EncodingResult) -> Self {
        match result {
            EncodingResult::Success {
                transaction,
                estimated_fee_lamports,
                correlation_id,
            } => EncodeResponse {
                success: true,
                transaction_data: Some(transaction.transaction_base64),
                estimated_fee: Some(fees::format_sol(estimated_fee_lamports)),
                transaction_id: Some(correlation_id),
                error: None,
                error_code: None,
            },
            EncodingResult::Failure { code, message } => EncodeResponse {
                success: false,
                transaction_data: None,
                estimated_fee: None,
                transaction_id: None,
                error: Some(message),
                error_code: Some(code.to_string()),
            },
        }
    }
}
