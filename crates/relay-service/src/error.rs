//! Error taxonomy for the HTTP boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use relay_delivery::DeliveryError;
use relay_storage::NonceError;
use relay_types::ErrorResponse;
use relay_verify::VerifyError;
use thiserror::Error;

/// Failures surfaced to callers.
///
/// Every variant maps to a stable `error` code; nonce mismatches carry the
/// expected value so a well-behaved caller can self-correct without
/// guessing. Detail strings stay short and never include internal state.
#[derive(Debug, Error)]
pub enum ApiError {
	/// Missing or malformed request field. No network or state effect.
	#[error("{0}")]
	Validation(String),

	/// Unparseable signature bytes.
	#[error("invalid signature format: {0}")]
	SignatureFormat(String),

	/// Recovered signer differs from the claimed user.
	#[error("signature does not match user")]
	SignerMismatch,

	/// Replay or out-of-order nonce.
	#[error("invalid nonce, expected {expected}")]
	NonceMismatch { expected: u64 },

	/// No funded credential present; the relay capability is disabled.
	#[error("relayer not configured")]
	RelayerUnconfigured,

	/// Broadcast or confirmation failure. Not retried: the outcome of the
	/// submission is unknown and a retry risks double execution.
	#[error("relay failed: {0}")]
	Submission(String),

	/// Unexpected failure, reported with a short message only.
	#[error("internal error: {0}")]
	Internal(String),
}

impl From<VerifyError> for ApiError {
	fn from(err: VerifyError) -> Self {
		match err {
			VerifyError::Format(detail) => ApiError::SignatureFormat(detail),
		}
	}
}

impl From<NonceError> for ApiError {
	fn from(err: NonceError) -> Self {
		match err {
			NonceError::Mismatch { expected } => ApiError::NonceMismatch { expected },
		}
	}
}

impl From<DeliveryError> for ApiError {
	fn from(err: DeliveryError) -> Self {
		ApiError::Submission(err.to_string())
	}
}

impl ApiError {
	fn status(&self) -> StatusCode {
		match self {
			ApiError::Validation(_)
			| ApiError::SignatureFormat(_)
			| ApiError::NonceMismatch { .. } => StatusCode::BAD_REQUEST,
			ApiError::SignerMismatch => StatusCode::FORBIDDEN,
			ApiError::RelayerUnconfigured
			| ApiError::Submission(_)
			| ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn body(&self) -> ErrorResponse {
		let (error, expected, detail) = match self {
			ApiError::Validation(msg) => (msg.clone(), None, None),
			ApiError::SignatureFormat(detail) => {
				("invalid signature format".to_string(), None, Some(detail.clone()))
			}
			ApiError::SignerMismatch => ("signature does not match user".to_string(), None, None),
			ApiError::NonceMismatch { expected } => {
				("invalid nonce".to_string(), Some(*expected), None)
			}
			ApiError::RelayerUnconfigured => ("relayer not configured".to_string(), None, None),
			ApiError::Submission(detail) => {
				("relay failed".to_string(), None, Some(detail.clone()))
			}
			ApiError::Internal(detail) => {
				("internal error".to_string(), None, Some(detail.clone()))
			}
		};

		ErrorResponse {
			error,
			expected,
			detail,
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status(), Json(self.body())).into_response()
	}
}
