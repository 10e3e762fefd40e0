//! HTTP request and response types for the relay API.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use serde::{Deserialize, Serialize};

use crate::request::RelayRequest;
use crate::score::ScoreRecord;

/// Body of `POST /trigger-score`.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerScoreRequest {
	pub user: Option<Address>,
}

/// Response of `POST /trigger-score`.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerScoreResponse {
	pub ok: bool,
	pub score: u64,
	/// The relayer address when the score was mirrored on-chain, `"local"`
	/// when the record is a local fallback only.
	pub reporter: String,
}

/// Response of `GET /score-history/{user}`.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreHistoryResponse {
	pub history: Vec<ScoreRecord>,
}

/// Response of `GET /nonce/{user}`.
#[derive(Debug, Clone, Serialize)]
pub struct NonceResponse {
	pub nonce: u64,
}

/// Body of `POST /relay` and `POST /relayTyped`.
///
/// Fields are optional at the wire level so missing ones are reported as a
/// validation error instead of a deserializer rejection; [`Self::validate`]
/// produces the checked request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayPayload {
	pub to: Option<Address>,
	pub data: Option<Bytes>,
	pub value: Option<U256>,
	pub user: Option<Address>,
	pub nonce: Option<u64>,
	pub signature: Option<Bytes>,
	/// Caller-supplied signing domain, used as-is (typed endpoint only).
	pub domain: Option<DomainOverride>,
}

/// Caller-supplied signing domain for the typed endpoint.
///
/// `chain_id` is mandatory; omitted name/version fall back to the service
/// constants.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainOverride {
	pub name: Option<String>,
	pub version: Option<String>,
	pub chain_id: u64,
	pub verifying_contract: Option<Address>,
}

/// A [`RelayPayload`] whose required fields are all present.
#[derive(Debug, Clone)]
pub struct ValidatedRelay {
	pub request: RelayRequest,
	/// The presented application-level nonce, as checked by the ledger.
	pub nonce: u64,
	pub signature: Bytes,
	pub domain: Option<DomainOverride>,
}

impl RelayPayload {
	/// Checks required fields and assembles the canonical request.
	pub fn validate(self) -> Result<ValidatedRelay, String> {
		let (to, data, user, nonce, signature) = match (
			self.to,
			self.data,
			self.user,
			self.nonce,
			self.signature,
		) {
			(Some(to), Some(data), Some(user), Some(nonce), Some(signature)) => {
				(to, data, user, nonce, signature)
			}
			_ => return Err("to,data,user,nonce,signature required".to_string()),
		};

		let request = RelayRequest {
			to,
			data,
			value: self.value.unwrap_or(U256::ZERO),
			user,
			nonce: U256::from(nonce),
		};

		Ok(ValidatedRelay {
			request,
			nonce,
			signature,
			domain: self.domain,
		})
	}
}

/// Response of a successful relay.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
	pub ok: bool,
	pub tx_hash: TxHash,
}

/// Failure body for every endpoint.
///
/// `error` is a stable code; `expected` is carried on nonce mismatches so
/// callers can self-correct without guessing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub expected: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn full_payload() -> RelayPayload {
		serde_json::from_str(
			r#"{
				"to": "0x2222222222222222222222222222222222222222",
				"data": "0x1234",
				"user": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
				"nonce": 0,
				"signature": "0xdead"
			}"#,
		)
		.unwrap()
	}

	#[test]
	fn test_validate_accepts_complete_payload() {
		let validated = full_payload().validate().unwrap();
		assert_eq!(validated.request.to, Address::repeat_byte(0x22));
		assert_eq!(validated.request.user, Address::repeat_byte(0xaa));
		// Value defaults to zero when omitted.
		assert_eq!(validated.request.value, U256::ZERO);
		assert_eq!(validated.nonce, 0);
		assert!(validated.domain.is_none());
	}

	#[test]
	fn test_validate_rejects_missing_fields() {
		for field in ["to", "data", "user", "nonce", "signature"] {
			let mut json: serde_json::Value = serde_json::from_str(
				r#"{
					"to": "0x2222222222222222222222222222222222222222",
					"data": "0x1234",
					"user": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
					"nonce": 0,
					"signature": "0xdead"
				}"#,
			)
			.unwrap();
			json.as_object_mut().unwrap().remove(field);

			let payload: RelayPayload = serde_json::from_value(json).unwrap();
			let err = payload.validate().unwrap_err();
			assert_eq!(err, "to,data,user,nonce,signature required");
		}
	}

	#[test]
	fn test_domain_override_parsing() {
		let payload: RelayPayload = serde_json::from_str(
			r#"{
				"to": "0x2222222222222222222222222222222222222222",
				"data": "0x1234",
				"value": 5,
				"user": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
				"nonce": 3,
				"signature": "0xdead",
				"domain": {"chainId": 1, "verifyingContract": "0x2222222222222222222222222222222222222222"}
			}"#,
		)
		.unwrap();

		let validated = payload.validate().unwrap();
		assert_eq!(validated.request.value, U256::from(5u64));
		assert_eq!(validated.request.nonce, U256::from(3u64));
		let domain = validated.domain.unwrap();
		assert_eq!(domain.chain_id, 1);
		assert!(domain.name.is_none());
		assert_eq!(domain.verifying_contract, Some(Address::repeat_byte(0x22)));
	}

	#[test]
	fn test_error_response_omits_empty_fields() {
		let body = ErrorResponse {
			error: "invalid nonce".to_string(),
			expected: Some(1),
			detail: None,
		};
		let json = serde_json::to_value(&body).unwrap();
		assert_eq!(json["expected"], 1);
		assert!(json.get("detail").is_none());
	}
}
