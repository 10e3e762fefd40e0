//! Relay authorization types.
//!
//! A [`RelayRequest`] is a user-signed authorization for a single on-chain
//! call; the relayer submits it and pays the fee. The struct is declared
//! with the `sol!` macro so the EIP-712 struct hash used by the typed
//! signature scheme is derived by the library from the canonical field
//! order of the wire type.

use std::borrow::Cow;

use alloy::primitives::{Address, U256};
use alloy::sol;
use alloy::sol_types::Eip712Domain;
use serde::{Deserialize, Serialize};

sol! {
	/// A user-authorized call to be forwarded on-chain.
	///
	/// Consumed exactly once: `nonce` must equal the user's next expected
	/// sequence number at acceptance time.
	#[derive(Debug, serde::Serialize, serde::Deserialize)]
	struct RelayRequest {
		address to;
		bytes data;
		uint256 value;
		address user;
		uint256 nonce;
	}
}

/// Parameters folded into a typed-data signature hash to scope it to one
/// network and, optionally, one target contract.
///
/// Two requests with identical fields but different domains produce
/// different signed hashes and must not cross-validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningDomain {
	pub name: String,
	pub version: String,
	pub chain_id: u64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub verifying_contract: Option<Address>,
}

impl SigningDomain {
	/// The EIP-712 domain this scopes signatures to.
	pub fn eip712(&self) -> Eip712Domain {
		Eip712Domain {
			name: Some(Cow::Owned(self.name.clone())),
			version: Some(Cow::Owned(self.version.clone())),
			chain_id: Some(U256::from(self.chain_id)),
			verifying_contract: self.verifying_contract,
			salt: None,
		}
	}
}
