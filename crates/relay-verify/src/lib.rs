//! Signature verification for relay authorizations.
//!
//! Two signature encodings are accepted, modeled as the closed
//! [`SignatureScheme`] variant so a new scheme is a variant addition rather
//! than a branch scattered across handlers:
//!
//! - **Raw**: the request tuple is packed-encoded and keccak-hashed, and the
//!   signature is an EIP-191 personal message over those 32 hash bytes.
//! - **Structured**: the request is hashed as EIP-712 typed data under a
//!   [`SigningDomain`].
//!
//! The two schemes hash different byte layouts and never cross-validate.
//! [`verify`] returns the recovered signer; comparing it against the claimed
//! user is the caller's responsibility.

pub mod domain;

pub use domain::{build_domain, DOMAIN_NAME, DOMAIN_VERSION};

use alloy::primitives::{keccak256, Address, Signature, B256};
use alloy::sol_types::{SolStruct, SolValue};
use relay_types::{RelayRequest, SigningDomain};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
	/// Signature bytes are malformed or recovery cannot produce a valid
	/// public key.
	#[error("malformed signature: {0}")]
	Format(String),
}

/// How a relay request was signed.
#[derive(Debug, Clone)]
pub enum SignatureScheme {
	/// Personal-message signature over the packed request hash.
	Raw,
	/// EIP-712 typed-data signature bound to a signing domain.
	Structured(SigningDomain),
}

/// Recovers the account that signed `request` under `scheme`.
pub fn verify(
	scheme: &SignatureScheme,
	request: &RelayRequest,
	signature: &[u8],
) -> Result<Address, VerifyError> {
	let digest = match scheme {
		SignatureScheme::Raw => personal_digest(request),
		SignatureScheme::Structured(domain) => typed_digest(request, domain),
	};
	recover(digest, signature)
}

/// Keccak hash of the packed request tuple.
///
/// Packed encoding: 20-byte addresses, raw bytes, 32-byte big-endian uints,
/// in wire-type field order. This is the preimage raw-mode signers hash.
pub fn packed_hash(request: &RelayRequest) -> B256 {
	let packed = (
		request.to,
		request.data.clone(),
		request.value,
		request.user,
		request.nonce,
	)
		.abi_encode_packed();
	keccak256(packed)
}

fn personal_digest(request: &RelayRequest) -> B256 {
	// EIP-191: "\x19Ethereum Signed Message:\n" + len + message, where the
	// message is the 32-byte packed hash.
	let hash = packed_hash(request);
	let prefixed = format!("\x19Ethereum Signed Message:\n{}", hash.len());
	let mut prefixed_message = prefixed.into_bytes();
	prefixed_message.extend_from_slice(hash.as_slice());
	keccak256(&prefixed_message)
}

fn typed_digest(request: &RelayRequest, domain: &SigningDomain) -> B256 {
	request.eip712_signing_hash(&domain.eip712())
}

fn recover(digest: B256, signature: &[u8]) -> Result<Address, VerifyError> {
	if signature.len() != 65 {
		return Err(VerifyError::Format(format!(
			"signature must be 65 bytes, got {}",
			signature.len()
		)));
	}

	let sig = Signature::from_raw(signature)
		.map_err(|e| VerifyError::Format(format!("invalid signature: {}", e)))?;

	sig.recover_address_from_prehash(&digest)
		.map_err(|e| VerifyError::Format(format!("recovery failed: {}", e)))
}
