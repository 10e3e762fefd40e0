//! The authorized-call relay pipeline.
//!
//! A request moves through validation, signature verification, signer
//! comparison, nonce consumption, then submission. Failures before
//! submission are synchronous and leave no state behind. A consumed nonce
//! is not restored when the on-chain call later fails or reverts, so
//! resubmission requires signing with the next nonce.

use crate::error::ApiError;
use crate::state::AppState;
use relay_types::{RelayPayload, RelayResponse, Transaction, ValidatedRelay};
use relay_verify::{build_domain, verify, SignatureScheme};
use tracing::{info, warn};

/// Which signature encoding the endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayMode {
	/// Personal-message signature over the packed request hash.
	Raw,
	/// EIP-712 typed-data signature bound to a signing domain.
	Typed,
}

/// Runs a relay request through the full pipeline.
pub async fn process(
	state: &AppState,
	payload: RelayPayload,
	mode: RelayMode,
) -> Result<RelayResponse, ApiError> {
	let relayer = state.relayer.as_ref().ok_or(ApiError::RelayerUnconfigured)?;

	let ValidatedRelay {
		request,
		nonce,
		signature,
		domain,
	} = payload.validate().map_err(ApiError::Validation)?;

	let scheme = match mode {
		RelayMode::Raw => SignatureScheme::Raw,
		RelayMode::Typed => {
			// Default domains bind to the network the relayer is connected
			// to right now; an explicit caller override wins as-is.
			let chain_id = relayer
				.delivery
				.chain_id()
				.await
				.map_err(|e| ApiError::Internal(e.to_string()))?;
			SignatureScheme::Structured(build_domain(chain_id, None, domain))
		}
	};

	let recovered = verify(&scheme, &request, &signature)?;
	if recovered != request.user {
		warn!(%recovered, user = %request.user, "signature does not match claimed user");
		return Err(ApiError::SignerMismatch);
	}

	state.nonces.check_and_advance(request.user, nonce)?;

	// From here the nonce is consumed regardless of the on-chain outcome.
	let tx = Transaction {
		to: Some(request.to),
		data: request.data.to_vec(),
		value: request.value,
		..Default::default()
	};

	let receipt = relayer.delivery.relay(tx).await?;
	info!(user = %request.user, tx_hash = %receipt.hash, "relayed call confirmed");

	Ok(RelayResponse {
		ok: true,
		tx_hash: receipt.hash,
	})
}
