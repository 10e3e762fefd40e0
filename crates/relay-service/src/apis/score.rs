//! Score computation, recording, and optional on-chain mirroring.

use crate::error::ApiError;
use crate::state::AppState;
use alloy::primitives::{Address, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use relay_storage::compute_mock_score;
use relay_types::{Transaction, TriggerScoreResponse};
use tracing::info;

sol! {
	/// Write entrypoint of the deployed score oracle.
	function postScore(address user, uint256 score);
}

/// Reporter recorded when no oracle is configured and the record stays
/// local.
pub const LOCAL_REPORTER: &str = "local";

/// Computes the user's score, mirrors it on-chain when an oracle and the
/// relayer credential are both configured, and appends it to the history.
///
/// The record is only appended once the oracle post (if any) confirmed, so
/// the history never claims an on-chain commitment that did not happen.
pub async fn trigger(state: &AppState, user: Address) -> Result<TriggerScoreResponse, ApiError> {
	let score = compute_mock_score(user);

	let reporter = match (state.oracle, state.relayer.as_ref()) {
		(Some(oracle), Some(relayer)) => {
			let call = postScoreCall {
				user,
				score: U256::from(score),
			};
			let tx = Transaction {
				to: Some(oracle),
				data: call.abi_encode(),
				value: U256::ZERO,
				..Default::default()
			};

			let receipt = relayer.delivery.relay(tx).await?;
			info!(%user, score, tx_hash = %receipt.hash, "score mirrored on-chain");
			relayer.address.to_string()
		}
		_ => LOCAL_REPORTER.to_string(),
	};

	state.scores.record(user, score, reporter.clone());

	Ok(TriggerScoreResponse {
		ok: true,
		score,
		reporter,
	})
}
