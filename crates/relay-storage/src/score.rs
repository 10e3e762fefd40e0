//! Append-only per-user score history and the mock score function.

use alloy::primitives::{Address, U256};
use chrono::Utc;
use dashmap::DashMap;
use relay_types::ScoreRecord;

/// Deterministic placeholder score derived from the account address.
///
/// Maps the address into [400, 999]. Pure function of its input: no state,
/// no I/O, so repeated calls for the same user return the same value.
pub fn compute_mock_score(user: Address) -> u64 {
	let v = U256::from_be_slice(user.as_slice()) % U256::from(1000u64);
	400 + (v.to::<u64>() % 600)
}

/// Append-only record of computed scores per user.
///
/// Insertion order is the authoritative order of the history.
#[derive(Debug, Default)]
pub struct ScoreLedger {
	histories: DashMap<Address, Vec<ScoreRecord>>,
}

impl ScoreLedger {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a record for `user`.
	pub fn record(&self, user: Address, score: u64, reporter: impl Into<String>) {
		let record = ScoreRecord {
			score,
			timestamp: Utc::now().timestamp_millis(),
			reporter: reporter.into(),
		};
		self.histories.entry(user).or_default().push(record);
	}

	/// All records for `user` in insertion order; empty if unseen.
	pub fn history(&self, user: Address) -> Vec<ScoreRecord> {
		self.histories
			.get(&user)
			.map(|records| records.clone())
			.unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_mock_score_is_deterministic_and_bounded() {
		for byte in [0x00u8, 0x01, 0xaa, 0xff] {
			let user = Address::repeat_byte(byte);
			let score = compute_mock_score(user);
			assert!((400..=999).contains(&score), "score {} out of range", score);
			assert_eq!(score, compute_mock_score(user));
		}
	}

	#[test]
	fn test_mock_score_varies_across_addresses() {
		let scores: Vec<u64> = (0u8..32)
			.map(|b| compute_mock_score(Address::repeat_byte(b)))
			.collect();
		let first = scores[0];
		assert!(scores.iter().any(|s| *s != first));
	}

	#[test]
	fn test_history_empty_for_unseen_user() {
		let ledger = ScoreLedger::new();
		assert!(ledger.history(Address::repeat_byte(0xaa)).is_empty());
	}

	#[test]
	fn test_history_preserves_insertion_order() {
		let ledger = ScoreLedger::new();
		let user = Address::repeat_byte(0xaa);

		ledger.record(user, 400, "local");
		ledger.record(user, 700, "local");
		ledger.record(user, 500, "0xrelayer");

		let history = ledger.history(user);
		assert_eq!(history.len(), 3);
		assert_eq!(
			history.iter().map(|r| r.score).collect::<Vec<_>>(),
			vec![400, 700, 500]
		);
		assert_eq!(history[2].reporter, "0xrelayer");
	}

	#[test]
	fn test_history_length_is_non_decreasing() {
		let ledger = ScoreLedger::new();
		let user = Address::repeat_byte(0xaa);

		let mut previous = 0;
		for _ in 0..10 {
			ledger.record(user, 400, "local");
			let len = ledger.history(user).len();
			assert!(len > previous);
			previous = len;
		}
	}

	#[test]
	fn test_histories_are_independent() {
		let ledger = ScoreLedger::new();
		ledger.record(Address::repeat_byte(0xaa), 400, "local");

		assert_eq!(ledger.history(Address::repeat_byte(0xaa)).len(), 1);
		assert!(ledger.history(Address::repeat_byte(0xbb)).is_empty());
	}
}
