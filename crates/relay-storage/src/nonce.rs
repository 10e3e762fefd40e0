//! Per-user nonce ledger with atomic check-and-advance.
//!
//! The ledger is what makes "at most once" hold for signed authorizations:
//! a request is accepted only when it presents exactly the user's next
//! sequence number, and acceptance advances that number in the same
//! critical section.

use alloy::primitives::Address;
use dashmap::DashMap;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NonceError {
	/// Replay or out-of-order attempt; carries the value the ledger would
	/// accept.
	#[error("invalid nonce, expected {expected}")]
	Mismatch { expected: u64 },
}

/// Tracks the next acceptable sequence number per user.
///
/// Counters start at 0 for unseen users, advance by exactly 1 per accepted
/// request, and never decrease or skip.
#[derive(Debug, Default)]
pub struct NonceLedger {
	counters: DashMap<Address, u64>,
}

impl NonceLedger {
	pub fn new() -> Self {
		Self::default()
	}

	/// The nonce the ledger will accept next for `user`.
	pub fn current(&self, user: Address) -> u64 {
		self.counters.get(&user).map(|v| *v).unwrap_or(0)
	}

	/// Accepts `presented` iff it equals the expected counter, advancing the
	/// counter by one; a mismatch mutates nothing.
	///
	/// The comparison and the increment happen under the map's entry guard,
	/// so of two concurrent calls presenting the same nonce for the same
	/// user exactly one succeeds.
	pub fn check_and_advance(&self, user: Address, presented: u64) -> Result<(), NonceError> {
		let mut slot = self.counters.entry(user).or_insert(0);
		if *slot == presented {
			*slot += 1;
			Ok(())
		} else {
			let expected = *slot;
			drop(slot);
			warn!(%user, presented, expected, "rejected nonce");
			Err(NonceError::Mismatch { expected })
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;

	#[test]
	fn test_unseen_user_starts_at_zero() {
		let ledger = NonceLedger::new();
		assert_eq!(ledger.current(Address::repeat_byte(0xaa)), 0);
	}

	#[test]
	fn test_gapless_sequence() {
		let ledger = NonceLedger::new();
		let user = Address::repeat_byte(0xaa);

		for nonce in 0..5 {
			assert_eq!(ledger.current(user), nonce);
			ledger.check_and_advance(user, nonce).unwrap();
		}
		assert_eq!(ledger.current(user), 5);
	}

	#[test]
	fn test_replay_rejected_without_mutation() {
		let ledger = NonceLedger::new();
		let user = Address::repeat_byte(0xaa);

		ledger.check_and_advance(user, 0).unwrap();
		let err = ledger.check_and_advance(user, 0).unwrap_err();
		assert_eq!(err, NonceError::Mismatch { expected: 1 });
		assert_eq!(ledger.current(user), 1);
	}

	#[test]
	fn test_skip_ahead_rejected_without_mutation() {
		let ledger = NonceLedger::new();
		let user = Address::repeat_byte(0xaa);

		let err = ledger.check_and_advance(user, 3).unwrap_err();
		assert_eq!(err, NonceError::Mismatch { expected: 0 });
		assert_eq!(ledger.current(user), 0);
	}

	#[test]
	fn test_users_are_independent() {
		let ledger = NonceLedger::new();
		let alice = Address::repeat_byte(0xaa);
		let bob = Address::repeat_byte(0xbb);

		ledger.check_and_advance(alice, 0).unwrap();
		ledger.check_and_advance(alice, 1).unwrap();
		assert_eq!(ledger.current(alice), 2);
		assert_eq!(ledger.current(bob), 0);
		ledger.check_and_advance(bob, 0).unwrap();
		assert_eq!(ledger.current(bob), 1);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn test_concurrent_same_nonce_has_single_winner() {
		let ledger = Arc::new(NonceLedger::new());
		let user = Address::repeat_byte(0xaa);

		let tasks: Vec<_> = (0..16)
			.map(|_| {
				let ledger = ledger.clone();
				tokio::spawn(async move { ledger.check_and_advance(user, 0) })
			})
			.collect();

		let results = futures::future::join_all(tasks).await;
		let mut winners = 0;
		for result in results {
			match result.unwrap() {
				Ok(()) => winners += 1,
				Err(err) => assert_eq!(err, NonceError::Mismatch { expected: 1 }),
			}
		}

		assert_eq!(winners, 1);
		assert_eq!(ledger.current(user), 1);
	}
}
