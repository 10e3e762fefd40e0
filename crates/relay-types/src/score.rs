//! Score history types.

use serde::{Deserialize, Serialize};

/// One computed score for a user.
///
/// Insertion order in the per-user history is authoritative; the timestamp
/// is recorded for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
	/// Computed score value.
	pub score: u64,
	/// Unix milliseconds at recording time.
	pub timestamp: i64,
	/// Who reported the score: the relayer address when mirrored on-chain,
	/// `"local"` otherwise.
	pub reporter: String,
}
