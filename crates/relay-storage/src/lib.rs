//! Process-local ledgers for the relay service.
//!
//! Both ledgers are volatile: a restart resets the nonce floor and the
//! score history, which re-opens replay of old signed requests. Durable
//! backing belongs here when it lands; the rest of the service only sees
//! the two atomic operations.

pub mod nonce;
pub mod score;

pub use nonce::{NonceError, NonceLedger};
pub use score::{compute_mock_score, ScoreLedger};
