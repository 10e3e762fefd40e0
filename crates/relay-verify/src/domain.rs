//! Signing-domain construction.

use alloy::primitives::Address;
use relay_types::{DomainOverride, SigningDomain};

/// Name the service signs typed data under.
pub const DOMAIN_NAME: &str = "MODRAN Relayer";

/// Version of the typed-data layout.
pub const DOMAIN_VERSION: &str = "1";

/// Builds the signing domain for a typed-data verification.
///
/// A caller override wins as-is; rejecting a mismatched override is the
/// verifier's job, not the builder's. Without an override the domain binds
/// the fixed service name and version to `chain_id`, which callers query
/// from the live connection so signatures cannot replay across networks.
pub fn build_domain(
	chain_id: u64,
	verifying_contract: Option<Address>,
	overrides: Option<DomainOverride>,
) -> SigningDomain {
	match overrides {
		Some(d) => SigningDomain {
			name: d.name.unwrap_or_else(|| DOMAIN_NAME.to_string()),
			version: d.version.unwrap_or_else(|| DOMAIN_VERSION.to_string()),
			chain_id: d.chain_id,
			verifying_contract: d.verifying_contract,
		},
		None => SigningDomain {
			name: DOMAIN_NAME.to_string(),
			version: DOMAIN_VERSION.to_string(),
			chain_id,
			verifying_contract,
		},
	}
}
