//! Name and chain-id routing over the declared network set.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{ChainError, Result};
use crate::network::{COSTON1, COSTON2, ChainProfile, FLARE};
use crate::verify::{FLARE_EXPLORER, VerificationRoute};

/// Immutable routing tables, validated once at construction.
#[derive(Debug, Clone)]
pub struct ChainRouter {
    networks: BTreeMap<String, ChainProfile>,
    routes: BTreeMap<u64, VerificationRoute>,
}

impl ChainRouter {
    /// Build the router, enforcing the table invariants: network names and
    /// chain ids are unique, and every verification route points at a
    /// declared network.
    pub fn new(networks: Vec<ChainProfile>, routes: Vec<VerificationRoute>) -> Result<Self> {
        let mut by_name: BTreeMap<String, ChainProfile> = BTreeMap::new();
        let mut seen_ids: BTreeMap<u64, String> = BTreeMap::new();
        for profile in networks {
            let name = profile.name.to_string();
            if let Some(first) = seen_ids.insert(profile.chain_id, name.clone()) {
                return Err(ChainError::DuplicateChainId {
                    chain_id: profile.chain_id,
                    first,
                    second: name,
                });
            }
            if by_name.insert(name.clone(), profile).is_some() {
                return Err(ChainError::DuplicateNetwork(name));
            }
        }

        let mut by_id: BTreeMap<u64, VerificationRoute> = BTreeMap::new();
        for route in routes {
            if !seen_ids.contains_key(&route.chain_id) {
                return Err(ChainError::DanglingRoute {
                    chain_id: route.chain_id,
                });
            }
            let chain_id = route.chain_id;
            if by_id.insert(chain_id, route).is_some() {
                return Err(ChainError::DuplicateRoute { chain_id });
            }
        }

        Ok(Self {
            networks: by_name,
            routes: by_id,
        })
    }

    /// The three Flare-family networks, with the mainnet explorer route.
    pub fn flare() -> Self {
        Self::new(vec![FLARE, COSTON1, COSTON2], vec![FLARE_EXPLORER])
            .expect("flare preset tables are consistent")
    }

    /// Exact-match lookup by network name. There is deliberately no fallback:
    /// a typo must fail rather than deploy to the wrong chain.
    pub fn resolve_network(&self, name: &str) -> Result<&ChainProfile> {
        self.networks
            .get(name)
            .ok_or_else(|| ChainError::UnknownNetwork(name.to_string()))
    }

    /// Verification endpoints for a chain, if it declared any. `None` means
    /// automated verification is not supported there and must be skipped.
    pub fn resolve_verification(&self, chain_id: u64) -> Option<&VerificationRoute> {
        let route = self.routes.get(&chain_id);
        if route.is_none() {
            debug!(chain_id, "no verification route declared, skipping verification");
        }
        route
    }

    /// `Result` form of [`Self::resolve_verification`] for callers that treat
    /// a missing route as an error.
    pub fn require_verification(&self, chain_id: u64) -> Result<&VerificationRoute> {
        self.resolve_verification(chain_id)
            .ok_or(ChainError::VerificationNotSupported { chain_id })
    }

    pub fn networks(&self) -> impl Iterator<Item = &ChainProfile> {
        self.networks.values()
    }

    pub fn routes(&self) -> impl Iterator<Item = &VerificationRoute> {
        self.routes.values()
    }
}
