//! Network profiles for the supported chains.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Connection parameters for one supported network.
///
/// `chain_id` is unique per network and keeps transactions from being
/// replayed across chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainProfile {
    pub name: Cow<'static, str>,
    pub rpc_url: Cow<'static, str>,
    pub chain_id: u64,
}

impl ChainProfile {
    pub const fn new(name: &'static str, rpc_url: &'static str, chain_id: u64) -> Self {
        Self {
            name: Cow::Borrowed(name),
            rpc_url: Cow::Borrowed(rpc_url),
            chain_id,
        }
    }
}

/// Flare mainnet, via the C-chain API node.
pub const FLARE: ChainProfile =
    ChainProfile::new("flare", "https://flare-api.flare.network/ext/C/rpc", 14);

/// Coston, the Songbird-coupled test network.
pub const COSTON1: ChainProfile =
    ChainProfile::new("coston1", "https://coston-api.flare.network/ext/C/rpc", 16);

/// Coston2, the Flare-coupled test network.
pub const COSTON2: ChainProfile = ChainProfile::new(
    "coston2",
    "https://coston2-api.flare.network/ext/C/rpc",
    114,
);
