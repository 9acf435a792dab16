//! Contract verification endpoints.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Endpoints for submitting compiled source to a chain's explorer so it can
/// be matched against deployed bytecode.
///
/// At most one route exists per chain; chains without one do not support
/// automated verification and must be skipped, not retried with other
/// credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRoute {
    pub chain_id: u64,
    /// Submission endpoint, etherscan-shaped.
    pub api_url: Cow<'static, str>,
    /// Human-facing explorer page.
    pub browser_url: Cow<'static, str>,
    /// The Flare explorer does not check API keys; this placeholder keeps
    /// etherscan-shaped clients satisfied and is not a secret.
    pub api_key: Cow<'static, str>,
}

impl VerificationRoute {
    pub const fn new(
        chain_id: u64,
        api_url: &'static str,
        browser_url: &'static str,
        api_key: &'static str,
    ) -> Self {
        Self {
            chain_id,
            api_url: Cow::Borrowed(api_url),
            browser_url: Cow::Borrowed(browser_url),
            api_key: Cow::Borrowed(api_key),
        }
    }
}

/// Route for the Flare mainnet explorer. The test networks carry no route.
pub const FLARE_EXPLORER: VerificationRoute = VerificationRoute::new(
    14,
    "https://flare-explorer.flare.network/api",
    "https://flare-explorer.flare.network/",
    "flare",
);
