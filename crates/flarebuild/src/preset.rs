//! Built-in Flare deployment preset.

use flarebuild_chain::{COSTON1, COSTON2, ChainProfile, FLARE, FLARE_EXPLORER};

use crate::config::{BuildConfig, CompilerDecl, NetworkDecl, OptimizerDecl, VerificationDecl};

fn compiler(version: &str, runs: u32) -> CompilerDecl {
    CompilerDecl {
        version: version.to_string(),
        optimizer: OptimizerDecl {
            enabled: true,
            runs,
        },
    }
}

fn network(profile: &ChainProfile) -> (String, NetworkDecl) {
    (
        profile.name.clone().into_owned(),
        NetworkDecl {
            url: profile.rpc_url.clone().into_owned(),
            chain_id: profile.chain_id,
        },
    )
}

impl BuildConfig {
    /// The stock Flare configuration: four default compilers at 200 optimizer
    /// runs, the wrapped-native contracts pinned to the 0.5.17/one-run
    /// profile they were originally deployed with, the three Flare-family
    /// networks, and verification against the mainnet explorer only.
    pub fn flare() -> Self {
        let pinned = compiler("0.5.17", 1);
        BuildConfig {
            solidity: crate::config::SolidityDecl {
                compilers: vec![
                    compiler("0.5.17", 200),
                    compiler("0.6.12", 200),
                    compiler("0.7.6", 200),
                    compiler("0.8.17", 200),
                ],
                overrides: [
                    ("contracts/CWNat.sol".to_string(), pinned.clone()),
                    ("contracts/CWNatDelegate.sol".to_string(), pinned),
                ]
                .into(),
            },
            networks: [network(&FLARE), network(&COSTON1), network(&COSTON2)].into(),
            verification: vec![VerificationDecl {
                network: FLARE.name.clone().into_owned(),
                chain_id: Some(FLARE_EXPLORER.chain_id),
                api_url: FLARE_EXPLORER.api_url.clone().into_owned(),
                browser_url: FLARE_EXPLORER.browser_url.clone().into_owned(),
                api_key: FLARE_EXPLORER.api_key.clone().into_owned(),
            }],
        }
    }
}
