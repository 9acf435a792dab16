//! Declarative build/deploy configuration.
//!
//! Mirrors the operator-facing TOML document and validates it into the typed
//! tables consumed by the build driver. All tables are built once at startup
//! and are read-only afterwards; there is no dynamic reload.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use figment::{
    Figment,
    providers::{Format, Toml},
};
use semver::Version;
use serde::Deserialize;
use thiserror::Error;

use flarebuild_chain::{ChainError, ChainProfile, ChainRouter, VerificationRoute};
use flarebuild_solc::{
    CompilerProfile, CompilerSelector, DefaultCompilerList, OptimizerSettings, OverrideTable,
    SolcError,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Figment(#[from] figment::Error),

    #[error(transparent)]
    Solc(#[from] SolcError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("invalid compiler version `{version}`")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },

    #[error("verification entry names undeclared network `{network}`")]
    UnknownVerificationNetwork { network: String },

    #[error(
        "verification entry for `{network}` declares chain id {declared}, but the network is chain {actual}"
    )]
    VerificationChainIdMismatch {
        network: String,
        declared: u64,
        actual: u64,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// One compiler declaration: a version plus optimizer settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CompilerDecl {
    pub version: String,
    #[serde(default)]
    pub optimizer: OptimizerDecl,
}

impl CompilerDecl {
    fn to_profile(&self) -> Result<CompilerProfile> {
        let version =
            Version::parse(&self.version).map_err(|source| ConfigError::InvalidVersion {
                version: self.version.clone(),
                source,
            })?;
        Ok(CompilerProfile::new(
            version,
            OptimizerSettings {
                enabled: self.optimizer.enabled,
                runs: self.optimizer.runs,
            },
        ))
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OptimizerDecl {
    pub enabled: bool,
    pub runs: u32,
}

impl Default for OptimizerDecl {
    fn default() -> Self {
        Self {
            enabled: true,
            runs: 200,
        }
    }
}

/// The `[solidity]` section: shared default compilers plus per-contract
/// overrides keyed by exact relative path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SolidityDecl {
    #[serde(default)]
    pub compilers: Vec<CompilerDecl>,
    #[serde(default)]
    pub overrides: BTreeMap<String, CompilerDecl>,
}

/// One entry under `[networks]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct NetworkDecl {
    pub url: String,
    pub chain_id: u64,
}

/// One `[[verification]]` entry. The effective chain id comes from the named
/// network; a declared `chain-id` is optional and only cross-checked, so a
/// route can never drift out of sync with its chain declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct VerificationDecl {
    pub network: String,
    #[serde(default)]
    pub chain_id: Option<u64>,
    pub api_url: String,
    pub browser_url: String,
    pub api_key: String,
}

/// Top-level declarative document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default)]
    pub solidity: SolidityDecl,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkDecl>,
    #[serde(default)]
    pub verification: Vec<VerificationDecl>,
}

impl BuildConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Figment::new().merge(Toml::file(path.as_ref())).extract()?)
    }

    pub fn from_toml_str(document: &str) -> Result<Self> {
        Ok(Figment::new().merge(Toml::string(document)).extract()?)
    }

    /// Validate the declarations and build the immutable resolution tables.
    ///
    /// Any integrity violation here (empty compiler list, duplicate chain id,
    /// route naming an unknown network, unparseable version) aborts loading;
    /// nothing is resolved from a half-valid document.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let mut defaults = Vec::with_capacity(self.solidity.compilers.len());
        for decl in &self.solidity.compilers {
            defaults.push(Arc::new(decl.to_profile()?));
        }
        let defaults = DefaultCompilerList::new(defaults)?;

        // Identical override declarations share one profile value, so a
        // change to the pinned settings updates every referent at once.
        let mut pool: BTreeMap<CompilerProfile, Arc<CompilerProfile>> = BTreeMap::new();
        let mut overrides = OverrideTable::new();
        for (contract, decl) in &self.solidity.overrides {
            let profile = decl.to_profile()?;
            let shared = match pool.get(&profile) {
                Some(existing) => Arc::clone(existing),
                None => {
                    let arc = Arc::new(profile.clone());
                    pool.insert(profile, Arc::clone(&arc));
                    arc
                }
            };
            overrides.insert(contract.clone(), shared)?;
        }

        let networks: Vec<ChainProfile> = self
            .networks
            .iter()
            .map(|(name, decl)| ChainProfile {
                name: name.clone().into(),
                rpc_url: decl.url.clone().into(),
                chain_id: decl.chain_id,
            })
            .collect();

        let mut routes = Vec::with_capacity(self.verification.len());
        for decl in &self.verification {
            let chain_id = self
                .networks
                .get(&decl.network)
                .map(|n| n.chain_id)
                .ok_or_else(|| ConfigError::UnknownVerificationNetwork {
                    network: decl.network.clone(),
                })?;
            if let Some(declared) = decl.chain_id
                && declared != chain_id
            {
                return Err(ConfigError::VerificationChainIdMismatch {
                    network: decl.network.clone(),
                    declared,
                    actual: chain_id,
                });
            }
            routes.push(VerificationRoute {
                chain_id,
                api_url: decl.api_url.clone().into(),
                browser_url: decl.browser_url.clone().into(),
                api_key: decl.api_key.clone().into(),
            });
        }

        Ok(ResolvedConfig {
            compilers: CompilerSelector::new(defaults, overrides),
            chains: ChainRouter::new(networks, routes)?,
        })
    }
}

/// Validated, immutable resolution tables.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub compilers: CompilerSelector,
    pub chains: ChainRouter,
}
