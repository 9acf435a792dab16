//! Build and deployment configuration for multi-version solc pipelines
//! targeting the Flare network family.
//!
//! Two independent concerns compose here. [`flarebuild_solc`] decides which
//! compiler profile applies to each contract (a shared default list, with
//! per-contract overrides for storage-sensitive legacy contracts).
//! [`flarebuild_chain`] decides which endpoints a deployment targets and
//! whether the chain supports automated bytecode verification. This crate
//! adds the operator-facing TOML surface, load-time validation, and the stock
//! Flare preset.
//!
//! ```
//! use flarebuild::BuildConfig;
//!
//! let resolved = BuildConfig::flare().resolve().unwrap();
//! let selection = resolved.compilers.resolve("contracts/CWNat.sol").unwrap();
//! assert!(selection.is_pinned());
//! assert_eq!(resolved.chains.resolve_network("flare").unwrap().chain_id, 14);
//! ```

pub use flarebuild_chain as chain;
pub use flarebuild_chain::{ChainError, ChainProfile, ChainRouter, VerificationRoute};
pub use flarebuild_solc as solc;
pub use flarebuild_solc::{
    CompilerProfile, CompilerSelection, CompilerSelector, DefaultCompilerList, OptimizerSettings,
    OutputArtifact, OverrideTable, Pragma, SolcError,
};

pub use self::config::{
    BuildConfig, CompilerDecl, ConfigError, NetworkDecl, OptimizerDecl, ResolvedConfig, Result,
    SolidityDecl, VerificationDecl,
};

mod config;
mod preset;
