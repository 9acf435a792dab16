//! Error types for flarebuild-solc.

use thiserror::Error;

use crate::pragma::PragmaError;

#[derive(Debug, Error)]
pub enum SolcError {
    /// Fatal for the named contract only; unrelated contracts keep building.
    #[error("no compiler in the default list satisfies `{pragma}` declared by {contract}")]
    NoMatchingCompilerVersion { contract: String, pragma: String },

    #[error("default compiler list is empty")]
    EmptyCompilerList,

    #[error("duplicate compiler override for {0}")]
    DuplicateOverrideKey(String),

    #[error("compiler override key {0} does not name a known contract")]
    UnknownOverrideKey(String),

    #[error("contract identifier is empty")]
    EmptyContractId,

    #[error(transparent)]
    Pragma(#[from] PragmaError),
}

pub type Result<T> = std::result::Result<T, SolcError>;
