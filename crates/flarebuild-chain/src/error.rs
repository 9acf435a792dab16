//! Error types for flarebuild-chain.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    /// Aborts the requested operation; there is no default network to fall
    /// back to.
    #[error("unknown network `{0}`")]
    UnknownNetwork(String),

    /// Recoverable: the caller skips verification for this chain and reports
    /// deployment success independently.
    #[error("chain {chain_id} has no verification route")]
    VerificationNotSupported { chain_id: u64 },

    #[error("chain id {chain_id} declared by both `{first}` and `{second}`")]
    DuplicateChainId {
        chain_id: u64,
        first: String,
        second: String,
    },

    #[error("network `{0}` declared twice")]
    DuplicateNetwork(String),

    #[error("more than one verification route for chain {chain_id}")]
    DuplicateRoute { chain_id: u64 },

    #[error("verification route for chain {chain_id} matches no declared network")]
    DanglingRoute { chain_id: u64 },
}

pub type Result<T> = std::result::Result<T, ChainError>;
