//! Chain routing for multi-network contract deployment.
//!
//! The set of deployable networks is closed and declared up front; resolution
//! is an exact-match lookup with no fallback, so a mistyped network name fails
//! loudly instead of deploying to the wrong chain. Verification endpoints are
//! declared per chain id, and a chain without a route simply does not support
//! automated verification.
//!
//! All tables are validated and frozen at construction; lookups are pure.

pub use self::error::{ChainError, Result};
pub use self::network::{COSTON1, COSTON2, ChainProfile, FLARE};
pub use self::router::ChainRouter;
pub use self::verify::{FLARE_EXPLORER, VerificationRoute};

mod error;
mod network;
mod router;
mod verify;
