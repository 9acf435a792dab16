//! Compiler profile selection for multi-version Solidity builds.
//!
//! Almost every contract in a repository compiles under one shared policy: a
//! list of compiler versions, optimizer on, 200 runs. A few storage-sensitive
//! contracts must instead be pinned to the exact compiler semantics they were
//! deployed with, because a different optimizer setting can shift their
//! bytecode shape and storage layout. This crate decides, per contract, which
//! of the two applies.
//!
//! - [`CompilerSelector::resolve`] consults the override table first; a hit
//!   suppresses the default list entirely for that contract.
//! - [`CompilerSelection::for_pragma`] narrows a selection to the first
//!   profile satisfying the contract's `pragma solidity` declaration.
//!
//! All tables are built once at startup and are read-only afterwards; every
//! lookup is a pure function over them.

pub use self::error::{Result, SolcError};
pub use self::pragma::{Pragma, PragmaError};
pub use self::profile::{CompilerProfile, OptimizerSettings, OutputArtifact};
pub use self::select::{CompilerSelection, CompilerSelector, DefaultCompilerList, OverrideTable};

mod error;
mod pragma;
mod profile;
mod select;
