//! Override-aware compiler selection.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, SolcError};
use crate::pragma::Pragma;
use crate::profile::CompilerProfile;

/// Ordered default compiler profiles, tried top to bottom for any contract
/// without an override. Order matters for deterministic multi-version
/// compilation, not for precedence.
#[derive(Debug, Clone)]
pub struct DefaultCompilerList(Vec<Arc<CompilerProfile>>);

impl DefaultCompilerList {
    pub fn new(profiles: Vec<Arc<CompilerProfile>>) -> Result<Self> {
        if profiles.is_empty() {
            return Err(SolcError::EmptyCompilerList);
        }
        Ok(Self(profiles))
    }

    pub fn profiles(&self) -> &[Arc<CompilerProfile>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompilerProfile> {
        self.0.iter().map(Arc::as_ref)
    }
}

/// Per-contract compiler overrides, keyed by exact relative path
/// (e.g. `contracts/CWNat.sol`). Lookup is case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: BTreeMap<String, Arc<CompilerProfile>>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override. A second override for the same contract is a
    /// configuration error, not a silent replacement.
    pub fn insert(
        &mut self,
        contract: impl Into<String>,
        profile: Arc<CompilerProfile>,
    ) -> Result<()> {
        let contract = contract.into();
        if contract.is_empty() {
            return Err(SolcError::EmptyContractId);
        }
        if self.entries.contains_key(&contract) {
            return Err(SolcError::DuplicateOverrideKey(contract));
        }
        self.entries.insert(contract, profile);
        Ok(())
    }

    pub fn get(&self, contract: &str) -> Option<&Arc<CompilerProfile>> {
        self.entries.get(contract)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check every override key against the caller's set of known contract
    /// identifiers. The table itself cannot see the filesystem; the build
    /// driver owns contract discovery and passes the set in.
    pub fn validate_keys<'a, I>(&self, known: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let known: BTreeSet<&str> = known.into_iter().collect();
        for key in self.entries.keys() {
            if !known.contains(key.as_str()) {
                return Err(SolcError::UnknownOverrideKey(key.clone()));
            }
        }
        Ok(())
    }
}

/// The effective compiler settings for one contract.
#[derive(Debug, Clone)]
pub enum CompilerSelection {
    /// The contract is pinned to a single profile; the default list is
    /// suppressed entirely for it.
    Pinned(Arc<CompilerProfile>),
    /// No override: every default profile applies, in declaration order, and
    /// the contract's pragma decides which one compiles it.
    Defaults(Vec<Arc<CompilerProfile>>),
}

impl CompilerSelection {
    pub fn profiles(&self) -> &[Arc<CompilerProfile>] {
        match self {
            CompilerSelection::Pinned(profile) => std::slice::from_ref(profile),
            CompilerSelection::Defaults(list) => list,
        }
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self, CompilerSelection::Pinned(_))
    }

    /// The highest-versioned candidate satisfying the contract's declared
    /// pragma, matching what solc toolchains do when several configured
    /// compilers fit a wide range. No match is fatal for that contract only;
    /// the caller keeps building unrelated contracts.
    pub fn for_pragma(&self, contract: &str, pragma: &Pragma) -> Result<&Arc<CompilerProfile>> {
        self.profiles()
            .iter()
            .filter(|p| pragma.matches(p.version()))
            .max_by(|a, b| a.version().cmp(b.version()))
            .ok_or_else(|| SolcError::NoMatchingCompilerVersion {
                contract: contract.to_string(),
                pragma: pragma.to_string(),
            })
    }
}

/// Immutable selector built once at startup.
#[derive(Debug, Clone)]
pub struct CompilerSelector {
    defaults: DefaultCompilerList,
    overrides: OverrideTable,
}

impl CompilerSelector {
    pub fn new(defaults: DefaultCompilerList, overrides: OverrideTable) -> Self {
        Self {
            defaults,
            overrides,
        }
    }

    pub fn defaults(&self) -> &DefaultCompilerList {
        &self.defaults
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Resolve the profiles for one contract.
    pub fn resolve(&self, contract: &str) -> Result<CompilerSelection> {
        if contract.is_empty() {
            return Err(SolcError::EmptyContractId);
        }
        if let Some(profile) = self.overrides.get(contract) {
            debug!(contract, version = %profile.version(), "compiler override hit");
            return Ok(CompilerSelection::Pinned(Arc::clone(profile)));
        }
        debug!(
            contract,
            candidates = self.defaults.len(),
            "no override, trying default compiler list"
        );
        Ok(CompilerSelection::Defaults(
            self.defaults.profiles().to_vec(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::OptimizerSettings;
    use proptest::prelude::*;
    use semver::Version;

    fn profile(version: &str, runs: u32) -> Arc<CompilerProfile> {
        Arc::new(CompilerProfile::new(
            Version::parse(version).unwrap(),
            OptimizerSettings {
                enabled: true,
                runs,
            },
        ))
    }

    fn default_list() -> DefaultCompilerList {
        DefaultCompilerList::new(vec![
            profile("0.5.17", 200),
            profile("0.6.12", 200),
            profile("0.7.6", 200),
            profile("0.8.17", 200),
        ])
        .unwrap()
    }

    fn selector_with_cwnat_pin() -> CompilerSelector {
        let pinned = profile("0.5.17", 1);
        let mut overrides = OverrideTable::new();
        overrides
            .insert("contracts/CWNat.sol", Arc::clone(&pinned))
            .unwrap();
        overrides
            .insert("contracts/CWNatDelegate.sol", pinned)
            .unwrap();
        CompilerSelector::new(default_list(), overrides)
    }

    #[test]
    fn test_override_suppresses_defaults() {
        let selection = selector_with_cwnat_pin()
            .resolve("contracts/CWNat.sol")
            .unwrap();
        assert!(selection.is_pinned());
        let profiles = selection.profiles();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].version(), &Version::new(0, 5, 17));
        assert_eq!(profiles[0].optimizer().runs, 1);
    }

    #[test]
    fn test_absent_contract_gets_full_default_list() {
        let selection = selector_with_cwnat_pin()
            .resolve("contracts/Other.sol")
            .unwrap();
        assert!(!selection.is_pinned());
        let versions: Vec<String> = selection
            .profiles()
            .iter()
            .map(|p| p.version().to_string())
            .collect();
        assert_eq!(versions, ["0.5.17", "0.6.12", "0.7.6", "0.8.17"]);
        assert!(selection.profiles().iter().all(|p| p.optimizer().runs == 200));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let selection = selector_with_cwnat_pin()
            .resolve("contracts/cwnat.sol")
            .unwrap();
        assert!(!selection.is_pinned());
    }

    #[test]
    fn test_shared_profile_backs_both_overrides() {
        let selector = selector_with_cwnat_pin();
        let a = selector.overrides().get("contracts/CWNat.sol").unwrap();
        let b = selector
            .overrides()
            .get("contracts/CWNatDelegate.sol")
            .unwrap();
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn test_duplicate_override_rejected() {
        let mut overrides = OverrideTable::new();
        overrides
            .insert("contracts/CWNat.sol", profile("0.5.17", 1))
            .unwrap();
        let err = overrides
            .insert("contracts/CWNat.sol", profile("0.5.17", 200))
            .unwrap_err();
        assert!(matches!(err, SolcError::DuplicateOverrideKey(_)));
    }

    #[test]
    fn test_empty_default_list_rejected() {
        assert!(matches!(
            DefaultCompilerList::new(Vec::new()),
            Err(SolcError::EmptyCompilerList)
        ));
    }

    #[test]
    fn test_empty_contract_id_rejected() {
        let selector = selector_with_cwnat_pin();
        assert!(matches!(
            selector.resolve(""),
            Err(SolcError::EmptyContractId)
        ));
    }

    #[test]
    fn test_pragma_picks_satisfying_version() {
        let selector = selector_with_cwnat_pin();
        let selection = selector.resolve("contracts/Other.sol").unwrap();
        let chosen = selection
            .for_pragma("contracts/Other.sol", &Pragma::parse("^0.8.0").unwrap())
            .unwrap();
        assert_eq!(chosen.version(), &Version::new(0, 8, 17));

        let chosen = selection
            .for_pragma("contracts/Other.sol", &Pragma::parse("^0.6.0").unwrap())
            .unwrap();
        assert_eq!(chosen.version(), &Version::new(0, 6, 12));
    }

    #[test]
    fn test_wide_pragma_picks_highest_satisfying_version() {
        let selector = selector_with_cwnat_pin();
        let selection = selector.resolve("contracts/Other.sol").unwrap();
        let chosen = selection
            .for_pragma(
                "contracts/Other.sol",
                &Pragma::parse(">=0.6.0 <0.9.0").unwrap(),
            )
            .unwrap();
        assert_eq!(chosen.version(), &Version::new(0, 8, 17));

        let chosen = selection
            .for_pragma(
                "contracts/Other.sol",
                &Pragma::parse(">=0.5.0 <0.8.0").unwrap(),
            )
            .unwrap();
        assert_eq!(chosen.version(), &Version::new(0, 7, 6));
    }

    #[test]
    fn test_unsatisfiable_pragma_fails_that_contract() {
        let selector = selector_with_cwnat_pin();
        let selection = selector.resolve("contracts/Ancient.sol").unwrap();
        let err = selection
            .for_pragma("contracts/Ancient.sol", &Pragma::parse("^0.4.24").unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            SolcError::NoMatchingCompilerVersion { ref contract, .. }
                if contract == "contracts/Ancient.sol"
        ));
    }

    #[test]
    fn test_validate_keys() {
        let selector = selector_with_cwnat_pin();
        selector
            .overrides()
            .validate_keys(["contracts/CWNat.sol", "contracts/CWNatDelegate.sol"])
            .unwrap();
        let err = selector
            .overrides()
            .validate_keys(["contracts/CWNat.sol"])
            .unwrap_err();
        assert!(matches!(err, SolcError::UnknownOverrideKey(_)));
    }

    proptest! {
        #[test]
        fn prop_override_always_wins(runs in 1u32..10_000) {
            let mut overrides = OverrideTable::new();
            overrides
                .insert("contracts/Pinned.sol", profile("0.5.17", runs))
                .unwrap();
            let selector = CompilerSelector::new(default_list(), overrides);
            let selection = selector.resolve("contracts/Pinned.sol").unwrap();
            prop_assert!(selection.is_pinned());
            prop_assert_eq!(selection.profiles()[0].optimizer().runs, runs);
        }

        #[test]
        fn prop_defaults_order_preserved(patches in proptest::collection::vec(0u64..100, 1..8)) {
            let profiles: Vec<_> = patches
                .iter()
                .map(|p| Arc::new(CompilerProfile::new(
                    Version::new(0, 8, *p),
                    OptimizerSettings::STANDARD,
                )))
                .collect();
            let defaults = DefaultCompilerList::new(profiles.clone()).unwrap();
            let selector = CompilerSelector::new(defaults, OverrideTable::new());
            let selection = selector.resolve("contracts/Other.sol").unwrap();
            let resolved: Vec<_> = selection.profiles().iter().map(|p| p.version().clone()).collect();
            let declared: Vec<_> = profiles.iter().map(|p| p.version().clone()).collect();
            prop_assert_eq!(resolved, declared);
        }
    }
}
