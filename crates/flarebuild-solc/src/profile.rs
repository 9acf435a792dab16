//! Compiler profile value types.

use std::collections::BTreeSet;
use std::fmt;

use semver::Version;
use serde::Serialize;

/// Optimizer settings of a compiler profile.
///
/// `runs` trades deployment bytecode size against runtime gas cost; under the
/// legacy 0.5.x compilers it can also change the compiled bytecode enough to
/// disturb storage layout, which is why some contracts pin [`Self::LOWEST`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct OptimizerSettings {
    pub enabled: bool,
    pub runs: u32,
}

impl OptimizerSettings {
    /// The shared policy applied to new contracts.
    pub const STANDARD: OptimizerSettings = OptimizerSettings {
        enabled: true,
        runs: 200,
    };

    /// One optimizer run, matching the settings historical contracts were
    /// deployed with. Pinning this keeps their bytecode shape and storage
    /// layout stable across toolchain upgrades.
    pub const LOWEST: OptimizerSettings = OptimizerSettings {
        enabled: true,
        runs: 1,
    };
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for OptimizerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.enabled {
            write!(f, "optimizer runs {}", self.runs)
        } else {
            write!(f, "optimizer off")
        }
    }
}

/// A compiler artifact the build driver asks solc to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputArtifact {
    Abi,
    Metadata,
    StorageLayout,
    #[serde(rename = "evm.bytecode")]
    EvmBytecode,
    #[serde(rename = "evm.deployedBytecode")]
    EvmDeployedBytecode,
}

impl fmt::Display for OutputArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputArtifact::Abi => "abi",
            OutputArtifact::Metadata => "metadata",
            OutputArtifact::StorageLayout => "storageLayout",
            OutputArtifact::EvmBytecode => "evm.bytecode",
            OutputArtifact::EvmDeployedBytecode => "evm.deployedBytecode",
        })
    }
}

/// One compiler version with its settings. Immutable once defined.
///
/// There is deliberately no `Deserialize` impl: profiles enter the system
/// through [`CompilerProfile::new`], which pins the storage-layout artifact
/// into the output selection. Proxy upgrades are checked against that
/// artifact, so no profile may omit it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct CompilerProfile {
    version: Version,
    optimizer: OptimizerSettings,
    output_selection: BTreeSet<OutputArtifact>,
}

impl CompilerProfile {
    pub fn new(version: Version, optimizer: OptimizerSettings) -> Self {
        let output_selection = BTreeSet::from([
            OutputArtifact::Abi,
            OutputArtifact::StorageLayout,
            OutputArtifact::EvmBytecode,
            OutputArtifact::EvmDeployedBytecode,
        ]);
        Self {
            version,
            optimizer,
            output_selection,
        }
    }

    /// Request an additional artifact on top of the standard selection.
    pub fn with_artifact(mut self, artifact: OutputArtifact) -> Self {
        self.output_selection.insert(artifact);
        self
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn optimizer(&self) -> OptimizerSettings {
        self.optimizer
    }

    pub fn output_selection(&self) -> &BTreeSet<OutputArtifact> {
        &self.output_selection
    }

    /// solc standard-json `outputSelection` fragment for this profile,
    /// requesting the selected artifacts for every contract in every file.
    pub fn output_selection_json(&self) -> serde_json::Value {
        let artifacts: Vec<String> = self
            .output_selection
            .iter()
            .map(ToString::to_string)
            .collect();
        serde_json::json!({ "*": { "*": artifacts } })
    }
}

impl fmt::Display for CompilerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solc {} ({})", self.version, self.optimizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> CompilerProfile {
        CompilerProfile::new(Version::new(0, 8, 17), OptimizerSettings::STANDARD)
    }

    #[test]
    fn test_storage_layout_always_requested() {
        assert!(
            profile()
                .output_selection()
                .contains(&OutputArtifact::StorageLayout)
        );
    }

    #[test]
    fn test_extra_artifact_keeps_standard_selection() {
        let p = profile().with_artifact(OutputArtifact::Metadata);
        assert!(p.output_selection().contains(&OutputArtifact::Metadata));
        assert!(p.output_selection().contains(&OutputArtifact::StorageLayout));
        assert!(p.output_selection().contains(&OutputArtifact::EvmBytecode));
    }

    #[test]
    fn test_output_selection_json_shape() {
        let json = profile().output_selection_json();
        let artifacts = json["*"]["*"].as_array().unwrap();
        assert!(
            artifacts
                .iter()
                .any(|a| a.as_str() == Some("storageLayout"))
        );
        assert!(
            artifacts
                .iter()
                .any(|a| a.as_str() == Some("evm.deployedBytecode"))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(profile().to_string(), "solc 0.8.17 (optimizer runs 200)");
        let off = CompilerProfile::new(
            Version::new(0, 5, 17),
            OptimizerSettings {
                enabled: false,
                runs: 0,
            },
        );
        assert_eq!(off.to_string(), "solc 0.5.17 (optimizer off)");
    }
}
