use crate::domain::model::ContractArtifact;
use crate::domain::ports::ArtifactSource;
use crate::utils::error::{DeployError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads build-tool artifacts laid out as `<root>/**/<Name>.json`.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn find(&self, contract_name: &str) -> Result<Vec<PathBuf>> {
        let file_name = format!("{}.json", contract_name);
        let mut matches = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                let path = entry.path();
                if entry.file_type()?.is_dir() {
                    pending.push(path);
                } else if path.file_name().and_then(|n| n.to_str()) == Some(file_name.as_str()) {
                    matches.push(path);
                }
            }
        }

        matches.sort();
        Ok(matches)
    }
}

impl ArtifactSource for FsArtifactStore {
    fn load(&self, contract_name: &str) -> Result<ContractArtifact> {
        if !self.root.is_dir() {
            return Err(DeployError::artifact(
                contract_name,
                format!("artifacts directory {} does not exist", self.root.display()),
            ));
        }

        let matches = self.find(contract_name)?;
        let path = match matches.as_slice() {
            [] => {
                return Err(DeployError::artifact(
                    contract_name,
                    format!("no artifact found under {}", self.root.display()),
                ))
            }
            [path] => path,
            many => {
                let listed: Vec<String> = many.iter().map(|p| p.display().to_string()).collect();
                return Err(DeployError::artifact(
                    contract_name,
                    format!("ambiguous name, candidates: {}", listed.join(", ")),
                ));
            }
        };

        tracing::debug!("Reading artifact {}", path.display());
        let artifact: ContractArtifact = serde_json::from_slice(&fs::read(path)?)?;

        if artifact.contract_name != contract_name {
            return Err(DeployError::artifact(
                contract_name,
                format!("{} declares contractName {}", path.display(), artifact.contract_name),
            ));
        }

        let code = artifact.bytecode.trim_start_matches("0x");
        if code.is_empty() {
            return Err(DeployError::artifact(
                contract_name,
                "bytecode is empty (abstract contract or interface?)",
            ));
        }
        if artifact.has_link_references() {
            return Err(DeployError::artifact(
                contract_name,
                "bytecode has unlinked library references",
            ));
        }
        if artifact.constructor_inputs() > 0 {
            return Err(DeployError::artifact(
                contract_name,
                format!(
                    "constructor expects {} argument(s), deployment passes none",
                    artifact.constructor_inputs()
                ),
            ));
        }

        Ok(artifact)
    }
}
