//! `artifact`
//!
//! Resolves compiled contract artifacts from a build products directory.
//! Both Truffle (`<dir>/<Name>.json`, `"bytecode": "0x.."`) and Foundry
//! (`<dir>/<Name>.sol/<Name>.json`, `"bytecode": {"object": "0x.."}`) layouts are
//! understood.

use crate::primitives::{
    hex,
    Bytes,
};

use serde::Deserialize;
use serde_json::Value;
use std::path::{
    Path,
    PathBuf,
};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact for {name} not found, searched {searched:?}")]
    NotFound { name: String, searched: Vec<PathBuf> },
    #[error("Failed to read artifact {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed artifact {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Artifact {0} has no creation bytecode")]
    EmptyBytecode(String),
    #[error("Artifact {0} has unlinked library references")]
    UnlinkedBytecode(String),
    #[error("Artifact bytecode is not valid hex")]
    InvalidHex(#[from] hex::FromHexError),
}

#[derive(Deserialize)]
struct ArtifactFile {
    #[serde(rename = "contractName")]
    contract_name: Option<String>,
    #[serde(default)]
    abi: Option<Value>,
    bytecode: BytecodeField,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BytecodeField {
    Hex(String),
    Object { object: String },
}

impl BytecodeField {
    fn as_str(&self) -> &str {
        match self {
            BytecodeField::Hex(code) => code,
            BytecodeField::Object { object } => object,
        }
    }
}

/// A compiled, deployable contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractArtifact {
    pub name: String,
    /// Creation bytecode, constructor included.
    pub bytecode: Bytes,
    /// JSON ABI, when the build output carries one.
    pub abi: Option<Value>,
}

impl ContractArtifact {
    pub fn new(name: impl Into<String>, bytecode: Bytes) -> Self {
        Self {
            name: name.into(),
            bytecode,
            abi: None,
        }
    }

    /// Candidate locations of the artifact for `name` inside `dir`, in lookup order.
    pub fn candidate_paths(dir: &Path, name: &str) -> Vec<PathBuf> {
        vec![
            dir.join(format!("{name}.json")),
            dir.join(format!("{name}.sol")).join(format!("{name}.json")),
        ]
    }

    /// Loads the artifact of contract `name` from the build products in `dir`.
    pub fn load(dir: impl AsRef<Path>, name: &str) -> Result<Self, ArtifactError> {
        let searched = Self::candidate_paths(dir.as_ref(), name);

        let path = searched
            .iter()
            .find(|path| path.is_file())
            .cloned()
            .ok_or_else(|| {
                ArtifactError::NotFound {
                    name: name.to_string(),
                    searched: searched.clone(),
                }
            })?;

        debug!(path = %path.display(), "Loading contract artifact");
        Self::from_file(&path, name)
    }

    /// Parses an artifact file. `name` is used when the file does not carry a contract name.
    pub fn from_file(path: &Path, name: &str) -> Result<Self, ArtifactError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let file: ArtifactFile = serde_json::from_str(&content).map_err(|source| {
            ArtifactError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let name = file.contract_name.unwrap_or_else(|| name.to_string());
        let code = file.bytecode.as_str().trim();
        let code = code.strip_prefix("0x").unwrap_or(code);

        if code.is_empty() {
            return Err(ArtifactError::EmptyBytecode(name));
        }
        // Solidity leaves `__$<hash>$__` placeholders where libraries must be linked
        if code.contains("__") {
            return Err(ArtifactError::UnlinkedBytecode(name));
        }

        let bytecode = Bytes::from(hex::decode(code)?);

        Ok(Self {
            name,
            bytecode,
            abi: file.abi,
        })
    }
}
