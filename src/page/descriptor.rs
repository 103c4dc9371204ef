//! Element descriptors read from a page manifest

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::version::types::VersionQuery;

/// One page element whose include snippet tracks a library's latest release
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementDescriptor {
    /// Target element id, also used as the cache key
    pub id: String,
    /// Release listing endpoint
    pub api_url: String,
    pub description: String,
    /// Include URL containing a `${version}` placeholder
    pub url: String,
}

impl ElementDescriptor {
    /// Builds the resolution request for this element
    pub fn query(&self) -> VersionQuery {
        VersionQuery::new(self.id.clone(), self.api_url.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid manifest {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Manifest {
    Page { elements: Vec<ElementDescriptor> },
    List(Vec<ElementDescriptor>),
}

/// Parses a manifest, either `{"elements": [...]}` or a bare array
pub fn parse_manifest(content: &str) -> Result<Vec<ElementDescriptor>, serde_json::Error> {
    let manifest: Manifest = serde_json::from_str(content)?;
    Ok(match manifest {
        Manifest::Page { elements } => elements,
        Manifest::List(elements) => elements,
    })
}

pub fn load_manifest(path: &Path) -> Result<Vec<ElementDescriptor>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
