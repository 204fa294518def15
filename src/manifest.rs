//! Manifest loading: parse the declarative YAML item list into typed
//! declarations, validating entry by entry.
//!
//! This is the only place where untrusted YAML is parsed. Entries missing a
//! required field are carried through as [`InvalidEntry`] records so the run
//! can report them; they are never silently dropped and never abort the run.
//! Only an unreadable or unparsable manifest file is a load error, which the
//! caller treats as a precondition failure.
//!
//! Accepted schema:
//!
//! ```yaml
//! workspace: 2f1bc1f0-...        # optional, informational
//! items:
//!   - name: Sales Analysis
//!     type: Notebook
//!     path: notebooks/SalesAnalysis
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// A named, typed unit of content declared for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDeclaration {
    pub name: String,
    pub type_name: String,
    /// Path relative to the repository root.
    pub path: String,
}

/// A manifest entry that failed per-entry validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEntry {
    /// Zero-based position in the manifest's item list.
    pub index: usize,
    /// Declared name, possibly empty when the name itself was missing.
    pub name: String,
    pub reason: String,
}

/// Parsed manifest: ordered valid declarations plus per-entry failures.
#[derive(Debug, Default)]
pub struct Manifest {
    pub workspace: Option<String>,
    pub declarations: Vec<ArtifactDeclaration>,
    pub invalid: Vec<InvalidEntry>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    workspace: Option<String>,
    #[serde(default)]
    items: Vec<RawEntry>,
}

// Fields default to empty so a missing field fails that entry, not the file.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    type_name: String,
    #[serde(default)]
    path: String,
}

/// Load and validate the manifest file.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let path_ref = path.as_ref();
    info!(manifest_path = ?path_ref, "Loading manifest from file");

    let content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, manifest_path = ?path_ref, "Failed to read manifest file");
            return Err(anyhow::anyhow!(
                "Failed to read manifest file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let raw: RawManifest = match serde_yaml::from_str(&content) {
        Ok(raw) => raw,
        Err(e) => {
            error!(error = ?e, manifest_path = ?path_ref, "Failed to parse manifest YAML");
            return Err(anyhow::anyhow!("Failed to parse manifest YAML: {e}"));
        }
    };

    let mut manifest = Manifest {
        workspace: raw.workspace,
        ..Manifest::default()
    };

    for (index, entry) in raw.items.into_iter().enumerate() {
        let mut missing: Vec<&str> = Vec::new();
        if entry.name.trim().is_empty() {
            missing.push("name");
        }
        if entry.type_name.trim().is_empty() {
            missing.push("type");
        }
        if entry.path.trim().is_empty() {
            missing.push("path");
        }
        if missing.is_empty() {
            manifest.declarations.push(ArtifactDeclaration {
                name: entry.name,
                type_name: entry.type_name,
                path: entry.path,
            });
        } else {
            let reason = format!("missing required field(s): {}", missing.join(", "));
            warn!(index, name = %entry.name, %reason, "Manifest entry failed validation");
            manifest.invalid.push(InvalidEntry {
                index,
                name: entry.name,
                reason,
            });
        }
    }

    info!(
        declarations = manifest.declarations.len(),
        invalid = manifest.invalid.len(),
        "Manifest loaded"
    );
    Ok(manifest)
}
