//! Artifact matching: join in-scope declarations onto the repository tree.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::manifest::ArtifactDeclaration;
use crate::scope::Scope;

/// A declaration joined with a concrete filesystem location.
///
/// Never mutated after creation; consumed once by the publish executor. A
/// declaration whose path is absent on disk, or whose directory holds no
/// files, still yields one record with `exists == false` so it can be
/// reported as skipped rather than vanish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub name: String,
    pub type_name: String,
    /// The path as written in the manifest.
    pub declared_path: String,
    /// `repo_root` joined with the declared path (or a file under it, for
    /// expanded directories).
    pub absolute_path: PathBuf,
    pub exists: bool,
}

/// Resolve declarations against the repository root.
///
/// Declarations outside `scope` are filtered out. A declaration pointing at a
/// directory expands into one artifact per regular file found by a recursive
/// walk, inheriting the parent's name and type; the directory itself is a
/// grouping convenience, not a deployable unit. Output follows declaration
/// order, then walk order (entries sorted per directory so one run's logs are
/// stable).
pub fn match_declarations(
    declarations: &[ArtifactDeclaration],
    repo_root: &Path,
    scope: &Scope,
) -> Vec<ResolvedArtifact> {
    let mut resolved = Vec::new();

    for declaration in declarations {
        if !scope.contains(&declaration.type_name) {
            debug!(
                name = %declaration.name,
                item_type = %declaration.type_name,
                "Declaration outside scope, filtered out"
            );
            continue;
        }

        let absolute = repo_root.join(&declaration.path);
        if absolute.is_dir() {
            let mut files = Vec::new();
            collect_files(&absolute, &mut files);
            debug!(
                name = %declaration.name,
                path = %absolute.display(),
                files = files.len(),
                "Expanded directory declaration"
            );
            // A directory with nothing deployable still gets one record, so
            // the declaration shows up in the report as skipped instead of
            // vanishing.
            if files.is_empty() {
                resolved.push(ResolvedArtifact {
                    name: declaration.name.clone(),
                    type_name: declaration.type_name.clone(),
                    declared_path: declaration.path.clone(),
                    absolute_path: absolute,
                    exists: false,
                });
                continue;
            }
            for file in files {
                resolved.push(ResolvedArtifact {
                    name: declaration.name.clone(),
                    type_name: declaration.type_name.clone(),
                    declared_path: declaration.path.clone(),
                    absolute_path: file,
                    exists: true,
                });
            }
        } else {
            let exists = absolute.is_file();
            if !exists {
                debug!(
                    name = %declaration.name,
                    path = %absolute.display(),
                    "Declared path not found on disk"
                );
            }
            resolved.push(ResolvedArtifact {
                name: declaration.name.clone(),
                type_name: declaration.type_name.clone(),
                declared_path: declaration.path.clone(),
                absolute_path: absolute,
                exists,
            });
        }
    }

    resolved
}

fn collect_files(dir: &Path, results: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!(error = ?e, path = %dir.display(), "Failed to read directory during walk");
            return;
        }
    };
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    paths.sort();
    for path in paths {
        if path.is_dir() {
            collect_files(&path, results);
        } else if path.is_file() {
            results.push(path);
        }
    }
}
