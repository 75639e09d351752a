//! Operations that touch files in the workspace directory itself.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use walkdir::WalkDir;

use super::{normalize, Workspace};
use crate::error::{IoResultExt, Result, WorkspaceError};
use crate::ignore_rules;
use crate::storage::META_DIR;

/// Snapshot of what would go into the next commit and what is not tracked
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusReport {
    pub branch: String,
    pub staged: Vec<String>,
    pub untracked: Vec<String>,
    pub clean: bool,
}

/// Read a file for staging: UTF-8 text verbatim, anything else base64-encoded.
/// The flag is true for base64 payloads.
fn read_content(path: &Path) -> Result<(String, bool)> {
    let bytes = fs::read(path).at(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok((text, false)),
        Err(e) => Ok((STANDARD.encode(e.into_bytes()), true)),
    }
}

/// Every file under `root`, as sorted `/`-separated relative paths, skipping
/// workspace metadata, `.git` and anything matched by the ignore file
fn walk_files(root: &Path) -> Result<Vec<String>> {
    let matcher = ignore_rules::load_matcher(root);
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            !(e.depth() == 1 && e.file_type().is_dir() && (e.file_name() == META_DIR || e.file_name() == ".git"))
        });

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            WorkspaceError::Io {
                path,
                source: e.into(),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if ignore_rules::is_ignored(&matcher, &relative) {
            tracing::debug!("skipping ignored file {}", relative);
            continue;
        }
        files.push(relative);
    }

    Ok(files)
}

/// Move every key equal to `source` or under `source/` so it sits under
/// `destination` instead
fn rekey(entries: &mut BTreeMap<String, String>, source: &str, destination: &str) {
    let prefix = format!("{}/", source);
    let moved: Vec<String> = entries
        .keys()
        .filter(|k| k.as_str() == source || k.starts_with(&prefix))
        .cloned()
        .collect();

    for key in moved {
        if let Some(value) = entries.remove(&key) {
            entries.insert(format!("{}{}", destination, &key[source.len()..]), value);
        }
    }
}

impl Workspace {
    /// Stage files from the workspace directory. `.` stages every file that is
    /// not ignored; other patterns name a single file. Every pattern is
    /// resolved and read before the staging area changes.
    pub fn add_paths(&mut self, patterns: &[String]) -> Result<Vec<String>> {
        let root = self.path().to_path_buf();
        let mut files = Vec::new();

        for pattern in patterns {
            let paths = if pattern.trim() == "." {
                walk_files(&root)?
            } else {
                let path = normalize(pattern)?;
                if !root.join(&path).is_file() {
                    return Err(WorkspaceError::NotFound(path));
                }
                vec![path]
            };

            for path in paths {
                let (content, encoded) = read_content(&root.join(&path))?;
                if encoded {
                    tracing::debug!("staging {} as base64", path);
                }
                files.push((path, content));
            }
        }

        let added: Vec<String> = files.iter().map(|(path, _)| path.clone()).collect();
        self.update(|state| {
            state.staging_area.extend(files);
            Ok(())
        })?;
        tracing::info!("added {} file(s) to staging in {}", added.len(), self.name);
        Ok(added)
    }

    /// Stop tracking `paths`. Unless `cached`, the files are also deleted from disk.
    pub fn remove(&mut self, paths: &[String], cached: bool) -> Result<Vec<String>> {
        let normalized = paths
            .iter()
            .map(|p| normalize(p))
            .collect::<Result<Vec<_>>>()?;

        if !cached {
            for path in &normalized {
                let full = self.path().join(path);
                if full.is_dir() {
                    fs::remove_dir_all(&full).at(&full)?;
                } else if full.exists() {
                    fs::remove_file(&full).at(&full)?;
                }
            }
        }

        self.update(|state| {
            for path in &normalized {
                state.tracked_files.remove(path);
                state.staging_area.remove(path);
            }
            Ok(())
        })?;
        Ok(normalized)
    }

    /// Move a file or directory inside the workspace and re-key the tracked
    /// and staged entries at or below it
    pub fn rename(&mut self, source: &str, destination: &str) -> Result<(String, String)> {
        let source = normalize(source)?;
        let destination = normalize(destination)?;
        let from = self.path().join(&source);
        let to = self.path().join(&destination);

        if !from.exists() {
            return Err(WorkspaceError::NotFound(source));
        }
        if destination.starts_with(&format!("{}/", source)) {
            return Err(WorkspaceError::InvalidPath(destination));
        }
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).at(parent)?;
        }
        fs::rename(&from, &to).at(&from)?;

        let rekeyed = self.update(|state| {
            rekey(&mut state.tracked_files, &source, &destination);
            rekey(&mut state.staging_area, &source, &destination);
            Ok(())
        });
        if let Err(e) = rekeyed {
            // Put the file back so disk and state keep agreeing
            if let Err(undo) = fs::rename(&to, &from) {
                tracing::warn!("could not move {:?} back to {:?}: {}", to, from, undo);
            }
            return Err(e);
        }

        Ok((source, destination))
    }

    /// Staged paths plus files on disk that are neither staged nor tracked
    pub fn status(&self) -> Result<StatusReport> {
        let staged: Vec<String> = self.staging().keys().cloned().collect();
        let untracked: Vec<String> = walk_files(self.path())?
            .into_iter()
            .filter(|p| !self.tracked().contains_key(p) && !self.staging().contains_key(p))
            .collect();

        Ok(StatusReport {
            branch: self.state.current_branch.clone(),
            clean: staged.is_empty() && untracked.is_empty(),
            staged,
            untracked,
        })
    }

    /// Seed the workspace directory with a README and/or an ignore file template.
    /// Returns the files written.
    pub fn init(&mut self, readme: bool, ignore_template: Option<&str>) -> Result<Vec<String>> {
        let mut created = Vec::new();

        if let Some(template) = ignore_template {
            ignore_rules::create_from_template(self.path(), template)?;
            created.push(ignore_rules::IGNORE_FILE.to_string());
        }

        if readme {
            let path = self.path().join("README.md");
            fs::write(&path, format!("# {}\n", self.name)).at(&path)?;
            created.push("README.md".to_string());
        }

        self.persist()?;
        Ok(created)
    }
}
