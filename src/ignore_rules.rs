//! `.gitignore` handling for a workspace directory.
//!
//! Matching is delegated to the `ignore` crate so that negations, anchored
//! patterns and directory patterns behave the way git users expect.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{IoResultExt, Result, WorkspaceError};

pub const IGNORE_FILE: &str = ".gitignore";

const PYTHON_TEMPLATE: &str = "\
__pycache__/
*.py[cod]
*$py.class
.Python
env/
venv/
.env
.venv
*.egg-info/
dist/
build/
.pytest_cache/
.mypy_cache/
.coverage
htmlcov/
.tox/
*.log
";

const NODE_TEMPLATE: &str = "\
node_modules/
npm-debug.log*
yarn-debug.log*
yarn-error.log*
.pnpm-debug.log*
.env
.env.local
dist/
build/
coverage/
.DS_Store
";

const RUST_TEMPLATE: &str = "\
/target/
**/*.rs.bk
*.pdb
.DS_Store
";

/// Built-in ignore file contents by language name
pub fn template(name: &str) -> Option<&'static str> {
    match name.to_ascii_lowercase().as_str() {
        "python" => Some(PYTHON_TEMPLATE),
        "node" | "javascript" | "typescript" => Some(NODE_TEMPLATE),
        "rust" => Some(RUST_TEMPLATE),
        _ => None,
    }
}

fn ignore_path(root: &Path) -> PathBuf {
    root.join(IGNORE_FILE)
}

/// Build a matcher from the root `.gitignore`. Unparseable lines are logged and skipped.
pub fn load_matcher(root: &Path) -> Gitignore {
    let path = ignore_path(root);
    if !path.exists() {
        return Gitignore::empty();
    }

    let mut builder = GitignoreBuilder::new(root);
    if let Some(err) = builder.add(&path) {
        tracing::warn!("ignoring bad pattern in {:?}: {}", path, err);
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("failed to build ignore rules from {:?}: {}", path, err);
        Gitignore::empty()
    })
}

/// Whether a workspace-relative file path is excluded by `matcher`
pub fn is_ignored(matcher: &Gitignore, rel_path: &str) -> bool {
    matcher
        .matched_path_or_any_parents(rel_path, false)
        .is_ignore()
}

/// Contents of the ignore file, or `None` if there is none
pub fn list(root: &Path) -> Result<Option<String>> {
    let path = ignore_path(root);
    match fs::read_to_string(&path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).at(&path),
    }
}

/// Append patterns that are not present yet; returns the ones actually added
pub fn add_patterns(root: &Path, patterns: &[String]) -> Result<Vec<String>> {
    let mut lines: Vec<String> = list(root)?
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    let mut added = Vec::new();
    for pattern in patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        if !lines.iter().any(|l| l == pattern) {
            lines.push(pattern.to_string());
            added.push(pattern.to_string());
        }
    }

    let path = ignore_path(root);
    fs::write(&path, lines.join("\n") + "\n").at(&path)?;
    Ok(added)
}

/// Overwrite the ignore file with a built-in template
pub fn create_from_template(root: &Path, name: &str) -> Result<()> {
    let content = template(name).ok_or_else(|| WorkspaceError::UnknownTemplate(name.to_string()))?;
    let path = ignore_path(root);
    fs::write(&path, content).at(&path)?;
    Ok(())
}
