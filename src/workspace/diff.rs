use serde::Serialize;

use super::{normalize, Workspace};
use crate::error::Result;

/// Lines of each staged file shown before the rest is summarized
pub const PREVIEW_LINES: usize = 10;

/// Preview of one staged file's content
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StagedDiff {
    pub path: String,
    pub lines: Vec<String>,
    /// Lines beyond the preview that were left out
    pub omitted: usize,
}

impl Workspace {
    /// Preview staged content, optionally for one path only.
    /// Files are listed in path order.
    pub fn staged_diff(&self, file: Option<&str>) -> Result<Vec<StagedDiff>> {
        let filter = file.map(normalize).transpose()?;

        let diffs = self
            .staging()
            .iter()
            .filter(|(path, _)| match &filter {
                Some(only) => only == *path,
                None => true,
            })
            .map(|(path, content)| {
                let all: Vec<&str> = content.split('\n').collect();
                StagedDiff {
                    path: path.clone(),
                    lines: all.iter().take(PREVIEW_LINES).map(|l| l.to_string()).collect(),
                    omitted: all.len().saturating_sub(PREVIEW_LINES),
                }
            })
            .collect();
        Ok(diffs)
    }
}
