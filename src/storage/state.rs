use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Branch a fresh workspace starts on
pub const DEFAULT_BRANCH: &str = "main";

/// The mutable state stored in state.json
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// Maps relative paths to pending content (text, or base64 for binary files)
    #[serde(default)]
    pub staging_area: BTreeMap<String, String>, // path -> content

    /// Maps relative paths to the SHA-1 of their content at last commit
    #[serde(default)]
    pub tracked_files: BTreeMap<String, String>, // path -> digest

    #[serde(default = "default_branch")]
    pub current_branch: String,

    #[serde(default)]
    pub remote_url: Option<String>,
}

fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

impl State {
    /// Empty state on the given branch
    pub fn new(branch: impl Into<String>) -> Self {
        State {
            staging_area: BTreeMap::new(),
            tracked_files: BTreeMap::new(),
            current_branch: branch.into(),
            remote_url: None,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        State::new(DEFAULT_BRANCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let state: State = serde_json::from_str("{}").unwrap();
        assert_eq!(state, State::default());
        assert_eq!(state.current_branch, "main");
        assert!(state.remote_url.is_none());
    }

    #[test]
    fn test_json_shape() {
        let mut state = State::new("dev");
        state
            .staging_area
            .insert("a.txt".to_string(), "hello".to_string());

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["staging_area"]["a.txt"], "hello");
        assert_eq!(value["current_branch"], "dev");
        assert!(value["tracked_files"].as_object().unwrap().is_empty());
        assert!(value["remote_url"].is_null());
    }
}
