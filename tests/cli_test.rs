use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary with an isolated HOME and workspace root
fn run(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_git-workspace"))
        .env("HOME", home)
        .env_remove("GIT_WORKSPACE_ROOT")
        .env_remove("GIT_WORKSPACE_DEFAULT_BRANCH")
        .arg("--root")
        .arg(home.join("workspaces"))
        .args(args)
        .output()
        .expect("Failed to run git-workspace")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn state(home: &Path, dir: &str) -> serde_json::Value {
    let path = home
        .join("workspaces")
        .join(dir)
        .join(".git-workspace/state.json");
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_stage_commit_scenario() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    let out = run(home, &["stage", "octo/repo", "a.txt", "hello"]);
    assert!(out.status.success(), "stage failed: {:?}", out);

    let out = run(home, &["--format", "json", "commit", "octo/repo", "-m", "init"]);
    assert!(out.status.success(), "commit failed: {:?}", out);
    let record: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(record["files"], serde_json::json!(["a.txt"]));

    let state = state(home, "octo_repo");
    assert_eq!(
        state["tracked_files"]["a.txt"],
        "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
    );
    assert!(state["staging_area"].as_object().unwrap().is_empty());
    assert_eq!(state["current_branch"], "main");
    assert!(state["remote_url"].is_null());
}

#[test]
fn test_empty_commit_exits_nonzero() {
    let temp = TempDir::new().unwrap();

    let out = run(temp.path(), &["commit", "repo", "-m", "nothing"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("nothing to commit"));
}

#[test]
fn test_branch_survives_process_restart() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    assert!(run(home, &["checkout", "repo", "feature"]).status.success());

    let out = run(home, &["status", "repo"]);
    assert!(stdout(&out).starts_with("On branch feature\n"));
}

#[test]
fn test_corrupt_state_is_reported() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    assert!(run(home, &["stage", "repo", "a.txt", "x"]).status.success());

    let state_file = home.join("workspaces/repo/.git-workspace/state.json");
    fs::write(&state_file, "{\"staging_area\": {").unwrap();

    let out = run(home, &["status", "repo"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("corrupt workspace state"));
    // The damaged file is left untouched for inspection
    assert_eq!(fs::read_to_string(&state_file).unwrap(), "{\"staging_area\": {");
}

#[test]
fn test_path_traversal_rejected() {
    let temp = TempDir::new().unwrap();

    let out = run(temp.path(), &["stage", "repo", "../escape.txt", "x"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid path"));
}

#[test]
fn test_config_file_default_branch() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    let config_dir = home.join(".config/git-workspace");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.yaml"), "default_branch: trunk\n").unwrap();

    let out = run(home, &["status", "fresh"]);
    assert!(out.status.success(), "status failed: {:?}", out);
    assert!(stdout(&out).starts_with("On branch trunk\n"));
}

#[test]
fn test_add_all_and_stash_pop() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    assert!(run(home, &["init", "repo", "--gitignore", "python"]).status.success());
    let workdir = home.join("workspaces/repo");
    fs::write(workdir.join("app.py"), "print('hi')\n").unwrap();
    fs::write(workdir.join("app.pyc"), [0u8, 1, 2]).unwrap();

    let out = run(home, &["--format", "json", "add", "repo", "."]);
    let added: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(
        added["paths"],
        serde_json::json!([".gitignore", "README.md", "app.py"])
    );

    assert!(run(home, &["stash", "save", "repo"]).status.success());
    assert!(state(home, "repo")["staging_area"]
        .as_object()
        .unwrap()
        .is_empty());

    assert!(run(home, &["stash", "pop", "repo"]).status.success());
    assert_eq!(
        state(home, "repo")["staging_area"]["app.py"],
        "print('hi')\n"
    );
}

#[test]
fn test_mv_directory_keeps_tracking() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();

    assert!(run(home, &["init", "repo", "--no-readme"]).status.success());
    let workdir = home.join("workspaces/repo");
    fs::create_dir_all(workdir.join("dir")).unwrap();
    fs::write(workdir.join("dir/a.txt"), "a").unwrap();
    assert!(run(home, &["add", "repo", "dir/a.txt"]).status.success());
    assert!(run(home, &["commit", "repo", "-m", "add"]).status.success());

    let out = run(home, &["mv", "repo", "dir", "newdir"]);
    assert!(out.status.success(), "mv failed: {:?}", out);

    let tracked = &state(home, "repo")["tracked_files"];
    assert!(tracked["newdir/a.txt"].is_string());
    assert!(tracked.get("dir/a.txt").is_none());

    let out = run(home, &["--format", "json", "status", "repo"]);
    let status: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(status["untracked"], serde_json::json!([]));
}

#[test]
fn test_metadata_paths_rejected() {
    let temp = TempDir::new().unwrap();
    let home = temp.path();
    assert!(run(home, &["stage", "repo", "a.txt", "x"]).status.success());

    let out = run(home, &["add", "repo", ".git-workspace/state.json"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid path"));

    let staged = state(home, "repo")["staging_area"].clone();
    assert_eq!(staged, serde_json::json!({"a.txt": "x"}));
}
