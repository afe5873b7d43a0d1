use assert_cmd::{cargo::cargo_bin_cmd, Command};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a Command for mindspark
pub fn mindspark() -> Command {
    cargo_bin_cmd!("mindspark")
}

/// Get a Command for mindspark pointed at `vault`
pub fn mindspark_in(vault: &Path) -> Command {
    let mut cmd = mindspark();
    cmd.arg("--vault").arg(vault).env_remove("MINDSPARK_VAULT");
    cmd
}

/// Write a note (creating parent folders)
pub fn write_note(vault: &Path, rel: &str, content: &str) {
    let path = vault.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A vault with a few notes across folders
#[allow(dead_code)]
pub fn setup_vault() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_note(root, "Ideas/alpha.md", "---\ntitle: Alpha Idea\n---\nThe first idea");
    write_note(root, "Ideas/beta.md", "# Beta\n\nSecond idea with a [link](http://x)");
    write_note(root, "Archive/old.md", "Old stuff");
    write_note(root, "Archive/2024/older.md", "Older stuff");
    write_note(root, "inbox.md", "Loose thought");
    dir
}

/// Run with `--format json` and parse stdout
#[allow(dead_code)]
pub fn run_json(vault: &Path, args: &[&str]) -> Value {
    let output = mindspark_in(vault)
        .args(["--format", "json"])
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "mindspark {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Paths of the notes in a batch JSON object
#[allow(dead_code)]
pub fn note_paths(batch: &Value) -> Vec<String> {
    batch["notes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|note| note["path"].as_str().unwrap().to_string())
        .collect()
}
