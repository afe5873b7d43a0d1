//! Integration tests for the mindspark CLI
//!
//! These tests run the mindspark binary against temporary vaults.

mod support;

use std::collections::HashSet;
use std::fs;

use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

use support::{mindspark, mindspark_in, note_paths, run_json, setup_vault, write_note};

// ============================================================================
// Help, version and banner
// ============================================================================

#[test]
fn test_help_flag() {
    mindspark()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: mindspark"))
        .stdout(predicate::str::contains("spark"))
        .stdout(predicate::str::contains("exclude"));
}

#[test]
fn test_version_flag() {
    mindspark()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mindspark"));
}

#[test]
fn test_no_subcommand_prints_banner() {
    mindspark()
        .assert()
        .success()
        .stdout(predicate::str::contains("mindspark --help"));
}

// ============================================================================
// Exit codes and error envelopes
// ============================================================================

#[test]
fn test_unknown_format_exit_code_2() {
    mindspark()
        .args(["--format", "invalid", "spark"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_vault_exit_code_3() {
    let dir = tempdir().unwrap();
    mindspark_in(&dir.path().join("missing"))
        .arg("spark")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("vault not found"));
}

#[test]
fn test_missing_vault_json_envelope() {
    let dir = tempdir().unwrap();
    let output = mindspark_in(&dir.path().join("missing"))
        .args(["--format", "json", "spark"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["type"], "vault_not_found");
    assert_eq!(err["error"]["code"], 3);
}

#[test]
fn test_clap_error_json_envelope() {
    let output = mindspark()
        .args(["--format", "json", "spark", "--bogus"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["type"], "usage_error");
}

#[test]
fn test_spark_count_zero_is_usage_error() {
    let vault = setup_vault();
    mindspark_in(vault.path())
        .args(["spark", "--count", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--count"));
}

#[test]
fn test_note_count_out_of_range() {
    let vault = setup_vault();
    for count in ["2", "11"] {
        mindspark_in(vault.path())
            .args(["config", "--note-count", count])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("note count"));
    }

    let settings = run_json(vault.path(), &["config"]);
    assert_eq!(settings["noteCount"], 5);
}

// ============================================================================
// Drawing batches
// ============================================================================

#[test]
fn test_spark_empty_vault() {
    let vault = tempdir().unwrap();
    mindspark_in(vault.path())
        .arg("spark")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes in this vault yet"));

    let batch = run_json(vault.path(), &["spark"]);
    assert_eq!(batch["status"], "empty_library");
    assert_eq!(batch["notes"].as_array().unwrap().len(), 0);
}

#[test]
fn test_spark_draws_distinct_notes_and_records_history() {
    let vault = setup_vault();

    let batch = run_json(vault.path(), &["spark", "--count", "3"]);
    assert_eq!(batch["status"], "drawn");
    let paths = note_paths(&batch);
    assert_eq!(paths.len(), 3);
    assert_eq!(paths.iter().collect::<HashSet<_>>().len(), 3);

    assert!(vault.path().join(".mindspark/data.json").exists());

    let history = run_json(vault.path(), &["history"]);
    let records = history.as_array().unwrap();
    assert_eq!(records.len(), 3);
    for record in records {
        assert_eq!(record["showCount"], 1);
        assert!(paths.contains(&record["path"].as_str().unwrap().to_string()));
        assert!(record["lastShownAt"].as_str().unwrap().ends_with('Z'));
    }
}

#[test]
fn test_spark_count_larger_than_vault() {
    let vault = setup_vault();
    let batch = run_json(vault.path(), &["spark", "--count", "50"]);
    assert_eq!(note_paths(&batch).len(), 5);
}

#[test]
fn test_spark_ignores_hidden_and_non_markdown_files() {
    let vault = tempdir().unwrap();
    write_note(vault.path(), "real.md", "Visible");
    write_note(vault.path(), ".obsidian/workspace.md", "Hidden");
    write_note(vault.path(), "image.png", "not a note");
    write_note(vault.path(), "notes.txt", "not a note");

    let batch = run_json(vault.path(), &["spark"]);
    assert_eq!(note_paths(&batch), vec!["real.md".to_string()]);
}

#[test]
fn test_spark_human_output_shows_title_and_preview() {
    let vault = tempdir().unwrap();
    write_note(
        vault.path(),
        "Ideas/alpha.md",
        "---\ntitle: \"Alpha Idea\"\n---\n**Bold** start of the note",
    );
    write_note(vault.path(), "snippet.md", "```rust\nfn main() {}\n```");
    write_note(vault.path(), "blank.md", "");

    mindspark_in(vault.path())
        .arg("spark")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha Idea"))
        .stdout(predicate::str::contains("Bold start of the note"))
        .stdout(predicate::str::contains("(code note)"))
        .stdout(predicate::str::contains("(empty note)"));
}

#[test]
fn test_data_flag_overrides_location() {
    let vault = setup_vault();
    let elsewhere = tempdir().unwrap();
    let data_path = elsewhere.path().join("spark.json");

    mindspark_in(vault.path())
        .arg("--data")
        .arg(&data_path)
        .arg("spark")
        .assert()
        .success();

    assert!(data_path.exists());
    assert!(!vault.path().join(".mindspark").exists());
}

// ============================================================================
// Open, restore and onboarding
// ============================================================================

#[test]
fn test_open_shows_onboarding_until_dismissed() {
    let vault = setup_vault();

    mindspark_in(vault.path())
        .arg("open")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dismiss-onboarding"));

    mindspark_in(vault.path())
        .args(["config", "--dismiss-onboarding"])
        .assert()
        .success();

    mindspark_in(vault.path())
        .arg("open")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dismiss-onboarding").not());

    let batch = run_json(vault.path(), &["open"]);
    assert_eq!(batch["onboarding"], false);
}

#[test]
fn test_open_restores_last_batch_without_recording() {
    let vault = setup_vault();

    run_json(vault.path(), &["config", "--refresh-on-open", "false"]);
    let drawn = run_json(vault.path(), &["spark", "--count", "3"]);
    let restored = run_json(vault.path(), &["open"]);

    assert_eq!(restored["status"], "restored");
    assert_eq!(note_paths(&restored), note_paths(&drawn));

    let history = run_json(vault.path(), &["history"]);
    for record in history.as_array().unwrap() {
        assert_eq!(record["showCount"], 1);
    }
}

#[test]
fn test_open_restore_skips_deleted_notes() {
    let vault = setup_vault();

    run_json(vault.path(), &["config", "--refresh-on-open", "false"]);
    let drawn = note_paths(&run_json(vault.path(), &["spark", "--count", "3"]));
    fs::remove_file(vault.path().join(&drawn[0])).unwrap();

    let restored = run_json(vault.path(), &["open"]);
    assert_eq!(restored["status"], "restored");
    assert_eq!(note_paths(&restored), drawn[1..].to_vec());
}

#[test]
fn test_open_refreshes_by_default() {
    let vault = setup_vault();
    run_json(vault.path(), &["spark"]);
    let batch = run_json(vault.path(), &["open"]);
    assert_eq!(batch["status"], "drawn");
}

// ============================================================================
// Folder exclusion
// ============================================================================

#[test]
fn test_exclude_folder_hides_its_notes() {
    let vault = setup_vault();

    mindspark_in(vault.path())
        .args(["exclude", "Archive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Excluded Archive"));

    for _ in 0..3 {
        let batch = run_json(vault.path(), &["spark", "--count", "10"]);
        let paths = note_paths(&batch);
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| !p.starts_with("Archive/")));
    }
}

#[test]
fn test_exclude_everything_reports_all_excluded() {
    let vault = tempdir().unwrap();
    write_note(vault.path(), "Archive/a.md", "a");
    write_note(vault.path(), "Archive/b.md", "b");

    run_json(vault.path(), &["exclude", "archive/"]);

    let batch = run_json(vault.path(), &["spark"]);
    assert_eq!(batch["status"], "all_excluded");

    mindspark_in(vault.path())
        .arg("spark")
        .assert()
        .success()
        .stdout(predicate::str::contains("excluded folder"));
}

#[test]
fn test_include_restores_folder() {
    let vault = setup_vault();

    run_json(vault.path(), &["exclude", "Archive"]);
    let result = run_json(vault.path(), &["include", "Archive"]);
    assert_eq!(result["excluded"], false);
    assert_eq!(result["excludedFolders"].as_array().unwrap().len(), 0);

    let batch = run_json(vault.path(), &["spark", "--count", "10"]);
    assert_eq!(note_paths(&batch).len(), 5);
}

#[test]
fn test_exclude_parent_prunes_children() {
    let vault = setup_vault();

    run_json(vault.path(), &["exclude", "Archive/2024"]);
    let result = run_json(vault.path(), &["exclude", "Archive"]);
    assert_eq!(result["excludedFolders"], serde_json::json!(["Archive"]));
}

#[test]
fn test_exclude_blank_folder_is_usage_error() {
    let vault = setup_vault();
    mindspark_in(vault.path())
        .args(["exclude", " / "])
        .assert()
        .code(2);
}

#[test]
fn test_folders_tree() {
    let vault = setup_vault();
    run_json(vault.path(), &["exclude", "Archive"]);

    let tree = run_json(vault.path(), &["folders"]);
    let entries = tree.as_array().unwrap();
    let paths: Vec<_> = entries.iter().map(|e| e["path"].as_str().unwrap()).collect();
    assert_eq!(paths, vec!["Archive", "Archive/2024", "Ideas"]);

    assert_eq!(entries[0]["explicitlyExcluded"], true);
    assert_eq!(entries[1]["parentExcluded"], true);
    assert_eq!(entries[1]["depth"], 2);
    assert_eq!(entries[2]["explicitlyExcluded"], false);

    mindspark_in(vault.path())
        .arg("folders")
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive/ [excluded]"))
        .stdout(predicate::str::contains("  2024/ [excluded by parent]"));
}

#[test]
fn test_folders_children_follow_their_parent() {
    let vault = tempdir().unwrap();
    write_note(vault.path(), "a/x/n.md", "n");
    write_note(vault.path(), "a-b/m.md", "m");
    write_note(vault.path(), "a b/k.md", "k");

    let tree = run_json(vault.path(), &["folders"]);
    let paths: Vec<_> = tree
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(paths, vec!["a", "a/x", "a b", "a-b"]);

    mindspark_in(vault.path())
        .arg("folders")
        .assert()
        .success()
        .stdout(predicate::str::contains("a/\n  x/\na b/\na-b/\n"));
}

// ============================================================================
// History and config
// ============================================================================

#[test]
fn test_history_clear() {
    let vault = setup_vault();
    run_json(vault.path(), &["exclude", "Archive"]);
    run_json(vault.path(), &["spark"]);

    let cleared = run_json(vault.path(), &["history", "--clear"]);
    assert_eq!(cleared["cleared"], 3);

    let history = run_json(vault.path(), &["history"]);
    assert_eq!(history.as_array().unwrap().len(), 0);

    // settings survive a clear
    let settings = run_json(vault.path(), &["config"]);
    assert_eq!(settings["excludedFolders"], serde_json::json!(["Archive"]));
}

#[test]
fn test_history_empty_human() {
    let vault = setup_vault();
    mindspark_in(vault.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes shown yet"));
}

#[test]
fn test_config_round_trip() {
    let vault = setup_vault();

    let settings = run_json(
        vault.path(),
        &["config", "--note-count", "7", "--refresh-on-open", "false"],
    );
    assert_eq!(settings["noteCount"], 7);
    assert_eq!(settings["refreshOnOpen"], false);
    assert_eq!(settings["onboardingDismissed"], false);

    let raw = fs::read_to_string(vault.path().join(".mindspark/data.json")).unwrap();
    let data: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(data["settings"]["noteCount"], 7);
    assert!(data["viewHistory"].is_object());
    assert!(data["lastShownPaths"].is_array());
}

#[test]
fn test_corrupt_data_file_falls_back_to_defaults() {
    let vault = setup_vault();
    write_note(vault.path(), ".mindspark/data.json", "{ not json");

    let settings = run_json(vault.path(), &["config"]);
    assert_eq!(settings["noteCount"], 5);
    assert_eq!(settings["refreshOnOpen"], true);

    let batch = run_json(vault.path(), &["spark"]);
    assert_eq!(note_paths(&batch).len(), 5);
}

#[test]
fn test_vault_from_env() {
    let vault = setup_vault();
    mindspark()
        .env("MINDSPARK_VAULT", vault.path())
        .args(["--format", "json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("noteCount"));
}

// ============================================================================
// Logging
// ============================================================================

#[test]
fn test_verbose_logs_to_stderr() {
    let vault = setup_vault();
    mindspark_in(vault.path())
        .env_remove("MINDSPARK_LOG")
        .env_remove("RUST_LOG")
        .args(["--verbose", "--format", "json", "spark"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args"));
}

#[test]
fn test_default_log_level_is_quiet() {
    let vault = setup_vault();
    mindspark_in(vault.path())
        .env_remove("MINDSPARK_LOG")
        .env_remove("RUST_LOG")
        .arg("spark")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
