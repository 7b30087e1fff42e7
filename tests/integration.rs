use std::path::Path;
use std::process::{Command, Output};

fn speclint(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_speclint"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn json_stdout(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "invalid json ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn clean_corpus_passes_check() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "docs/a.md",
        "| GAP-001 | a gap |\n\nSee GAP-001 and [notes](./b.md).\n",
    );
    write(tmp.path(), "docs/b.md", "notes\n");

    let output = speclint(tmp.path(), &["check"]);
    assert!(
        output.status.success(),
        "check failed: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No issues found."));
}

#[test]
fn cross_file_duplicate_definition_is_reported_by_ids() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "docs/a.md", "| GAP-001 | first |\n");
    write(tmp.path(), "docs/b.md", "| GAP-001 | second |\n");

    let output = speclint(tmp.path(), &["ids", "--json"]);
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert!(json["duplicates"].get("GAP-001").is_some());
    assert_eq!(json["next_id"], "GAP-002");
}

#[test]
fn fenced_identifiers_appear_in_no_report() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "docs/a.md",
        "prose\n\n```\n| GAP-999 | example only |\nGAP-999\n```\n",
    );

    let ids = speclint(tmp.path(), &["ids", "--json"]);
    assert!(ids.status.success());
    let json = json_stdout(&ids);
    assert!(json["all_ids"].as_object().unwrap().is_empty());
    assert_eq!(json["next_id"], "GAP-001");

    let check = speclint(tmp.path(), &["check"]);
    assert!(check.status.success());
}

#[test]
fn broken_relative_link_fails_check() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "docs/a.md", "see [spec](./missing.md)\n");

    let output = speclint(tmp.path(), &["check", "--json"]);
    assert_eq!(output.status.code(), Some(1));
    let json = json_stdout(&output);
    assert_eq!(json["summary"]["broken_links"], 1);
    assert_eq!(json["summary"]["total"], 1);
    assert_eq!(json["issues"][0]["type"], "broken_link");
    assert_eq!(json["issues"][0]["target"], "./missing.md");
}

#[test]
fn links_resolve_relative_to_their_source_document() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "docs/dir1/y.md", "target\n");
    write(tmp.path(), "docs/dir1/dir2/doc.md", "see [x](../y.md)\n");

    let output = speclint(tmp.path(), &["check"]);
    assert!(
        output.status.success(),
        "check failed: {}",
        String::from_utf8_lossy(&output.stdout)
    );
}

#[test]
fn changed_files_scope_still_sees_corpus_definitions() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "docs/defs.md", "| GAP-001 | defined here |\n");
    write(tmp.path(), "docs/b.md", "references GAP-001 and GAP-042\n");

    let output = speclint(
        tmp.path(),
        &["check", "--json", "--changed-files", "docs/b.md"],
    );
    assert_eq!(output.status.code(), Some(1));
    let json = json_stdout(&output);

    // GAP-001 is defined in defs.md even though only b.md is checked;
    // GAP-042 is defined nowhere.
    assert_eq!(json["summary"]["undefined_references"], 1);
    assert_eq!(json["files_checked"], 1);
    assert_eq!(json["issues"][0]["gap_id"], "GAP-042");
}

#[test]
fn terminology_variant_is_flagged_outside_fences_only() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "docs/terminology.json",
        r#"[{"canonical": "Secret Key", "variants": ["SecKey"]}]"#,
    );
    write(
        tmp.path(),
        "docs/a.md",
        "store the SecKey safely\n\n```\nSecKey = load()\n```\n",
    );

    let output = speclint(tmp.path(), &["check", "--json"]);
    assert_eq!(output.status.code(), Some(1));
    let json = json_stdout(&output);
    assert_eq!(json["summary"]["terminology"], 1);
    assert_eq!(json["issues"][0]["type"], "terminology");
    assert_eq!(json["issues"][0]["found"], "SecKey");
    assert_eq!(json["issues"][0]["canonical"], "Secret Key");
    assert_eq!(json["issues"][0]["line"], 1);
}

#[test]
fn check_output_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "docs/a.md",
        "| GAP-001 | a |\nsee GAP-777 and [gone](./gone.md)\n",
    );

    let first = speclint(tmp.path(), &["check", "--json"]);
    let second = speclint(tmp.path(), &["check", "--json"]);
    assert_eq!(first.status.code(), second.status.code());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn missing_docs_root_is_a_fatal_input_error() {
    let tmp = tempfile::tempdir().unwrap();

    let check = speclint(tmp.path(), &["check"]);
    assert_eq!(check.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&check.stderr).contains("not a directory"));

    let ids = speclint(tmp.path(), &["ids"]);
    assert_eq!(ids.status.code(), Some(1));
}

#[test]
fn ids_human_output_lists_definitions_and_next_id() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "docs/a.md", "| GAP-001 | a |\n## GAP-003: detail\n");

    let output = speclint(tmp.path(), &["ids"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("GAP-001"));
    assert!(stdout.contains("Next available ID: GAP-004"));

    let quiet = speclint(tmp.path(), &["ids", "--check-only"]);
    let quiet_stdout = String::from_utf8_lossy(&quiet.stdout);
    assert!(!quiet_stdout.contains("Next available ID"));
}

#[test]
fn unreadable_document_is_skipped_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "docs/good.md", "| GAP-001 | fine |\n");
    // Invalid UTF-8 cannot be read as lines; the file must be skipped.
    std::fs::write(tmp.path().join("docs/bad.md"), [0xff, 0xfe, 0x00]).unwrap();

    let output = speclint(tmp.path(), &["check", "--json"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json = json_stdout(&output);
    assert_eq!(json["files_checked"], 1);
}
