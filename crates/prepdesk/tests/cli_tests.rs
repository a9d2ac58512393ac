//! Integration tests for the prepdesk CLI
//!
//! These tests verify end-to-end functionality by running actual CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn prepdesk(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("prepdesk").expect("binary should build");
    cmd.current_dir(dir.path());
    cmd
}

fn setup_shelf() -> TempDir {
    let temp = TempDir::new().unwrap();
    prepdesk(&temp).arg("init").assert().success();
    temp
}

fn add_material(temp: &TempDir, title: &str, content_type: &str, url: &str) -> String {
    let output = prepdesk(temp)
        .args([
            "add", "--title", title, "--subject", "physics", "--type", content_type, "--url", url,
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "add failed: {:?}", output);

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    parsed["data"]["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn test_init_creates_data_layout() {
    let temp = TempDir::new().unwrap();
    prepdesk(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized prepdesk shelf"));

    assert!(temp.path().join(".prepdesk/data/materials").exists());
    assert!(temp.path().join(".prepdesk/data/index.json").exists());
    assert!(temp.path().join(".prepdesk/data/events.jsonl").exists());
}

#[test]
fn test_init_respects_data_dir_env() {
    let temp = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("prepdesk").unwrap();
    cmd.current_dir(temp.path())
        .env("PREPDESK_DATA_DIR", "custom-shelf")
        .arg("init")
        .assert()
        .success();

    assert!(temp.path().join("custom-shelf/data/index.json").exists());
}

// ---------------------------------------------------------------------------
// Add / show
// ---------------------------------------------------------------------------

#[test]
fn test_add_and_show_material() {
    let temp = setup_shelf();
    let id = add_material(
        &temp,
        "Laws of Motion",
        "notes",
        "https://drive.google.com/file/d/ABC123/view?usp=sharing",
    );

    prepdesk(&temp)
        .args(["show", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Laws of Motion"))
        .stdout(predicate::str::contains(
            "https://drive.google.com/file/d/ABC123/preview",
        ));
}

#[test]
fn test_show_accepts_unique_prefix() {
    let temp = setup_shelf();
    let id = add_material(&temp, "Prefixed", "pdf", "https://example.com/doc.pdf");

    prepdesk(&temp)
        .args(["show", &id[..8]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prefixed"));
}

#[test]
fn test_add_rejects_unknown_subject() {
    let temp = setup_shelf();
    prepdesk(&temp)
        .args([
            "add",
            "--title",
            "T",
            "--subject",
            "astrology",
            "--type",
            "notes",
            "--url",
            "https://x",
        ])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Unknown subject"));
}

#[test]
fn test_add_rejects_unknown_content_type() {
    let temp = setup_shelf();
    prepdesk(&temp)
        .args([
            "add",
            "--title",
            "T",
            "--subject",
            "physics",
            "--type",
            "slides",
            "--url",
            "https://x",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unknown content type"));
}

#[test]
fn test_show_unknown_material_exits_not_found() {
    let temp = setup_shelf();
    prepdesk(&temp)
        .args(["show", "feedbeef"])
        .assert()
        .failure()
        .code(3);
}

// ---------------------------------------------------------------------------
// List and visibility
// ---------------------------------------------------------------------------

#[test]
fn test_list_filters_by_type() {
    let temp = setup_shelf();
    add_material(&temp, "Notes A", "notes", "https://example.com/a");
    add_material(&temp, "Video B", "video", "https://youtu.be/b1234");

    prepdesk(&temp)
        .args(["list", "--type", "notes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Notes A"))
        .stdout(predicate::str::contains("Video B").not());
}

#[test]
fn test_hidden_materials_need_all_flag() {
    let temp = setup_shelf();
    let id = add_material(&temp, "Secret notes", "notes", "https://example.com/s");

    prepdesk(&temp)
        .args(["visibility", id.as_str(), "off"])
        .assert()
        .success();

    prepdesk(&temp)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Secret notes").not());

    prepdesk(&temp)
        .args(["list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Secret notes"));
}

#[test]
fn test_list_json_envelope() {
    let temp = setup_shelf();
    add_material(&temp, "Enveloped", "pyq", "https://example.com/q");

    let output = prepdesk(&temp).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["data"][0]["title"], "Enveloped");
    assert_eq!(parsed["data"][0]["contentType"], "pyq");
}

// ---------------------------------------------------------------------------
// Update and delete
// ---------------------------------------------------------------------------

#[test]
fn test_update_material_title() {
    let temp = setup_shelf();
    let id = add_material(&temp, "Old", "notes", "https://example.com/n");

    prepdesk(&temp)
        .args(["update", id.as_str(), "--title", "New"])
        .assert()
        .success();

    prepdesk(&temp)
        .args(["show", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("New"));
}

#[test]
fn test_delete_material() {
    let temp = setup_shelf();
    let id = add_material(&temp, "Doomed", "pdf", "https://example.com/d");

    prepdesk(&temp).args(["delete", id.as_str()]).assert().success();

    prepdesk(&temp)
        .args(["show", id.as_str()])
        .assert()
        .failure()
        .code(3);
}

// ---------------------------------------------------------------------------
// Access policy
// ---------------------------------------------------------------------------

#[test]
fn test_configured_admins_gate_mutations() {
    let temp = setup_shelf();
    std::fs::write(
        temp.path().join(".prepdesk/config.toml"),
        "[access]\nadmins = [\"admin@example.com\"]\n",
    )
    .unwrap();

    // Unlisted actor is refused
    prepdesk(&temp)
        .args([
            "add",
            "--actor",
            "student@example.com",
            "--title",
            "T",
            "--subject",
            "physics",
            "--type",
            "notes",
            "--url",
            "https://x",
        ])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("not an administrator"));

    // Configured admin is allowed
    prepdesk(&temp)
        .args([
            "add",
            "--actor",
            "admin@example.com",
            "--title",
            "T",
            "--subject",
            "physics",
            "--type",
            "notes",
            "--url",
            "https://x",
        ])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// Subjects, embed, events
// ---------------------------------------------------------------------------

#[test]
fn test_subjects_lists_catalog() {
    let temp = setup_shelf();
    prepdesk(&temp)
        .arg("subjects")
        .assert()
        .success()
        .stdout(predicate::str::contains("physics"))
        .stdout(predicate::str::contains("counselling"));
}

#[test]
fn test_embed_normalizes_and_passes_through() {
    let temp = setup_shelf();

    prepdesk(&temp)
        .args(["embed", "https://drive.google.com/file/d/ABC123/view"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://drive.google.com/file/d/ABC123/preview",
        ));

    prepdesk(&temp)
        .args(["embed", "https://my-own-server.com/image.png"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://my-own-server.com/image.png",
        ));
}

#[test]
fn test_embed_json_includes_video_id() {
    let temp = setup_shelf();

    let output = prepdesk(&temp)
        .args(["embed", "https://www.youtube.com/watch?v=xyz789", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["data"]["video_id"], "xyz789");
    assert_eq!(
        parsed["data"]["embed_url"],
        "https://www.youtube.com/embed/xyz789"
    );
}

#[test]
fn test_events_record_material_lifecycle() {
    let temp = setup_shelf();
    let id = add_material(&temp, "Tracked", "notes", "https://example.com/t");

    prepdesk(&temp)
        .args(["visibility", id.as_str(), "off"])
        .assert()
        .success();
    prepdesk(&temp).args(["delete", id.as_str()]).assert().success();

    prepdesk(&temp)
        .arg("events")
        .assert()
        .success()
        .stdout(predicate::str::contains("material_added"))
        .stdout(predicate::str::contains("visibility_changed"))
        .stdout(predicate::str::contains("material_deleted"));
}
