use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("outline-parser")
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn treeviz_is_the_default_format() {
    let mut cmd = cargo_bin_cmd!("outline");
    cmd.arg(fixture_path("journal.md"));

    let output_pred = predicate::str::starts_with("⧉ Secure Aggregation")
        .and(predicate::str::contains("├─ § Secure Aggregation for Federat... [section]"))
        .and(predicate::str::contains("§ I. INTRODUCTION [introduction]"))
        .and(predicate::str::contains("│ └─ § B. Threat Model [subsection]"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn json_output_carries_genre_and_confidence() {
    let mut cmd = cargo_bin_cmd!("outline");
    cmd.arg(fixture_path("thesis.md")).arg("--format").arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"genre\": \"thesis\"").and(predicate::str::contains("\"confidence\": 0.")));
}

#[test]
fn role_query_prints_sections() {
    let mut cmd = cargo_bin_cmd!("outline");
    cmd.arg(fixture_path("conference.md")).arg("--role").arg("subsubsection");

    cmd.assert()
        .success()
        .stdout("### Tie Breaking\n\nThe first matching rule wins.\n\n");
}

#[test]
fn forced_genre_by_legacy_name() {
    let mut cmd = cargo_bin_cmd!("outline");
    cmd.arg(fixture_path("journal.md"))
        .arg("--genre")
        .arg("JournalPaperStrategy")
        .arg("--format")
        .arg("metadata");

    cmd.assert().success().stdout(
        predicate::str::starts_with("genre: journal\n")
            .and(predicate::str::contains("confidence").not())
            .and(predicate::str::contains("index_terms: Index Terms—Federated learning")),
    );
}

#[test]
fn unknown_genre_lists_available_ones() {
    let mut cmd = cargo_bin_cmd!("outline");
    cmd.arg(fixture_path("journal.md")).arg("--genre").arg("poster");

    cmd.assert().failure().stderr(predicate::str::contains(
        "genre 'poster' not found. Available genres: thesis, conference, journal",
    ));
}

#[test]
fn out_of_range_threshold_is_rejected() {
    let mut cmd = cargo_bin_cmd!("outline");
    cmd.arg(fixture_path("journal.md")).arg("--threshold").arg("1.5");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument"));
}

#[test]
fn unknown_format_is_rejected() {
    let mut cmd = cargo_bin_cmd!("outline");
    cmd.arg(fixture_path("journal.md")).arg("--format").arg("pdf");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Format 'pdf' not found"));
}

#[test]
fn directory_inputs_are_walked_in_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixture_path("journal.md"), dir.path().join("b.md")).unwrap();
    fs::copy(fixture_path("conference.md"), dir.path().join("a.md")).unwrap();
    fs::write(dir.path().join("notes.txt"), "# Abstract\n").unwrap();

    let mut cmd = cargo_bin_cmd!("outline");
    cmd.arg(dir.path()).arg("--role").arg("abstract");

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();

    let a = stdout.find("a.md <==").unwrap();
    let b = stdout.find("b.md <==").unwrap();
    assert!(a < b);
    assert!(!stdout.contains("notes.txt"));
    assert!(stdout.contains("# Abstract\n\nWe present a method for outlining papers.\n\n"));
}

#[test]
fn crlf_files_are_detected() {
    let dir = tempfile::tempdir().unwrap();
    let source = fs::read_to_string(fixture_path("conference.md")).unwrap();
    let paper = dir.path().join("paper.md");
    fs::write(&paper, source.replace('\n', "\r\n")).unwrap();

    let mut cmd = cargo_bin_cmd!("outline");
    cmd.arg(&paper).arg("--format").arg("metadata");

    cmd.assert().success().stdout(
        predicate::str::starts_with("genre: conference\n")
            .and(predicate::str::contains("title: Learning to Outline Scientific Papers\n")),
    );
}

#[test]
fn config_file_sets_the_format() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[output]\nformat = \"markdown\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("outline");
    cmd.arg(fixture_path("conference.md")).arg("--config").arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "# Learning to Outline Scientific Papers\n\n# Abstract\n\nWe present",
        ));
}

#[test]
fn list_genres_and_formats() {
    cargo_bin_cmd!("outline")
        .arg("--list-genres")
        .assert()
        .success()
        .stdout(predicate::str::contains("thesis").and(predicate::str::contains("journal")));

    cargo_bin_cmd!("outline")
        .arg("--list-formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("treeviz").and(predicate::str::contains("yaml")));
}
