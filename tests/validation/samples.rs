use std::fs;
use std::path::{Path, PathBuf};

use nexus_check::parsing;
use nexus_check::validation;

fn nexus_files(dir: &Path) -> Vec<PathBuf> {
    assert!(dir.exists(), "{:?} directory missing", dir);

    let entries = fs::read_dir(dir).expect("Failed to read directory");

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();

        if path
            .extension()
            .and_then(|s| s.to_str())
            == Some("nex")
        {
            files.push(path);
        }
    }

    assert!(!files.is_empty(), "No .nex files found in {:?}", dir);
    files
}

#[test]
fn ensure_samples_pass() {
    let files = nexus_files(Path::new("tests/samples/"));

    let mut failures = Vec::new();

    for file in &files {
        let content = parsing::load(&file)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

        let report = validation::check(&content);
        if !report
            .diagnostics
            .is_empty()
        {
            println!("File {:?} produced diagnostics: {:?}", file, report.diagnostics);
            failures.push(file.clone());
        }
    }

    if !failures.is_empty() {
        panic!(
            "Sample files should validate cleanly, but {} files did not",
            failures.len()
        );
    }
}

#[test]
fn ensure_broken_fail() {
    let files = nexus_files(Path::new("tests/broken/"));

    let mut unexpected_successes = Vec::new();

    for file in &files {
        let content = parsing::load(&file)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

        let report = validation::check(&content);
        if report
            .diagnostics
            .is_empty()
        {
            println!("File {:?} unexpectedly validated cleanly", file);
            unexpected_successes.push(file.clone());
        }
    }

    if !unexpected_successes.is_empty() {
        panic!(
            "Broken files should produce diagnostics, but {} files passed",
            unexpected_successes.len()
        );
    }
}

#[test]
fn interleaved_sample_statistics() {
    let file = Path::new("tests/samples/interleaved.nex");
    let content = parsing::load(file).expect("Failed to load interleaved sample");

    let report = validation::check(&content);
    assert_eq!(report.statistics.declared_taxa, Some(3));
    assert_eq!(report.statistics.declared_characters, Some(24));
    assert_eq!(report.statistics.taxa, 3);
    assert_eq!(report.statistics.max_sequence_length, 24);

    let (_, matrix) = parsing::parse(&content);
    assert!(matrix
        .get("O'Brien [strain 2]")
        .is_some());
}

#[test]
fn missing_file() {
    let result = parsing::load(Path::new("tests/samples/nonexistent.nex"));
    match result {
        Err(error) => assert_eq!(error.problem, "File not found"),
        Ok(_) => panic!("Loading a missing file should fail"),
    }
}
