use std::fs;
use std::path::Path;

use featureextraction_rs::composition::CANONICAL_AMINO_ACIDS;
use featureextraction_rs::{
    extract_features, ExtractionConfig, FeatureError, PeptideProperties, PropertyError,
    PropertyProvider, FEATURE_COUNT,
};

/// Constant descriptors, failing only on sequences without residues.
struct FixedProperties;

impl PropertyProvider for FixedProperties {
    fn molecular_weight(&self, r: &str) -> Result<f64, PropertyError> {
        if r.is_empty() {
            return Err(PropertyError::EmptySequence);
        }
        Ok(1000.5)
    }
    fn isoelectric_point(&self, _: &str) -> Result<f64, PropertyError> {
        Ok(6.0)
    }
    fn aliphatic_index(&self, _: &str) -> Result<f64, PropertyError> {
        Ok(80.0)
    }
    fn average_hydropathy(&self, _: &str) -> Result<f64, PropertyError> {
        Ok(-0.5)
    }
    fn instability_index(&self, _: &str) -> Result<f64, PropertyError> {
        Ok(35.25)
    }
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn feature_lines(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("features"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn numbered_records(n: usize) -> String {
    (0..n).map(|i| format!(">seq{i}\nMKTAYIAKQR\n")).collect()
}

#[test]
fn two_class_scenario() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "A.fasta", ">a1\nACDEFG\n");
    write(dir.path(), "B.fasta", ">b1\nGGGGGG\n");

    let summary = extract_features(dir.path(), &ExtractionConfig::default(), FixedProperties).unwrap();
    assert_eq!(summary.labels.get("A.fasta").unwrap().get(), 1);
    assert_eq!(summary.labels.get("B.fasta").unwrap().get(), 2);

    let lines = feature_lines(dir.path());
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("1 1:6 "), "{}", lines[0]);
    assert!(lines[1].starts_with("2 1:6 "), "{}", lines[1]);

    // B is pure glycine: 1.0 at G's slot, 0 at the other 19 global slots
    let glycine = CANONICAL_AMINO_ACIDS.iter().position(|&c| c == 'G').unwrap() + 2;
    let tokens: Vec<&str> = lines[1].split(' ').collect();
    for idx in 2..=21 {
        let expected = if idx == glycine {
            format!("{idx}:1.0")
        } else {
            format!("{idx}:0")
        };
        assert_eq!(tokens[idx], expected);
    }
    assert!(lines[1].ends_with("62:1000.5 63:6.0 64:80.0 65:-0.5 66:35.25"));
}

#[test]
fn every_line_has_indices_one_to_sixty_six() {
    let dir = tempfile::tempdir().unwrap();
    let long = "ACDEFGHIKLMNPQRSTVWY".repeat(7);
    write(
        dir.path(),
        "mixed.fasta",
        &format!(">short\nW\n>odd\nXXBZUAC\n>long\n{long}\n"),
    );

    extract_features(dir.path(), &ExtractionConfig::default(), FixedProperties).unwrap();
    for line in feature_lines(dir.path()) {
        let indices: Vec<usize> = line
            .split(' ')
            .skip(1)
            .map(|pair| pair.split_once(':').unwrap().0.parse().unwrap())
            .collect();
        assert_eq!(indices, (1..=FEATURE_COUNT).collect::<Vec<_>>());
    }
}

#[test]
fn file_without_records_still_gets_a_label() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.fasta", "no header here\nACDEF\n");
    write(dir.path(), "b.fasta", ">b\nKK\n");

    let summary = extract_features(dir.path(), &ExtractionConfig::default(), FixedProperties).unwrap();
    assert_eq!(summary.labels.get("a.fasta").unwrap().get(), 1);
    assert_eq!(summary.labels.get("b.fasta").unwrap().get(), 2);
    let lines = feature_lines(dir.path());
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("2 1:2 "));
}

#[test]
fn default_cap_truncates_to_150_records() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "many.fasta", &numbered_records(200));

    let summary = extract_features(dir.path(), &ExtractionConfig::default(), FixedProperties).unwrap();
    assert_eq!(feature_lines(dir.path()).len(), 150);
    assert_eq!(summary.records_written, 150);
    assert_eq!(summary.records_truncated, 50);
}

#[test]
fn cap_is_configurable() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "many.fasta", &numbered_records(20));

    let config = ExtractionConfig::default().with_max_records_per_file(5);
    extract_features(dir.path(), &config, FixedProperties).unwrap();
    assert_eq!(feature_lines(dir.path()).len(), 5);
}

#[test]
fn failing_record_is_skipped_and_processing_continues() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.fasta", ">ok1\nACD\n>empty\n>ok2\nKKK\n");
    write(dir.path(), "b.fasta", ">ok3\nGG\n");

    let summary = extract_features(dir.path(), &ExtractionConfig::default(), FixedProperties).unwrap();
    assert_eq!(summary.records_written, 3);
    assert_eq!(summary.records_skipped, 1);
    let lines = feature_lines(dir.path());
    assert!(lines[0].starts_with("1 1:3 "));
    assert!(lines[1].starts_with("1 1:3 "));
    assert!(lines[2].starts_with("2 1:2 "));
}

#[test]
fn unreadable_file_is_skipped_without_consuming_a_label() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.fasta", ">a\nAC\n");
    fs::write(dir.path().join("b.fasta"), [b'>', b'x', b'\n', 0xff, 0xfe, b'\n']).unwrap();
    write(dir.path(), "c.fasta", ">c\nGG\n");

    let summary = extract_features(dir.path(), &ExtractionConfig::default(), FixedProperties).unwrap();
    assert_eq!(summary.failed_files.len(), 1);
    assert!(summary.labels.get("b.fasta").is_none());
    assert_eq!(summary.labels.get("c.fasta").unwrap().get(), 2);
    assert_eq!(summary.legend(), "a.fasta: 1\nc.fasta: 2\n");
}

#[test]
fn reruns_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "kinase.fasta", ">k1\nMKVLAAGIVGLLLAQ\n>k2\nMSTNPKPQRKTKRNTNRRPQDVKFPGG\n");
    write(dir.path(), "toxin.fasta", ">t1\nLECHNQQSSQPPTTKTCSGETNCYKKWWSDHR\n");

    let config = ExtractionConfig::default();
    extract_features(dir.path(), &config, PeptideProperties).unwrap();
    let first = fs::read(dir.path().join("features")).unwrap();
    fs::remove_file(dir.path().join("features")).unwrap();
    extract_features(dir.path(), &config, PeptideProperties).unwrap();
    let second = fs::read(dir.path().join("features")).unwrap();
    assert_eq!(first, second);
    assert_eq!(String::from_utf8(first).unwrap().lines().count(), 3);
}

#[test]
fn existing_output_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.fasta", ">a\nAC\n");
    write(dir.path(), "features", "stale line\n");

    extract_features(dir.path(), &ExtractionConfig::default(), FixedProperties).unwrap();
    let lines = feature_lines(dir.path());
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("1 1:2 "));
}

#[test]
fn non_matching_entries_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "readme.txt", ">a\nAC\n");
    fs::create_dir(dir.path().join("nested.fasta")).unwrap();
    write(dir.path(), "real.fasta", ">r\nWW\n");

    let summary = extract_features(dir.path(), &ExtractionConfig::default(), FixedProperties).unwrap();
    assert_eq!(summary.labels.len(), 1);
    assert_eq!(summary.files.len(), 1);
}

#[test]
fn missing_directory_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent");
    let err = extract_features(&missing, &ExtractionConfig::default(), FixedProperties).unwrap_err();
    assert!(matches!(err, FeatureError::Configuration(_)));
    assert!(!missing.exists());
}

#[test]
fn unwritable_output_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.fasta", ">a\nAC\n");
    fs::create_dir(dir.path().join("features")).unwrap();

    let result = extract_features(dir.path(), &ExtractionConfig::default(), FixedProperties);
    assert!(matches!(result, Err(FeatureError::OutputSink { .. })));
    assert!(dir.path().join("features").is_dir());
}

#[test]
fn failed_records_count_toward_the_cap() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.fasta", ">e1\nXX\n>e2\nXX\n>ok\nAC\n");

    let config = ExtractionConfig::default().with_max_records_per_file(2);
    let summary = extract_features(dir.path(), &config, PeptideProperties).unwrap();
    assert_eq!(summary.records_written, 0);
    assert_eq!(summary.records_skipped, 2);
    assert_eq!(summary.records_truncated, 1);
    assert!(feature_lines(dir.path()).is_empty());
    assert_eq!(summary.labels.get("a.fasta").unwrap().get(), 1);
}
