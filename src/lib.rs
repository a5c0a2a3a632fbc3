// src/lib.rs
pub mod types;
pub mod error;
pub mod config;
pub mod fasta;
pub mod composition;
pub mod properties;
pub mod features;
pub mod labels;
pub mod output;

use std::fs;
use std::path::{Path, PathBuf};

pub use crate::config::ExtractionConfig;
pub use crate::error::{FeatureError, FeatureResult, PropertyError};
pub use crate::features::{FeatureVectorBuilder, FEATURE_COUNT, LOCAL_WINDOW};
pub use crate::labels::LabelAssigner;
pub use crate::properties::{PeptideProperties, PropertyProvider};
pub use crate::types::{FeatureValue, FeatureVector, Label, SequenceRecord};

use crate::fasta::read_fasta_records;
use crate::output::OutputWriter;

/// What happened to one selected input file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub file_name: String,
    /// `None` when the file could not be read; such files take no label.
    pub label: Option<Label>,
    pub records_written: usize,
    /// Records whose descriptors could not be computed.
    pub records_skipped: usize,
    /// Records beyond the per-file cap.
    pub records_truncated: usize,
    pub error: Option<String>,
}

/// Outcome of a complete run.
#[derive(Debug, Clone)]
pub struct ExtractionSummary {
    pub output_path: PathBuf,
    pub labels: LabelAssigner,
    pub files: Vec<FileReport>,
    pub records_written: usize,
    pub records_skipped: usize,
    pub records_truncated: usize,
    pub failed_files: Vec<PathBuf>,
}

impl ExtractionSummary {
    /// Legend lines, `<filename>: <label>` in labelling order.
    pub fn legend(&self) -> String {
        output::render_legend(&self.labels)
    }
}

/// Selected input files directly inside `dir`, in processing order.
pub fn list_input_files(dir: &Path, config: &ExtractionConfig) -> FeatureResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(FeatureError::Configuration(format!(
            "{} is not an existing directory",
            dir.display()
        )));
    }

    let entries = fs::read_dir(dir).map_err(|e| {
        FeatureError::Configuration(format!("cannot list {}: {e}", dir.display()))
    })?;

    let mut files: Vec<(String, PathBuf)> = entries
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let raw_name = path.file_name()?;
            let file_name = raw_name.to_string_lossy().into_owned();
            if raw_name.to_str().is_none() {
                log::warn!("{}: file name is not valid UTF-8, using {file_name}", path.display());
            }
            if path.is_file() && file_name != config.output_name && config.selects(&file_name) {
                Some((file_name, path))
            } else {
                None
            }
        })
        .collect();

    if config.sort_entries {
        files.sort_by(|a, b| a.0.cmp(&b.0));
    }
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

/// Extract features for every selected file under `dir` into
/// `dir/<config.output_name>`.
///
/// Equivalent to [`extract_features_with_progress`] with a no-op callback.
pub fn extract_features<P: PropertyProvider>(
    dir: &Path,
    config: &ExtractionConfig,
    provider: P,
) -> FeatureResult<ExtractionSummary> {
    extract_features_with_progress(dir, config, provider, |_| {})
}

/// Like [`extract_features`], calling `on_file` after each input file.
pub fn extract_features_with_progress<P, F>(
    dir: &Path,
    config: &ExtractionConfig,
    provider: P,
    mut on_file: F,
) -> FeatureResult<ExtractionSummary>
where
    P: PropertyProvider,
    F: FnMut(&FileReport),
{
    // 1. Enumerate inputs before the sink exists so it never lists itself
    let inputs = list_input_files(dir, config)?;
    log::info!("{} input file(s) under {}", inputs.len(), dir.display());

    // 2. Open the sink; failure aborts the run
    let mut writer = OutputWriter::create(dir.join(&config.output_name))?;
    let output_path = writer.path().to_path_buf();

    let builder = FeatureVectorBuilder::new(provider);
    let mut labels = LabelAssigner::new();
    let mut files = Vec::with_capacity(inputs.len());
    let mut failed_files = Vec::new();

    // 3. One class per file
    for path in inputs {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::info!("Extracting features from {file_name}");

        let mut report = FileReport {
            file_name: file_name.clone(),
            label: None,
            records_written: 0,
            records_skipped: 0,
            records_truncated: 0,
            error: None,
        };

        let records = match read_fasta_records(&path) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("{e}");
                report.error = Some(e.to_string());
                failed_files.push(path);
                on_file(&report);
                files.push(report);
                continue;
            }
        };

        let label = labels.assign(&file_name);
        report.label = Some(label);
        report.records_truncated = records.len().saturating_sub(config.max_records_per_file);

        for record in records.iter().take(config.max_records_per_file) {
            match builder.build(record, label) {
                Ok(vector) => {
                    writer.write_vector(&vector)?;
                    report.records_written += 1;
                    log::debug!("{}: {}", label, record.identifier);
                }
                Err(e) if !e.is_fatal() => {
                    log::warn!("{file_name}: {e}");
                    report.records_skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        if report.records_truncated > 0 {
            log::info!(
                "{file_name}: kept first {} of {} record(s)",
                config.max_records_per_file,
                records.len()
            );
        }
        on_file(&report);
        files.push(report);
    }

    // 4. Flush; the legend is left to the caller
    let written = writer.finish()?;
    log::info!("wrote {written} feature line(s) to {}", output_path.display());

    Ok(ExtractionSummary {
        output_path,
        records_written: written,
        records_skipped: files.iter().map(|f| f.records_skipped).sum(),
        records_truncated: files.iter().map(|f| f.records_truncated).sum(),
        labels,
        files,
        failed_files,
    })
}
