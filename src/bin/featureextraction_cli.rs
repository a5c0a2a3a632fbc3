use std::path::PathBuf;
use std::process;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use featureextraction_rs::config::{DEFAULT_EXTENSION, DEFAULT_MAX_RECORDS_PER_FILE, DEFAULT_OUTPUT_NAME};
use featureextraction_rs::{extract_features_with_progress, ExtractionConfig, FeatureError, PeptideProperties};

/// Turn a folder of per-class FASTA files into a sparse, labeled feature file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Folder containing the input sequence files, one file per class
    dir: PathBuf,

    /// Records taken from each input file
    #[arg(long, default_value_t = DEFAULT_MAX_RECORDS_PER_FILE)]
    max_records: usize,

    /// File-name suffix of the input files
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Name of the output file written inside the folder
    #[arg(long, default_value = DEFAULT_OUTPUT_NAME)]
    output: String,

    /// Keep the filesystem's listing order instead of sorting by name
    #[arg(long)]
    unsorted: bool,
}

fn spinner(color: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template(&format!("{{spinner:.{color}}} {{msg}}"))
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // clap exits with a usage error unless exactly one folder is given
    let cli = Cli::parse();

    let config = ExtractionConfig::default()
        .with_max_records_per_file(cli.max_records)
        .with_extension(cli.extension)
        .with_output_name(cli.output)
        .with_sorted_entries(!cli.unsorted);

    let progress = spinner("green");
    progress.set_message(format!("Scanning {}...", cli.dir.display()));

    let result = extract_features_with_progress(&cli.dir, &config, PeptideProperties::new(), |report| {
        let line = match (&report.label, &report.error) {
            (Some(label), _) => format!(
                "Extracting features from {} (label {}): {} record(s){}{}",
                report.file_name,
                label,
                report.records_written,
                if report.records_skipped > 0 {
                    format!(", {} skipped", report.records_skipped)
                } else {
                    String::new()
                },
                if report.records_truncated > 0 {
                    format!(", {} over the limit", report.records_truncated)
                } else {
                    String::new()
                },
            ),
            (None, Some(err)) => format!("Error reading {}: {}", report.file_name, err),
            (None, None) => format!("Skipped {}", report.file_name),
        };
        progress.println(line);
        progress.tick();
    });

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            progress.finish_and_clear();
            eprintln!("Error - {e}");
            let code = match e {
                FeatureError::Configuration(_) => 2,
                _ => 1,
            };
            process::exit(code);
        }
    };

    progress.finish_with_message(format!(
        "Wrote {} feature line(s) to {}",
        summary.records_written,
        summary.output_path.display()
    ));

    println!("Labelling:");
    print!("{}", summary.legend());
    println!("Done.");
}
