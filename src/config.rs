//src/config.rs

/// Knobs of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Records taken from each input file; the rest are skipped.
    pub max_records_per_file: usize,
    /// File-name suffix selecting the input files.
    pub extension: String,
    /// Name of the output file created inside the input directory.
    pub output_name: String,
    /// Sort directory entries by file name before labelling.
    /// When false the filesystem's listing order is used.
    pub sort_entries: bool,
}

pub const DEFAULT_MAX_RECORDS_PER_FILE: usize = 150;
pub const DEFAULT_EXTENSION: &str = ".fasta";
pub const DEFAULT_OUTPUT_NAME: &str = "features";

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_records_per_file: DEFAULT_MAX_RECORDS_PER_FILE,
            extension: DEFAULT_EXTENSION.to_string(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            sort_entries: true,
        }
    }
}

impl ExtractionConfig {
    pub fn with_max_records_per_file(mut self, max: usize) -> Self {
        self.max_records_per_file = max;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    pub fn with_sorted_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }

    pub fn selects(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.extension)
    }
}
