use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{FeatureError, FeatureResult};
use crate::labels::LabelAssigner;
use crate::types::FeatureVector;

/// Owns the `features` sink for one run.
///
/// Dropping the writer on an error path still flushes what was buffered and
/// closes the file; `finish` is the checked variant for the success path.
pub struct OutputWriter {
    path: PathBuf,
    sink: BufWriter<File>,
    lines: usize,
}

impl OutputWriter {
    /// Create (or truncate) the output file.
    pub fn create<P: AsRef<Path>>(path: P) -> FeatureResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| FeatureError::OutputSink {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            sink: BufWriter::new(file),
            lines: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    /// Append one newline-terminated feature line.
    pub fn write_vector(&mut self, vector: &FeatureVector) -> FeatureResult<()> {
        writeln!(self.sink, "{vector}").map_err(|source| FeatureError::OutputSink {
            path: self.path.clone(),
            source,
        })?;
        self.lines += 1;
        Ok(())
    }

    /// Flush and close. Returns the number of lines written.
    pub fn finish(mut self) -> FeatureResult<usize> {
        self.sink.flush().map_err(|source| FeatureError::OutputSink {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.lines)
    }
}

/// `<filename>: <label>` per processed file, first-seen order.
pub fn render_legend(labels: &LabelAssigner) -> String {
    let mut output = String::new();
    for (name, label) in labels.iter() {
        writeln!(output, "{name}: {label}").unwrap();
    }
    output
}
