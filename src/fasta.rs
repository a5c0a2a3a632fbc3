use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::Lines;

use flate2::read::MultiGzDecoder;

use crate::error::{FeatureError, FeatureResult};
use crate::types::SequenceRecord;

/// Lazy iterator over the records of an in-memory FASTA text.
///
/// A `>` line opens a record whose identifier is the rest of that line.
/// Following lines are concatenated verbatim until the next `>` line.
/// Anything before the first `>` line is ignored.
pub struct FastaRecords<'a> {
    lines: Lines<'a>,
    pending_id: Option<String>,
}

impl<'a> FastaRecords<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            pending_id: None,
        }
    }
}

impl Iterator for FastaRecords<'_> {
    type Item = SequenceRecord;

    fn next(&mut self) -> Option<SequenceRecord> {
        let mut residues = String::new();
        loop {
            match self.lines.next() {
                Some(line) => {
                    if let Some(id) = line.strip_prefix('>') {
                        if let Some(prev) = self.pending_id.replace(id.to_string()) {
                            return Some(SequenceRecord::new(prev, residues));
                        }
                    } else if self.pending_id.is_some() {
                        residues.push_str(line);
                    }
                }
                None => {
                    return self
                        .pending_id
                        .take()
                        .map(|id| SequenceRecord::new(id, residues));
                }
            }
        }
    }
}

/// Parse FASTA text. Each call starts from the top of `text`.
pub fn parse_fasta(text: &str) -> FastaRecords<'_> {
    FastaRecords::new(text)
}

/// Read a whole FASTA file into memory; `.gz` files are decompressed.
pub fn read_fasta_records<P: AsRef<Path>>(path: P) -> FeatureResult<Vec<SequenceRecord>> {
    let path = path.as_ref();
    let read_err = |source| FeatureError::Read {
        path: path.to_path_buf(),
        source,
    };

    let f = File::open(path).map_err(read_err)?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let mut reader: Box<dyn Read> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };

    // invalid UTF-8 surfaces as io::ErrorKind::InvalidData
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(read_err)?;

    let records: Vec<SequenceRecord> = parse_fasta(&text).collect();
    log::debug!("{}: parsed {} record(s)", path.display(), records.len());
    Ok(records)
}
