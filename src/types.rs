//src/types.rs

use std::fmt;

/// A minimal representation of one FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub identifier: String,
    pub residues: String,
}

impl SequenceRecord {
    pub fn new(identifier: impl Into<String>, residues: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            residues: residues.into(),
        }
    }

    /// Sequence length in characters (not bytes).
    pub fn len(&self) -> usize {
        self.residues.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// Class label of one input file. Always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(u32);

impl Label {
    pub const FIRST: Label = Label(1);

    /// Returns `None` for 0, labels are positive.
    pub fn new(value: u32) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Label(value))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Label {
        Label(self.0 + 1)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The value half of one `index:value` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    /// Counted quantities such as the sequence length.
    Integer(usize),
    /// A composition entry whose residue never occurred, written as `0`.
    Zero,
    /// Frequencies and biophysical descriptors.
    Real(f64),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FeatureValue::Integer(n) => write!(f, "{n}"),
            FeatureValue::Zero => f.write_str("0"),
            // Shortest round-trip form, but keep reals visibly decimal.
            FeatureValue::Real(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            FeatureValue::Real(v) => write!(f, "{v}"),
        }
    }
}

/// One labeled sparse vector, i.e. one line of the `features` file.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub label: Label,
    /// `(index, value)` pairs, 1-based and strictly increasing.
    pub features: Vec<(u32, FeatureValue)>,
}

impl FeatureVector {
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.features.iter().map(|&(idx, _)| idx)
    }

    pub fn value(&self, index: u32) -> Option<FeatureValue> {
        self.features
            .iter()
            .find(|&&(idx, _)| idx == index)
            .map(|&(_, v)| v)
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)?;
        for (idx, value) in &self.features {
            write!(f, " {idx}:{value}")?;
        }
        Ok(())
    }
}
