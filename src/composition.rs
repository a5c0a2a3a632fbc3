//src/composition.rs

use ahash::AHashMap;

use crate::types::FeatureValue;

/// The 20 standard amino acids, in the order their frequencies are emitted.
/// U, B, Z, X and anything else are ignored.
pub const CANONICAL_AMINO_ACIDS: [char; 20] = [
    'G', 'P', 'A', 'V', 'L', 'I', 'M', 'C', 'F', 'Y',
    'W', 'H', 'K', 'R', 'Q', 'N', 'E', 'D', 'S', 'T',
];

/// Residue counts over the canonical alphabet for one stretch of sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionVector {
    /// Count per canonical residue, in `CANONICAL_AMINO_ACIDS` order.
    pub counts: [usize; 20],
    /// Sum of `counts`; non-canonical residues are not included.
    pub total: usize,
}

impl CompositionVector {
    pub fn compute(residues: &str) -> Self {
        let mut tally: AHashMap<char, usize> = AHashMap::new();
        for c in residues.chars() {
            *tally.entry(c).or_insert(0) += 1;
        }

        let mut counts = [0usize; 20];
        for (slot, aa) in counts.iter_mut().zip(CANONICAL_AMINO_ACIDS) {
            *slot = tally.get(&aa).copied().unwrap_or(0);
        }
        let total = counts.iter().sum();

        Self { counts, total }
    }

    /// Relative frequencies; all zero when no canonical residue was seen.
    pub fn frequencies(&self) -> [f64; 20] {
        let mut out = [0.0; 20];
        if self.total > 0 {
            for (f, &c) in out.iter_mut().zip(self.counts.iter()) {
                *f = c as f64 / self.total as f64;
            }
        }
        out
    }

    /// Values as they go into the feature line: absent residues are a
    /// literal `0`, present ones their frequency.
    pub fn feature_values(&self) -> impl Iterator<Item = FeatureValue> + '_ {
        self.counts.iter().map(move |&c| {
            if c == 0 {
                FeatureValue::Zero
            } else {
                FeatureValue::Real(c as f64 / self.total as f64)
            }
        })
    }
}

/// The first `min(window, len)` characters of `residues`.
pub fn leading_window(residues: &str, window: usize) -> &str {
    match residues.char_indices().nth(window) {
        Some((byte_idx, _)) => &residues[..byte_idx],
        None => residues,
    }
}

/// The last `min(window, len)` characters of `residues`.
pub fn trailing_window(residues: &str, window: usize) -> &str {
    let len = residues.chars().count();
    let skip = len.saturating_sub(window);
    match residues.char_indices().nth(skip) {
        Some((byte_idx, _)) => &residues[byte_idx..],
        None => "",
    }
}
