//src/features.rs

use crate::composition::{leading_window, trailing_window, CompositionVector};
use crate::error::{FeatureError, FeatureResult, PropertyError};
use crate::properties::PropertyProvider;
use crate::types::{FeatureValue, FeatureVector, Label, SequenceRecord};

/// Residues in each of the two local composition windows.
pub const LOCAL_WINDOW: usize = 50;

/// Number of indexed features per line: length, 3 x 20 composition, 5 descriptors.
pub const FEATURE_COUNT: usize = 1 + 3 * 20 + 5;

/// Hands out 1-based feature indices for a single vector.
struct IndexedFeatures {
    next: u32,
    features: Vec<(u32, FeatureValue)>,
}

impl IndexedFeatures {
    fn new() -> Self {
        Self {
            next: 1,
            features: Vec::with_capacity(FEATURE_COUNT),
        }
    }

    fn push(&mut self, value: FeatureValue) {
        self.features.push((self.next, value));
        self.next += 1;
    }

    fn extend<I: IntoIterator<Item = FeatureValue>>(&mut self, values: I) {
        for v in values {
            self.push(v);
        }
    }
}

/// Assembles the fixed-layout sparse vector for one record:
///
/// | index  | feature                                  |
/// |--------|------------------------------------------|
/// | 1      | sequence length                          |
/// | 2–21   | global composition                       |
/// | 22–41  | composition of the first 50 residues     |
/// | 42–61  | composition of the last 50 residues      |
/// | 62     | molecular weight                         |
/// | 63     | isoelectric point                        |
/// | 64     | aliphatic index                          |
/// | 65     | average hydropathy                       |
/// | 66     | instability index                        |
pub struct FeatureVectorBuilder<P> {
    provider: P,
}

impl<P: PropertyProvider> FeatureVectorBuilder<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn build(&self, record: &SequenceRecord, label: Label) -> FeatureResult<FeatureVector> {
        let residues = record.residues.as_str();

        // Descriptors first so a failing record costs no composition work.
        let descriptors = self
            .descriptors(residues)
            .map_err(|source| FeatureError::RecordProcessing {
                identifier: record.identifier.clone(),
                source,
            })?;

        let mut out = IndexedFeatures::new();
        out.push(FeatureValue::Integer(record.len()));
        out.extend(CompositionVector::compute(residues).feature_values());
        out.extend(CompositionVector::compute(leading_window(residues, LOCAL_WINDOW)).feature_values());
        out.extend(CompositionVector::compute(trailing_window(residues, LOCAL_WINDOW)).feature_values());
        out.extend(descriptors.into_iter().map(FeatureValue::Real));

        debug_assert_eq!(out.features.len(), FEATURE_COUNT);
        Ok(FeatureVector {
            label,
            features: out.features,
        })
    }

    /// Convenience wrapper returning the serialized line.
    pub fn build_line(&self, record: &SequenceRecord, label: Label) -> FeatureResult<String> {
        self.build(record, label).map(|fv| fv.to_string())
    }

    fn descriptors(&self, residues: &str) -> Result<[f64; 5], PropertyError> {
        let p = &self.provider;
        let values = [
            ("molecular weight", p.molecular_weight(residues)?),
            ("isoelectric point", p.isoelectric_point(residues)?),
            ("aliphatic index", p.aliphatic_index(residues)?),
            ("average hydropathy", p.average_hydropathy(residues)?),
            ("instability index", p.instability_index(residues)?),
        ];
        let mut out = [0.0; 5];
        for (slot, (descriptor, value)) in out.iter_mut().zip(values) {
            if !value.is_finite() {
                return Err(PropertyError::NonFinite { descriptor, value });
            }
            *slot = value;
        }
        Ok(out)
    }
}
