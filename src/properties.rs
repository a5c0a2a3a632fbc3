//! Whole-sequence biophysical descriptors.
//!
//! The feature builder only sees the [`PropertyProvider`] trait; the
//! [`PeptideProperties`] implementation below is the stock one.

use crate::error::PropertyError;

/// Five scalar descriptors computed over a complete sequence.
pub trait PropertyProvider {
    fn molecular_weight(&self, residues: &str) -> Result<f64, PropertyError>;
    fn isoelectric_point(&self, residues: &str) -> Result<f64, PropertyError>;
    fn aliphatic_index(&self, residues: &str) -> Result<f64, PropertyError>;
    fn average_hydropathy(&self, residues: &str) -> Result<f64, PropertyError>;
    fn instability_index(&self, residues: &str) -> Result<f64, PropertyError>;
}

impl<T: PropertyProvider + ?Sized> PropertyProvider for &T {
    fn molecular_weight(&self, residues: &str) -> Result<f64, PropertyError> {
        (**self).molecular_weight(residues)
    }
    fn isoelectric_point(&self, residues: &str) -> Result<f64, PropertyError> {
        (**self).isoelectric_point(residues)
    }
    fn aliphatic_index(&self, residues: &str) -> Result<f64, PropertyError> {
        (**self).aliphatic_index(residues)
    }
    fn average_hydropathy(&self, residues: &str) -> Result<f64, PropertyError> {
        (**self).average_hydropathy(residues)
    }
    fn instability_index(&self, residues: &str) -> Result<f64, PropertyError> {
        (**self).instability_index(residues)
    }
}

// Average residue masses (Da), alphabetical one-letter order A..Y.
const RESIDUE_MASS: [f64; 20] = [
    71.0788,  // A
    103.1388, // C
    115.0886, // D
    129.1155, // E
    147.1766, // F
    57.0519,  // G
    137.1411, // H
    113.1594, // I
    128.1741, // K
    113.1594, // L
    131.1926, // M
    114.1038, // N
    97.1167,  // P
    128.1307, // Q
    156.1875, // R
    87.0782,  // S
    101.1051, // T
    99.1326,  // V
    186.2132, // W
    163.1760, // Y
];

const WATER_MASS: f64 = 18.01524;

/// Kyte-Doolittle hydropathy, same order as `RESIDUE_MASS`.
const KYTE_DOOLITTLE: [f64; 20] = [
    1.8, 2.5, -3.5, -3.5, 2.8, -0.4, -3.2, 4.5, -3.9, 3.8,
    1.9, -3.5, -1.6, -3.5, -4.5, -0.8, -0.7, 4.2, -0.9, -1.3,
];

// EMBOSS pKa set
const PKA_NTERM: f64 = 8.6;
const PKA_CTERM: f64 = 3.6;
const PKA_D: f64 = 3.9;
const PKA_E: f64 = 4.1;
const PKA_C: f64 = 8.5;
const PKA_Y: f64 = 10.1;
const PKA_H: f64 = 6.5;
const PKA_K: f64 = 10.8;
const PKA_R: f64 = 12.5;

/// Dipeptide instability weights (Guruprasad et al., 1990).
/// Pairs not listed weigh 1.0.
const DIWV: [(u8, &[(u8, f64)]); 20] = [
    (b'A', &[(b'C', 44.94), (b'D', -7.49), (b'H', -7.49), (b'P', 20.26)]),
    (b'C', &[
        (b'D', 20.26), (b'H', 33.60), (b'L', 20.26), (b'M', 33.60), (b'P', 20.26),
        (b'Q', -6.54), (b'T', 33.60), (b'V', -6.54), (b'W', 24.68),
    ]),
    (b'D', &[(b'F', -6.54), (b'K', -7.49), (b'R', -6.54), (b'S', 20.26), (b'T', -14.03)]),
    (b'E', &[
        (b'C', 44.94), (b'D', 20.26), (b'E', 33.60), (b'H', -6.54), (b'I', 20.26),
        (b'P', 20.26), (b'Q', 20.26), (b'S', 20.26), (b'W', -14.03),
    ]),
    (b'F', &[(b'D', 13.34), (b'K', -14.03), (b'P', 20.26), (b'Y', 33.60)]),
    (b'G', &[
        (b'A', -7.49), (b'E', -6.54), (b'G', 13.34), (b'I', -7.49), (b'K', -7.49),
        (b'N', -7.49), (b'T', -7.49), (b'W', 13.34), (b'Y', -7.49),
    ]),
    (b'H', &[
        (b'F', -9.37), (b'G', -9.37), (b'I', 44.94), (b'K', 24.68), (b'N', 24.68),
        (b'P', -1.88), (b'T', -6.54), (b'W', -1.88), (b'Y', 44.94),
    ]),
    (b'I', &[
        (b'E', 44.94), (b'H', 13.34), (b'K', -7.49), (b'L', 20.26), (b'P', -1.88),
        (b'V', -7.49),
    ]),
    (b'K', &[
        (b'G', -7.49), (b'I', -7.49), (b'L', -7.49), (b'M', 33.60), (b'P', -6.54),
        (b'Q', 24.64), (b'R', 33.60), (b'V', -7.49),
    ]),
    (b'L', &[(b'K', -7.49), (b'P', 20.26), (b'Q', 33.60), (b'R', 20.26), (b'W', 24.68)]),
    (b'M', &[
        (b'A', 13.34), (b'H', 58.28), (b'M', -1.88), (b'P', 44.94), (b'Q', -6.54),
        (b'R', -6.54), (b'S', 44.94), (b'T', -1.88), (b'Y', 24.68),
    ]),
    (b'N', &[
        (b'C', -1.88), (b'F', -14.03), (b'G', -14.03), (b'I', 44.94), (b'K', 24.68),
        (b'P', -1.88), (b'Q', -6.54), (b'T', -7.49), (b'W', -9.37),
    ]),
    (b'P', &[
        (b'A', 20.26), (b'C', -6.54), (b'D', -6.54), (b'E', 18.38), (b'F', 20.26),
        (b'M', -6.54), (b'P', 20.26), (b'Q', 20.26), (b'R', -6.54), (b'S', 20.26),
        (b'V', 20.26), (b'W', -1.88),
    ]),
    (b'Q', &[
        (b'C', -6.54), (b'D', 20.26), (b'E', 20.26), (b'F', -6.54), (b'P', 20.26),
        (b'Q', 20.26), (b'S', 44.94), (b'V', -6.54), (b'Y', -6.54),
    ]),
    (b'R', &[
        (b'G', -7.49), (b'H', 20.26), (b'N', 13.34), (b'P', 20.26), (b'Q', 20.26),
        (b'R', 58.28), (b'S', 44.94), (b'W', 58.28), (b'Y', -6.54),
    ]),
    (b'S', &[
        (b'C', 33.60), (b'E', 20.26), (b'P', 44.94), (b'Q', 20.26), (b'R', 20.26),
        (b'S', 20.26),
    ]),
    (b'T', &[
        (b'E', 20.26), (b'F', 13.34), (b'G', -7.49), (b'N', -14.03), (b'Q', -6.54),
        (b'W', -14.03),
    ]),
    (b'V', &[
        (b'D', -14.03), (b'G', -7.49), (b'K', -1.88), (b'P', 20.26), (b'T', -7.49),
        (b'Y', -6.54),
    ]),
    (b'W', &[
        (b'A', -14.03), (b'G', -9.37), (b'H', 24.68), (b'L', 13.34), (b'M', 24.68),
        (b'N', 13.34), (b'T', -14.03), (b'V', -7.49),
    ]),
    (b'Y', &[
        (b'A', 24.68), (b'D', 24.68), (b'E', -6.54), (b'G', -7.49), (b'H', 13.34),
        (b'M', 44.94), (b'P', 13.34), (b'R', -15.91), (b'T', -7.49), (b'W', -9.37),
        (b'Y', 13.34),
    ]),
];

/// Map amino acid byte to index 0–19. Returns None for non-standard residues.
fn aa_index(aa: u8) -> Option<usize> {
    match aa {
        b'A' => Some(0),
        b'C' => Some(1),
        b'D' => Some(2),
        b'E' => Some(3),
        b'F' => Some(4),
        b'G' => Some(5),
        b'H' => Some(6),
        b'I' => Some(7),
        b'K' => Some(8),
        b'L' => Some(9),
        b'M' => Some(10),
        b'N' => Some(11),
        b'P' => Some(12),
        b'Q' => Some(13),
        b'R' => Some(14),
        b'S' => Some(15),
        b'T' => Some(16),
        b'V' => Some(17),
        b'W' => Some(18),
        b'Y' => Some(19),
        _ => None,
    }
}

fn dipeptide_weight(first: u8, second: u8) -> f64 {
    DIWV.iter()
        .find(|(aa, _)| *aa == first)
        .and_then(|(_, row)| row.iter().find(|(aa, _)| *aa == second))
        .map(|&(_, w)| w)
        .unwrap_or(1.0)
}

/// Net charge at `ph` via Henderson-Hasselbalch.
fn net_charge(seq: &[u8], ph: f64) -> f64 {
    let positive = |pka: f64| 1.0 / (1.0 + 10_f64.powf(ph - pka));
    let negative = |pka: f64| 1.0 / (1.0 + 10_f64.powf(pka - ph));

    let mut charge = positive(PKA_NTERM) - negative(PKA_CTERM);
    for &aa in seq {
        match aa {
            b'D' => charge -= negative(PKA_D),
            b'E' => charge -= negative(PKA_E),
            b'C' => charge -= negative(PKA_C),
            b'Y' => charge -= negative(PKA_Y),
            b'H' => charge += positive(PKA_H),
            b'K' => charge += positive(PKA_K),
            b'R' => charge += positive(PKA_R),
            _ => {}
        }
    }
    charge
}

/// Stock descriptor calculator.
///
/// Input is upper-cased and anything outside the 20 standard residues is
/// dropped before computing. A sequence with nothing left is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeptideProperties;

impl PeptideProperties {
    pub fn new() -> Self {
        PeptideProperties
    }

    fn clean(residues: &str) -> Result<Vec<u8>, PropertyError> {
        let cleaned: Vec<u8> = residues
            .bytes()
            .map(|b| b.to_ascii_uppercase())
            .filter(|&b| aa_index(b).is_some())
            .collect();
        if cleaned.is_empty() {
            return Err(PropertyError::EmptySequence);
        }
        if cleaned.len() != residues.len() {
            log::debug!(
                "ignored {} non-standard residue byte(s)",
                residues.len() - cleaned.len()
            );
        }
        Ok(cleaned)
    }

    fn mole_fraction(seq: &[u8], aa: u8) -> f64 {
        seq.iter().filter(|&&b| b == aa).count() as f64 / seq.len() as f64
    }
}

impl PropertyProvider for PeptideProperties {
    fn molecular_weight(&self, residues: &str) -> Result<f64, PropertyError> {
        let seq = Self::clean(residues)?;
        let sum: f64 = seq
            .iter()
            .filter_map(|&aa| aa_index(aa))
            .map(|i| RESIDUE_MASS[i])
            .sum();
        Ok(sum + WATER_MASS)
    }

    /// Bisection on pH in `[0, 14]` until |charge| < 0.001.
    fn isoelectric_point(&self, residues: &str) -> Result<f64, PropertyError> {
        let seq = Self::clean(residues)?;
        let mut lo = 0.0_f64;
        let mut hi = 14.0_f64;

        for _ in 0..100 {
            let mid = (lo + hi) / 2.0;
            let charge = net_charge(&seq, mid);
            if charge.abs() < 0.001 {
                return Ok(mid);
            }
            if charge > 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Ok((lo + hi) / 2.0)
    }

    /// Ikai (1980): `100 * (xA + 2.9 xV + 3.9 (xI + xL))`.
    fn aliphatic_index(&self, residues: &str) -> Result<f64, PropertyError> {
        let seq = Self::clean(residues)?;
        let x = |aa| Self::mole_fraction(&seq, aa);
        Ok(100.0 * (x(b'A') + 2.9 * x(b'V') + 3.9 * (x(b'I') + x(b'L'))))
    }

    fn average_hydropathy(&self, residues: &str) -> Result<f64, PropertyError> {
        let seq = Self::clean(residues)?;
        let sum: f64 = seq
            .iter()
            .filter_map(|&aa| aa_index(aa))
            .map(|i| KYTE_DOOLITTLE[i])
            .sum();
        Ok(sum / seq.len() as f64)
    }

    /// Guruprasad (1990): `10 / L * sum(DIWV[x_i][x_i+1])`.
    fn instability_index(&self, residues: &str) -> Result<f64, PropertyError> {
        let seq = Self::clean(residues)?;
        let sum: f64 = seq
            .windows(2)
            .map(|pair| dipeptide_weight(pair[0], pair[1]))
            .sum();
        Ok(10.0 / seq.len() as f64 * sum)
    }
}
