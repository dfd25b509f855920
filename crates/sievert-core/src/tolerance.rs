use crate::traits::Validate;
use crate::{Result, SvError};

/// Thresholds used when deciding that a geometric quantity has collapsed.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Vectors shorter than this are treated as zero-length.
    pub length: f64,
    /// UV-space determinants smaller than this (in magnitude) are singular.
    pub determinant: f64,
}

impl Tolerance {
    pub const DEFAULT_LENGTH: f64 = 1e-12;
    pub const DEFAULT_DETERMINANT: f64 = 1e-14;

    pub fn default_precision() -> Self {
        Self {
            length: Self::DEFAULT_LENGTH,
            determinant: Self::DEFAULT_DETERMINANT,
        }
    }

    /// Check if a length is zero within tolerance
    pub fn is_zero_length(self, len: f64) -> bool {
        len.is_nan() || len <= self.length
    }

    /// Check if a 2x2 determinant is singular within tolerance
    pub fn is_singular(self, det: f64) -> bool {
        det.is_nan() || det.abs() <= self.determinant
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}

impl Validate for Tolerance {
    /// A negative or non-finite threshold would disable the degeneracy checks.
    fn validate(&self) -> Result<()> {
        for (name, value) in [("length", self.length), ("determinant", self.determinant)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SvError::invalid(format!(
                    "{name} tolerance must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}
