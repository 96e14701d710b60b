//! Tuning constants for the declutter simulation.

use crate::{LayoutError, LayoutResult};

/// Declutter simulation parameters.
///
/// The defaults suit 10–100 labels of tooltip size on a desktop-sized map.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeclutterConfig {
    /// Cooling-loop iterations.  `0` skips only the cooling loop; settle, the
    /// overlap pass, and the clamp still run.
    pub iterations: usize,

    /// Distance from the anchor at which newly opened labels are seeded.
    pub seed_radius: f64,

    /// Net force → displacement factor in the cooling loop, applied before
    /// the per-axis temperature limit.
    pub damping: f64,

    /// Upper bound on energy-descent steps after cooling.  `0` disables the
    /// settle phase.
    pub settle_iterations: usize,

    /// Settle stops once no label feels a net force above this.
    pub settle_tolerance: f64,

    /// Upper bound on sweeps of the residual overlap pass.
    pub overlap_passes: usize,

    /// Minimum gap the overlap pass leaves between label boxes.
    pub overlap_padding: f64,
}

impl Default for DeclutterConfig {
    fn default() -> Self {
        Self {
            iterations:        50,
            seed_radius:       50.0,
            damping:           0.1,
            settle_iterations: 1_000,
            settle_tolerance:  0.01,
            overlap_passes:    16,
            overlap_padding:   1.0,
        }
    }
}

impl DeclutterConfig {
    pub fn validate(&self) -> LayoutResult<()> {
        if !(self.damping.is_finite() && self.damping > 0.0) {
            return Err(LayoutError::Config(format!(
                "damping must be finite and > 0, got {}",
                self.damping
            )));
        }
        if !(self.seed_radius.is_finite() && self.seed_radius >= 0.0) {
            return Err(LayoutError::Config(format!(
                "seed_radius must be finite and >= 0, got {}",
                self.seed_radius
            )));
        }
        if !(self.settle_tolerance.is_finite() && self.settle_tolerance > 0.0) {
            return Err(LayoutError::Config(format!(
                "settle_tolerance must be finite and > 0, got {}",
                self.settle_tolerance
            )));
        }
        if !(self.overlap_padding.is_finite() && self.overlap_padding >= 0.0) {
            return Err(LayoutError::Config(format!(
                "overlap_padding must be finite and >= 0, got {}",
                self.overlap_padding
            )));
        }
        Ok(())
    }
}
