//! Damping blend
//!
//! `M = (1 - d)·P + d·Q` where every entry of `Q` is `1/n`. No
//! renormalization follows, so dangling columns of `P` leave `M`
//! under-stochastic in those columns.

use super::RankMatrix;
use crate::error::RankError;

/// Blends a transition matrix with the uniform random-jump matrix
#[derive(Debug, Clone, Copy)]
pub struct DampingBlender {
    damping: f64,
}

impl DampingBlender {
    /// Create a blender, rejecting damping outside `[0, 1]`
    pub fn new(damping: f64) -> Result<Self, RankError> {
        if !damping.is_finite() || !(0.0..=1.0).contains(&damping) {
            return Err(RankError::InvalidDamping(damping));
        }
        Ok(Self { damping })
    }

    /// Share of mass assigned to the uniform jump
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Compute `(1 - d)·P + d/n` elementwise
    pub fn blend(&self, p: &RankMatrix) -> RankMatrix {
        let n = p.nrows();
        if n == 0 {
            return p.clone();
        }
        let jump = self.damping / n as f64;
        (p * (1.0 - self.damping)).add_scalar(jump)
    }
}
