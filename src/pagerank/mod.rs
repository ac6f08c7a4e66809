//! PageRank extraction
//!
//! This module provides the dominant-eigenvector extractors (dense
//! eigen-decomposition and power iteration) and the rank assembler.

pub mod assemble;
pub mod eigen;
pub mod power;

use nalgebra::{Complex, DVector};

use crate::error::RankError;
use crate::matrix::RankMatrix;
use crate::types::NodeIndex;

/// Dominant eigenvalue of the damped matrix with its eigenvector
#[derive(Debug, Clone)]
pub struct DominantEigenpair {
    /// Eigenvalue with the largest real part
    pub eigenvalue: Complex<f64>,
    /// Eigenvector scaled so its components sum to 1
    pub vector: Vec<f64>,
    /// Iterations used (power iteration only)
    pub iterations: Option<usize>,
    /// L1 norm of `M·v - λ·v`
    pub residual: f64,
}

impl DominantEigenpair {
    /// Normalize `vector` and measure its residual against `m`
    pub(crate) fn new(
        m: &RankMatrix,
        eigenvalue: Complex<f64>,
        vector: Vec<f64>,
        iterations: Option<usize>,
    ) -> Result<Self, RankError> {
        let vector = normalize_weights(vector)?;
        let residual = residual(m, eigenvalue.re, &vector);
        Ok(Self {
            eigenvalue,
            vector,
            iterations,
            residual,
        })
    }
}

/// Result of a ranking run
#[derive(Debug, Clone)]
pub struct RankOutput {
    /// Node indices, most important first
    pub order: Vec<NodeIndex>,
    /// Weight of each node (indexed by node ID), summing to 1
    pub weights: Vec<f64>,
    /// Real part of the dominant eigenvalue
    pub eigenvalue: f64,
    /// Iterations used (power iteration only)
    pub iterations: Option<usize>,
    /// L1 norm of `M·v - λ·v` for the returned weights
    pub residual: f64,
}

impl RankOutput {
    /// Pair an eigenvector with its assembled ranking
    pub fn from_eigenpair(pair: DominantEigenpair) -> Self {
        let order = assemble::rank_order(&pair.vector);
        Self {
            order,
            weights: pair.vector,
            eigenvalue: pair.eigenvalue.re,
            iterations: pair.iterations,
            residual: pair.residual,
        }
    }

    /// Get top N nodes by weight
    pub fn top_n(&self, n: usize) -> Vec<(NodeIndex, f64)> {
        self.order
            .iter()
            .take(n)
            .map(|&node| (node, self.weights[node as usize]))
            .collect()
    }

    /// Get the weight for a specific node
    pub fn score(&self, node: NodeIndex) -> f64 {
        self.weights.get(node as usize).copied().unwrap_or(0.0)
    }

    /// Number of ranked nodes
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if nothing was ranked
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Rescale an eigenvector so its components sum to 1
///
/// Eigenvectors are only defined up to scale and sign. Dividing by the
/// component sum fixes both for a Perron vector; if the sum cancels out, the
/// largest-magnitude component is used instead.
pub fn normalize_weights(mut vector: Vec<f64>) -> Result<Vec<f64>, RankError> {
    if vector.iter().any(|v| !v.is_finite()) {
        return Err(RankError::NonFinite {
            stage: "eigenvector normalization",
        });
    }

    let sum: f64 = vector.iter().sum();
    let magnitude: f64 = vector.iter().map(|v| v.abs()).sum();
    if magnitude == 0.0 {
        return Err(RankError::VanishingMass {
            stage: "eigenvector normalization",
        });
    }

    let scale = if sum.abs() > magnitude * 1e-9 {
        sum
    } else {
        vector
            .iter()
            .copied()
            .fold(0.0_f64, |acc, v| if v.abs() > acc.abs() { v } else { acc })
    };

    for v in &mut vector {
        *v /= scale;
    }
    Ok(vector)
}

/// L1 norm of `M·v - λ·v`
fn residual(m: &RankMatrix, eigenvalue: f64, vector: &[f64]) -> f64 {
    let v = DVector::from_column_slice(vector);
    let mv = m * &v;
    mv.iter()
        .zip(v.iter())
        .map(|(a, b)| (a - eigenvalue * b).abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_flips_negative_vector() {
        let weights = normalize_weights(vec![-0.2, -0.6, -0.2]).unwrap();

        assert!((weights[1] - 0.6).abs() < 1e-12);
        assert!(weights.iter().all(|&w| w > 0.0));
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_cancelling_sum_uses_largest_component() {
        let weights = normalize_weights(vec![1.0, -2.0, 1.0]).unwrap();
        assert!((weights[1] - 1.0).abs() < 1e-12);
        assert!((weights[0] + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_rejects_degenerate_vectors() {
        assert!(matches!(
            normalize_weights(vec![0.0, 0.0]),
            Err(RankError::VanishingMass { .. })
        ));
        assert!(matches!(
            normalize_weights(vec![f64::NAN, 1.0]),
            Err(RankError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_top_n_and_score() {
        let m = RankMatrix::identity(3, 3);
        let pair =
            DominantEigenpair::new(&m, Complex::new(1.0, 0.0), vec![0.2, 0.5, 0.3], None)
                .unwrap();
        let output = RankOutput::from_eigenpair(pair);

        assert_eq!(output.order, vec![1, 2, 0]);
        let top = output.top_n(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, 1);
        assert!((output.score(2) - 0.3).abs() < 1e-12);
        assert_eq!(output.score(42), 0.0);
        assert!(output.residual < 1e-12);
    }
}
