//! Dense eigen-decomposition extractor
//!
//! Computes the full complex spectrum of the damped matrix from its real
//! Schur form, picks the eigenvalue with the largest real part, and recovers
//! the matching eigenvector as the null space of `M - λ·I`.

use nalgebra::{Complex, Schur, SVD};

use super::DominantEigenpair;
use crate::error::RankError;
use crate::matrix::RankMatrix;

/// Full-spectrum dominant-eigenvector extractor
#[derive(Debug, Clone)]
pub struct DenseEigenSolver {
    /// Convergence tolerance handed to the Schur and SVD routines
    pub epsilon: f64,
    /// Iteration cap for each decomposition
    pub max_iterations: usize,
}

impl Default for DenseEigenSolver {
    fn default() -> Self {
        Self {
            epsilon: f64::EPSILON,
            max_iterations: 10_000,
        }
    }
}

impl DenseEigenSolver {
    /// Create a new DenseEigenSolver with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// All eigenvalues of `m`, in the solver's native order
    pub fn eigenvalues(&self, m: &RankMatrix) -> Result<Vec<Complex<f64>>, RankError> {
        let schur = Schur::try_new(m.clone(), self.epsilon, self.max_iterations).ok_or(
            RankError::NotConverged {
                solver: "schur decomposition",
                iterations: self.max_iterations,
                delta: f64::NAN,
            },
        )?;

        let eigenvalues: Vec<_> = schur.complex_eigenvalues().iter().copied().collect();
        if eigenvalues.is_empty() {
            return Err(RankError::NoEigenvalues);
        }
        if eigenvalues.iter().any(|l| !l.re.is_finite() || !l.im.is_finite()) {
            return Err(RankError::NonFinite {
                stage: "schur decomposition",
            });
        }
        Ok(eigenvalues)
    }

    /// Extract the dominant eigenpair of `m`
    pub fn solve(&self, m: &RankMatrix) -> Result<DominantEigenpair, RankError> {
        if m.is_empty() {
            return Err(RankError::EmptyGraph);
        }

        let eigenvalues = self.eigenvalues(m)?;
        let (_, dominant) = select_dominant(&eigenvalues).ok_or(RankError::NoEigenvalues)?;

        let vector = self.null_vector(m, dominant.re)?;
        let pair = DominantEigenpair::new(m, dominant, vector, None)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            eigenvalue = pair.eigenvalue.re,
            imaginary = pair.eigenvalue.im,
            residual = pair.residual,
            "dense eigen-solve complete"
        );

        Ok(pair)
    }

    /// Right-singular vector of `m - shift·I` with the smallest singular value
    fn null_vector(&self, m: &RankMatrix, shift: f64) -> Result<Vec<f64>, RankError> {
        let mut shifted = m.clone();
        for i in 0..shifted.nrows() {
            shifted[(i, i)] -= shift;
        }

        let svd = SVD::try_new(shifted, false, true, self.epsilon, self.max_iterations).ok_or(
            RankError::NotConverged {
                solver: "singular value decomposition",
                iterations: self.max_iterations,
                delta: f64::NAN,
            },
        )?;
        let v_t = svd.v_t.ok_or(RankError::NoEigenvalues)?;

        let smallest = svd
            .singular_values
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .ok_or(RankError::NoEigenvalues)?;

        Ok(v_t.row(smallest).iter().copied().collect())
    }
}

/// Index and value of the eigenvalue with the strictly largest real part
///
/// Ties keep the first occurrence. Imaginary parts are ignored.
pub fn select_dominant(eigenvalues: &[Complex<f64>]) -> Option<(usize, Complex<f64>)> {
    let mut best: Option<(usize, Complex<f64>)> = None;
    for (i, &lambda) in eigenvalues.iter().enumerate() {
        match best {
            Some((_, current)) if lambda.re <= current.re => {}
            _ => best = Some((i, lambda)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;
    use crate::graph::csr::CsrGraph;
    use crate::matrix::damping::DampingBlender;
    use crate::matrix::transition::transition_matrix;
    use crate::types::NodeIndex;

    fn damped(links: &[Vec<NodeIndex>]) -> RankMatrix {
        let csr = CsrGraph::from_builder(&GraphBuilder::from_links(links).unwrap());
        DampingBlender::new(0.15)
            .unwrap()
            .blend(&transition_matrix(&csr))
    }

    #[test]
    fn test_select_dominant_by_real_part() {
        let values = [
            Complex::new(-0.5, 0.2),
            Complex::new(1.0, 1e-17),
            Complex::new(0.3, -0.4),
        ];
        let (idx, lambda) = select_dominant(&values).unwrap();
        assert_eq!(idx, 1);
        assert!((lambda.re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_select_dominant_ties_keep_first() {
        let values = [Complex::new(0.5, 0.0), Complex::new(0.5, 0.0)];
        assert_eq!(select_dominant(&values).unwrap().0, 0);
        assert!(select_dominant(&[]).is_none());
    }

    #[test]
    fn test_stochastic_matrix_has_unit_eigenvalue() {
        let m = damped(&[vec![1, 2, 3], vec![3], vec![0, 3], vec![0, 2]]);
        let pair = DenseEigenSolver::new().solve(&m).unwrap();

        assert!((pair.eigenvalue.re - 1.0).abs() < 1e-9);
        assert!(pair.eigenvalue.im.abs() < 1e-9);
        assert!(pair.residual < 1e-9);
        assert!(pair.vector.iter().all(|&w| w > 0.0));
    }

    #[test]
    fn test_dangling_node_lowers_eigenvalue() {
        let m = damped(&[vec![1], vec![2], vec![]]);
        let pair = DenseEigenSolver::new().solve(&m).unwrap();

        assert!(pair.eigenvalue.re < 1.0);
        assert!(pair.eigenvalue.re > 0.0);
        assert!(pair.residual < 1e-9);
    }

    #[test]
    fn test_spectrum_size_matches_dimension() {
        let m = damped(&[vec![1], vec![2], vec![0]]);
        let values = DenseEigenSolver::new().eigenvalues(&m).unwrap();
        // Directed 3-cycle: one real root plus a complex pair
        assert_eq!(values.len(), 3);
        assert!(values.iter().any(|l| l.im.abs() > 1e-3));
    }

    #[test]
    fn test_single_node() {
        let m = damped(&[vec![]]);
        let pair = DenseEigenSolver::new().solve(&m).unwrap();

        assert!((pair.eigenvalue.re - 0.15).abs() < 1e-12);
        assert_eq!(pair.vector.len(), 1);
        assert!((pair.vector[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let m = RankMatrix::zeros(0, 0);
        assert_eq!(
            DenseEigenSolver::new().solve(&m).unwrap_err(),
            RankError::EmptyGraph
        );
    }
}
