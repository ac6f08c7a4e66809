//! Power-iteration extractor
//!
//! Repeatedly applies the damped matrix to a uniform start vector,
//! L1-normalizing after each step. Because every entry of the damped matrix
//! is positive when `d > 0`, the iterate converges to the Perron vector and
//! the normalizing mass converges to the dominant eigenvalue.

use nalgebra::{Complex, DVector};

use super::DominantEigenpair;
use crate::error::RankError;
use crate::matrix::RankMatrix;
use crate::types::{DEFAULT_MAX_ITERATIONS, DEFAULT_THRESHOLD};

/// Power-iteration implementation
#[derive(Debug, Clone)]
pub struct PowerIteration {
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence threshold (L1 distance between successive iterates)
    pub threshold: f64,
}

impl Default for PowerIteration {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl PowerIteration {
    /// Create a new PowerIteration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Reject settings under which the loop could not do real work
    ///
    /// A NaN or infinite threshold would satisfy the stopping test before the
    /// first step and hand back the uniform start vector.
    pub fn check_settings(&self) -> Result<(), RankError> {
        if self.max_iterations == 0 {
            return Err(RankError::ZeroIterationLimit);
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(RankError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }

    /// Run power iteration on `m`
    ///
    /// Fails with [`RankError::NotConverged`] if the threshold is not met
    /// within `max_iterations`.
    pub fn solve(&self, m: &RankMatrix) -> Result<DominantEigenpair, RankError> {
        self.check_settings()?;
        let n = m.nrows();
        if n == 0 {
            return Err(RankError::EmptyGraph);
        }

        // Initialize scores uniformly
        let mut scores = DVector::from_element(n, 1.0 / n as f64);
        let mut new_scores = DVector::zeros(n);

        let mut eigenvalue = 0.0;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.threshold {
            iterations += 1;

            m.mul_to(&scores, &mut new_scores);

            // Mass retained by one step; equals the eigenvalue at the fixed point
            let mass = new_scores.sum();
            if !mass.is_finite() {
                return Err(RankError::NonFinite {
                    stage: "power iteration",
                });
            }
            if mass <= 0.0 {
                return Err(RankError::VanishingMass {
                    stage: "power iteration",
                });
            }
            new_scores /= mass;
            eigenvalue = mass;

            // Calculate convergence delta (L1 norm)
            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            // Swap buffers
            std::mem::swap(&mut scores, &mut new_scores);
        }

        if delta > self.threshold {
            return Err(RankError::NotConverged {
                solver: "power iteration",
                iterations,
                delta,
            });
        }

        let pair = DominantEigenpair::new(
            m,
            Complex::new(eigenvalue, 0.0),
            scores.iter().copied().collect(),
            Some(iterations),
        )?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            eigenvalue,
            iterations,
            delta,
            residual = pair.residual,
            "power iteration converged"
        );

        Ok(pair)
    }
}
