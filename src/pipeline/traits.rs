//! Stage trait definitions for the pipeline.
//!
//! The eigen-solve is the only stage with interchangeable implementations.
//! [`Pipeline`](super::runner::Pipeline) is generic over [`EigenSolver`] and
//! statically dispatched; [`ConfiguredSolver`] picks an implementation from a
//! [`RankConfig`] at runtime, and boxed trait objects work as well.

use crate::error::RankError;
use crate::matrix::RankMatrix;
use crate::pagerank::eigen::DenseEigenSolver;
use crate::pagerank::power::PowerIteration;
use crate::pagerank::DominantEigenpair;
use crate::types::{RankConfig, SolverKind};

// ============================================================================
// EigenSolver: dominant eigenpair extraction (stage 4)
// ============================================================================

/// Extracts the dominant eigenpair of the damped matrix.
///
/// # Contract
///
/// - **Input**: a square, non-empty matrix.
/// - **Output**: the eigenvalue with the largest real part and its
///   eigenvector, scaled to sum to 1.
/// - **Errors**: [`RankError::EmptyGraph`] for a 0×0 matrix; a
///   numeric-degeneracy variant if the solver breaks down.
/// - **Settings**: [`check_settings`](EigenSolver::check_settings) runs before
///   any matrix is built and rejects values the solver cannot work with.
/// - **Deterministic**: the same matrix always yields the same vector.
pub trait EigenSolver {
    /// Short, stable identifier (matches [`SolverKind::as_str`]).
    fn name(&self) -> &'static str;

    /// Extract the dominant eigenpair of `m`.
    fn solve(&self, m: &RankMatrix) -> Result<DominantEigenpair, RankError>;

    /// Validate solver settings without touching a matrix.
    fn check_settings(&self) -> Result<(), RankError> {
        Ok(())
    }
}

impl EigenSolver for DenseEigenSolver {
    fn name(&self) -> &'static str {
        SolverKind::DenseEigen.as_str()
    }

    fn solve(&self, m: &RankMatrix) -> Result<DominantEigenpair, RankError> {
        DenseEigenSolver::solve(self, m)
    }
}

impl EigenSolver for PowerIteration {
    fn name(&self) -> &'static str {
        SolverKind::PowerIteration.as_str()
    }

    fn solve(&self, m: &RankMatrix) -> Result<DominantEigenpair, RankError> {
        PowerIteration::solve(self, m)
    }

    fn check_settings(&self) -> Result<(), RankError> {
        PowerIteration::check_settings(self)
    }
}

impl<S: EigenSolver + ?Sized> EigenSolver for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, m: &RankMatrix) -> Result<DominantEigenpair, RankError> {
        (**self).solve(m)
    }

    fn check_settings(&self) -> Result<(), RankError> {
        (**self).check_settings()
    }
}

// ============================================================================
// ConfiguredSolver: runtime selection from RankConfig
// ============================================================================

/// Solver chosen by [`RankConfig::solver`].
#[derive(Debug, Clone)]
pub enum ConfiguredSolver {
    Dense(DenseEigenSolver),
    Power(PowerIteration),
}

impl ConfiguredSolver {
    pub fn from_config(cfg: &RankConfig) -> Self {
        match cfg.solver {
            SolverKind::DenseEigen => Self::Dense(DenseEigenSolver::new()),
            SolverKind::PowerIteration => Self::Power(
                PowerIteration::new()
                    .with_max_iterations(cfg.max_iterations)
                    .with_threshold(cfg.threshold),
            ),
        }
    }

    pub fn kind(&self) -> SolverKind {
        match self {
            Self::Dense(_) => SolverKind::DenseEigen,
            Self::Power(_) => SolverKind::PowerIteration,
        }
    }
}

impl Default for ConfiguredSolver {
    fn default() -> Self {
        Self::Dense(DenseEigenSolver::new())
    }
}

impl EigenSolver for ConfiguredSolver {
    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    fn solve(&self, m: &RankMatrix) -> Result<DominantEigenpair, RankError> {
        match self {
            Self::Dense(s) => s.solve(m),
            Self::Power(s) => s.solve(m),
        }
    }

    fn check_settings(&self) -> Result<(), RankError> {
        match self {
            Self::Dense(_) => Ok(()),
            Self::Power(s) => s.check_settings(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cycle() -> RankMatrix {
        // Damped 0 <-> 1 cycle
        RankMatrix::from_row_slice(2, 2, &[0.075, 0.925, 0.925, 0.075])
    }

    #[test]
    fn test_configured_solver_follows_config() {
        let dense = ConfiguredSolver::from_config(&RankConfig::default());
        assert_eq!(dense.kind(), SolverKind::DenseEigen);
        assert_eq!(dense.name(), "dense_eigen");

        let cfg = RankConfig::new()
            .with_solver(SolverKind::PowerIteration)
            .with_max_iterations(7);
        match ConfiguredSolver::from_config(&cfg) {
            ConfiguredSolver::Power(p) => assert_eq!(p.max_iterations, 7),
            other => panic!("expected power iteration, got {other:?}"),
        }
    }

    #[test]
    fn test_solvers_agree_on_symmetric_cycle() {
        let m = two_cycle();
        let dense = ConfiguredSolver::Dense(DenseEigenSolver::new()).solve(&m).unwrap();
        let power = ConfiguredSolver::Power(PowerIteration::new()).solve(&m).unwrap();

        for (a, b) in dense.vector.iter().zip(power.vector.iter()) {
            assert!((a - b).abs() < 1e-9);
            assert!((a - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_configured_power_settings_are_checked() {
        let cfg = RankConfig::new()
            .with_solver(SolverKind::PowerIteration)
            .with_threshold(f64::INFINITY);
        let solver = ConfiguredSolver::from_config(&cfg);
        assert!(matches!(
            solver.check_settings(),
            Err(RankError::InvalidThreshold(_))
        ));

        // The dense solver ignores power-iteration settings
        let cfg = RankConfig::new().with_threshold(f64::NAN);
        assert!(ConfiguredSolver::from_config(&cfg).check_settings().is_ok());
    }

    #[test]
    fn test_solver_as_trait_object() {
        let solver: Box<dyn EigenSolver> = Box::new(PowerIteration::new());

        assert_eq!(solver.name(), "power_iteration");
        let pair = solver.solve(&two_cycle()).unwrap();
        assert_eq!(pair.vector.len(), 2);
    }
}
