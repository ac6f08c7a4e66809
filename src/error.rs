//! Error taxonomy for the ranking pipeline.
//!
//! Every failure is either bad input (caught before any matrix is built) or a
//! numeric breakdown inside an eigen-solver. Neither is retried.

use thiserror::Error;

use crate::types::NodeIndex;

/// Coarse classification of a [`RankError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The graph or configuration was rejected before computation started.
    InvalidInput,
    /// The solver failed to produce a usable dominant eigenpair.
    NumericDegeneracy,
}

/// Errors produced while ranking a graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("node {node} links to {target}, but the graph only has {num_nodes} nodes")]
    LinkOutOfRange {
        node: NodeIndex,
        target: NodeIndex,
        num_nodes: usize,
    },

    #[error("damping factor must be a finite value in [0, 1], got {0}")]
    InvalidDamping(f64),

    #[error("graph has {num_nodes} nodes, above the configured limit of {max_nodes}")]
    TooManyNodes { num_nodes: usize, max_nodes: usize },

    #[error("convergence threshold must be a finite value >= 0, got {0}")]
    InvalidThreshold(f64),

    #[error("iteration limit must be at least 1")]
    ZeroIterationLimit,

    #[error("eigen-solver returned no eigenvalues")]
    NoEigenvalues,

    #[error("{solver} did not converge after {iterations} iterations (delta {delta:e})")]
    NotConverged {
        solver: &'static str,
        iterations: usize,
        delta: f64,
    },

    #[error("non-finite values produced during {stage}")]
    NonFinite { stage: &'static str },

    #[error("random walk lost all probability mass during {stage}")]
    VanishingMass { stage: &'static str },
}

impl RankError {
    /// Which side of the taxonomy this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyGraph
            | Self::LinkOutOfRange { .. }
            | Self::InvalidDamping(_)
            | Self::TooManyNodes { .. }
            | Self::InvalidThreshold(_)
            | Self::ZeroIterationLimit => ErrorKind::InvalidInput,
            Self::NoEigenvalues
            | Self::NotConverged { .. }
            | Self::NonFinite { .. }
            | Self::VanishingMass { .. } => ErrorKind::NumericDegeneracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_invalid_input() {
        assert_eq!(RankError::EmptyGraph.kind(), ErrorKind::InvalidInput);
        assert_eq!(RankError::InvalidDamping(1.5).kind(), ErrorKind::InvalidInput);
        let err = RankError::LinkOutOfRange {
            node: 0,
            target: 7,
            num_nodes: 3,
        };
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(RankError::InvalidThreshold(f64::NAN).kind(), ErrorKind::InvalidInput);
        assert_eq!(RankError::ZeroIterationLimit.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_solver_errors_are_numeric() {
        let err = RankError::NotConverged {
            solver: "power_iteration",
            iterations: 10,
            delta: 0.5,
        };
        assert_eq!(err.kind(), ErrorKind::NumericDegeneracy);
        assert_eq!(RankError::NoEigenvalues.kind(), ErrorKind::NumericDegeneracy);
    }

    #[test]
    fn test_display_mentions_offending_link() {
        let err = RankError::LinkOutOfRange {
            node: 2,
            target: 9,
            num_nodes: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("node 2"));
        assert!(msg.contains("9"));
        assert!(msg.contains("4 nodes"));
    }
}
