//! Core types shared across the crate.

use serde::{Deserialize, Serialize};

/// Index of a node in the graph being ranked (`0..n`).
pub type NodeIndex = u32;

/// Default share of probability mass diverted to the uniform random jump.
///
/// The link-following share is `1 - DEFAULT_DAMPING` (0.85).
pub const DEFAULT_DAMPING: f64 = 0.15;

/// Default iteration cap for the power-iteration solver.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Default L1 convergence threshold for the power-iteration solver.
pub const DEFAULT_THRESHOLD: f64 = 1e-12;

/// Which dominant-eigenvector extractor to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Full eigen-decomposition of the damped matrix.
    #[default]
    DenseEigen,
    /// Repeated application of the damped matrix to a uniform start vector.
    PowerIteration,
}

impl SolverKind {
    /// Returns the user-facing name used in JSON and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DenseEigen => "dense_eigen",
            Self::PowerIteration => "power_iteration",
        }
    }
}

/// Resolved configuration for a ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Weight of the uniform jump matrix in `(1 - d)·P + d·Q`
    pub damping: f64,
    /// Extractor used for the dominant eigenvector
    pub solver: SolverKind,
    /// Iteration cap (power iteration only)
    pub max_iterations: usize,
    /// L1 convergence threshold (power iteration only)
    pub threshold: f64,
    /// Reject graphs with more nodes than this
    pub max_nodes: Option<usize>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            solver: SolverKind::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            threshold: DEFAULT_THRESHOLD,
            max_nodes: None,
        }
    }
}

impl RankConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the solver
    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
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

    /// Set the node-count limit
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }
}
