//! # rapid-pagerank
//!
//! PageRank over small directed graphs, computed as the dominant eigenvector
//! of the damped transition matrix.
//!
//! The pipeline has four numeric stages:
//!
//! 1. **Transition matrix**: `P[i][j] = 1/out_degree(j)` when `j` links to `i`
//! 2. **Damping blend**: `M = (1 - d)·P + d/n`, with `d = 0.15` by default
//! 3. **Eigen-solve**: the eigenvector of the eigenvalue with the largest
//!    real part (dense decomposition, or power iteration)
//! 4. **Assembly**: node indices sorted by descending weight
//!
//! ## Example
//!
//! ```rust
//! use rapid_pagerank::rank;
//!
//! let links: Vec<Vec<u32>> = vec![vec![1, 2, 3], vec![3], vec![0, 3], vec![0, 2]];
//! let order = rank(&links).unwrap();
//! assert_eq!(order.len(), 4);
//! ```
//!
//! Dangling nodes (no outgoing links) are not redistributed: their columns
//! keep only the uniform share, so the dominant eigenvalue drops below 1.

pub mod demo;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod pagerank;
pub mod pipeline;
pub mod types;

pub use error::{ErrorKind, RankError};
pub use pagerank::RankOutput;
pub use pipeline::observer::{NoopObserver, PipelineObserver};
pub use pipeline::runner::Pipeline;
pub use pipeline::spec::RankSpec;
pub use types::{NodeIndex, RankConfig, SolverKind};

/// Rank the nodes of `links` with the default configuration.
///
/// Entry `j` of `links` lists the nodes that node `j` links to. Returns node
/// indices, most important first.
pub fn rank<L: AsRef<[NodeIndex]>>(links: &[L]) -> Result<Vec<NodeIndex>, RankError> {
    rank_with_config(links, &RankConfig::default()).map(|output| output.order)
}

/// Rank the nodes of `links` under `cfg`, returning weights and diagnostics.
pub fn rank_with_config<L: AsRef<[NodeIndex]>>(
    links: &[L],
    cfg: &RankConfig,
) -> Result<RankOutput, RankError> {
    Pipeline::new(cfg).run(links, &mut NoopObserver)
}
