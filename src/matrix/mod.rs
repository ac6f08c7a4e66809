//! Dense matrix construction
//!
//! Builds the column-stochastic transition matrix of a link graph and blends
//! it with the uniform random-jump matrix.

pub mod damping;
pub mod transition;

use nalgebra::DMatrix;

/// Dense square matrix used throughout the ranking pipeline
pub type RankMatrix = DMatrix<f64>;

/// Sum of each column of `m`
pub fn column_sums(m: &RankMatrix) -> Vec<f64> {
    m.column_iter().map(|c| c.sum()).collect()
}
