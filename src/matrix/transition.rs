//! Transition matrix construction
//!
//! `P[(i, j)]` is the probability of stepping from node `j` to node `i`:
//! `1 / out_degree(j)` when `j` links to `i`, otherwise 0. Columns of
//! dangling nodes stay all-zero.

use super::RankMatrix;
use crate::graph::csr::CsrGraph;

/// Build the n×n column-stochastic transition matrix of `graph`
pub fn transition_matrix(graph: &CsrGraph) -> RankMatrix {
    let n = graph.num_nodes;
    let mut p = RankMatrix::zeros(n, n);

    for j in 0..n {
        let degree = graph.degree(j as u32);
        if degree == 0 {
            continue;
        }

        let share = 1.0 / degree as f64;
        for i in graph.neighbors(j as u32) {
            p[(i as usize, j)] = share;
        }
    }

    p
}
