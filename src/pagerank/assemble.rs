//! Rank assembly
//!
//! Orders node indices by descending eigenvector weight. The sort is stable
//! over `f64::total_cmp`, so equal weights keep ascending index order and the
//! same weights always give the same ranking.

use crate::types::NodeIndex;

/// Node indices sorted by descending weight
pub fn rank_order(weights: &[f64]) -> Vec<NodeIndex> {
    let mut order: Vec<NodeIndex> = (0..weights.len() as NodeIndex).collect();
    order.sort_by(|&a, &b| weights[b as usize].total_cmp(&weights[a as usize]));
    order
}

/// `(node, weight)` pairs in ranking order
pub fn ranked_pairs(weights: &[f64]) -> Vec<(NodeIndex, f64)> {
    rank_order(weights)
        .into_iter()
        .map(|node| (node, weights[node as usize]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descending_order() {
        assert_eq!(rank_order(&[0.1, 0.4, 0.2, 0.3]), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_ties_keep_index_order() {
        assert_eq!(rank_order(&[0.25, 0.25, 0.5, 0.25]), vec![2, 0, 1, 3]);
    }

    #[test]
    fn test_original_indices_attached() {
        let pairs = ranked_pairs(&[0.7, 0.1, 0.2]);
        assert_eq!(pairs[0], (0, 0.7));
        assert_eq!(pairs[2], (1, 0.1));
    }

    #[test]
    fn test_empty_and_single() {
        assert!(rank_order(&[]).is_empty());
        assert_eq!(rank_order(&[1.0]), vec![0]);
    }
}
