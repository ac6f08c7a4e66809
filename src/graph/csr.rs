//! Compressed Sparse Row (CSR) link graph
//!
//! The transition builder walks every node's outgoing links exactly once;
//! CSR keeps those links contiguous and records each out-degree up front.

use super::builder::GraphBuilder;
use crate::types::NodeIndex;

/// A directed graph in Compressed Sparse Row format
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node i's links are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Target node for each link
    pub col_idx: Vec<NodeIndex>,
    /// Out-degree for each node
    pub out_degree: Vec<u32>,
}

impl CsrGraph {
    /// Convert a GraphBuilder into CSR format
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::with_capacity(builder.link_count());
        let mut out_degree = Vec::with_capacity(num_nodes);

        row_ptr.push(0);

        for (_, node) in builder.nodes() {
            out_degree.push(node.out_degree() as u32);
            col_idx.extend_from_slice(&node.links);
            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            out_degree,
        }
    }

    /// Iterate over the link targets of a node
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        self.col_idx[start..end].iter().copied()
    }

    /// Get the out-degree of a node
    pub fn degree(&self, node: NodeIndex) -> u32 {
        self.out_degree[node as usize]
    }

    /// Get the total number of links
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Find dangling nodes (nodes with no outgoing links)
    pub fn dangling_nodes(&self) -> Vec<NodeIndex> {
        (0..self.num_nodes as NodeIndex)
            .filter(|&n| self.out_degree[n as usize] == 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_test_graph() -> CsrGraph {
        let links: Vec<Vec<NodeIndex>> = vec![vec![1, 2], vec![2], vec![]];
        CsrGraph::from_builder(&GraphBuilder::from_links(&links).unwrap())
    }

    #[test]
    fn test_csr_conversion() {
        let csr = build_test_graph();

        assert_eq!(csr.num_nodes, 3);
        assert_eq!(csr.row_ptr, vec![0, 2, 3, 3]);
        assert_eq!(csr.num_edges(), 3);
    }

    #[test]
    fn test_neighbor_iteration_preserves_order() {
        let csr = build_test_graph();

        let neighbors: Vec<_> = csr.neighbors(0).collect();
        assert_eq!(neighbors, vec![1, 2]);
        assert_eq!(csr.neighbors(2).count(), 0);
    }

    #[test]
    fn test_degrees() {
        let csr = build_test_graph();

        assert_eq!(csr.degree(0), 2);
        assert_eq!(csr.degree(2), 0);
    }

    #[test]
    fn test_dangling_nodes() {
        let csr = build_test_graph();
        assert_eq!(csr.dangling_nodes(), vec![2]);
    }
}
