//! Link-graph builder with input validation
//!
//! Turns an adjacency description (entry `j` lists the nodes `j` links to)
//! into a checked set of outgoing links. Duplicate targets within one list
//! are collapsed so every link contributes exactly once to the out-degree.

use rustc_hash::FxHashSet;

use crate::error::RankError;
use crate::types::NodeIndex;

/// A node in the graph builder
#[derive(Debug, Clone, Default)]
pub struct BuilderNode {
    /// Outgoing link targets, in first-seen order
    pub links: Vec<NodeIndex>,
    /// Membership set for `links`
    seen: FxHashSet<NodeIndex>,
}

impl BuilderNode {
    /// Create a node with no outgoing links
    pub fn new() -> Self {
        Self::default()
    }

    /// Out-degree (number of distinct targets)
    pub fn out_degree(&self) -> usize {
        self.links.len()
    }

    /// Whether the node has no outgoing links
    pub fn is_dangling(&self) -> bool {
        self.links.is_empty()
    }
}

/// A mutable directed graph over a fixed node count
#[derive(Debug)]
pub struct GraphBuilder {
    nodes: Vec<BuilderNode>,
    duplicates: usize,
}

impl GraphBuilder {
    /// Create a builder for `num_nodes` nodes with no links
    pub fn with_nodes(num_nodes: usize) -> Self {
        Self {
            nodes: vec![BuilderNode::new(); num_nodes],
            duplicates: 0,
        }
    }

    /// Build from adjacency lists, checking every target against `[0, n)`
    ///
    /// An empty list is a dangling node, not an error. An empty outer slice
    /// is rejected.
    pub fn from_links<L: AsRef<[NodeIndex]>>(links: &[L]) -> Result<Self, RankError> {
        if links.is_empty() {
            return Err(RankError::EmptyGraph);
        }

        let mut builder = Self::with_nodes(links.len());
        for (source, targets) in links.iter().enumerate() {
            for &target in targets.as_ref() {
                builder.add_link(source as NodeIndex, target)?;
            }
        }

        if builder.duplicates > 0 {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                duplicates = builder.duplicates,
                "collapsed duplicate links in adjacency lists"
            );
        }

        Ok(builder)
    }

    /// Add a directed link `from -> to`
    ///
    /// Returns `Ok(false)` if the link already existed.
    pub fn add_link(&mut self, from: NodeIndex, to: NodeIndex) -> Result<bool, RankError> {
        let num_nodes = self.nodes.len();
        if to as usize >= num_nodes || from as usize >= num_nodes {
            return Err(RankError::LinkOutOfRange {
                node: from,
                target: to,
                num_nodes,
            });
        }

        let node = &mut self.nodes[from as usize];
        if node.seen.insert(to) {
            node.links.push(to);
            Ok(true)
        } else {
            self.duplicates += 1;
            Ok(false)
        }
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of distinct links
    pub fn link_count(&self) -> usize {
        self.nodes.iter().map(BuilderNode::out_degree).sum()
    }

    /// Number of duplicate links dropped so far
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }

    /// Get a node by index
    pub fn get_node(&self, id: NodeIndex) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &BuilderNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (i as NodeIndex, n))
    }
}
