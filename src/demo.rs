//! Bundled demo graphs
//!
//! Five small hand-built link graphs used by the CLI's `--demo` flag and by
//! solver cross-checks. Graph 3 contains a dangling node (node 0).

use crate::types::NodeIndex;

const LINKS_1: &[&[NodeIndex]] = &[&[1, 2, 3], &[3], &[0, 3], &[0, 2]];

const LINKS_2: &[&[NodeIndex]] = &[
    &[1, 2, 3],
    &[4, 3],
    &[0, 3],
    &[6, 1],
    &[6],
    &[4, 7],
    &[5],
    &[5, 6],
];

const LINKS_3: &[&[NodeIndex]] = &[
    &[],
    &[0, 2, 3, 4],
    &[1, 4],
    &[4],
    &[5],
    &[3, 6],
    &[4, 5],
];

const LINKS_4: &[&[NodeIndex]] = &[
    &[1, 5],
    &[2, 5],
    &[1, 3, 5],
    &[4],
    &[1, 5],
    &[2, 6],
    &[0, 1],
];

const LINKS_5: &[&[NodeIndex]] = &[
    &[1, 3, 4],
    &[0, 2, 4],
    &[3, 6],
    &[2, 4, 6],
    &[5, 8],
    &[4, 6, 8],
    &[0, 7, 9],
    &[0, 6, 8],
    &[2, 9],
    &[0, 2, 8],
];

/// All demo graphs, numbered from 1.
pub const DEMO_GRAPHS: [&[&[NodeIndex]]; 5] = [LINKS_1, LINKS_2, LINKS_3, LINKS_4, LINKS_5];

/// Demo graph `id` (1-based) as owned adjacency lists.
pub fn demo_graph(id: usize) -> Option<Vec<Vec<NodeIndex>>> {
    let links = DEMO_GRAPHS.get(id.checked_sub(1)?)?;
    Some(links.iter().map(|l| l.to_vec()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    #[test]
    fn test_demo_graphs_are_valid() {
        for links in DEMO_GRAPHS {
            assert!(GraphBuilder::from_links(links).is_ok());
        }
    }

    #[test]
    fn test_demo_graph_lookup_is_one_based() {
        assert_eq!(demo_graph(1).unwrap()[1], vec![3]);
        assert_eq!(demo_graph(5).unwrap().len(), 10);
        assert!(demo_graph(0).is_none());
        assert!(demo_graph(6).is_none());
    }
}
