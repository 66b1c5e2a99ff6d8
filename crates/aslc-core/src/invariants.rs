//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::tree::{NodeData, NodeId, SyntaxTree};

impl SyntaxTree {
    pub(crate) fn ensure_node(&self, id: NodeId) -> &NodeData {
        let len = self.len();
        self.nodes().get(id.index()).unwrap_or_else(|| {
            panic!("SyntaxTree: node {id} out of bounds (tree has {len} nodes, ids are never shared across trees)")
        })
    }

    pub(crate) fn ensure_node_mut(&mut self, id: NodeId) -> &mut NodeData {
        let len = self.len();
        self.nodes_mut().get_mut(id.index()).unwrap_or_else(|| {
            panic!("SyntaxTree: node {id} out of bounds (tree has {len} nodes, ids are never shared across trees)")
        })
    }
}
