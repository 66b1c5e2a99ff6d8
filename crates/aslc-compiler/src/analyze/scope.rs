//! Name lookups relative to a node, for dependency checks.

use aslc_core::{NameSeg, NodeId, ParseOp, SyntaxTree};

/// Answers "is this name declared near that node?".
///
/// The analyzer only needs two questions answered; a namespace-backed
/// implementation can stand in for [`TreeScope`] once one exists.
pub trait ScopeOracle {
    /// `name` is declared by a sibling of `anchor` (same lexical scope).
    fn exists_in_scope(&self, tree: &SyntaxTree, name: NameSeg, anchor: NodeId) -> bool;

    /// `name` is declared somewhere inside `anchor`, without looking into
    /// nested devices or method bodies.
    fn exists_in_subtree(&self, tree: &SyntaxTree, name: NameSeg, anchor: NodeId) -> bool;
}

/// Lookups answered by scanning the syntax tree itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeScope;

fn declares(tree: &SyntaxTree, node: NodeId, name: NameSeg) -> bool {
    tree.op(node).declares_name() && tree.name(node) == Some(name)
}

impl ScopeOracle for TreeScope {
    fn exists_in_scope(&self, tree: &SyntaxTree, name: NameSeg, anchor: NodeId) -> bool {
        let Some(parent) = tree.parent(anchor) else {
            return false;
        };
        tree.children(parent)
            .iter()
            .any(|&sibling| sibling != anchor && declares(tree, sibling, name))
    }

    fn exists_in_subtree(&self, tree: &SyntaxTree, name: NameSeg, anchor: NodeId) -> bool {
        let mut nodes = tree.descendants(anchor);
        // The anchor itself is not part of its own scope.
        nodes.next();
        while let Some(node) = nodes.next() {
            if declares(tree, node, name) {
                return true;
            }
            if matches!(tree.op(node), ParseOp::Device | ParseOp::Method) {
                nodes.skip_children_of(node);
            }
        }
        false
    }
}
