//! Incremental tree construction.

use crate::TreeError;
use crate::name_seg::NameSeg;
use crate::opcode::ParseOp;
use crate::tree::{NodeData, NodeId, Span, SyntaxTree, Value};

/// Builds a [`SyntaxTree`] the way a green-node builder does: open a node,
/// add its children, close it.
///
/// ```
/// use aslc_core::{ParseOp, TreeBuilder};
///
/// let mut b = TreeBuilder::new();
/// b.start_node(ParseOp::DefinitionBlock).unwrap();
/// b.leaf(ParseOp::Noop).unwrap();
/// b.finish_node().unwrap();
/// let tree = b.finish().unwrap();
/// assert_eq!(tree.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    open: Vec<NodeId>,
    root: Option<NodeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a node as the next child of the currently open node.
    pub fn start_node(&mut self, op: ParseOp) -> Result<NodeId, TreeError> {
        let id = NodeId(self.nodes.len() as u32);
        let mut data = NodeData::new(op);

        match self.open.last().copied() {
            Some(parent) => {
                data.parent = Some(parent);
                if let Some(&prev) = self.nodes[parent.index()].children.last() {
                    self.nodes[prev.index()].next = Some(id);
                }
                self.nodes[parent.index()].children.push(id);
            }
            None if self.root.is_some() => return Err(TreeError::MultipleRoots),
            None => self.root = Some(id),
        }

        self.nodes.push(data);
        self.open.push(id);
        Ok(id)
    }

    pub fn finish_node(&mut self) -> Result<NodeId, TreeError> {
        self.open.pop().ok_or(TreeError::UnbalancedFinish)
    }

    /// Open and immediately close a node.
    pub fn leaf(&mut self, op: ParseOp) -> Result<NodeId, TreeError> {
        let id = self.start_node(op)?;
        self.finish_node()?;
        Ok(id)
    }

    pub fn current(&self) -> Option<NodeId> {
        self.open.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn set_name(&mut self, id: NodeId, name: NameSeg) {
        self.data_mut(id).name = Some(name);
    }

    pub fn set_value(&mut self, id: NodeId, value: Value) {
        self.data_mut(id).value = value;
    }

    pub fn set_span(&mut self, id: NodeId, span: Span) {
        self.data_mut(id).span = span;
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.nodes[id.index()].children.len()
    }

    pub fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.index()]
    }

    pub fn finish(self) -> Result<SyntaxTree, TreeError> {
        if !self.open.is_empty() {
            return Err(TreeError::UnclosedNodes(self.open.len()));
        }
        Ok(SyntaxTree::from_parts(self.nodes, self.root))
    }
}
