//! Arena-backed syntax tree.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. The shape
//! (parent, children, next sibling) is fixed once the tree is built; only the
//! annotation fields may change afterwards.
//!
//! ## Node contract for later passes
//!
//! The method analysis pass writes exactly these fields:
//! - `flags`: `HAS_NO_EXIT`, `IF_HAS_NO_EXIT`, `METHOD_NO_RETVAL`, `METHOD_SOME_NO_RETVAL`
//! - `btype`: the method node's valid return type-set
//! - `op`: type keywords in method headers are rewritten to `DefaultArg`
//! - `value`: a method's argument-count child receives the adopted count
//!
//! Everything else is owned by the tree builder.

use serde::{Deserialize, Serialize};

use crate::btype::Btype;
use crate::flags::CompileFlags;
use crate::name_seg::NameSeg;
use crate::opcode::{AmlOpcode, ParseOp};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Byte range in the source the node was parsed from.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// Literal payload of a node.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    None,
    Integer(u64),
    String(String),
}

impl Value {
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NodeData {
    pub op: ParseOp,
    pub aml_opcode: AmlOpcode,
    /// Name segment for declarations, name references and method calls.
    pub name: Option<NameSeg>,
    /// Name path as written in the source (`\_SB.PCI0.FOO`), when it differs
    /// from the bare segment.
    pub path: Option<String>,
    pub value: Value,
    pub flags: CompileFlags,
    pub btype: Btype,
    pub span: Span,
    pub(crate) parent: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl NodeData {
    pub(crate) fn new(op: ParseOp) -> Self {
        Self {
            op,
            aml_opcode: op.default_aml_opcode(),
            name: None,
            path: None,
            value: Value::None,
            flags: CompileFlags::empty(),
            btype: Btype::empty(),
            span: Span::default(),
            parent: None,
            next: None,
            children: Vec::new(),
        }
    }

    /// Display name used in diagnostics: the written path, else the segment.
    pub fn external_name(&self) -> Option<String> {
        self.path
            .clone()
            .or_else(|| self.name.map(|n| n.to_string()))
    }
}

#[derive(Clone, Debug, Default)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
}

impl SyntaxTree {
    pub(crate) fn from_parts(nodes: Vec<NodeData>, root: Option<NodeId>) -> Self {
        Self { nodes, root }
    }

    pub(crate) fn nodes(&self) -> &[NodeData] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [NodeData] {
        &mut self.nodes
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index())
    }

    pub fn node(&self, id: NodeId) -> &NodeData {
        self.ensure_node(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        self.ensure_node_mut(id)
    }

    pub fn op(&self, id: NodeId) -> ParseOp {
        self.node(id).op
    }

    pub fn name(&self, id: NodeId) -> Option<NameSeg> {
        self.node(id).name
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.node(id).children.get(index).copied()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).children.first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).children.last().copied()
    }

    /// Strict ancestors, innermost first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Nearest strict ancestor with the given op.
    pub fn enclosing(&self, id: NodeId, op: ParseOp) -> Option<NodeId> {
        self.ancestors(id).find(|&a| self.op(a) == op)
    }

    /// Pre-order traversal of the subtree rooted at `id`, including `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    pub fn flags(&self, id: NodeId) -> CompileFlags {
        self.node(id).flags
    }

    pub fn has_flags(&self, id: NodeId, flags: CompileFlags) -> bool {
        self.node(id).flags.contains(flags)
    }

    /// Flags only accumulate.
    pub fn insert_flags(&mut self, id: NodeId, flags: CompileFlags) {
        self.node_mut(id).flags.insert(flags);
    }

    pub fn add_btype(&mut self, id: NodeId, btype: Btype) {
        self.node_mut(id).btype.insert(btype);
    }
}

pub struct Ancestors<'t> {
    tree: &'t SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

pub struct Descendants<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl Descendants<'_> {
    /// Do not descend into the children of the node returned last.
    ///
    /// Must be called right after `next()`; the children were pushed already
    /// and are popped back off here.
    pub fn skip_children_of(&mut self, id: NodeId) {
        let count = self.tree.children(id).len();
        let len = self.stack.len();
        self.stack.truncate(len.saturating_sub(count));
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(current).iter().rev().copied());
        Some(current)
    }
}
