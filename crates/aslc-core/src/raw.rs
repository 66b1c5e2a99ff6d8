//! JSON interchange format for syntax trees.
//!
//! Front-ends that do their own ASL parsing hand trees over in this shape:
//!
//! ```json
//! { "op": "Method", "name": "FOO", "children": [
//!     { "op": "NameSeg", "name": "FOO" },
//!     { "op": "Integer", "value": 1 }
//! ] }
//! ```
//!
//! `flags` and `btype` are accepted on input and emitted on output when
//! non-empty, so an analyzed tree can be dumped and inspected.

use serde::{Deserialize, Serialize};

use crate::TreeError;
use crate::btype::Btype;
use crate::builder::TreeBuilder;
use crate::flags::CompileFlags;
use crate::name_seg::NameSeg;
use crate::opcode::{AmlOpcode, ParseOp};
use crate::tree::{NodeId, Span, SyntaxTree, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub op: ParseOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aml_opcode: Option<u16>,
    #[serde(default, skip_serializing_if = "CompileFlags::is_empty")]
    pub flags: CompileFlags,
    #[serde(default, skip_serializing_if = "Btype::is_empty")]
    pub btype: Btype,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<(u32, u32)>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Integer(u64),
    String(String),
}

impl RawNode {
    pub fn new(op: ParseOp) -> Self {
        Self {
            op,
            name: None,
            value: None,
            aml_opcode: None,
            flags: CompileFlags::empty(),
            btype: Btype::empty(),
            span: None,
            children: Vec::new(),
        }
    }
}

/// Parse a JSON document into a syntax tree.
pub fn parse_tree_json(text: &str) -> Result<SyntaxTree, TreeError> {
    let raw: RawNode = serde_json::from_str(text)?;
    from_raw(&raw)
}

pub fn from_raw(raw: &RawNode) -> Result<SyntaxTree, TreeError> {
    let mut builder = TreeBuilder::new();
    push_raw(&mut builder, raw)?;
    builder.finish()
}

fn push_raw(builder: &mut TreeBuilder, raw: &RawNode) -> Result<(), TreeError> {
    let id = builder.start_node(raw.op)?;
    {
        let data = builder.data_mut(id);
        if let Some(name) = &raw.name {
            let seg = NameSeg::from_path(name)?;
            if name != seg.as_str() {
                data.path = Some(name.clone());
            }
            data.name = Some(seg);
        }
        data.value = match &raw.value {
            Some(RawValue::Integer(v)) => Value::Integer(*v),
            Some(RawValue::String(s)) => Value::String(s.clone()),
            None => Value::None,
        };
        if let Some(aml) = raw.aml_opcode {
            data.aml_opcode = AmlOpcode(aml);
        }
        data.flags = raw.flags;
        data.btype = raw.btype;
        if let Some((start, end)) = raw.span {
            data.span = Span::new(start, end);
        }
    }

    for child in &raw.children {
        push_raw(builder, child)?;
    }
    builder.finish_node()?;
    Ok(())
}

/// Convert a tree (or a subtree) back into the interchange form.
pub fn to_raw(tree: &SyntaxTree, id: NodeId) -> RawNode {
    let data = tree.node(id);
    RawNode {
        op: data.op,
        name: data.external_name(),
        value: match &data.value {
            Value::None => None,
            Value::Integer(v) => Some(RawValue::Integer(*v)),
            Value::String(s) => Some(RawValue::String(s.clone())),
        },
        aml_opcode: (data.aml_opcode != data.op.default_aml_opcode()).then_some(data.aml_opcode.0),
        flags: data.flags,
        btype: data.btype,
        span: (data.span != Span::default()).then_some((data.span.start, data.span.end)),
        children: tree
            .children(id)
            .iter()
            .map(|&child| to_raw(tree, child))
            .collect(),
    }
}
