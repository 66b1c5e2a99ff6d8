use aslc_core::{Btype, CompileFlags, NodeId, SyntaxTree};
use serde::Serialize;

use super::frame::MethodFrame;

/// Whether a method hands back a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnShape {
    /// Every path returns a value.
    Always,
    /// Some paths return a value, others fall through or return nothing.
    Sometimes,
    Never,
}

impl ReturnShape {
    /// Read back from the flags the analyzer left on a method node.
    pub fn from_flags(flags: CompileFlags) -> Self {
        if flags.contains(CompileFlags::METHOD_SOME_NO_RETVAL) {
            ReturnShape::Sometimes
        } else if flags.contains(CompileFlags::METHOD_NO_RETVAL) {
            ReturnShape::Never
        } else {
            ReturnShape::Always
        }
    }
}

impl std::fmt::Display for ReturnShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReturnShape::Always => write!(f, "always"),
            ReturnShape::Sometimes => write!(f, "sometimes"),
            ReturnShape::Never => write!(f, "never"),
        }
    }
}

/// What the analyzer learned about one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSummary {
    pub name: Option<String>,
    pub node: NodeId,
    pub arg_count: u8,
    /// Bit `n` set: `ArgN` holds a value on entry.
    pub args_at_entry: u8,
    pub returns_with_value: u32,
    pub returns_without_value: u32,
    pub return_shape: ReturnShape,
    pub valid_return_types: Btype,
    pub parameter_types: Vec<Btype>,
    pub creates_named_objects: bool,
    /// Declared `Serialized`.
    pub serialized: bool,
    /// Not declared `Serialized`, but creates named objects.
    pub serialization_recommended: bool,
}

impl MethodSummary {
    pub(crate) fn new(tree: &SyntaxTree, frame: &MethodFrame) -> Self {
        let node = tree.node(frame.method);
        Self {
            name: node.external_name(),
            node: frame.method,
            arg_count: frame.arg_count,
            args_at_entry: frame.args_at_entry(),
            returns_with_value: frame.num_return_with_value,
            returns_without_value: frame.num_return_no_value,
            return_shape: ReturnShape::from_flags(node.flags),
            valid_return_types: frame.valid_return_types,
            parameter_types: frame.valid_arg_types[..frame.arg_count as usize].to_vec(),
            creates_named_objects: frame.creates_named_objects,
            serialized: frame.declared_serialized,
            serialization_recommended: frame.should_be_serialized && !frame.declared_serialized,
        }
    }
}
