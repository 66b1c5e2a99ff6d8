#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data model for the aslc method analyzer.
//!
//! - [`SyntaxTree`]: arena-backed ASL parse tree with mutable annotations
//! - [`ParseOp`] / [`AmlOpcode`]: parse-level operators and their AML encodings
//! - [`Btype`]: runtime type-sets
//! - [`CompileFlags`]: per-node bits shared between passes
//! - [`NameSeg`]: four-character namespace segments

mod btype;
mod builder;
mod flags;
mod invariants;
mod name_seg;
mod opcode;
mod raw;
mod tree;

#[cfg(test)]
mod opcode_tests;
#[cfg(test)]
mod raw_tests;

pub use btype::Btype;
pub use builder::TreeBuilder;
pub use flags::CompileFlags;
pub use name_seg::NameSeg;
pub use opcode::{AmlOpcode, OpClass, ParseOp, Register};
pub use raw::{RawNode, RawValue, from_raw, parse_tree_json, to_raw};
pub use tree::{Ancestors, Descendants, NodeData, NodeId, Span, SyntaxTree, Value};

/// Errors raised while constructing or loading a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("invalid name segment `{0}`: expected 1-4 characters [A-Z_][A-Z0-9_]*")]
    InvalidNameSeg(String),

    #[error("tree already has a root node")]
    MultipleRoots,

    #[error("finish_node called with no open node")]
    UnbalancedFinish,

    #[error("{0} node(s) left open")]
    UnclosedNodes(usize),

    #[error("invalid tree JSON: {0}")]
    Json(#[from] serde_json::Error),
}
