//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use aslc_core::{NodeId, ParseOp, SyntaxTree};

use super::core::Parser;

impl Parser<'_> {
    #[inline]
    pub(super) fn assert_not_eof(&self) {
        assert!(!self.eof(), "broken parser invariant: bump called at EOF");
    }

    pub(super) fn ensure_started(&mut self, op: ParseOp) -> NodeId {
        self.builder
            .start_node(op)
            .unwrap_or_else(|err| panic!("broken parser invariant: cannot open `{op}`: {err}"))
    }

    pub(super) fn ensure_finished(&mut self) -> NodeId {
        self.builder
            .finish_node()
            .unwrap_or_else(|err| panic!("broken parser invariant: {err}"))
    }

    pub(super) fn ensure_tree(&mut self) -> SyntaxTree {
        std::mem::take(&mut self.builder)
            .finish()
            .unwrap_or_else(|err| panic!("broken parser invariant: {err}"))
    }
}
