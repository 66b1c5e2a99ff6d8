//! Method analysis: one walk over the tree validating control methods.
//!
//! The walk keeps a stack of [`MethodFrame`]s, one per method being visited,
//! and checks on the way down:
//! - definite assignment of `Local0..Local7` and `Arg0..Arg6`
//! - `Break` / `Continue` placement, `Stall` limits, recursion
//! - device identification and resource dependencies
//! - reserved names, static regions and named objects inside methods
//!
//! On the way up it propagates "no exit" through the tree and reconciles the
//! return statements of each method. Results are written onto the tree
//! (see the node contract in `aslc_core::tree`) and summarized per method.

pub mod frame;
pub mod scope;
pub mod walk;

mod checks;
mod method_walk;
mod summary;

#[cfg(test)]
mod checks_tests;
#[cfg(test)]
mod returns_tests;
#[cfg(test)]
mod walk_tests;

pub use frame::{FrameStack, MethodFrame};
pub use scope::{ScopeOracle, TreeScope};
pub use summary::{MethodSummary, ReturnShape};

pub(crate) use method_walk::MethodAnalyzer;

use aslc_core::SyntaxTree;

use crate::PassResult;
use crate::predefined::PredefinedNames;

/// Run the method analysis over `tree`, annotating it in place.
pub fn analyze_methods(
    tree: &mut SyntaxTree,
    scope: &dyn ScopeOracle,
    predefined: &dyn PredefinedNames,
) -> PassResult<Vec<MethodSummary>> {
    let mut analyzer = MethodAnalyzer::new(scope, predefined);
    walk::walk(tree, &mut analyzer)?;

    let (summaries, diagnostics) = analyzer.finish();
    log::debug!(
        "analyzed {} methods: {} errors, {} warnings, {} remarks",
        summaries.len(),
        diagnostics.error_count(),
        diagnostics.warning_count(),
        diagnostics.remark_count()
    );
    Ok((summaries, diagnostics))
}
