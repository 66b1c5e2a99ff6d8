//! Depth-first tree walk with paired descend/ascend hooks.
//!
//! # Usage
//!
//! Implement `TreeHooks` for your pass and hand it to [`walk`]. `descend` runs
//! before a node's children, `ascend` after all of them.
//!
//! ```ignore
//! impl TreeHooks for MyPass {
//!     fn descend(&mut self, tree: &mut SyntaxTree, node: NodeId) -> WalkResult {
//!         // Pre-order logic; `Err(WalkError::NoContext)` skips the subtree.
//!         Ok(())
//!     }
//!
//!     fn ascend(&mut self, tree: &mut SyntaxTree, node: NodeId) -> crate::Result<()> {
//!         // Post-order logic; `Err` aborts the walk.
//!         Ok(())
//!     }
//! }
//! ```

use aslc_core::{NodeId, SyntaxTree};

use crate::Error;

/// Why a descend hook refused a node.
#[derive(Debug)]
pub enum WalkError {
    /// The node needs an enclosing context that is not there. The node's
    /// children and its ascend hook are skipped; the walk goes on.
    NoContext,
    /// Abort the whole walk.
    Fatal(Error),
}

impl From<Error> for WalkError {
    fn from(error: Error) -> Self {
        WalkError::Fatal(error)
    }
}

pub type WalkResult = Result<(), WalkError>;

pub trait TreeHooks {
    fn descend(&mut self, tree: &mut SyntaxTree, node: NodeId) -> WalkResult;

    fn ascend(&mut self, tree: &mut SyntaxTree, node: NodeId) -> crate::Result<()>;
}

enum Step {
    Enter(NodeId),
    Leave(NodeId),
}

/// Visit every node of `tree` once: descend, children left to right, ascend.
///
/// Uses an explicit work stack, so tree depth is not bounded by the native stack.
pub fn walk<H: TreeHooks>(tree: &mut SyntaxTree, hooks: &mut H) -> crate::Result<()> {
    let Some(root) = tree.root() else {
        return Ok(());
    };

    let mut work = vec![Step::Enter(root)];
    while let Some(step) = work.pop() {
        match step {
            Step::Enter(node) => match hooks.descend(tree, node) {
                Ok(()) => {
                    work.push(Step::Leave(node));
                    work.extend(tree.children(node).iter().rev().map(|&c| Step::Enter(c)));
                }
                Err(WalkError::NoContext) => {
                    log::debug!("skipping subtree of {} ({})", node, tree.op(node));
                }
                Err(WalkError::Fatal(error)) => return Err(error),
            },
            Step::Leave(node) => hooks.ascend(tree, node)?,
        }
    }
    Ok(())
}
