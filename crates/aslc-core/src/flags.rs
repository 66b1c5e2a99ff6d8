//! Compile-time flags written on syntax nodes.
//!
//! Two producers write these bits:
//! - the parser sets `IS_TARGET` and `IS_NULL_RETURN`
//! - the method analysis pass sets the exit and return-shape bits
//!
//! Bytecode emission reads `METHOD_NO_RETVAL` / `METHOD_SOME_NO_RETVAL` to
//! validate invocations that consume a return value.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
    pub struct CompileFlags: u32 {
        /// Node is the destination operand of a store-like operator.
        const IS_TARGET = 1 << 0;
        /// `Return` / `Return()` with no operand; emitted as `Return(0)`.
        const IS_NULL_RETURN = 1 << 1;
        /// Execution cannot fall through the end of this node.
        const HAS_NO_EXIT = 1 << 2;
        /// Set on an `Else` whose matching `If` has no exit.
        const IF_HAS_NO_EXIT = 1 << 3;
        /// Method never returns a value.
        const METHOD_NO_RETVAL = 1 << 4;
        /// Method returns a value on some paths only.
        const METHOD_SOME_NO_RETVAL = 1 << 5;
    }
}
