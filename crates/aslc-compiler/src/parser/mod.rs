//! Reader for the tree notation.
//!
//! The analysis pass consumes trees built by an ASL front-end. This module
//! reads a compact S-expression notation for such trees so they can be
//! written by hand in tests and on the command line:
//!
//! ```text
//! (DefinitionBlock
//!   (Device DEV0
//!     (Name _HID "PNP0A03")
//!     (Method _STA 0 NotSerialized (Returns IntObj)
//!       (Return 0x0F))))
//! ```
//!
//! - `(Op operands...)` builds an `Op` node; declarations take their name first
//! - integers, strings, registers and constants (`Zero`, `Ones`, ...) are leaves
//! - any other bare identifier is a name reference (`\_SB.PCI0`)
//! - `=operand` flags the operand as an assignment target
//! - `(Return)` and a bare `Return` get a zero operand flagged as a null return
//! - `[a b]` is an anonymous `DefaultArg` group, used for parameter types
//!
//! `Method` has a sugared header that expands into the fixed child layout:
//! `(Method NAME [ARGS] [Serialized|NotSerialized [SYNC]] [(Returns T..)]
//! [(Params P..)] body..)`. Each `Params` entry is one parameter position:
//! a bare keyword, or a `[..]` group of keywords.
//!
//! Fuel exhaustion and nesting beyond the recursion limit return `Err`; every
//! other problem is a diagnostic and the reader recovers.

pub mod lexer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod tests;

pub use core::{ParseResult, Parser};

use aslc_core::SyntaxTree;

use crate::PassResult;
use lexer::lex;

/// Read tree notation with no fuel or depth limits.
pub fn parse(source: &str) -> PassResult<SyntaxTree> {
    parse_with_limits(source, None, None)
}

pub fn parse_with_limits(
    source: &str,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
) -> PassResult<SyntaxTree> {
    let result = Parser::new(source, lex(source))
        .with_exec_fuel(exec_fuel)
        .with_recursion_fuel(recursion_fuel)
        .parse()?;
    log::debug!(
        "read {} nodes ({} fuel, {} diagnostics)",
        result.tree.len(),
        result.exec_fuel_consumed,
        result.diagnostics.len()
    );
    Ok((result.tree, result.diagnostics))
}
