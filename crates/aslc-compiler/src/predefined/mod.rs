//! Predefined (reserved) ACPI names.
//!
//! Names starting with `_` belong to the ACPI specification. The analyzer asks
//! a [`PredefinedNames`] implementation whether a name is reserved and whether
//! a declaration has the shape ACPI requires.
//! [`AcpiPredefined`] answers from a static table.

mod ids;
mod table;

#[cfg(test)]
mod ids_tests;

pub use ids::{IdKind, check_hid_cid};
pub use table::PredefinedInfo;

use aslc_core::{CompileFlags, NameSeg, NodeId, ParseOp, SyntaxTree};
use indexmap::IndexMap;

use crate::analyze::frame::MethodFrame;
use crate::analyze::scope::ScopeOracle;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use table::PREDEFINED_NAMES;

/// Classification of a name segment against the reserved-name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedName {
    /// Index into the predefined-name table.
    Predefined(usize),
    /// `_T_x`: compiler-synthesized temporaries.
    CompilerTemp,
    /// `_Lxx`, `_Exx`, `_Wxx`, `_Qxx`: GPE and EC query handlers.
    Event,
    /// Starts with `_` but is not known.
    Unknown,
    NotReserved,
}

pub trait PredefinedNames {
    fn reserved_name_index(&self, name: NameSeg) -> ReservedName;

    /// `Name` declaration of a reserved name.
    fn check_object_shape(
        &self,
        tree: &SyntaxTree,
        node: NodeId,
        name: NameSeg,
        diagnostics: &mut Diagnostics,
    );

    /// Method declaration, checked once its body has been walked. Returns
    /// whether the method name is a predefined one.
    fn check_method_signature(
        &self,
        tree: &SyntaxTree,
        node: NodeId,
        frame: &MethodFrame,
        diagnostics: &mut Diagnostics,
    ) -> bool;

    /// `Return` inside the method `frame` belongs to.
    fn check_return_value(
        &self,
        tree: &SyntaxTree,
        node: NodeId,
        frame: &MethodFrame,
        diagnostics: &mut Diagnostics,
    );
}

/// Predefined names from the ACPI specification.
#[derive(Debug, Clone)]
pub struct AcpiPredefined {
    index: IndexMap<NameSeg, usize>,
}

impl Default for AcpiPredefined {
    fn default() -> Self {
        Self::new()
    }
}

impl AcpiPredefined {
    pub fn new() -> Self {
        let index = PREDEFINED_NAMES
            .iter()
            .enumerate()
            .filter_map(|(i, info)| info.name.parse::<NameSeg>().ok().map(|name| (name, i)))
            .collect();
        Self { index }
    }

    pub fn info(&self, index: usize) -> Option<&'static PredefinedInfo> {
        PREDEFINED_NAMES.get(index)
    }

    pub fn lookup(&self, name: NameSeg) -> Option<&'static PredefinedInfo> {
        self.index.get(&name).and_then(|&i| self.info(i))
    }

    pub fn names(&self) -> impl Iterator<Item = NameSeg> + '_ {
        self.index.keys().copied()
    }
}

fn is_event_name(name: NameSeg) -> bool {
    let bytes = name.as_bytes();
    bytes[0] == b'_'
        && matches!(bytes[1], b'L' | b'E' | b'W' | b'Q')
        && bytes[2].is_ascii_hexdigit()
        && bytes[3].is_ascii_hexdigit()
}

impl PredefinedNames for AcpiPredefined {
    fn reserved_name_index(&self, name: NameSeg) -> ReservedName {
        if let Some(&i) = self.index.get(&name) {
            return ReservedName::Predefined(i);
        }
        if !name.is_reserved() {
            ReservedName::NotReserved
        } else if name.is_compiler_temp() {
            ReservedName::CompilerTemp
        } else if is_event_name(name) {
            ReservedName::Event
        } else {
            ReservedName::Unknown
        }
    }

    fn check_object_shape(
        &self,
        tree: &SyntaxTree,
        node: NodeId,
        name: NameSeg,
        diagnostics: &mut Diagnostics,
    ) {
        let info = match self.reserved_name_index(name) {
            ReservedName::Predefined(i) => match self.info(i) {
                Some(info) => info,
                None => return,
            },
            ReservedName::Event => {
                diagnostics
                    .report_node(DiagnosticKind::PredefinedMustBeMethod, tree, node)
                    .message(name.as_str())
                    .emit();
                return;
            }
            ReservedName::Unknown => {
                diagnostics
                    .report_node(DiagnosticKind::UnknownReservedName, tree, node)
                    .message(name.as_str())
                    .emit();
                return;
            }
            ReservedName::CompilerTemp | ReservedName::NotReserved => return,
        };

        if info.must_be_method() {
            diagnostics
                .report_node(DiagnosticKind::PredefinedMustBeMethod, tree, node)
                .message(name.as_str())
                .emit();
            return;
        }

        let Some(value) = tree.child(node, 1) else {
            return;
        };
        check_literal_type(tree, value, name, info, diagnostics);
    }

    fn check_method_signature(
        &self,
        tree: &SyntaxTree,
        node: NodeId,
        frame: &MethodFrame,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        let Some(name) = frame.name else {
            return false;
        };

        let info = match self.reserved_name_index(name) {
            ReservedName::Predefined(i) => match self.info(i) {
                Some(info) => info,
                None => return false,
            },
            ReservedName::Event => {
                if frame.arg_count != 0 {
                    report_arg_count(tree, node, name, 0, frame.arg_count, diagnostics);
                }
                return true;
            }
            ReservedName::Unknown => {
                diagnostics
                    .report_node(DiagnosticKind::UnknownReservedName, tree, node)
                    .message(name.as_str())
                    .emit();
                return false;
            }
            ReservedName::CompilerTemp | ReservedName::NotReserved => return false,
        };

        if frame.arg_count != info.arg_count {
            report_arg_count(tree, node, name, info.arg_count, frame.arg_count, diagnostics);
        }

        let no_value = CompileFlags::METHOD_NO_RETVAL | CompileFlags::METHOD_SOME_NO_RETVAL;
        match info.returns {
            Some(_) if tree.flags(node).intersects(no_value) => {
                diagnostics
                    .report_node(DiagnosticKind::PredefinedNoReturnValue, tree, node)
                    .message(name.as_str())
                    .emit();
            }
            None if frame.num_return_with_value > 0 => {
                diagnostics
                    .report_node(DiagnosticKind::PredefinedReturnsValue, tree, node)
                    .message(name.as_str())
                    .emit();
            }
            _ => {}
        }
        true
    }

    fn check_return_value(
        &self,
        tree: &SyntaxTree,
        node: NodeId,
        frame: &MethodFrame,
        diagnostics: &mut Diagnostics,
    ) {
        let Some(name) = frame.name else {
            return;
        };
        let Some(info) = self.lookup(name) else {
            return;
        };
        let Some(value) = tree.first_child(node) else {
            return;
        };
        if tree.has_flags(value, CompileFlags::IS_NULL_RETURN) {
            return;
        }
        check_literal_type(tree, value, name, info, diagnostics);
    }
}

fn check_literal_type(
    tree: &SyntaxTree,
    value: NodeId,
    name: NameSeg,
    info: &PredefinedInfo,
    diagnostics: &mut Diagnostics,
) {
    let (Some(expected), Some(actual)) = (info.returns, tree.op(value).literal_btype()) else {
        return;
    };
    if expected.accepts(actual) {
        return;
    }
    diagnostics
        .report_node(DiagnosticKind::PredefinedTypeMismatch, tree, value)
        .message(format!(
            "`{name}` expects {}, found {}",
            expected.describe(),
            actual.describe()
        ))
        .emit();
}

fn report_arg_count(
    tree: &SyntaxTree,
    node: NodeId,
    name: NameSeg,
    required: u8,
    found: u8,
    diagnostics: &mut Diagnostics,
) {
    diagnostics
        .report_node(DiagnosticKind::PredefinedArgCount, tree, node)
        .message(format!(
            "`{name}` requires {required} argument(s), found {found}"
        ))
        .emit();
}

// ----------------------------------------------------------------------------
// Scope checks run after a predefined method or name has been walked
// ----------------------------------------------------------------------------

/// `_Lxx` and `_Exx` for the same GPE may not share a scope.
pub fn check_gpe_conflict(
    tree: &SyntaxTree,
    scope: &dyn ScopeOracle,
    node: NodeId,
    name: NameSeg,
    diagnostics: &mut Diagnostics,
) {
    let [underscore, kind, hi, lo] = *name.as_bytes();
    let other = match kind {
        b'L' => b'E',
        b'E' => b'L',
        _ => return,
    };
    if underscore != b'_' || !hi.is_ascii_hexdigit() || !lo.is_ascii_hexdigit() {
        return;
    }
    let Ok(target) = NameSeg::new([b'_', other, hi, lo]) else {
        return;
    };
    if scope.exists_in_scope(tree, target, node) {
        diagnostics
            .report_node(DiagnosticKind::GpeNameConflict, tree, node)
            .message(format!("`{name}` and `{target}` both handle the same GPE"))
            .emit();
    }
}

/// A `_REG` method only makes sense next to an `OperationRegion`.
pub fn check_reg_region(
    tree: &SyntaxTree,
    node: NodeId,
    name: NameSeg,
    diagnostics: &mut Diagnostics,
) {
    if name != NameSeg::REG {
        return;
    }
    let Some(parent) = tree.parent(node) else {
        return;
    };
    if tree.op(parent) == ParseOp::DefinitionBlock {
        return;
    }
    let has_region = tree
        .children(parent)
        .iter()
        .any(|&sibling| tree.op(sibling) == ParseOp::OperationRegion);
    if !has_region {
        diagnostics
            .report_node(DiagnosticKind::RegWithoutRegion, tree, node)
            .message(name.as_str())
            .emit();
    }
}
