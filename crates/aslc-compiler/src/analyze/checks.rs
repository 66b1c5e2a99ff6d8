//! Declaration checks run while descending.

use aslc_core::{AmlOpcode, NameSeg, NodeId, ParseOp, SyntaxTree};

use super::method_walk::{MethodAnalyzer, display_name};
use crate::diagnostics::{DiagnosticKind, Severity};
use crate::predefined::ReservedName;

impl MethodAnalyzer<'_> {
    /// `_PS0` needs one of `_PS1`..`_PS3` next to it, and each of those needs `_PS0`.
    pub(super) fn check_power_state_dependencies(
        &mut self,
        tree: &SyntaxTree,
        node: NodeId,
        name: NameSeg,
    ) {
        let scope = self.scope;
        let in_scope = |other| scope.exists_in_scope(tree, other, node);

        if name == NameSeg::PS0 {
            if ![NameSeg::PS1, NameSeg::PS2, NameSeg::PS3]
                .into_iter()
                .any(in_scope)
            {
                self.diagnostics
                    .report_node(DiagnosticKind::MissingDependency, tree, node)
                    .message("_PS0 requires one of _PS1/_PS2/_PS3 in same scope")
                    .emit();
            }
        } else if [NameSeg::PS1, NameSeg::PS2, NameSeg::PS3].contains(&name)
            && !in_scope(NameSeg::PS0)
        {
            self.diagnostics
                .report_node(DiagnosticKind::MissingDependency, tree, node)
                .message(format!("{name} requires _PS0 in same scope"))
                .emit();
        }
    }

    pub(super) fn check_device_dependencies(&mut self, tree: &SyntaxTree, node: NodeId) {
        let scope = self.scope;
        let has = |name| scope.exists_in_subtree(tree, name, node);

        match (has(NameSeg::HID), has(NameSeg::ADR)) {
            (false, false) => self
                .diagnostics
                .report_node(DiagnosticKind::MissingDependency, tree, node)
                .severity(Severity::Error)
                .message("Device object requires a _HID or _ADR")
                .emit(),
            (true, true) => self
                .diagnostics
                .report_node(DiagnosticKind::MultipleTypes, tree, node)
                .emit(),
            _ => {}
        }

        let prs = has(NameSeg::PRS);
        let crs = has(NameSeg::CRS);
        let srs = has(NameSeg::SRS);
        let dis = has(NameSeg::DIS);

        let missing = [
            (prs && !crs, "Device has a _PRS, missing a _CRS, required"),
            (prs && !srs, "Device has a _PRS, missing a _SRS, required"),
            (srs && !prs, "Device has a _SRS, missing a _PRS, required"),
            (dis && !srs, "Device has a _DIS, missing a _SRS, required"),
        ];
        for (_, message) in missing.into_iter().filter(|(missing, _)| *missing) {
            self.diagnostics
                .report_node(DiagnosticKind::MissingDependency, tree, node)
                .message(message)
                .emit();
        }

        if srs && !dis {
            self.diagnostics
                .report_node(DiagnosticKind::MissingDependency, tree, node)
                .severity(Severity::Remark)
                .message("Device has a _SRS, no corresponding _DIS")
                .emit();
        }
    }

    /// Events, mutexes, regions and processor-like objects may not take a
    /// predefined name.
    pub(super) fn check_reserved_declaration(&mut self, tree: &SyntaxTree, node: NodeId) {
        let Some(name) = tree.name(node) else {
            return;
        };
        match self.predefined.reserved_name_index(name) {
            ReservedName::Predefined(_) => self
                .diagnostics
                .report_node(DiagnosticKind::ReservedUse, tree, node)
                .message(name.as_str())
                .emit(),
            ReservedName::Unknown => self
                .diagnostics
                .report_node(DiagnosticKind::UnknownReservedName, tree, node)
                .message(name.as_str())
                .emit(),
            _ => {}
        }
    }

    /// A region with literal address and length is rebuilt on every call.
    pub(super) fn check_static_region(&mut self, tree: &SyntaxTree, node: NodeId) {
        let literal = |index| {
            tree.child(node, index)
                .is_some_and(|c| tree.op(c) == ParseOp::Integer)
        };
        if literal(2) && literal(3) && tree.enclosing(node, ParseOp::Method).is_some() {
            self.diagnostics
                .report_node(DiagnosticKind::StaticOpRegionInMethod, tree, node)
                .emit();
        }
    }

    pub(super) fn check_named_object(&mut self, tree: &SyntaxTree, node: NodeId) {
        if matches!(tree.op(node), ParseOp::Method | ParseOp::Scope) {
            return;
        }
        let Some(frame) = self.frames.top_mut() else {
            return;
        };

        // A Field only adds names on top of an existing region.
        let aml = tree.node(node).aml_opcode;
        if !aml.is_named_object() || aml == AmlOpcode::FIELD {
            return;
        }

        if !tree.name(node).is_some_and(|n| n.is_compiler_temp()) {
            self.diagnostics
                .report_node(DiagnosticKind::NamedObjectInMethod, tree, node)
                .message(display_name(tree, node))
                .emit();
        }

        frame.creates_named_objects = true;
        if !frame.should_be_serialized {
            self.diagnostics
                .report_node(DiagnosticKind::SerializedRequired, tree, frame.method)
                .message(display_name(tree, frame.method))
                .emit();
            frame.should_be_serialized = true;
        }
    }
}
