//! Descend and ascend hooks of the method analysis.

use aslc_core::{Btype, CompileFlags, NameSeg, NodeId, ParseOp, Register, SyntaxTree, Value};

use super::frame::{FrameStack, MAX_ARGS, MethodFrame};
use super::scope::ScopeOracle;
use super::summary::MethodSummary;
use super::walk::{TreeHooks, WalkError, WalkResult};
use crate::diagnostics::{DiagnosticKind, Diagnostics, focus_range};
use crate::predefined::{self, IdKind, PredefinedNames};
use crate::{Error, Result};

pub(crate) struct MethodAnalyzer<'a> {
    pub(super) scope: &'a dyn ScopeOracle,
    pub(super) predefined: &'a dyn PredefinedNames,
    pub(super) frames: FrameStack,
    pub(super) diagnostics: Diagnostics,
    summaries: Vec<MethodSummary>,
}

impl<'a> MethodAnalyzer<'a> {
    pub(crate) fn new(scope: &'a dyn ScopeOracle, predefined: &'a dyn PredefinedNames) -> Self {
        Self {
            scope,
            predefined,
            frames: FrameStack::new(),
            diagnostics: Diagnostics::new(),
            summaries: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> (Vec<MethodSummary>, Diagnostics) {
        (self.summaries, self.diagnostics)
    }
}

impl TreeHooks for MethodAnalyzer<'_> {
    fn descend(&mut self, tree: &mut SyntaxTree, node: NodeId) -> WalkResult {
        let op = tree.op(node);
        log::trace!("descend {node} {op}");

        if let Some(register) = op.register() {
            return self.visit_register(tree, node, register);
        }

        match op {
            ParseOp::Method => self.enter_method(tree, node),
            ParseOp::MethodCall => self.check_recursion(tree, node),
            ParseOp::Return => self.count_return(tree, node)?,
            ParseOp::Break | ParseOp::Continue => self.check_loop_transfer(tree, node),
            ParseOp::Stall => self.check_stall_time(tree, node),
            ParseOp::Device => self.check_device_dependencies(tree, node),
            ParseOp::Name => self.check_name(tree, node),
            _ if op.is_reserved_checked_declaration() => {
                self.check_reserved_declaration(tree, node);
                if op == ParseOp::OperationRegion {
                    self.check_static_region(tree, node);
                }
            }
            _ => {}
        }

        self.check_named_object(tree, node);
        Ok(())
    }

    fn ascend(&mut self, tree: &mut SyntaxTree, node: NodeId) -> Result<()> {
        let op = tree.op(node);
        log::trace!("ascend {node} {op}");

        match op {
            ParseOp::Method => self.leave_method(tree, node)?,
            ParseOp::Return => self.leave_return(tree, node)?,
            ParseOp::Name => {
                if let Some(name) = tree.name(node) {
                    predefined::check_gpe_conflict(
                        tree,
                        self.scope,
                        node,
                        name,
                        &mut self.diagnostics,
                    );
                }
            }
            ParseOp::If => {
                if tree.has_flags(node, CompileFlags::HAS_NO_EXIT)
                    && let Some(next) = tree.next_sibling(node)
                    && tree.op(next) == ParseOp::Else
                {
                    tree.insert_flags(next, CompileFlags::IF_HAS_NO_EXIT);
                }
            }
            ParseOp::Else => {
                let both_arms =
                    CompileFlags::HAS_NO_EXIT | CompileFlags::IF_HAS_NO_EXIT;
                if tree.has_flags(node, both_arms)
                    && let Some(parent) = tree.parent(node)
                {
                    tree.insert_flags(parent, CompileFlags::HAS_NO_EXIT);
                }
            }
            _ => {
                if tree.has_flags(node, CompileFlags::HAS_NO_EXIT)
                    && let Some(parent) = tree.parent(node)
                {
                    tree.insert_flags(parent, CompileFlags::HAS_NO_EXIT);
                }
            }
        }
        Ok(())
    }
}

impl MethodAnalyzer<'_> {
    // ------------------------------------------------------------------------
    // Method entry and exit
    // ------------------------------------------------------------------------

    fn enter_method(&mut self, tree: &mut SyntaxTree, node: NodeId) {
        let name = tree.name(node);
        if let Some(name) = name {
            self.check_power_state_dependencies(tree, node, name);
        }

        let mut frame = MethodFrame::new(node, name);
        let integer_child = |tree: &SyntaxTree, index| {
            tree.child(node, index)
                .and_then(|c| tree.node(c).value.as_integer())
        };

        let declared = integer_child(tree, 1).map_or(0, |v| (v & 0x07) as u8);
        let serialized = integer_child(tree, 2).is_some_and(|v| v != 0);
        frame.declared_serialized = serialized;
        frame.should_be_serialized = serialized;

        if let Some(list) = tree.child(node, 4) {
            let returns = consume_type_keywords(tree, list);
            frame.valid_return_types |= returns;
            tree.add_btype(node, returns);
        }

        let mut arg_count = declared;
        if let Some(list) = tree.child(node, 5) {
            let params = tree.children(list).to_vec();
            for (position, &param) in params.iter().enumerate() {
                let types = consume_type_keywords(tree, param);
                if let Some(slot) = frame.valid_arg_types.get_mut(position) {
                    *slot |= types;
                }
            }

            if !params.is_empty() {
                let derived = params.len();
                if declared == 0 {
                    arg_count = derived.min(MAX_ARGS as usize) as u8;
                    if derived > MAX_ARGS as usize {
                        let at = tree.child(node, 1).unwrap_or(node);
                        self.diagnostics
                            .report_node(DiagnosticKind::ArgCountMismatch, tree, at)
                            .message(format!("Length = {derived}, at most {MAX_ARGS}"))
                            .emit();
                    }
                    if let Some(count) = tree.child(node, 1) {
                        let flags = tree.node(count).value.as_integer().unwrap_or(0);
                        tree.node_mut(count).value = Value::Integer(flags | u64::from(arg_count));
                    }
                } else if derived != declared as usize {
                    let at = tree.child(node, 1).unwrap_or(node);
                    self.diagnostics
                        .report_node(DiagnosticKind::ArgCountMismatch, tree, at)
                        .message(format!("Length = {derived}"))
                        .emit();
                }
            }
        }

        frame.enter_with_args(arg_count);
        self.frames.push(frame);
    }

    fn leave_method(&mut self, tree: &mut SyntaxTree, node: NodeId) -> Result<()> {
        let Some(mut frame) = self.frames.pop() else {
            return Err(self.internal_error(tree, node));
        };

        let ends_in_return = tree
            .last_child(node)
            .is_some_and(|last| tree.op(last) == ParseOp::Return);
        if !ends_in_return && !tree.has_flags(node, CompileFlags::HAS_NO_EXIT) {
            // Falling off the end returns nothing.
            frame.num_return_no_value += 1;
        }

        let with_value = frame.num_return_with_value > 0;
        let no_value = frame.num_return_no_value > 0;
        if with_value && no_value {
            self.diagnostics
                .report_node(DiagnosticKind::ReturnTypesInconsistent, tree, node)
                .message(display_name(tree, node))
                .emit();
        }
        match (with_value, no_value) {
            (false, true) => tree.insert_flags(node, CompileFlags::METHOD_NO_RETVAL),
            (true, true) => tree.insert_flags(node, CompileFlags::METHOD_SOME_NO_RETVAL),
            _ => {}
        }

        let predefined =
            self.predefined
                .check_method_signature(tree, node, &frame, &mut self.diagnostics);
        if predefined && let Some(name) = frame.name {
            predefined::check_gpe_conflict(tree, self.scope, node, name, &mut self.diagnostics);
            predefined::check_reg_region(tree, node, name, &mut self.diagnostics);
        }

        self.summaries.push(MethodSummary::new(tree, &frame));
        Ok(())
    }

    fn internal_error(&mut self, tree: &SyntaxTree, node: NodeId) -> Error {
        let op = tree.op(node);
        log::warn!("no method frame while leaving {op} {node}, aborting");
        self.diagnostics
            .report_node(DiagnosticKind::InternalError, tree, node)
            .message(format!("no method frame while leaving `{op}`"))
            .emit();
        Error::InternalConsistency {
            node: format!("{op} {node}"),
            diagnostics: self.diagnostics.clone(),
        }
    }

    // ------------------------------------------------------------------------
    // Registers
    // ------------------------------------------------------------------------

    fn visit_register(
        &mut self,
        tree: &SyntaxTree,
        node: NodeId,
        register: Register,
    ) -> WalkResult {
        let Some(frame) = self.frames.top_mut() else {
            self.diagnostics
                .report_node(DiagnosticKind::RegisterOutsideMethod, tree, node)
                .message(register.to_string())
                .emit();
            return Err(WalkError::NoContext);
        };

        if tree.has_flags(node, CompileFlags::IS_TARGET) {
            frame.mark_initialized(register);
        } else if !frame.is_initialized(register) && !observes_type_only(tree, node) {
            let kind = match register {
                Register::Local(_) => DiagnosticKind::LocalNotInitialized,
                Register::Arg(_) => DiagnosticKind::ArgNotInitialized,
            };
            self.diagnostics
                .report_node(kind, tree, node)
                .message(register.to_string())
                .emit();
        }

        if let Register::Arg(index) = register
            && index >= frame.arg_count
        {
            self.diagnostics
                .report_node(DiagnosticKind::NotParameter, tree, node)
                .message(register.to_string())
                .emit();
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Control flow
    // ------------------------------------------------------------------------

    fn count_return(&mut self, tree: &SyntaxTree, node: NodeId) -> WalkResult {
        let Some(frame) = self.frames.top_mut() else {
            self.diagnostics
                .report_node(DiagnosticKind::ReturnOutsideMethod, tree, node)
                .emit();
            return Err(WalkError::NoContext);
        };

        let has_value = tree.first_child(node).is_some_and(|value| {
            tree.op(value) != ParseOp::DefaultArg
                && !tree.has_flags(value, CompileFlags::IS_NULL_RETURN)
        });
        if has_value {
            frame.num_return_with_value += 1;
        } else {
            frame.num_return_no_value += 1;
        }
        Ok(())
    }

    fn leave_return(&mut self, tree: &mut SyntaxTree, node: NodeId) -> Result<()> {
        let Some(frame) = self.frames.top() else {
            return Err(self.internal_error(tree, node));
        };
        self.predefined
            .check_return_value(tree, node, frame, &mut self.diagnostics);

        if let Some(parent) = tree.parent(node) {
            tree.insert_flags(parent, CompileFlags::HAS_NO_EXIT);
        }
        if let Some(next) = tree.next_sibling(node) {
            self.diagnostics
                .report_node(DiagnosticKind::UnreachableCode, tree, next)
                .emit();
        }
        Ok(())
    }

    fn check_loop_transfer(&mut self, tree: &SyntaxTree, node: NodeId) {
        if tree.enclosing(node, ParseOp::While).is_none() {
            self.diagnostics
                .report_node(DiagnosticKind::NoEnclosingWhile, tree, node)
                .message(tree.op(node).keyword())
                .emit();
        }
    }

    fn check_recursion(&mut self, tree: &SyntaxTree, node: NodeId) {
        let Some(frame) = self.frames.top() else {
            return;
        };
        if !calls_method(tree, node, frame.method) {
            return;
        }

        let name = display_name(tree, node);
        if frame.creates_named_objects {
            self.diagnostics
                .report_node(DiagnosticKind::IllegalRecursion, tree, node)
                .message(&name)
                .related_to("method declared here", focus_range(tree, frame.method))
                .emit();
        } else {
            self.diagnostics
                .report_node(DiagnosticKind::Recursion, tree, node)
                .message(&name)
                .emit();
        }
    }

    fn check_stall_time(&mut self, tree: &SyntaxTree, node: NodeId) {
        let Some(time) = tree.first_child(node) else {
            return;
        };
        if tree.op(time) != ParseOp::Integer {
            return;
        }
        if tree.node(time).value.as_integer().is_some_and(|v| v > 255) {
            self.diagnostics
                .report_node(DiagnosticKind::InvalidStallTime, tree, time)
                .emit();
        }
    }

    // ------------------------------------------------------------------------
    // Name declarations
    // ------------------------------------------------------------------------

    fn check_name(&mut self, tree: &SyntaxTree, node: NodeId) {
        let Some(name) = tree.name(node) else {
            return;
        };
        self.predefined
            .check_object_shape(tree, node, name, &mut self.diagnostics);

        let Some(value) = tree.child(node, 1) else {
            return;
        };
        if name == NameSeg::HID {
            predefined::check_hid_cid(tree, value, IdKind::Hid, &mut self.diagnostics);
        } else if name == NameSeg::CID {
            if matches!(tree.op(value), ParseOp::Package | ParseOp::VarPackage) {
                for &element in tree.children(value) {
                    predefined::check_hid_cid(tree, element, IdKind::Cid, &mut self.diagnostics);
                }
            } else {
                predefined::check_hid_cid(tree, value, IdKind::Cid, &mut self.diagnostics);
            }
        }
    }
}

/// Whether the invocation `call` names `method` itself.
///
/// A bare segment resolves to the innermost method of that name. A qualified
/// path only matches when written the same way as the declaration; anything
/// else may be a different object sharing the last segment.
fn calls_method(tree: &SyntaxTree, call: NodeId, method: NodeId) -> bool {
    let (call, method) = (tree.node(call), tree.node(method));
    if call.name.is_none() || call.name != method.name {
        return false;
    }
    let bare = call
        .path
        .as_deref()
        .is_none_or(|path| !path.contains(['\\', '^', '.']));
    bare || call.external_name() == method.external_name()
}

/// `ObjectType` may look at an uninitialized register: "uninitialized" is one
/// of the answers it can give.
fn observes_type_only(tree: &SyntaxTree, node: NodeId) -> bool {
    tree.parent(node)
        .is_some_and(|parent| tree.op(parent) == ParseOp::ObjectType)
}

/// Union of the object type keywords under `node`, each rewritten to
/// `DefaultArg` so later passes do not take it for an operand.
fn consume_type_keywords(tree: &mut SyntaxTree, node: NodeId) -> Btype {
    let keywords: Vec<_> = tree
        .descendants(node)
        .filter_map(|id| tree.op(id).type_keyword_btype().map(|btype| (id, btype)))
        .collect();

    let mut union = Btype::ANY;
    for (id, btype) in keywords {
        union |= btype;
        tree.node_mut(id).op = ParseOp::DefaultArg;
    }
    union
}

pub(super) fn display_name(tree: &SyntaxTree, node: NodeId) -> String {
    tree.node(node)
        .external_name()
        .unwrap_or_else(|| tree.op(node).keyword().to_string())
}
