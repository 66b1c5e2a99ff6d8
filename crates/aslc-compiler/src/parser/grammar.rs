//! Grammar productions for the tree notation.

use aslc_core::{CompileFlags, NameSeg, NodeId, ParseOp, Value};
use rowan::TextRange;

use super::core::Parser;
use super::lexer::{TokenKind, parse_integer, unescape_string};
use crate::diagnostics::DiagnosticKind;

/// Operators that may appear bare, without parentheses.
fn is_atom(op: ParseOp) -> bool {
    op.register().is_some()
        || op.is_type_keyword()
        || matches!(
            op,
            ParseOp::Zero
                | ParseOp::One
                | ParseOp::Ones
                | ParseOp::Debug
                | ParseOp::Noop
                | ParseOp::Break
                | ParseOp::Continue
                | ParseOp::Timer
                | ParseOp::Return
        )
}

impl Parser<'_> {
    pub(super) fn parse_root(&mut self) {
        let explicit_root =
            self.currently_is(TokenKind::ParenOpen) && self.nth_is_keyword(1, "DefinitionBlock");

        if explicit_root {
            self.parse_item();
            if !self.should_stop() {
                self.error_msg(
                    DiagnosticKind::UnexpectedToken,
                    "unexpected input after DefinitionBlock",
                );
            }
            return;
        }

        self.start_node(ParseOp::DefinitionBlock, 0.into());
        while !self.should_stop() {
            self.parse_item();
        }
        let end = self.eof_offset();
        self.finish_node(end);
    }

    /// Parse one operand. Returns the node built for it, if any.
    fn parse_item(&mut self) -> Option<NodeId> {
        match self.current()? {
            TokenKind::ParenOpen => self.parse_form(),
            TokenKind::BracketOpen => self.parse_group(),
            TokenKind::Equals => self.parse_target(),
            TokenKind::Integer => self.parse_integer_leaf(),
            TokenKind::String => {
                let text = self.current_text();
                let range = self.bump();
                let id = self.leaf(ParseOp::String, range);
                self.builder
                    .set_value(id, Value::String(unescape_string(text)));
                Some(id)
            }
            TokenKind::Ident => self.parse_atom(),
            TokenKind::ParenClose | TokenKind::BracketClose | TokenKind::Garbage => {
                let text = self.current_text();
                self.error_msg(DiagnosticKind::UnexpectedToken, format!("`{text}`"));
                self.bump();
                None
            }
        }
    }

    fn parse_integer_leaf(&mut self) -> Option<NodeId> {
        let text = self.current_text();
        let range = self.bump();
        let id = self.leaf(ParseOp::Integer, range);
        match parse_integer(text) {
            Some(value) => self.builder.set_value(id, Value::Integer(value)),
            None => self.error_at(
                DiagnosticKind::InvalidInteger,
                range,
                Some(format!("`{text}` does not fit in 64 bits")),
            ),
        }
        Some(id)
    }

    /// `=operand`: the operand is the destination of a store-like operator.
    fn parse_target(&mut self) -> Option<NodeId> {
        let equals = self.bump();
        let Some(id) = self.parse_item() else {
            self.error_at(
                DiagnosticKind::UnexpectedToken,
                equals,
                Some("expected a target after `=`".to_string()),
            );
            return None;
        };
        self.builder
            .data_mut(id)
            .flags
            .insert(CompileFlags::IS_TARGET);
        Some(id)
    }

    /// `[a b ...]`: an anonymous `DefaultArg` group.
    fn parse_group(&mut self) -> Option<NodeId> {
        let open = self.bump();
        if !self.enter_recursion() {
            return None;
        }
        let id = self.start_node(ParseOp::DefaultArg, open.start());
        while !self.should_stop() && !self.currently_is(TokenKind::BracketClose) {
            self.parse_item();
        }
        let end = match self.eat_token(TokenKind::BracketClose) {
            Some(close) => close.end(),
            None => {
                self.error_msg(DiagnosticKind::UnexpectedToken, "expected `]`");
                self.current_span().start()
            }
        };
        self.finish_node(end);
        self.exit_recursion();
        Some(id)
    }

    /// Bare identifier: register, constant, type keyword, or name reference.
    fn parse_atom(&mut self) -> Option<NodeId> {
        let text = self.current_text();
        let range = self.bump();

        match ParseOp::from_keyword(text) {
            Some(ParseOp::Return) => {
                let id = self.start_node(ParseOp::Return, range.start());
                self.null_return_operand(range);
                self.finish_node(range.end());
                Some(id)
            }
            Some(op) if is_atom(op) => Some(self.leaf(op, range)),
            Some(op) => {
                self.error_at(
                    DiagnosticKind::UnexpectedToken,
                    range,
                    Some(format!("`{op}` must be written as a form: `({op} ...)`")),
                );
                None
            }
            None => {
                let id = self.leaf(ParseOp::NamePath, range);
                self.attach_name(id, id, text, range);
                Some(id)
            }
        }
    }

    /// `(Op ...)`.
    fn parse_form(&mut self) -> Option<NodeId> {
        let open = self.bump();
        if !self.enter_recursion() {
            return None;
        }

        let result = self.parse_form_body(open);
        self.exit_recursion();
        result
    }

    fn parse_form_body(&mut self, open: TextRange) -> Option<NodeId> {
        if !self.currently_is(TokenKind::Ident) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected an operator name");
            self.skip_to_close();
            return None;
        }

        let keyword = self.current_text();
        let keyword_range = self.bump();
        let Some(op) = ParseOp::from_keyword(keyword) else {
            self.error_at(
                DiagnosticKind::UnknownOperator,
                keyword_range,
                Some(keyword.to_string()),
            );
            self.skip_to_close();
            return None;
        };

        let id = self.start_node(op, open.start());
        match op {
            ParseOp::Method => self.parse_method(id),
            ParseOp::Return => {
                self.parse_operands();
                if self.builder.child_count(id) == 0 {
                    self.null_return_operand(keyword_range);
                }
            }
            ParseOp::MethodCall => {
                self.parse_reference_name(id);
                self.parse_operands();
            }
            ParseOp::OperationRegion => {
                self.parse_declared_name(id);
                self.parse_region_space();
                self.parse_operands();
            }
            _ if op.declares_name() => {
                self.parse_declared_name(id);
                self.parse_operands();
            }
            _ => self.parse_operands(),
        }

        let end = self.close_form(open);
        self.finish_node(end);
        Some(id)
    }

    fn parse_operands(&mut self) {
        while !self.should_stop() && !self.currently_is(TokenKind::ParenClose) {
            self.parse_item();
        }
    }

    fn close_form(&mut self, open: TextRange) -> rowan::TextSize {
        match self.eat_token(TokenKind::ParenClose) {
            Some(close) => close.end(),
            None => {
                self.error_unclosed(open);
                self.eof_offset()
            }
        }
    }

    /// `Return` with no operand carries a zero flagged as a null return.
    fn null_return_operand(&mut self, range: TextRange) {
        let zero = self.leaf(ParseOp::Zero, TextRange::empty(range.end()));
        self.builder
            .data_mut(zero)
            .flags
            .insert(CompileFlags::IS_NULL_RETURN);
    }

    /// Declaration name: becomes the `NameSeg` child and the node's own name.
    fn parse_declared_name(&mut self, owner: NodeId) {
        if !self.currently_is(TokenKind::Ident) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected a name");
            return;
        }
        let text = self.current_text();
        let range = self.bump();
        let seg = self.leaf(ParseOp::NameSeg, range);
        self.attach_name(owner, seg, text, range);
    }

    /// Invocation target: stored on the node itself, no child.
    fn parse_reference_name(&mut self, owner: NodeId) {
        if !self.currently_is(TokenKind::Ident) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected a method name");
            return;
        }
        let text = self.current_text();
        let range = self.bump();
        self.attach_name(owner, owner, text, range);
    }

    fn attach_name(&mut self, owner: NodeId, seg: NodeId, text: &str, range: TextRange) {
        let name = match NameSeg::from_path(text) {
            Ok(name) => name,
            Err(_) => {
                self.error_at(
                    DiagnosticKind::InvalidNameSeg,
                    range,
                    Some(text.to_string()),
                );
                return;
            }
        };
        let path = (text != name.as_str()).then(|| text.to_string());
        for id in [owner, seg] {
            let data = self.builder.data_mut(id);
            data.name = Some(name);
            data.path = path.clone();
        }
    }

    /// `SystemMemory`, `SystemIO`, ... or a raw space id.
    fn parse_region_space(&mut self) {
        if !self.currently_is(TokenKind::Ident) {
            return;
        }
        let text = self.current_text();
        if ParseOp::from_keyword(text).is_some() {
            return;
        }
        let range = self.bump();
        let id = self.leaf(ParseOp::RegionSpace, range);
        self.builder.set_value(id, Value::String(text.to_string()));
    }

    // ------------------------------------------------------------------------
    // Method sugar
    // ------------------------------------------------------------------------

    /// `(Method NAME [ARGS] [Serialized|NotSerialized [SYNC]] [(Returns T..)]
    /// [(Params P..)] body..)` expanded into the fixed declaration layout.
    fn parse_method(&mut self, id: NodeId) {
        self.parse_declared_name(id);

        let arg_count = self.optional_integer().unwrap_or((0, self.here()));
        if arg_count.0 > 7 {
            self.error_at(
                DiagnosticKind::MalformedMethod,
                arg_count.1,
                Some(format!("argument count {} exceeds 7", arg_count.0)),
            );
        }
        self.integer_child(arg_count.0, arg_count.1);

        let (serialized, sync) = if self.nth_is_keyword(0, "Serialized")
            || self.nth_is_keyword(0, "NotSerialized")
        {
            let serialized = self.nth_is_keyword(0, "Serialized");
            let range = self.bump();
            let sync = self.optional_integer().unwrap_or((0, range));
            if sync.0 > 15 {
                self.error_at(
                    DiagnosticKind::MalformedMethod,
                    sync.1,
                    Some(format!("sync level {} exceeds 15", sync.0)),
                );
            }
            ((u64::from(serialized), range), sync)
        } else {
            let here = self.here();
            ((0, here), (0, here))
        };
        self.integer_child(serialized.0, serialized.1);
        self.integer_child(sync.0, sync.1);

        self.type_list("Returns");
        self.type_list("Params");

        self.parse_operands();
    }

    fn here(&self) -> TextRange {
        TextRange::empty(self.current_span().start())
    }

    fn optional_integer(&mut self) -> Option<(u64, TextRange)> {
        if !self.currently_is(TokenKind::Integer) {
            return None;
        }
        let text = self.current_text();
        let range = self.bump();
        match parse_integer(text) {
            Some(value) => Some((value, range)),
            None => {
                self.error_at(DiagnosticKind::InvalidInteger, range, None);
                Some((0, range))
            }
        }
    }

    fn integer_child(&mut self, value: u64, range: TextRange) {
        let id = self.leaf(ParseOp::Integer, range);
        self.builder.set_value(id, Value::Integer(value));
    }

    /// `(Returns ...)` / `(Params ...)` as a `DefaultArg` list; empty when absent.
    fn type_list(&mut self, keyword: &str) {
        let present =
            self.currently_is(TokenKind::ParenOpen) && self.nth_is_keyword(1, keyword);
        if !present {
            let here = self.here();
            self.leaf(ParseOp::DefaultArg, here);
            return;
        }

        let open = self.bump();
        self.bump();
        self.start_node(ParseOp::DefaultArg, open.start());
        while !self.should_stop() && !self.currently_is(TokenKind::ParenClose) {
            if let Some(item) = self.parse_item() {
                let data = self.builder.data(item);
                let (op, span) = (data.op, data.span);
                if op != ParseOp::DefaultArg && !op.is_type_keyword() {
                    let range = TextRange::new(span.start.into(), span.end.into());
                    self.error_at(
                        DiagnosticKind::MalformedMethod,
                        range,
                        Some(format!("`{op}` is not an object type keyword")),
                    );
                }
            }
        }
        let end = self.close_form(open);
        self.finish_node(end);
    }
}
