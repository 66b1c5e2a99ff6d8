//! Parser state and low-level token operations.

use aslc_core::{NodeId, ParseOp, Span, SyntaxTree, TreeBuilder};
use rowan::{TextRange, TextSize};

use super::lexer::{Token, TokenKind, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[derive(Debug)]
pub struct ParseResult {
    pub tree: SyntaxTree,
    pub diagnostics: Diagnostics,
    pub exec_fuel_consumed: u32,
}

pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) builder: TreeBuilder,
    pub(super) diagnostics: Diagnostics,
    pub(super) depth: u32,
    last_diagnostic_pos: Option<TextSize>,
    exec_fuel_initial: Option<u32>,
    exec_fuel_remaining: Option<u32>,
    recursion_fuel_limit: Option<u32>,
    fatal_error: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            builder: TreeBuilder::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
            exec_fuel_initial: None,
            exec_fuel_remaining: None,
            recursion_fuel_limit: None,
            fatal_error: None,
        }
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel_initial = limit;
        self.exec_fuel_remaining = limit;
        self
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel_limit = limit;
        self
    }

    pub fn parse(mut self) -> Result<ParseResult, Error> {
        self.parse_root();
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        let exec_fuel_consumed = match (self.exec_fuel_initial, self.exec_fuel_remaining) {
            (Some(initial), Some(remaining)) => initial.saturating_sub(remaining),
            _ => 0,
        };
        let tree = self.ensure_tree();
        Ok(ParseResult {
            tree,
            diagnostics: self.diagnostics,
            exec_fuel_consumed,
        })
    }

    pub(super) fn has_fatal_error(&self) -> bool {
        self.fatal_error.is_some()
    }

    pub(super) fn current(&self) -> Option<TokenKind> {
        self.nth(0)
    }

    pub(super) fn nth(&self, lookahead: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + lookahead).map(|t| t.kind)
    }

    pub(super) fn nth_text(&self, lookahead: usize) -> Option<&'src str> {
        self.tokens
            .get(self.pos + lookahead)
            .map(|t| token_text(self.source, t))
    }

    pub(super) fn current_text(&self) -> &'src str {
        self.nth_text(0).unwrap_or_default()
    }

    pub(super) fn currently_is(&self, kind: TokenKind) -> bool {
        self.current() == Some(kind)
    }

    /// Current token is an identifier matching `keyword` case-insensitively.
    pub(super) fn nth_is_keyword(&self, lookahead: usize, keyword: &str) -> bool {
        self.nth(lookahead) == Some(TokenKind::Ident)
            && self
                .nth_text(lookahead)
                .is_some_and(|t| t.eq_ignore_ascii_case(keyword))
    }

    pub(super) fn current_span(&self) -> TextRange {
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    pub(super) fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn should_stop(&self) -> bool {
        self.eof() || self.has_fatal_error()
    }

    fn consume_exec_fuel(&mut self) {
        if let Some(ref mut remaining) = self.exec_fuel_remaining {
            if *remaining == 0 {
                if self.fatal_error.is_none() {
                    self.fatal_error = Some(Error::ExecFuelExhausted);
                }
                return;
            }
            *remaining -= 1;
        }
    }

    /// Consume the current token, returning its span.
    pub(super) fn bump(&mut self) -> TextRange {
        self.assert_not_eof();
        self.consume_exec_fuel();
        let span = self.tokens[self.pos].span;
        self.pos += 1;
        span
    }

    pub(super) fn eat_token(&mut self, kind: TokenKind) -> Option<TextRange> {
        self.currently_is(kind).then(|| self.bump())
    }

    // ------------------------------------------------------------------------
    // Tree construction
    // ------------------------------------------------------------------------

    pub(super) fn start_node(&mut self, op: ParseOp, start: TextSize) -> NodeId {
        let id = self.ensure_started(op);
        let start = u32::from(start);
        self.builder.data_mut(id).span = Span::new(start, start);
        id
    }

    pub(super) fn finish_node(&mut self, end: TextSize) -> NodeId {
        let id = self.ensure_finished();
        self.builder.data_mut(id).span.end = u32::from(end);
        id
    }

    pub(super) fn leaf(&mut self, op: ParseOp, range: TextRange) -> NodeId {
        self.start_node(op, range.start());
        self.finish_node(range.end())
    }

    // ------------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------------

    fn should_report(&mut self, pos: TextSize) -> bool {
        if self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    pub(super) fn error_at(
        &mut self,
        kind: DiagnosticKind,
        range: TextRange,
        message: Option<String>,
    ) {
        if !self.should_report(range.start()) {
            return;
        }
        let builder = self.diagnostics.report(kind, range);
        match message {
            Some(msg) => builder.message(msg).emit(),
            None => builder.emit(),
        }
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let range = self.current_span();
        self.error_at(kind, range, Some(message.into()));
    }

    pub(super) fn error_unclosed(&mut self, open_range: TextRange) {
        let current = self.current_span();
        if !self.should_report(current.start()) {
            return;
        }
        let full_range = TextRange::new(open_range.start(), current.end());
        self.diagnostics
            .report(DiagnosticKind::UnclosedForm, full_range)
            .related_to("form opened here", open_range)
            .emit();
    }

    pub(super) fn enter_recursion(&mut self) -> bool {
        if let Some(limit) = self.recursion_fuel_limit
            && self.depth >= limit
        {
            if self.fatal_error.is_none() {
                self.fatal_error = Some(Error::RecursionLimitExceeded);
            }
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Skip tokens up to and including the `)` closing the current form.
    pub(super) fn skip_to_close(&mut self) {
        let mut nesting = 0usize;
        while !self.should_stop() {
            match self.current() {
                Some(TokenKind::ParenOpen) => nesting += 1,
                Some(TokenKind::ParenClose) if nesting == 0 => {
                    self.bump();
                    return;
                }
                Some(TokenKind::ParenClose) => nesting -= 1,
                _ => {}
            }
            self.bump();
        }
    }
}
