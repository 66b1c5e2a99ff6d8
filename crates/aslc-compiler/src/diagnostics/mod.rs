mod message;
mod printer;

#[cfg(test)]
mod tests;

use aslc_core::{NodeId, Span, SyntaxTree};
use rowan::TextRange;

pub use message::{DiagnosticKind, DiagnosticMessage, Fix, RelatedInfo, Severity};
pub use printer::DiagnosticsPrinter;

/// Append-only collection of findings, in the order they were reported.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a diagnostic with the given kind and span.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to override.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(kind, range),
        }
    }

    /// Report at a tree node: declarations point at their name, everything
    /// else at the whole node.
    pub fn report_node(
        &mut self,
        kind: DiagnosticKind,
        tree: &SyntaxTree,
        node: NodeId,
    ) -> DiagnosticBuilder<'_> {
        self.report(kind, focus_range(tree, node)).node(node)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|d| d.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn remark_count(&self) -> usize {
        self.count(Severity::Remark)
    }

    fn count(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Kinds in report order, for assertions.
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.messages.iter().map(|d| d.kind).collect()
    }

    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.messages.iter().any(|d| d.kind == kind)
    }

    pub fn as_slice(&self) -> &[DiagnosticMessage] {
        &self.messages
    }

    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub fn render_colored(&self, source: &str, colored: bool) -> String {
        self.printer().source(source).colored(colored).render()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

pub fn span_range(span: Span) -> TextRange {
    TextRange::new(span.start.into(), span.end.into())
}

/// The part of a node worth underlining.
pub fn focus_range(tree: &SyntaxTree, node: NodeId) -> TextRange {
    let data = tree.node(node);
    if data.op.declares_name()
        && let Some(seg) = tree.first_child(node)
        && tree.op(seg) == aslc_core::ParseOp::NameSeg
    {
        return span_range(tree.node(seg).span);
    }
    span_range(data.span)
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide custom detail for this diagnostic, rendered using the kind's template.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let detail = msg.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    /// Override the kind's default severity.
    pub fn severity(mut self, severity: Severity) -> Self {
        self.message.severity = severity;
        self
    }

    pub fn node(mut self, node: NodeId) -> Self {
        self.message.node = Some(node);
        self
    }

    pub fn related_to(mut self, msg: impl Into<String>, range: TextRange) -> Self {
        self.message.related.push(RelatedInfo::new(range, msg));
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    pub fn fix(mut self, description: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.message.fix = Some(Fix::new(replacement, description));
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}
