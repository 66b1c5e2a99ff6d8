use std::fmt::Write;

use aslc_core::{NodeId, SyntaxTree, Value};

/// Indented dump of a syntax tree, one node per line.
///
/// ```text
/// DefinitionBlock
///   Method FOO <Integer> [METHOD_NO_RETVAL]
///     NameSeg FOO
///     Integer 1
/// ```
pub struct TreePrinter<'t> {
    tree: &'t SyntaxTree,
    spans: bool,
    annotations: bool,
}

impl<'t> TreePrinter<'t> {
    pub fn new(tree: &'t SyntaxTree) -> Self {
        Self {
            tree,
            spans: false,
            annotations: true,
        }
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    /// Compile flags and type-sets (on by default).
    pub fn with_annotations(mut self, value: bool) -> Self {
        self.annotations = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(root) = self.tree.root() else {
            return Ok(());
        };

        // Explicit stack: notation trees may nest deeper than the native stack allows.
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            self.format_node(id, depth, w)?;
            for &child in self.tree.children(id).iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        Ok(())
    }

    fn format_node(&self, id: NodeId, depth: usize, w: &mut impl Write) -> std::fmt::Result {
        let node = self.tree.node(id);
        write!(w, "{}{}", "  ".repeat(depth), node.op)?;

        if let Some(name) = node.external_name() {
            write!(w, " {name}")?;
        }
        match &node.value {
            Value::None => {}
            Value::Integer(v) => write!(w, " {v}")?,
            Value::String(s) => write!(w, " {s:?}")?,
        }
        if self.spans {
            write!(w, " @{}..{}", node.span.start, node.span.end)?;
        }
        if self.annotations {
            if !node.btype.is_empty() {
                write!(w, " <{}>", node.btype.describe())?;
            }
            if !node.flags.is_empty() {
                let names: Vec<_> = node.flags.iter_names().map(|(name, _)| name).collect();
                write!(w, " [{}]", names.join(" | "))?;
            }
        }
        writeln!(w)
    }
}
