use aslc_core::{NodeId, ParseOp, SyntaxTree, TreeBuilder};

use super::MethodAnalyzer;
use super::scope::TreeScope;
use super::walk::{TreeHooks, WalkError, WalkResult, walk};
use crate::Error;
use crate::diagnostics::DiagnosticKind;
use crate::parser::parse;
use crate::predefined::AcpiPredefined;

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    skip: Option<ParseOp>,
    abort_on: Option<ParseOp>,
}

impl TreeHooks for Recorder {
    fn descend(&mut self, tree: &mut SyntaxTree, node: NodeId) -> WalkResult {
        let op = tree.op(node);
        self.events.push(format!("> {op}"));
        if self.skip == Some(op) {
            return Err(WalkError::NoContext);
        }
        Ok(())
    }

    fn ascend(&mut self, tree: &mut SyntaxTree, node: NodeId) -> crate::Result<()> {
        let op = tree.op(node);
        self.events.push(format!("< {op}"));
        if self.abort_on == Some(op) {
            return Err(Error::RecursionLimitExceeded);
        }
        Ok(())
    }
}

fn tree(source: &str) -> SyntaxTree {
    parse(source).unwrap().0
}

fn find(tree: &SyntaxTree, op: ParseOp) -> NodeId {
    let root = tree.root().unwrap();
    tree.descendants(root).find(|&n| tree.op(n) == op).unwrap()
}

const SOURCE: &str = "(Store (Add 1 2) =Local0) (Noop)";

#[test]
fn visits_children_between_descend_and_ascend() {
    let mut tree = tree(SOURCE);
    let mut hooks = Recorder::default();
    walk(&mut tree, &mut hooks).unwrap();

    insta::assert_snapshot!(hooks.events.join("\n"), @r"
    > DefinitionBlock
    > Store
    > Add
    > Integer
    < Integer
    > Integer
    < Integer
    < Add
    > Local0
    < Local0
    < Store
    > Noop
    < Noop
    < DefinitionBlock
    ");
}

#[test]
fn no_context_skips_subtree_and_ascend() {
    let mut tree = tree(SOURCE);
    let mut hooks = Recorder {
        skip: Some(ParseOp::Add),
        ..Default::default()
    };
    walk(&mut tree, &mut hooks).unwrap();

    insta::assert_snapshot!(hooks.events.join("\n"), @r"
    > DefinitionBlock
    > Store
    > Add
    > Local0
    < Local0
    < Store
    > Noop
    < Noop
    < DefinitionBlock
    ");
}

#[test]
fn ascend_error_aborts_walk() {
    let mut tree = tree(SOURCE);
    let mut hooks = Recorder {
        abort_on: Some(ParseOp::Add),
        ..Default::default()
    };
    let result = walk(&mut tree, &mut hooks);

    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));
    assert_eq!(hooks.events.last().map(String::as_str), Some("< Add"));
    assert!(!hooks.events.iter().any(|e| e == "> Noop"));
}

#[test]
fn empty_tree_is_not_walked() {
    let mut tree = SyntaxTree::default();
    let mut hooks = Recorder::default();
    walk(&mut tree, &mut hooks).unwrap();
    assert!(hooks.events.is_empty());
}

#[test]
fn deep_trees_do_not_overflow() {
    let depth = 100_000;
    let mut builder = TreeBuilder::new();
    for _ in 0..depth {
        builder.start_node(ParseOp::Not).unwrap();
    }
    builder.leaf(ParseOp::Noop).unwrap();
    for _ in 0..depth {
        builder.finish_node().unwrap();
    }
    let mut tree = builder.finish().unwrap();

    let mut hooks = Recorder::default();
    walk(&mut tree, &mut hooks).unwrap();
    assert_eq!(hooks.events.len(), 2 * (depth + 1));
}

#[test]
fn leaving_method_without_frame_is_fatal() {
    let mut tree = tree("(Method FOO 0 (Return 1))");
    let method = find(&tree, ParseOp::Method);
    let predefined = AcpiPredefined::new();
    let mut analyzer = MethodAnalyzer::new(&TreeScope, &predefined);

    let Err(Error::InternalConsistency { node, diagnostics }) = analyzer.ascend(&mut tree, method)
    else {
        panic!("expected an internal consistency error");
    };
    assert_eq!(node, format!("Method {method}"));
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::InternalError]);
}

#[test]
fn leaving_return_without_frame_is_fatal() {
    let mut tree = tree("(Method FOO 0 (Return 1))");
    let ret = find(&tree, ParseOp::Return);
    let predefined = AcpiPredefined::new();
    let mut analyzer = MethodAnalyzer::new(&TreeScope, &predefined);

    let result = analyzer.ascend(&mut tree, ret);
    assert!(matches!(result, Err(Error::InternalConsistency { .. })));
    let (_, diagnostics) = analyzer.finish();
    insta::assert_snapshot!(diagnostics.printer().render(), @"error[2000] at 14..24: no method frame while leaving `Return`");
}
