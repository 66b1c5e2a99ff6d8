use aslc_core::CompileFlags;
use indoc::indoc;

use super::ReturnShape;
use crate::diagnostics::DiagnosticKind;
use crate::{Analysis, shot_tree};

#[test]
fn single_value_return() {
    let analysis = Analysis::expect_valid("(Method FOO 0 (Return 5))");
    let foo = analysis.method("FOO").unwrap();
    assert_eq!((foo.returns_with_value, foo.returns_without_value), (1, 0));
    assert_eq!(foo.return_shape, ReturnShape::Always);
    assert!(analysis.tree().flags(foo.node).contains(CompileFlags::HAS_NO_EXIT));
    assert!(!analysis.tree().flags(foo.node).intersects(
        CompileFlags::METHOD_NO_RETVAL | CompileFlags::METHOD_SOME_NO_RETVAL
    ));
}

#[test]
fn falling_off_the_end_returns_nothing() {
    let analysis = Analysis::expect_valid("(Method FOO 0 (Noop))");
    let foo = analysis.method("FOO").unwrap();
    assert_eq!((foo.returns_with_value, foo.returns_without_value), (0, 1));
    assert_eq!(foo.return_shape, ReturnShape::Never);
    assert!(analysis.tree().has_flags(foo.node, CompileFlags::METHOD_NO_RETVAL));
}

#[test]
fn empty_method_returns_nothing() {
    let analysis = Analysis::expect_valid("(Method FOO)");
    assert_eq!(analysis.method("FOO").unwrap().return_shape, ReturnShape::Never);
}

#[test]
fn explicit_null_return() {
    let analysis = Analysis::expect_valid("(Method FOO 0 (Noop) (Return))");
    let foo = analysis.method("FOO").unwrap();
    assert_eq!((foo.returns_with_value, foo.returns_without_value), (0, 1));
}

#[test]
fn both_arms_return() {
    shot_tree!("(Method FOO 0 (If One (Return 1)) (Else (Return)))", @r"
    DefinitionBlock
      Method FOO [HAS_NO_EXIT | METHOD_SOME_NO_RETVAL]
        NameSeg FOO
        Integer 0
        Integer 0
        Integer 0
        DefaultArg
        DefaultArg
        If [HAS_NO_EXIT]
          One
          Return
            Integer 1
        Else [HAS_NO_EXIT | IF_HAS_NO_EXIT]
          Return
            Zero [IS_NULL_RETURN]
    ");

    let analysis = Analysis::expect("(Method FOO 0 (If One (Return 1)) (Else (Return)))");
    let foo = analysis.method("FOO").unwrap();
    assert_eq!((foo.returns_with_value, foo.returns_without_value), (1, 1));
    assert_eq!(foo.return_shape, ReturnShape::Sometimes);
    assert_eq!(
        analysis.diagnostics().kinds(),
        vec![DiagnosticKind::ReturnTypesInconsistent]
    );
}

#[test]
fn if_without_else_falls_through() {
    let analysis = Analysis::expect("(Method FOO 1 (If Arg0 (Return 1)))");
    let foo = analysis.method("FOO").unwrap();
    assert_eq!((foo.returns_with_value, foo.returns_without_value), (1, 1));
    insta::assert_snapshot!(analysis.dump_diagnostics(), @"warning[2017] at 8..11: `FOO`: not all control paths return a value");
}

#[test]
fn only_else_exits() {
    let analysis = Analysis::expect("(Method FOO 1 (If Arg0 (Noop)) (Else (Return 2)))");
    assert_eq!(
        analysis.diagnostics().kinds(),
        vec![DiagnosticKind::ReturnTypesInconsistent]
    );

    let tree = analysis.tree();
    let foo = analysis.method("FOO").unwrap().node;
    assert!(!tree.has_flags(foo, CompileFlags::HAS_NO_EXIT));
    let else_node = tree.last_child(foo).unwrap();
    assert_eq!(tree.flags(else_node), CompileFlags::HAS_NO_EXIT);
}

#[test]
fn both_arms_return_values() {
    let analysis = Analysis::expect_valid(indoc! {"
        (Method FOO 1
          (If Arg0 (Return 1))
          (Else (Return 2)))
    "});
    let foo = analysis.method("FOO").unwrap();
    assert_eq!((foo.returns_with_value, foo.returns_without_value), (2, 0));
    assert_eq!(foo.return_shape, ReturnShape::Always);
}

#[test]
fn no_exit_propagates_through_while() {
    let analysis = Analysis::expect_valid("(Method FOO 0 (While One (Return 1)))");
    assert_eq!(
        analysis.method("FOO").unwrap().return_shape,
        ReturnShape::Always
    );
}

#[test]
fn statement_after_return_is_unreachable() {
    let analysis = Analysis::expect("(Method FOO 0 (Return 1) (Noop))");
    assert_eq!(
        analysis.diagnostics().kinds(),
        vec![DiagnosticKind::UnreachableCode]
    );
    insta::assert_snapshot!(analysis.dump_diagnostics(), @"warning[2018] at 25..31: statement is unreachable");

    let foo = analysis.method("FOO").unwrap();
    assert_eq!((foo.returns_with_value, foo.returns_without_value), (1, 0));
}

#[test]
fn only_the_next_statement_is_reported() {
    let analysis = Analysis::expect("(Method FOO 0 (Return 1) (Noop) (Noop))");
    assert_eq!(
        analysis.diagnostics().kinds(),
        vec![DiagnosticKind::UnreachableCode]
    );
}

#[test]
fn final_return_is_reachable() {
    Analysis::expect_valid("(Method FOO 0 (Noop) (Return 1))");
}

#[test]
fn return_shape_serializes_lowercase() {
    let analysis = Analysis::expect_valid("(Method FOO 0 (Noop))");
    let json = serde_json::to_value(analysis.method("FOO").unwrap()).unwrap();
    assert_eq!(json["return_shape"], "never");
    assert_eq!(json["name"], "FOO");
    assert_eq!(json["arg_count"], 0);
}
