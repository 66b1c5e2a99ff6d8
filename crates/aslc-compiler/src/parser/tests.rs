use indoc::indoc;

use super::{parse, parse_with_limits};
use crate::Error;
use crate::analysis::printer::TreePrinter;
use crate::diagnostics::DiagnosticKind;

#[track_caller]
fn dump(source: &str) -> String {
    let (tree, diagnostics) = parse(source).expect("no limits configured");
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics:\n{}",
        diagnostics.render(source)
    );
    TreePrinter::new(&tree).dump()
}

#[track_caller]
fn kinds(source: &str) -> Vec<DiagnosticKind> {
    let (_, diagnostics) = parse(source).expect("no limits configured");
    diagnostics.kinds()
}

#[test]
fn method_header_expands_to_fixed_layout() {
    let source = indoc! {r#"
        (Method FOO 2 Serialized 3
          (Returns IntObj)
          (Params IntObj [StrObj BuffObj])
          (Return Arg0))
    "#};

    insta::assert_snapshot!(dump(source), @r"
    DefinitionBlock
      Method FOO
        NameSeg FOO
        Integer 2
        Integer 1
        Integer 3
        DefaultArg
          IntObj
        DefaultArg
          IntObj
          DefaultArg
            StrObj
            BuffObj
        Return
          Arg0
    ");
}

#[test]
fn method_header_defaults() {
    insta::assert_snapshot!(dump("(Method BAR (Noop))"), @r"
    DefinitionBlock
      Method BAR
        NameSeg BAR
        Integer 0
        Integer 0
        Integer 0
        DefaultArg
        DefaultArg
        Noop
    ");
}

#[test]
fn targets_and_null_returns() {
    insta::assert_snapshot!(dump("(Method BAZ 0 (Store 1 =Local0) (Return))"), @r"
    DefinitionBlock
      Method BAZ
        NameSeg BAZ
        Integer 0
        Integer 0
        Integer 0
        DefaultArg
        DefaultArg
        Store
          Integer 1
          Local0 [IS_TARGET]
        Return
          Zero [IS_NULL_RETURN]
    ");
}

#[test]
fn bare_return_is_a_null_return() {
    let output = dump("(While One (If One Return))");
    insta::assert_snapshot!(output, @r"
    DefinitionBlock
      While
        One
        If
          One
          Return
            Zero [IS_NULL_RETURN]
    ");
}

#[test]
fn spans_cover_the_written_form() {
    let (tree, _) = parse(r#"(Name _HID "PNP0A03")"#).unwrap();
    insta::assert_snapshot!(TreePrinter::new(&tree).with_spans(true).dump(), @r#"
    DefinitionBlock @0..21
      Name _HID @0..21
        NameSeg _HID @6..10
        String "PNP0A03" @11..20
    "#);
}

#[test]
fn name_paths_keep_their_spelling() {
    insta::assert_snapshot!(dump(r"(MethodCall \_SB.PCI0.FOO 1 \_SB.DEV0)"), @r"
    DefinitionBlock
      MethodCall \_SB.PCI0.FOO
        Integer 1
        NamePath \_SB.DEV0
    ");
}

#[test]
fn operation_region_space() {
    insta::assert_snapshot!(dump("(OperationRegion OPR0 SystemMemory 0x1000 0x10)"), @r#"
    DefinitionBlock
      OperationRegion OPR0
        NameSeg OPR0
        RegionSpace "SystemMemory"
        Integer 4096
        Integer 16
    "#);
}

#[test]
fn explicit_definition_block_is_the_root() {
    let (tree, diagnostics) = parse("(DefinitionBlock (Noop))").unwrap();
    assert!(diagnostics.is_empty());
    let root = tree.root().unwrap();
    assert_eq!(tree.op(root), aslc_core::ParseOp::DefinitionBlock);
    assert_eq!(tree.children(root).len(), 1);
}

#[test]
fn input_after_definition_block() {
    assert_eq!(
        kinds("(DefinitionBlock (Noop)) (Noop)"),
        vec![DiagnosticKind::UnexpectedToken]
    );
}

#[test]
fn malformed_method_headers() {
    assert_eq!(kinds("(Method FOO 9)"), vec![DiagnosticKind::MalformedMethod]);
    assert_eq!(
        kinds("(Method FOO 0 Serialized 16)"),
        vec![DiagnosticKind::MalformedMethod]
    );
    assert_eq!(
        kinds("(Method FOO 1 (Params 5))"),
        vec![DiagnosticKind::MalformedMethod]
    );
}

#[test]
fn unknown_operator_recovers_at_close() {
    let source = "(Frobnicate (Add 1 2)) (Noop)";
    let (tree, diagnostics) = parse(source).unwrap();
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::UnknownOperator]);

    let root = tree.root().unwrap();
    let ops: Vec<_> = tree.children(root).iter().map(|&c| tree.op(c)).collect();
    assert_eq!(ops, vec![aslc_core::ParseOp::Noop]);
}

#[test]
fn invalid_tokens() {
    assert_eq!(kinds("(Noop))"), vec![DiagnosticKind::UnexpectedToken]);
    assert_eq!(kinds("Device"), vec![DiagnosticKind::UnexpectedToken]);
    assert_eq!(kinds("(Name TOOLONG 1)"), vec![DiagnosticKind::InvalidNameSeg]);
    assert_eq!(
        kinds("(Name FOO 0x1FFFFFFFFFFFFFFFF)"),
        vec![DiagnosticKind::InvalidInteger]
    );
}

#[test]
fn unclosed_form() {
    let source = "(Store 1 =Local0";
    let (_, diagnostics) = parse(source).unwrap();
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::UnclosedForm]);
    insta::assert_snapshot!(diagnostics.printer().render(), @"error[1001] at 0..16: missing closing `)` (related: form opened here at 0..1)");
}

#[test]
fn exec_fuel_exhausted() {
    let result = parse_with_limits("(Noop)", Some(1), None);
    assert!(matches!(result, Err(Error::ExecFuelExhausted)));
}

#[test]
fn recursion_limit_exceeded() {
    let result = parse_with_limits("(Store (Add (Add 1 2) 3) =Local0)", None, Some(2));
    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));

    let result = parse_with_limits("(Store (Add 1 2) =Local0)", None, Some(2));
    assert!(result.is_ok());
}
