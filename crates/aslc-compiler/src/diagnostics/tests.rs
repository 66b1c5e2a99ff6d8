use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display_and_order() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
    insta::assert_snapshot!(format!("{}", Severity::Remark), @"remark");
    assert!(Severity::Remark < Severity::Warning);
    assert!(Severity::Warning < Severity::Error);
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnreachableCode, range(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_warnings());
    assert!(!diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.printer().render(), @"warning[2018] at 0..5: statement is unreachable");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::LocalNotInitialized, range(3, 9))
        .message("Local3")
        .emit();

    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"error[2005] at 3..9: `Local3` is not initialized (hint: store a value into it before reading)"
    );
}

#[test]
fn detail_templates() {
    assert_eq!(
        DiagnosticKind::ArgCountMismatch.message(Some("Length = 2")),
        "parameter list length does not match argument count (Length = 2)"
    );
    assert_eq!(
        DiagnosticKind::MissingDependency.message(Some("Device object requires a _HID or _ADR")),
        "Device object requires a _HID or _ADR"
    );
    assert_eq!(
        DiagnosticKind::InvalidStallTime.message(Some("300")),
        "`Stall` time exceeds 255 microseconds: 300"
    );
    assert_eq!(
        DiagnosticKind::Recursion.message(None),
        "recursive method call"
    );
}

#[test]
fn severity_override() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MissingDependency, range(0, 1))
        .severity(Severity::Remark)
        .emit();
    diagnostics
        .report(DiagnosticKind::MissingDependency, range(0, 1))
        .severity(Severity::Error)
        .emit();

    assert_eq!(diagnostics.remark_count(), 1);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 0);
}

#[test]
fn builder_with_related_and_node() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::IllegalRecursion, range(10, 14))
        .message("FOO_")
        .related_to("method declared here", range(0, 4))
        .emit();

    let msg = &diagnostics.as_slice()[0];
    assert_eq!(msg.related().len(), 1);
    assert_eq!(msg.node(), None);
    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"error[2003] at 10..14: `FOO_` creates named objects and cannot be called recursively (related: method declared here at 0..4) (hint: re-entry would create the named objects twice)"
    );
}

#[test]
fn builder_with_fix() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::IdLowercase, range(0, 9))
        .fix("use uppercase hex digits", "\"PNP0a03\"")
        .emit();

    let fix = diagnostics.as_slice()[0].fix().unwrap();
    assert_eq!(fix.description(), "use uppercase hex digits");
    assert_eq!(fix.replacement(), "\"PNP0a03\"");
}

#[test]
fn min_severity_hides_remarks() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::NamedObjectInMethod, range(0, 3))
        .emit();
    diagnostics
        .report(DiagnosticKind::NoEnclosingWhile, range(4, 9))
        .message("Break")
        .emit();

    insta::assert_snapshot!(diagnostics.printer().min_severity(Severity::Warning).render(), @"error[2009] at 4..9: `Break` has no enclosing `While`");
    assert_eq!(diagnostics.printer().render().lines().count(), 2);
}

#[test]
fn renders_source_snippets() {
    let source = "(Break)";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::NoEnclosingWhile, range(1, 6))
        .message("Break")
        .emit();

    let out = diagnostics.render(source);
    assert!(out.contains("error[2009]"), "{out}");
    assert!(out.contains("(Break)"), "{out}");
    assert!(out.contains("^^^^^"), "{out}");
}

#[test]
fn renders_remarks_as_notes() {
    let source = "(Name X 1)";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::NamedObjectInMethod, range(1, 5))
        .emit();

    let out = diagnostics.printer().source(source).path("t.asl").render();
    assert!(out.starts_with("note[2015]"), "{out}");
    assert!(out.contains("t.asl"), "{out}");
}

#[test]
fn empty_range_at_eof() {
    let source = "(If";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedForm, range(3, 3))
        .emit();

    let out = diagnostics.render(source);
    assert!(out.contains("missing closing `)`"), "{out}");
}
