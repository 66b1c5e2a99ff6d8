use indoc::indoc;

use crate::diagnostics::{DiagnosticKind, Severity};
use crate::{Analysis, shot_diagnostics};

fn messages(analysis: &Analysis) -> Vec<String> {
    analysis
        .diagnostics()
        .iter()
        .map(|d| d.message().to_string())
        .collect()
}

// ----------------------------------------------------------------------------
// Device identification
// ----------------------------------------------------------------------------

#[test]
fn device_with_hid() {
    Analysis::expect_valid(r#"(Device DEV0 (Name _HID "PNP0A03"))"#);
}

#[test]
fn device_with_adr() {
    Analysis::expect_valid("(Device DEV0 (Name _ADR 0x00020000))");
}

#[test]
fn device_with_hid_method() {
    Analysis::expect_valid(r#"(Device DEV0 (Method _HID 0 (Return "PNP0A03")))"#);
}

#[test]
fn device_without_identification() {
    shot_diagnostics!("(Device DEV0)", @"error[2011] at 8..12: Device object requires a _HID or _ADR");
}

#[test]
fn device_with_both_identifications() {
    shot_diagnostics!(r#"(Device DEV0 (Name _HID "PNP0A03") (Name _ADR 0))"#, @"warning[2012] at 8..12: Device object requires either a _HID or _ADR, but not both");
}

#[test]
fn nested_device_ids_belong_to_the_nested_device() {
    let analysis = Analysis::expect("(Device DEV0 (Device DEV1 (Name _ADR 0)))");
    assert_eq!(
        analysis.diagnostics().kinds(),
        vec![DiagnosticKind::MissingDependency]
    );
    assert_eq!(
        u32::from(analysis.diagnostics().as_slice()[0].range().start()),
        8
    );
}

#[test]
fn names_inside_device_methods_do_not_identify_it() {
    let analysis = Analysis::expect("(Device DEV0 (Method _INI 0 Serialized (Name _ADR 0)))");
    let missing: Vec<_> = analysis
        .diagnostics()
        .iter()
        .filter(|d| d.kind() == DiagnosticKind::MissingDependency)
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].severity(), Severity::Error);
}

#[test]
fn nested_devices_are_checked_independently() {
    Analysis::expect_valid(indoc! {r#"
        (Device PCI0
          (Name _HID "PNP0A03")
          (Device USB0
            (Name _ADR 0x001D0000)))
    "#});
}

// ----------------------------------------------------------------------------
// Resource methods
// ----------------------------------------------------------------------------

#[test]
fn possible_resources_need_current_and_set() {
    let analysis = Analysis::expect("(Device DEV0 (Name _ADR 0) (Name _PRS (Buffer)))");
    assert_eq!(
        messages(&analysis),
        vec![
            "Device has a _PRS, missing a _CRS, required",
            "Device has a _PRS, missing a _SRS, required",
        ]
    );
    assert_eq!(analysis.diagnostics().warning_count(), 2);
}

#[test]
fn set_resources_need_possible_and_disable() {
    let analysis = Analysis::expect("(Device DEV0 (Name _ADR 0) (Method _SRS 1 (Noop)))");
    assert_eq!(
        messages(&analysis),
        vec![
            "Device has a _SRS, missing a _PRS, required",
            "Device has a _SRS, no corresponding _DIS",
        ]
    );
    let severities: Vec<_> = analysis.diagnostics().iter().map(|d| d.severity()).collect();
    assert_eq!(severities, vec![Severity::Warning, Severity::Remark]);
}

#[test]
fn disable_needs_set() {
    let analysis = Analysis::expect("(Device DEV0 (Name _ADR 0) (Method _DIS (Noop)))");
    assert_eq!(
        messages(&analysis),
        vec!["Device has a _DIS, missing a _SRS, required"]
    );
}

#[test]
fn complete_resource_family() {
    Analysis::expect_valid(indoc! {"
        (Device DEV0
          (Name _ADR 0)
          (Name _CRS (Buffer))
          (Name _PRS (Buffer))
          (Method _SRS 1 (Noop))
          (Method _DIS (Noop)))
    "});
}

// ----------------------------------------------------------------------------
// Power states
// ----------------------------------------------------------------------------

#[test]
fn ps0_needs_a_lower_state() {
    let analysis = Analysis::expect("(Device DEV0 (Name _ADR 0) (Method _PS0 (Noop)))");
    assert_eq!(
        messages(&analysis),
        vec!["_PS0 requires one of _PS1/_PS2/_PS3 in same scope"]
    );
}

#[test]
fn ps3_needs_ps0() {
    let analysis = Analysis::expect("(Device DEV0 (Name _ADR 0) (Method _PS3 (Noop)))");
    assert_eq!(messages(&analysis), vec!["_PS3 requires _PS0 in same scope"]);
}

#[test]
fn power_state_pair() {
    Analysis::expect_valid(indoc! {"
        (Device DEV0
          (Name _ADR 0)
          (Method _PS0 (Noop))
          (Method _PS3 (Noop)))
    "});
}

// ----------------------------------------------------------------------------
// Reserved names on other declarations
// ----------------------------------------------------------------------------

#[test]
fn predefined_name_on_a_mutex() {
    shot_diagnostics!("(Mutex _STA 0)", @"error[2013] at 7..11: `_STA` is a reserved name and cannot name this object");
}

#[test]
fn unknown_reserved_name_on_an_event() {
    let analysis = Analysis::expect("(Event _XYZ)");
    assert_eq!(
        analysis.diagnostics().kinds(),
        vec![DiagnosticKind::UnknownReservedName]
    );
    assert!(analysis.is_valid());
}

#[test]
fn ordinary_names_on_declarations() {
    Analysis::expect_valid("(Mutex MTX0 0) (Event EVT0)");
}

// ----------------------------------------------------------------------------
// Operation regions and named objects inside methods
// ----------------------------------------------------------------------------

#[test]
fn static_region_inside_method() {
    let analysis = Analysis::expect(
        "(Method FOO 0 Serialized (OperationRegion OPR0 SystemMemory 0x1000 0x10))",
    );
    assert_eq!(
        analysis.diagnostics().kinds(),
        vec![
            DiagnosticKind::StaticOpRegionInMethod,
            DiagnosticKind::NamedObjectInMethod,
        ]
    );
}

#[test]
fn computed_region_inside_method() {
    let analysis =
        Analysis::expect("(Method FOO 1 Serialized (OperationRegion OPR0 SystemMemory Arg0 0x10))");
    assert_eq!(
        analysis.diagnostics().kinds(),
        vec![DiagnosticKind::NamedObjectInMethod]
    );
}

#[test]
fn static_region_at_scope_level() {
    Analysis::expect_valid("(OperationRegion OPR0 SystemMemory 0x1000 0x10)");
}

#[test]
fn named_objects_require_serialization_once() {
    let analysis = Analysis::expect("(Method FOO 0 (Name BAR 1) (Mutex MTX0 0))");
    assert_eq!(
        analysis.diagnostics().kinds(),
        vec![
            DiagnosticKind::NamedObjectInMethod,
            DiagnosticKind::SerializedRequired,
            DiagnosticKind::NamedObjectInMethod,
        ]
    );
    insta::assert_snapshot!(analysis.dump_diagnostics(), @r"
    remark[2015] at 20..23: `BAR` created inside a method
    remark[2016] at 8..11: `FOO` creates named objects and should be Serialized (hint: a second thread entering the method would fail to create the object)
    remark[2015] at 34..38: `MTX0` created inside a method
    ");

    let foo = analysis.method("FOO").unwrap();
    assert!(foo.creates_named_objects);
    assert!(!foo.serialized);
    assert!(foo.serialization_recommended);
    assert!(analysis.is_valid());
}

#[test]
fn serialized_method_may_create_objects() {
    let analysis = Analysis::expect("(Method FOO 0 Serialized (Name BAR 1))");
    assert_eq!(
        analysis.diagnostics().kinds(),
        vec![DiagnosticKind::NamedObjectInMethod]
    );
}

#[test]
fn compiler_temporaries_are_quiet() {
    let analysis = Analysis::expect_valid("(Method FOO 0 Serialized (Name _T_0 1))");
    assert!(analysis.method("FOO").unwrap().creates_named_objects);
}

#[test]
fn fields_and_scopes_do_not_create_objects() {
    let analysis = Analysis::expect_valid("(Method FOO 0 (Field OPR0) (Scope BAR))");
    assert!(!analysis.method("FOO").unwrap().creates_named_objects);
}

#[test]
fn named_objects_outside_methods() {
    Analysis::expect_valid("(Name BAR 1) (Mutex MTX0 0)");
}
