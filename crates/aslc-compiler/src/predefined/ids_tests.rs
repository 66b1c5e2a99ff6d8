use crate::diagnostics::{DiagnosticKind, Severity};
use crate::{Analysis, shot_diagnostics};

#[track_caller]
fn kinds(source: &str) -> Vec<DiagnosticKind> {
    Analysis::expect(source).diagnostics().kinds()
}

#[test]
fn pnp_and_acpi_ids() {
    Analysis::expect_valid(r#"(Name _HID "PNP0A03")"#);
    Analysis::expect_valid(r#"(Name _HID "ACPI0003")"#);
    Analysis::expect_valid(r#"(Name _HID "INT33A1")"#);
}

#[test]
fn integer_ids_are_not_inspected() {
    Analysis::expect_valid(r#"(Name _HID (EisaId "PNP0C0A"))"#);
    Analysis::expect_valid("(Name _HID 0x0A0CD041)");
}

#[test]
fn lowercase_hex_digits() {
    shot_diagnostics!(r#"(Name _HID "PNP0a03")"#, @"warning[3011] at 11..20: hardware ID contains lowercase hex digits: PNP0a03 (fix: use uppercase hex digits)");

    let analysis = Analysis::expect(r#"(Name _HID "PNP0a03")"#);
    let fix = analysis.diagnostics().as_slice()[0].fix().unwrap();
    assert_eq!(fix.replacement(), r#""PNP0A03""#);
}

#[test]
fn empty_id() {
    shot_diagnostics!(r#"(Name _HID "")"#, @"error[3009] at 11..13: invalid _HID value: ID string must not be empty");
}

#[test]
fn leading_asterisk() {
    assert_eq!(kinds(r#"(Name _HID "*PNP0A03")"#), vec![DiagnosticKind::InvalidHid]);
}

#[test]
fn malformed_hids() {
    for id in ["pnp0a03", "PNP0A0", "PNP0A0G", "PNP 0A03", "ACPI00030"] {
        let source = format!(r#"(Name _HID "{id}")"#);
        assert_eq!(kinds(&source), vec![DiagnosticKind::InvalidHid], "{id}");
    }
}

#[test]
fn bus_specific_compatible_ids() {
    Analysis::expect_valid(r#"(Name _CID "PCI_BUS")"#);
    Analysis::expect_valid(r#"(Name _CID "PNP0A08")"#);
}

#[test]
fn compatible_id_with_a_space() {
    let analysis = Analysis::expect(r#"(Name _CID "PNP0A08 X")"#);
    assert_eq!(
        analysis.diagnostics().kinds(),
        vec![DiagnosticKind::InvalidCid]
    );
    assert_eq!(analysis.diagnostics().as_slice()[0].severity(), Severity::Error);
}

#[test]
fn compatible_id_package_checks_each_element() {
    let analysis = Analysis::expect(r#"(Name _CID (Package "PNP0A03" "PNP 0A08" "*PNP0A0A"))"#);
    assert_eq!(
        analysis.diagnostics().kinds(),
        vec![DiagnosticKind::InvalidCid, DiagnosticKind::InvalidCid]
    );
}

#[test]
fn compatible_id_package_with_lowercase_hex() {
    let analysis = Analysis::expect(r#"(Name _CID (Package "ACPI000a"))"#);
    assert_eq!(
        analysis.diagnostics().kinds(),
        vec![DiagnosticKind::IdLowercase]
    );
}
