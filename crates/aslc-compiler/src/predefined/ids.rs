//! Value-shape checks for `_HID` and `_CID`.
//!
//! A hardware ID is either
//! - a PNP ID: three uppercase letters and four hex digits (`PNP0A03`)
//! - an ACPI ID: four uppercase letters or digits and four hex digits (`ACPI0003`)
//! - an integer, usually built with `EisaId`
//!
//! `_CID` also accepts bus-specific strings such as `PCI\VEN_8086`.

use aslc_core::{NodeId, ParseOp, SyntaxTree};

use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Hid,
    Cid,
}

impl IdKind {
    fn invalid(self) -> DiagnosticKind {
        match self {
            IdKind::Hid => DiagnosticKind::InvalidHid,
            IdKind::Cid => DiagnosticKind::InvalidCid,
        }
    }
}

enum IdForm {
    Valid { lowercase_hex: bool },
    Malformed,
}

fn classify(id: &str) -> IdForm {
    let bytes = id.as_bytes();
    let prefix_len = match bytes.len() {
        7 => 3,
        8 => 4,
        _ => return IdForm::Malformed,
    };
    let (prefix, suffix) = bytes.split_at(prefix_len);

    let prefix_ok = if prefix_len == 3 {
        prefix.iter().all(u8::is_ascii_uppercase)
    } else {
        prefix
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    };
    if !prefix_ok || !suffix.iter().all(u8::is_ascii_hexdigit) {
        return IdForm::Malformed;
    }

    IdForm::Valid {
        lowercase_hex: suffix.iter().any(u8::is_ascii_lowercase),
    }
}

/// Check one ID value. Only string literals are inspected.
pub fn check_hid_cid(
    tree: &SyntaxTree,
    value: NodeId,
    kind: IdKind,
    diagnostics: &mut Diagnostics,
) {
    // Integers (EISAID) are always well-formed.
    if tree.op(value) != ParseOp::String {
        return;
    }
    let Some(id) = tree.node(value).value.as_str() else {
        return;
    };

    if id.is_empty() {
        diagnostics
            .report_node(kind.invalid(), tree, value)
            .message("ID string must not be empty")
            .emit();
        return;
    }
    if id.starts_with('*') {
        diagnostics
            .report_node(kind.invalid(), tree, value)
            .message(format!("`{id}` has a leading asterisk"))
            .emit();
        return;
    }

    match classify(id) {
        IdForm::Valid {
            lowercase_hex: true,
        } => {
            let upper = id.to_ascii_uppercase();
            diagnostics
                .report_node(DiagnosticKind::IdLowercase, tree, value)
                .message(id)
                .fix("use uppercase hex digits", format!("\"{upper}\""))
                .emit();
        }
        IdForm::Valid { .. } => {}
        IdForm::Malformed if kind == IdKind::Cid && !id.contains(' ') => {}
        IdForm::Malformed => {
            diagnostics
                .report_node(kind.invalid(), tree, value)
                .message(format!("`{id}` is not a valid PNP or ACPI ID"))
                .emit();
        }
    }
}
