//! Tests for CLI dispatch logic.

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{check_command, dump_command};

#[test]
fn check_extracts_flags() {
    let m = check_command()
        .try_get_matches_from(["check", "dsdt.tree", "--strict", "--remarks", "--color", "never"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.input.path, Some(PathBuf::from("dsdt.tree")));
    assert_eq!(params.input.text, None);
    assert!(!params.input.json);
    assert!(params.strict);
    assert!(params.remarks);
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn check_defaults() {
    let m = check_command()
        .try_get_matches_from(["check", "-q", "(Method FOO)"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.input.text.as_deref(), Some("(Method FOO)"));
    assert_eq!(params.input.fuel, 1_000_000);
    assert!(!params.strict);
    assert!(!params.remarks);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn inline_text_conflicts_with_file() {
    let result = check_command().try_get_matches_from(["check", "dsdt.tree", "-q", "(Noop)"]);
    assert!(result.is_err());
}

#[test]
fn check_rejects_unknown_color() {
    let result = check_command().try_get_matches_from(["check", "a.tree", "--color", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn dump_extracts_flags() {
    let m = dump_command()
        .try_get_matches_from(["dump", "tree.json", "--json", "--format", "json", "--spans", "--fuel", "50"])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.input.path, Some(PathBuf::from("tree.json")));
    assert!(params.input.json);
    assert_eq!(params.input.fuel, 50);
    assert_eq!(params.format, OutputFormat::Json);
    assert!(params.spans);
}

#[test]
fn dump_rejects_check_flags() {
    let result = dump_command().try_get_matches_from(["dump", "a.tree", "--strict"]);
    assert!(result.is_err());
}

#[test]
fn verbosity_is_global() {
    let m = build_cli()
        .try_get_matches_from(["aslc", "check", "a.tree", "-vv"])
        .unwrap();
    assert_eq!(verbosity(&m), 2);

    let m = build_cli()
        .try_get_matches_from(["aslc", "dump", "a.tree"])
        .unwrap();
    assert_eq!(verbosity(&m), 0);
}

#[test]
fn subcommand_is_required() {
    assert!(build_cli().try_get_matches_from(["aslc"]).is_err());
}

#[test]
fn help_lists_commands() {
    let help = build_cli().render_help().to_string();
    assert!(help.contains("check"));
    assert!(help.contains("dump"));
}
