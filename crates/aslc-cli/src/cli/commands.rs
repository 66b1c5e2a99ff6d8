//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("aslc")
        .about("Method analysis for ASL syntax trees")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(check_command())
        .subcommand(dump_command())
}

fn with_input_args(cmd: Command) -> Command {
    cmd.arg(input_path_arg())
        .arg(input_text_arg())
        .arg(json_arg())
        .arg(fuel_arg())
}

/// Analyze a tree and report diagnostics.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Analyze the control methods of a tree")
        .override_usage(
            "\
  aslc check <FILE>
  aslc check -q <TEXT>
  aslc check <FILE> --json",
        )
        .after_help(
            r#"EXAMPLES:
  aslc check dsdt.tree                          # tree notation file
  aslc check -q '(Method FOO 0 (Return Local0))'
  aslc check tree.json --json --strict          # tree from an external parser
  aslc check dsdt.tree --remarks                # include remarks"#,
        )
        .arg(strict_arg())
        .arg(remarks_arg())
        .arg(color_arg());

    with_input_args(cmd)
}

/// Print the annotated tree and method summaries.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the annotated tree and method summaries")
        .override_usage(
            "\
  aslc dump <FILE>
  aslc dump -q <TEXT>
  aslc dump <FILE> --format json",
        )
        .after_help(
            r#"EXAMPLES:
  aslc dump -q '(Method FOO 1 (If Arg0 (Return 1)))'
  aslc dump dsdt.tree --spans
  aslc dump tree.json --json --format json"#,
        )
        .arg(format_arg())
        .arg(spans_arg())
        .arg(color_arg());

    with_input_args(cmd)
}
