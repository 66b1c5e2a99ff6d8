//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Tree file (positional); "-" reads stdin.
pub fn input_path_arg() -> Arg {
    Arg::new("input_path")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Tree file (use \"-\" for stdin)")
}

/// Inline tree notation (-q/--text).
pub fn input_text_arg() -> Arg {
    Arg::new("input_text")
        .short('q')
        .long("text")
        .value_name("TEXT")
        .conflicts_with("input_path")
        .help("Inline tree notation")
}

/// Input is a JSON tree (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Read the input as a JSON tree instead of tree notation")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Show remarks (--remarks).
pub fn remarks_arg() -> Arg {
    Arg::new("remarks")
        .long("remarks")
        .action(ArgAction::SetTrue)
        .help("Also print remarks")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Output format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("text")
        .value_parser(["text", "json"])
        .help("Output format")
}

/// Show source positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show source positions")
}

/// Token budget for the tree notation reader (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .default_value("1000000")
        .value_parser(value_parser!(u32))
        .help("Token budget for the tree notation reader")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .global(true)
        .action(ArgAction::Count)
        .help("Verbosity level (-v for debug logs, -vv for trace logs)")
}
