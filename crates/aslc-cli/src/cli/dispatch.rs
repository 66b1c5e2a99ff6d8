//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::{ColorChoice, OutputFormat};
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::input::InputArgs;

pub struct InputParams {
    pub path: Option<PathBuf>,
    pub text: Option<String>,
    pub json: bool,
    pub fuel: u32,
}

impl InputParams {
    fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: m.get_one::<PathBuf>("input_path").cloned(),
            text: m.get_one::<String>("input_text").cloned(),
            json: m.get_flag("json"),
            fuel: m.get_one::<u32>("fuel").copied().unwrap_or(1_000_000),
        }
    }
}

impl From<InputParams> for InputArgs {
    fn from(p: InputParams) -> Self {
        Self {
            path: p.path,
            text: p.text,
            json: p.json,
            fuel: p.fuel,
        }
    }
}

pub struct CheckParams {
    pub input: InputParams,
    pub strict: bool,
    pub remarks: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            strict: m.get_flag("strict"),
            remarks: m.get_flag("remarks"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: p.input.into(),
            strict: p.strict,
            remarks: p.remarks,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub input: InputParams,
    pub format: OutputFormat,
    pub spans: bool,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            format: parse_format(m),
            spans: m.get_flag("spans"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            input: p.input.into(),
            json_output: p.format == OutputFormat::Json,
            spans: p.spans,
            color: p.color.should_colorize(),
        }
    }
}

/// `-v` count. The flag may come before or after the subcommand.
pub fn verbosity(m: &ArgMatches) -> u8 {
    let inner = m
        .subcommand()
        .map_or(0, |(_, sub)| sub.get_count("verbose"));
    m.get_count("verbose").max(inner)
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_format(m: &ArgMatches) -> OutputFormat {
    match m.get_one::<String>("format").map(|s| s.as_str()) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    }
}
