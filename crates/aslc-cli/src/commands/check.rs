use aslc_compiler::{Analysis, Severity};

use super::input::{InputArgs, analyze, fail};

pub struct CheckArgs {
    pub input: InputArgs,
    pub strict: bool,
    pub remarks: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let builder = Analysis::builder().warnings_as_errors(args.strict);
    let (input, analysis) = match analyze(&args.input, builder) {
        Ok(loaded) => loaded,
        Err(e) => fail(e, args.color),
    };

    let min_severity = if args.remarks {
        Severity::Remark
    } else {
        Severity::Warning
    };

    let mut printer = analysis
        .diagnostics()
        .printer()
        .colored(args.color)
        .min_severity(min_severity);
    // JSON trees carry no text to point into.
    if !args.input.json {
        printer = printer.source(&input.text).path(&input.name);
    }
    let rendered = printer.render();
    if !rendered.is_empty() {
        eprintln!("{rendered}");
    }

    if !analysis.is_valid() {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
