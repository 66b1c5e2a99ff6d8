use aslc_compiler::{Analysis, MethodSummary};
use aslc_core::{RawNode, to_raw};
use serde::Serialize;

use super::input::{InputArgs, analyze, fail};

pub struct DumpArgs {
    pub input: InputArgs,
    pub json_output: bool,
    pub spans: bool,
    pub color: bool,
}

#[derive(Serialize)]
struct DumpOutput<'a> {
    tree: Option<RawNode>,
    methods: &'a [MethodSummary],
}

pub fn run(args: DumpArgs) {
    let (input, analysis) = match analyze(&args.input, Analysis::builder()) {
        Ok(loaded) => loaded,
        Err(e) => fail(e, args.color),
    };

    if !analysis.diagnostics().is_empty() {
        let mut printer = analysis.diagnostics().printer().colored(args.color);
        if !args.input.json {
            printer = printer.source(&input.text).path(&input.name);
        }
        eprintln!("{}", printer.render());
    }

    if args.json_output {
        let tree = analysis.tree();
        let output = DumpOutput {
            tree: tree.root().map(|root| to_raw(tree, root)),
            methods: analysis.methods(),
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", analysis.printer().with_spans(args.spans).dump());
    for method in analysis.methods() {
        println!("{}", format_summary(method));
    }
}

/// One line per method: `FOO args=1 returns=always with=1 without=0 types=Integer`.
pub(crate) fn format_summary(method: &MethodSummary) -> String {
    let name = method.name.as_deref().unwrap_or("<anonymous>");
    let mut line = format!(
        "{name} args={} returns={} with={} without={}",
        method.arg_count, method.return_shape, method.returns_with_value, method.returns_without_value
    );
    if !method.valid_return_types.is_empty() {
        line.push_str(&format!(" types={}", method.valid_return_types.describe()));
    }
    if method.creates_named_objects {
        line.push_str(" creates-objects");
    }
    if method.serialization_recommended {
        line.push_str(" serialize-recommended");
    }
    line
}
