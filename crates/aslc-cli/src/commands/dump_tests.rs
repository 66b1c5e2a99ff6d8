use aslc_compiler::Analysis;

use super::dump::format_summary;

fn summaries(source: &str) -> String {
    let analysis = Analysis::try_from(source).unwrap();
    analysis
        .methods()
        .iter()
        .map(format_summary)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn summary_lines() {
    insta::assert_snapshot!(summaries("(Method FOO 1 (Returns IntObj) (If Arg0 (Return 1))) (Method BAR (Name XYZ 0))"), @r"
    FOO args=1 returns=sometimes with=1 without=1 types=Integer
    BAR args=0 returns=never with=0 without=1 creates-objects serialize-recommended
    ");
}
