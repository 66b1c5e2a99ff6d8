//! Test utilities and snapshot macros.

/// Snapshot of the annotated tree after analysis.
#[macro_export]
macro_rules! shot_tree {
    ($source:literal, @$snapshot:literal) => {{
        let source = indoc::indoc!($source).trim();
        let output = $crate::Analysis::expect(source).dump_tree();
        insta::assert_snapshot!(output, @$snapshot);
    }};
}

/// Snapshot of the plain-rendered diagnostics.
#[macro_export]
macro_rules! shot_diagnostics {
    ($source:literal, @$snapshot:literal) => {{
        let source = indoc::indoc!($source).trim();
        let output = $crate::Analysis::expect(source).dump_diagnostics();
        insta::assert_snapshot!(output, @$snapshot);
    }};
}

/// Snapshot of the diagnostics rendered against the source.
#[macro_export]
macro_rules! shot_snippets {
    ($source:literal, @$snapshot:literal) => {{
        let source = indoc::indoc!($source).trim();
        let output = $crate::Analysis::expect(source).dump_diagnostics_snippets();
        insta::assert_snapshot!(output, @$snapshot);
    }};
}
