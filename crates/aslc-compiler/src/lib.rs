//! Method analysis for ASL syntax trees.
//!
//! # Example
//!
//! ```
//! use aslc_compiler::Analysis;
//!
//! let source = r#"
//!     (DefinitionBlock
//!       (Method FOO 1
//!         (Store Arg0 =Local0)
//!         (Return Local0)))
//! "#;
//!
//! let analysis = Analysis::try_from(source).expect("tree notation limits exceeded");
//! eprintln!("{}", analysis.diagnostics().render(source));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analysis;
pub mod analyze;
pub mod diagnostics;
pub mod parser;
pub mod predefined;

#[cfg(test)]
pub(crate) mod test_utils;

/// Result type for passes that produce both output and diagnostics.
///
/// Each pass returns its typed output alongside any diagnostics it collected.
/// Fatal errors (internal inconsistency, fuel exhaustion) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use analysis::{Analysis, AnalysisBuilder, AnalysisConfig};
pub use analyze::{MethodSummary, ReturnShape};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};

/// Errors that abort analysis.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A `Method` or `Return` was ascended with no method frame on the stack.
    ///
    /// Carries everything reported up to the abort, the internal error last.
    #[error("internal consistency error: no method frame while leaving `{node}`")]
    InternalConsistency {
        node: String,
        diagnostics: Diagnostics,
    },

    /// Tree notation exceeded the execution fuel limit.
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// A serialized tree could not be loaded.
    #[error("invalid tree: {0}")]
    InvalidTree(String),

    /// Tree notation nested too deeply.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;
