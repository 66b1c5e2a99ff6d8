//! Front door: read a tree, run the method analysis, keep the results.

mod dump;
pub mod printer;


pub use printer::TreePrinter;

use aslc_core::SyntaxTree;

use crate::analyze::{self, MethodSummary, ScopeOracle, TreeScope};
use crate::diagnostics::Diagnostics;
use crate::parser;
use crate::predefined::{AcpiPredefined, PredefinedNames};
use crate::{Error, Result};

const DEFAULT_FUEL: u32 = 1_000_000;
const DEFAULT_MAX_DEPTH: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Token budget for the tree notation reader.
    pub fuel: u32,
    /// Nesting limit for the tree notation reader.
    pub max_depth: u32,
    /// Treat warnings as errors when deciding validity.
    pub warnings_as_errors: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fuel: DEFAULT_FUEL,
            max_depth: DEFAULT_MAX_DEPTH,
            warnings_as_errors: false,
        }
    }
}

pub struct AnalysisBuilder {
    config: AnalysisConfig,
    scope: Box<dyn ScopeOracle>,
    predefined: Box<dyn PredefinedNames>,
}

impl Default for AnalysisBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisBuilder {
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
            scope: Box::new(TreeScope),
            predefined: Box::new(AcpiPredefined::new()),
        }
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_fuel(mut self, fuel: u32) -> Self {
        self.config.fuel = fuel;
        self
    }

    pub fn with_max_depth(mut self, limit: u32) -> Self {
        self.config.max_depth = limit;
        self
    }

    pub fn warnings_as_errors(mut self, value: bool) -> Self {
        self.config.warnings_as_errors = value;
        self
    }

    pub fn with_scope(mut self, scope: impl ScopeOracle + 'static) -> Self {
        self.scope = Box::new(scope);
        self
    }

    pub fn with_predefined(mut self, predefined: impl PredefinedNames + 'static) -> Self {
        self.predefined = Box::new(predefined);
        self
    }

    /// Read tree notation and analyze it.
    ///
    /// A tree with notation errors is not analyzed; its diagnostics are kept.
    pub fn parse(self, source: &str) -> Result<Analysis> {
        let (tree, diagnostics) = parser::parse_with_limits(
            source,
            Some(self.config.fuel),
            Some(self.config.max_depth),
        )?;

        let mut analysis = if diagnostics.has_errors() {
            log::debug!("notation errors, skipping method analysis");
            Analysis::unanalyzed(tree, self.config)
        } else {
            self.analyze_tree(tree)?
        };
        analysis.source = Some(source.to_string());
        let mut all = diagnostics;
        all.extend(std::mem::take(&mut analysis.diagnostics));
        analysis.diagnostics = all;
        Ok(analysis)
    }

    /// Load a tree serialized as JSON by an external front-end and analyze it.
    pub fn from_json(self, json: &str) -> Result<Analysis> {
        let tree =
            aslc_core::parse_tree_json(json).map_err(|e| Error::InvalidTree(e.to_string()))?;
        self.analyze_tree(tree)
    }

    pub fn analyze_tree(self, mut tree: SyntaxTree) -> Result<Analysis> {
        let (methods, diagnostics) =
            analyze::analyze_methods(&mut tree, self.scope.as_ref(), self.predefined.as_ref())?;
        Ok(Analysis {
            source: None,
            tree,
            methods,
            diagnostics,
            config: self.config,
        })
    }
}

/// An analyzed tree with its diagnostics and method summaries.
#[derive(Debug)]
pub struct Analysis {
    source: Option<String>,
    tree: SyntaxTree,
    methods: Vec<MethodSummary>,
    diagnostics: Diagnostics,
    config: AnalysisConfig,
}

impl Analysis {
    fn unanalyzed(tree: SyntaxTree, config: AnalysisConfig) -> Self {
        Self {
            source: None,
            tree,
            methods: Vec::new(),
            diagnostics: Diagnostics::new(),
            config,
        }
    }

    pub fn builder() -> AnalysisBuilder {
        AnalysisBuilder::new()
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Summaries in the order the methods were left, innermost first.
    pub fn methods(&self) -> &[MethodSummary] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&MethodSummary> {
        self.methods
            .iter()
            .find(|m| m.name.as_deref() == Some(name))
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn is_valid(&self) -> bool {
        if self.diagnostics.has_errors() {
            return false;
        }
        !(self.config.warnings_as_errors && self.diagnostics.has_warnings())
    }

    pub fn printer(&self) -> TreePrinter<'_> {
        TreePrinter::new(&self.tree)
    }
}

impl TryFrom<&str> for Analysis {
    type Error = Error;

    fn try_from(source: &str) -> Result<Self> {
        AnalysisBuilder::new().parse(source)
    }
}
