use aslc_core::NodeId;
use rowan::TextRange;

/// Diagnostic kinds, grouped by the stage that reports them.
///
/// Every kind carries a stable numeric code (see [`DiagnosticKind::code`]).
/// Codes are never reused once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Tree notation
    UnclosedForm,
    UnexpectedToken,
    UnknownOperator,
    InvalidNameSeg,
    InvalidInteger,
    MalformedMethod,

    // Method analysis
    InternalError,
    ArgCountMismatch,
    Recursion,
    IllegalRecursion,
    RegisterOutsideMethod,
    LocalNotInitialized,
    ArgNotInitialized,
    NotParameter,
    ReturnOutsideMethod,
    NoEnclosingWhile,
    InvalidStallTime,
    MissingDependency,
    MultipleTypes,
    ReservedUse,
    StaticOpRegionInMethod,
    NamedObjectInMethod,
    SerializedRequired,
    ReturnTypesInconsistent,
    UnreachableCode,

    // Predefined names
    PredefinedMustBeMethod,
    PredefinedTypeMismatch,
    UnknownReservedName,
    PredefinedArgCount,
    PredefinedNoReturnValue,
    PredefinedReturnsValue,
    GpeNameConflict,
    RegWithoutRegion,
    InvalidHid,
    InvalidCid,
    IdLowercase,
}

impl DiagnosticKind {
    /// Stable numeric code: 1xxx tree notation, 2xxx method analysis,
    /// 3xxx predefined names.
    pub fn code(&self) -> u16 {
        match self {
            Self::UnclosedForm => 1001,
            Self::UnexpectedToken => 1002,
            Self::UnknownOperator => 1003,
            Self::InvalidNameSeg => 1004,
            Self::InvalidInteger => 1005,
            Self::MalformedMethod => 1006,

            Self::InternalError => 2000,
            Self::ArgCountMismatch => 2001,
            Self::Recursion => 2002,
            Self::IllegalRecursion => 2003,
            Self::RegisterOutsideMethod => 2004,
            Self::LocalNotInitialized => 2005,
            Self::ArgNotInitialized => 2006,
            Self::NotParameter => 2007,
            Self::ReturnOutsideMethod => 2008,
            Self::NoEnclosingWhile => 2009,
            Self::InvalidStallTime => 2010,
            Self::MissingDependency => 2011,
            Self::MultipleTypes => 2012,
            Self::ReservedUse => 2013,
            Self::StaticOpRegionInMethod => 2014,
            Self::NamedObjectInMethod => 2015,
            Self::SerializedRequired => 2016,
            Self::ReturnTypesInconsistent => 2017,
            Self::UnreachableCode => 2018,

            Self::PredefinedMustBeMethod => 3001,
            Self::PredefinedTypeMismatch => 3002,
            Self::UnknownReservedName => 3003,
            Self::PredefinedArgCount => 3004,
            Self::PredefinedNoReturnValue => 3005,
            Self::PredefinedReturnsValue => 3006,
            Self::GpeNameConflict => 3007,
            Self::RegWithoutRegion => 3008,
            Self::InvalidHid => 3009,
            Self::InvalidCid => 3010,
            Self::IdLowercase => 3011,
        }
    }

    /// Default severity for this kind. Call sites may override it.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::Recursion
            | Self::RegisterOutsideMethod
            | Self::NotParameter
            | Self::NamedObjectInMethod
            | Self::SerializedRequired => Severity::Remark,

            Self::ReturnOutsideMethod
            | Self::MissingDependency
            | Self::MultipleTypes
            | Self::StaticOpRegionInMethod
            | Self::ReturnTypesInconsistent
            | Self::UnreachableCode
            | Self::PredefinedTypeMismatch
            | Self::UnknownReservedName
            | Self::PredefinedArgCount
            | Self::PredefinedNoReturnValue
            | Self::PredefinedReturnsValue
            | Self::RegWithoutRegion
            | Self::IdLowercase => Severity::Warning,

            _ => Severity::Error,
        }
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidStallTime => Some("use `Sleep` for delays longer than 255 microseconds"),
            Self::SerializedRequired => {
                Some("a second thread entering the method would fail to create the object")
            }
            Self::StaticOpRegionInMethod => {
                Some("declare the region at scope level, outside of any method")
            }
            Self::IllegalRecursion => Some("re-entry would create the named objects twice"),
            Self::LocalNotInitialized => Some("store a value into it before reading"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedForm => "missing closing `)`",
            Self::UnexpectedToken => "unexpected token",
            Self::UnknownOperator => "unknown operator",
            Self::InvalidNameSeg => "invalid name segment",
            Self::InvalidInteger => "invalid integer literal",
            Self::MalformedMethod => "malformed method declaration",

            Self::InternalError => "internal compiler error",
            Self::ArgCountMismatch => "parameter list length does not match argument count",
            Self::Recursion => "recursive method call",
            Self::IllegalRecursion => "recursive call to a method that creates named objects",
            Self::RegisterOutsideMethod => "method register used outside of a method",
            Self::LocalNotInitialized => "method local is not initialized",
            Self::ArgNotInitialized => "method argument is not initialized",
            Self::NotParameter => "argument is not a declared parameter",
            Self::ReturnOutsideMethod => "`Return` outside of a method",
            Self::NoEnclosingWhile => "no enclosing `While`",
            Self::InvalidStallTime => "`Stall` time exceeds 255 microseconds",
            Self::MissingDependency => "missing dependency",
            Self::MultipleTypes => "Device object requires either a _HID or _ADR, but not both",
            Self::ReservedUse => "reserved name used for this object type",
            Self::StaticOpRegionInMethod => "static OperationRegion declared inside a method",
            Self::NamedObjectInMethod => "named object created inside a method",
            Self::SerializedRequired => "method creates named objects and should be Serialized",
            Self::ReturnTypesInconsistent => "not all control paths return a value",
            Self::UnreachableCode => "statement is unreachable",

            Self::PredefinedMustBeMethod => "predefined name must be declared as a Method",
            Self::PredefinedTypeMismatch => "unexpected type for predefined name",
            Self::UnknownReservedName => "unknown reserved name",
            Self::PredefinedArgCount => "wrong argument count for predefined method",
            Self::PredefinedNoReturnValue => "predefined method must return a value",
            Self::PredefinedReturnsValue => "predefined method should not return a value",
            Self::GpeNameConflict => "GPE method conflicts with a method of the other trigger type",
            Self::RegWithoutRegion => "_REG method without an OperationRegion in scope",
            Self::InvalidHid => "invalid _HID value",
            Self::InvalidCid => "invalid _CID value",
            Self::IdLowercase => "hardware ID contains lowercase hex digits",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownOperator => "`{}` is not a known operator".to_string(),
            Self::InvalidNameSeg => "`{}` is not a valid name segment".to_string(),
            Self::Recursion => "recursive call to `{}`".to_string(),
            Self::IllegalRecursion => {
                "`{}` creates named objects and cannot be called recursively".to_string()
            }
            Self::RegisterOutsideMethod => "`{}` used outside of a method".to_string(),
            Self::LocalNotInitialized | Self::ArgNotInitialized => {
                "`{}` is not initialized".to_string()
            }
            Self::NotParameter => "`{}` is not a declared parameter".to_string(),
            Self::NoEnclosingWhile => "`{}` has no enclosing `While`".to_string(),
            Self::ReservedUse => "`{}` is a reserved name and cannot name this object".to_string(),
            Self::NamedObjectInMethod => "`{}` created inside a method".to_string(),
            Self::SerializedRequired => {
                "`{}` creates named objects and should be Serialized".to_string()
            }
            Self::ReturnTypesInconsistent => {
                "`{}`: not all control paths return a value".to_string()
            }
            Self::PredefinedMustBeMethod => "`{}` must be declared as a Method".to_string(),
            Self::UnknownReservedName => "`{}` is not a known reserved name".to_string(),
            Self::PredefinedNoReturnValue => "`{}` must return a value".to_string(),
            Self::PredefinedReturnsValue => "`{}` should not return a value".to_string(),
            Self::RegWithoutRegion => {
                "`{}` method has no OperationRegion in the same scope".to_string()
            }

            // Detail is the complete message
            Self::InternalError
            | Self::MissingDependency
            | Self::PredefinedTypeMismatch
            | Self::PredefinedArgCount
            | Self::GpeNameConflict => "{}".to_string(),

            Self::ArgCountMismatch => format!("{} ({{}})", self.fallback_message()),

            // Standard pattern: fallback + context
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

/// Ordered least to most severe, so `severity >= min` filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    Remark,
    Warning,
    #[default]
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Remark => write!(f, "remark"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub(crate) replacement: String,
    pub(crate) description: String,
}

impl Fix {
    pub fn new(replacement: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
            description: description.into(),
        }
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) severity: Severity,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    /// Tree node the finding is attached to, when there is one.
    pub(crate) node: Option<NodeId>,
    pub(crate) message: String,
    pub(crate) fix: Option<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            range,
            node: None,
            message: message.into(),
            fix: None,
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn code(&self) -> u16 {
        self.kind.code()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fix(&self) -> Option<&Fix> {
        self.fix.as_ref()
    }

    pub fn related(&self) -> &[RelatedInfo] {
        &self.related
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    pub fn is_remark(&self) -> bool {
        self.severity == Severity::Remark
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}] at {}..{}: {}",
            self.severity,
            self.kind.code(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {})", fix.description)?;
        }
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
