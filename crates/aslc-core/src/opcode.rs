//! Parse-op tags and the AML opcode classifier.
//!
//! Every syntax node carries two tags:
//! - [`ParseOp`]: the grammar-level operation (closed set, one per ASL keyword)
//! - [`AmlOpcode`]: the raw bytecode opcode the node lowers to
//!
//! The classifier is a set of pure predicates over these tags. It never looks
//! at the tree.

use serde::{Deserialize, Serialize};

use crate::btype::Btype;

/// Raw AML opcode. Extended opcodes carry the `0x5B` prefix in the high byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmlOpcode(pub u16);

impl AmlOpcode {
    /// Nodes that never lower to bytecode on their own (keywords, lists, placeholders).
    pub const NONE: AmlOpcode = AmlOpcode(0xFFFF);

    pub const ZERO: AmlOpcode = AmlOpcode(0x00);
    pub const ONE: AmlOpcode = AmlOpcode(0x01);
    pub const ALIAS: AmlOpcode = AmlOpcode(0x06);
    pub const NAME: AmlOpcode = AmlOpcode(0x08);
    pub const BYTE: AmlOpcode = AmlOpcode(0x0A);
    pub const STRING: AmlOpcode = AmlOpcode(0x0D);
    pub const QWORD: AmlOpcode = AmlOpcode(0x0E);
    pub const SCOPE: AmlOpcode = AmlOpcode(0x10);
    pub const BUFFER: AmlOpcode = AmlOpcode(0x11);
    pub const PACKAGE: AmlOpcode = AmlOpcode(0x12);
    pub const VAR_PACKAGE: AmlOpcode = AmlOpcode(0x13);
    pub const METHOD: AmlOpcode = AmlOpcode(0x14);
    pub const EXTERNAL: AmlOpcode = AmlOpcode(0x15);
    pub const NAMEPATH: AmlOpcode = AmlOpcode(0x2D);
    pub const METHOD_CALL: AmlOpcode = AmlOpcode(0x35);
    pub const LOCAL0: AmlOpcode = AmlOpcode(0x60);
    pub const ARG0: AmlOpcode = AmlOpcode(0x68);
    pub const STORE: AmlOpcode = AmlOpcode(0x70);
    pub const REF_OF: AmlOpcode = AmlOpcode(0x71);
    pub const ADD: AmlOpcode = AmlOpcode(0x72);
    pub const CONCAT: AmlOpcode = AmlOpcode(0x73);
    pub const SUBTRACT: AmlOpcode = AmlOpcode(0x74);
    pub const INCREMENT: AmlOpcode = AmlOpcode(0x75);
    pub const DECREMENT: AmlOpcode = AmlOpcode(0x76);
    pub const MULTIPLY: AmlOpcode = AmlOpcode(0x77);
    pub const DIVIDE: AmlOpcode = AmlOpcode(0x78);
    pub const SHIFT_LEFT: AmlOpcode = AmlOpcode(0x79);
    pub const SHIFT_RIGHT: AmlOpcode = AmlOpcode(0x7A);
    pub const AND: AmlOpcode = AmlOpcode(0x7B);
    pub const OR: AmlOpcode = AmlOpcode(0x7D);
    pub const XOR: AmlOpcode = AmlOpcode(0x7F);
    pub const NOT: AmlOpcode = AmlOpcode(0x80);
    pub const DEREF_OF: AmlOpcode = AmlOpcode(0x83);
    pub const MOD: AmlOpcode = AmlOpcode(0x85);
    pub const NOTIFY: AmlOpcode = AmlOpcode(0x86);
    pub const SIZE_OF: AmlOpcode = AmlOpcode(0x87);
    pub const INDEX: AmlOpcode = AmlOpcode(0x88);
    pub const CREATE_DWORD_FIELD: AmlOpcode = AmlOpcode(0x8A);
    pub const CREATE_WORD_FIELD: AmlOpcode = AmlOpcode(0x8B);
    pub const CREATE_BYTE_FIELD: AmlOpcode = AmlOpcode(0x8C);
    pub const CREATE_BIT_FIELD: AmlOpcode = AmlOpcode(0x8D);
    pub const OBJECT_TYPE: AmlOpcode = AmlOpcode(0x8E);
    pub const CREATE_QWORD_FIELD: AmlOpcode = AmlOpcode(0x8F);
    pub const LAND: AmlOpcode = AmlOpcode(0x90);
    pub const LOR: AmlOpcode = AmlOpcode(0x91);
    pub const LNOT: AmlOpcode = AmlOpcode(0x92);
    pub const LEQUAL: AmlOpcode = AmlOpcode(0x93);
    pub const LGREATER: AmlOpcode = AmlOpcode(0x94);
    pub const LLESS: AmlOpcode = AmlOpcode(0x95);
    pub const TO_BUFFER: AmlOpcode = AmlOpcode(0x96);
    pub const TO_INTEGER: AmlOpcode = AmlOpcode(0x99);
    pub const TO_STRING: AmlOpcode = AmlOpcode(0x9C);
    pub const COPY_OBJECT: AmlOpcode = AmlOpcode(0x9D);
    pub const CONTINUE: AmlOpcode = AmlOpcode(0x9F);
    pub const IF: AmlOpcode = AmlOpcode(0xA0);
    pub const ELSE: AmlOpcode = AmlOpcode(0xA1);
    pub const WHILE: AmlOpcode = AmlOpcode(0xA2);
    pub const NOOP: AmlOpcode = AmlOpcode(0xA3);
    pub const RETURN: AmlOpcode = AmlOpcode(0xA4);
    pub const BREAK: AmlOpcode = AmlOpcode(0xA5);
    pub const ONES: AmlOpcode = AmlOpcode(0xFF);

    pub const MUTEX: AmlOpcode = AmlOpcode(0x5B01);
    pub const EVENT: AmlOpcode = AmlOpcode(0x5B02);
    pub const COND_REF_OF: AmlOpcode = AmlOpcode(0x5B12);
    pub const CREATE_FIELD: AmlOpcode = AmlOpcode(0x5B13);
    pub const STALL: AmlOpcode = AmlOpcode(0x5B21);
    pub const SLEEP: AmlOpcode = AmlOpcode(0x5B22);
    pub const ACQUIRE: AmlOpcode = AmlOpcode(0x5B23);
    pub const SIGNAL: AmlOpcode = AmlOpcode(0x5B24);
    pub const WAIT: AmlOpcode = AmlOpcode(0x5B25);
    pub const RESET: AmlOpcode = AmlOpcode(0x5B26);
    pub const RELEASE: AmlOpcode = AmlOpcode(0x5B27);
    pub const DEBUG: AmlOpcode = AmlOpcode(0x5B31);
    pub const FATAL: AmlOpcode = AmlOpcode(0x5B32);
    pub const TIMER: AmlOpcode = AmlOpcode(0x5B33);
    pub const REGION: AmlOpcode = AmlOpcode(0x5B80);
    pub const FIELD: AmlOpcode = AmlOpcode(0x5B81);
    pub const DEVICE: AmlOpcode = AmlOpcode(0x5B82);
    pub const PROCESSOR: AmlOpcode = AmlOpcode(0x5B83);
    pub const POWER_RESOURCE: AmlOpcode = AmlOpcode(0x5B84);
    pub const THERMAL_ZONE: AmlOpcode = AmlOpcode(0x5B85);
    pub const INDEX_FIELD: AmlOpcode = AmlOpcode(0x5B86);
    pub const BANK_FIELD: AmlOpcode = AmlOpcode(0x5B87);
    pub const DATA_REGION: AmlOpcode = AmlOpcode(0x5B88);

    /// Opcode class, as the AML interpreter groups opcodes.
    pub fn class(self) -> OpClass {
        match self {
            Self::ALIAS
            | Self::NAME
            | Self::SCOPE
            | Self::METHOD
            | Self::MUTEX
            | Self::EVENT
            | Self::REGION
            | Self::FIELD
            | Self::DEVICE
            | Self::PROCESSOR
            | Self::POWER_RESOURCE
            | Self::THERMAL_ZONE
            | Self::INDEX_FIELD
            | Self::BANK_FIELD
            | Self::DATA_REGION => OpClass::NamedObject,

            Self::CREATE_FIELD
            | Self::CREATE_BIT_FIELD
            | Self::CREATE_BYTE_FIELD
            | Self::CREATE_WORD_FIELD
            | Self::CREATE_DWORD_FIELD
            | Self::CREATE_QWORD_FIELD => OpClass::Create,

            Self::IF
            | Self::ELSE
            | Self::WHILE
            | Self::NOOP
            | Self::RETURN
            | Self::BREAK
            | Self::CONTINUE => OpClass::Control,

            Self::ZERO
            | Self::ONE
            | Self::ONES
            | Self::BYTE
            | Self::QWORD
            | Self::STRING
            | Self::BUFFER
            | Self::PACKAGE
            | Self::VAR_PACKAGE
            | Self::NAMEPATH
            | Self::DEBUG => OpClass::Argument,

            AmlOpcode(0x60..=0x6E) => OpClass::Argument,

            Self::NONE | Self::METHOD_CALL | Self::EXTERNAL => OpClass::Internal,

            _ => OpClass::Execute,
        }
    }

    pub fn is_named_object(self) -> bool {
        self.class() == OpClass::NamedObject
    }

    /// `Local0..Local7` index, derived from the low three opcode bits.
    pub fn local_index(self) -> Option<u8> {
        match self.0 {
            0x60..=0x67 => Some((self.0 & 0x0007) as u8),
            _ => None,
        }
    }

    /// `Arg0..Arg6` index: the low nibble minus eight.
    pub fn arg_index(self) -> Option<u8> {
        match self.0 {
            0x68..=0x6E => Some(((self.0 & 0x000F) - 8) as u8),
            _ => None,
        }
    }
}

impl std::fmt::Debug for AmlOpcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Self::NONE {
            write!(f, "AmlOpcode(-)")
        } else {
            write!(f, "AmlOpcode({:#06X})", self.0)
        }
    }
}

/// Opcode classes the analyzer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpClass {
    /// Creates a new entry in the namespace.
    NamedObject,
    /// Creates a buffer field (a namespace entry bound to a buffer slice).
    Create,
    /// Executable operator.
    Execute,
    /// Control flow.
    Control,
    /// Operand: literal, register, name reference.
    Argument,
    /// Compiler-internal; never emitted by itself.
    Internal,
}

/// Pseudo-register referenced by a `LocalN` / `ArgN` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    Local(u8),
    Arg(u8),
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Register::Local(n) => write!(f, "Local{n}"),
            Register::Arg(n) => write!(f, "Arg{n}"),
        }
    }
}

macro_rules! parse_ops {
    ($( $(#[$meta:meta])* $variant:ident => $aml:expr ),* $(,)?) => {
        /// Grammar-level operation tag of a syntax node.
        ///
        /// The keyword spelling of a variant is its name (`ParseOp::OperationRegion`
        /// is written `OperationRegion`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum ParseOp {
            $( $(#[$meta])* $variant, )*
        }

        impl ParseOp {
            pub const ALL: &'static [ParseOp] = &[$(ParseOp::$variant),*];

            pub fn keyword(self) -> &'static str {
                match self {
                    $(ParseOp::$variant => stringify!($variant),)*
                }
            }

            /// The AML opcode a node of this kind lowers to when the parser
            /// did not record a more specific one.
            pub fn default_aml_opcode(self) -> AmlOpcode {
                match self {
                    $(ParseOp::$variant => $aml,)*
                }
            }
        }
    };
}

parse_ops! {
    DefinitionBlock => AmlOpcode::NONE,
    /// Placeholder for an omitted optional operand; also wraps type lists.
    DefaultArg => AmlOpcode::NONE,
    NameSeg => AmlOpcode::NAMEPATH,
    NamePath => AmlOpcode::NAMEPATH,

    // Literals
    Integer => AmlOpcode::QWORD,
    String => AmlOpcode::STRING,
    Zero => AmlOpcode::ZERO,
    One => AmlOpcode::ONE,
    Ones => AmlOpcode::ONES,
    EisaId => AmlOpcode::QWORD,
    Buffer => AmlOpcode::BUFFER,
    Package => AmlOpcode::PACKAGE,
    VarPackage => AmlOpcode::VAR_PACKAGE,
    Debug => AmlOpcode::DEBUG,

    // Method header keywords
    SerializeRule => AmlOpcode::NONE,
    RegionSpace => AmlOpcode::NONE,

    // Named object declarations
    Scope => AmlOpcode::SCOPE,
    Device => AmlOpcode::DEVICE,
    Method => AmlOpcode::METHOD,
    Name => AmlOpcode::NAME,
    Alias => AmlOpcode::ALIAS,
    Event => AmlOpcode::EVENT,
    Mutex => AmlOpcode::MUTEX,
    OperationRegion => AmlOpcode::REGION,
    DataTableRegion => AmlOpcode::DATA_REGION,
    Field => AmlOpcode::FIELD,
    IndexField => AmlOpcode::INDEX_FIELD,
    BankField => AmlOpcode::BANK_FIELD,
    PowerResource => AmlOpcode::POWER_RESOURCE,
    Processor => AmlOpcode::PROCESSOR,
    ThermalZone => AmlOpcode::THERMAL_ZONE,
    External => AmlOpcode::EXTERNAL,
    CreateField => AmlOpcode::CREATE_FIELD,
    CreateBitField => AmlOpcode::CREATE_BIT_FIELD,
    CreateByteField => AmlOpcode::CREATE_BYTE_FIELD,
    CreateWordField => AmlOpcode::CREATE_WORD_FIELD,
    CreateDWordField => AmlOpcode::CREATE_DWORD_FIELD,
    CreateQWordField => AmlOpcode::CREATE_QWORD_FIELD,

    // Invocation
    MethodCall => AmlOpcode::METHOD_CALL,

    // Pseudo-registers
    Local0 => AmlOpcode(0x60),
    Local1 => AmlOpcode(0x61),
    Local2 => AmlOpcode(0x62),
    Local3 => AmlOpcode(0x63),
    Local4 => AmlOpcode(0x64),
    Local5 => AmlOpcode(0x65),
    Local6 => AmlOpcode(0x66),
    Local7 => AmlOpcode(0x67),
    Arg0 => AmlOpcode(0x68),
    Arg1 => AmlOpcode(0x69),
    Arg2 => AmlOpcode(0x6A),
    Arg3 => AmlOpcode(0x6B),
    Arg4 => AmlOpcode(0x6C),
    Arg5 => AmlOpcode(0x6D),
    Arg6 => AmlOpcode(0x6E),

    // Control flow
    If => AmlOpcode::IF,
    Else => AmlOpcode::ELSE,
    While => AmlOpcode::WHILE,
    Break => AmlOpcode::BREAK,
    Continue => AmlOpcode::CONTINUE,
    Return => AmlOpcode::RETURN,
    Noop => AmlOpcode::NOOP,

    // Operators
    Store => AmlOpcode::STORE,
    CopyObject => AmlOpcode::COPY_OBJECT,
    Add => AmlOpcode::ADD,
    Subtract => AmlOpcode::SUBTRACT,
    Multiply => AmlOpcode::MULTIPLY,
    Divide => AmlOpcode::DIVIDE,
    Mod => AmlOpcode::MOD,
    Increment => AmlOpcode::INCREMENT,
    Decrement => AmlOpcode::DECREMENT,
    ShiftLeft => AmlOpcode::SHIFT_LEFT,
    ShiftRight => AmlOpcode::SHIFT_RIGHT,
    And => AmlOpcode::AND,
    Or => AmlOpcode::OR,
    Xor => AmlOpcode::XOR,
    Not => AmlOpcode::NOT,
    LAnd => AmlOpcode::LAND,
    LOr => AmlOpcode::LOR,
    LNot => AmlOpcode::LNOT,
    LEqual => AmlOpcode::LEQUAL,
    LGreater => AmlOpcode::LGREATER,
    LLess => AmlOpcode::LLESS,
    Concatenate => AmlOpcode::CONCAT,
    ToBuffer => AmlOpcode::TO_BUFFER,
    ToInteger => AmlOpcode::TO_INTEGER,
    ToString => AmlOpcode::TO_STRING,
    ObjectType => AmlOpcode::OBJECT_TYPE,
    SizeOf => AmlOpcode::SIZE_OF,
    RefOf => AmlOpcode::REF_OF,
    CondRefOf => AmlOpcode::COND_REF_OF,
    DerefOf => AmlOpcode::DEREF_OF,
    Index => AmlOpcode::INDEX,
    Notify => AmlOpcode::NOTIFY,
    Stall => AmlOpcode::STALL,
    Sleep => AmlOpcode::SLEEP,
    Acquire => AmlOpcode::ACQUIRE,
    Release => AmlOpcode::RELEASE,
    Signal => AmlOpcode::SIGNAL,
    Wait => AmlOpcode::WAIT,
    Reset => AmlOpcode::RESET,
    Fatal => AmlOpcode::FATAL,
    Timer => AmlOpcode::TIMER,

    // Object type keywords (method return and parameter type lists)
    UnknownObj => AmlOpcode::NONE,
    IntObj => AmlOpcode::NONE,
    StrObj => AmlOpcode::NONE,
    BuffObj => AmlOpcode::NONE,
    PkgObj => AmlOpcode::NONE,
    FieldUnitObj => AmlOpcode::NONE,
    DeviceObj => AmlOpcode::NONE,
    EventObj => AmlOpcode::NONE,
    MethodObj => AmlOpcode::NONE,
    MutexObj => AmlOpcode::NONE,
    OpRegionObj => AmlOpcode::NONE,
    PowerResObj => AmlOpcode::NONE,
    ProcessorObj => AmlOpcode::NONE,
    ThermalZoneObj => AmlOpcode::NONE,
    BuffFieldObj => AmlOpcode::NONE,
    DDBHandleObj => AmlOpcode::NONE,
}

impl ParseOp {
    pub fn from_keyword(keyword: &str) -> Option<ParseOp> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.keyword().eq_ignore_ascii_case(keyword))
    }

    pub fn register(self) -> Option<Register> {
        let aml = self.default_aml_opcode();
        aml.local_index()
            .map(Register::Local)
            .or_else(|| aml.arg_index().map(Register::Arg))
    }

    pub fn is_local(self) -> bool {
        matches!(self.register(), Some(Register::Local(_)))
    }

    pub fn is_arg(self) -> bool {
        matches!(self.register(), Some(Register::Arg(_)))
    }

    pub fn is_loop(self) -> bool {
        self == ParseOp::While
    }

    /// `Break` and `Continue`: transfers that need an enclosing loop.
    pub fn is_loop_transfer(self) -> bool {
        matches!(self, ParseOp::Break | ParseOp::Continue)
    }

    pub fn is_control_transfer(self) -> bool {
        matches!(self, ParseOp::Break | ParseOp::Continue | ParseOp::Return)
    }

    /// Declarations whose first child is the name being created.
    pub fn declares_name(self) -> bool {
        self.default_aml_opcode().is_named_object()
            || matches!(
                self,
                ParseOp::External
                    | ParseOp::CreateField
                    | ParseOp::CreateBitField
                    | ParseOp::CreateByteField
                    | ParseOp::CreateWordField
                    | ParseOp::CreateDWordField
                    | ParseOp::CreateQWordField
            )
    }

    /// Declarations whose name is checked against the reserved-name table.
    pub fn is_reserved_checked_declaration(self) -> bool {
        matches!(
            self,
            ParseOp::Event
                | ParseOp::Mutex
                | ParseOp::OperationRegion
                | ParseOp::PowerResource
                | ParseOp::Processor
                | ParseOp::ThermalZone
        )
    }

    pub fn is_integer_literal(self) -> bool {
        matches!(
            self,
            ParseOp::Integer | ParseOp::Zero | ParseOp::One | ParseOp::Ones | ParseOp::EisaId
        )
    }

    pub fn is_type_keyword(self) -> bool {
        self.type_keyword_btype().is_some()
    }

    /// Type-set contribution of an object type keyword.
    pub fn type_keyword_btype(self) -> Option<Btype> {
        let btype = match self {
            ParseOp::UnknownObj => Btype::OBJECTS_AND_REFS,
            ParseOp::IntObj => Btype::INTEGER,
            ParseOp::StrObj => Btype::STRING,
            ParseOp::BuffObj => Btype::BUFFER,
            ParseOp::PkgObj => Btype::PACKAGE,
            ParseOp::FieldUnitObj => Btype::FIELD_UNIT,
            ParseOp::DeviceObj => Btype::DEVICE,
            ParseOp::EventObj => Btype::EVENT,
            ParseOp::MethodObj => Btype::METHOD,
            ParseOp::MutexObj => Btype::MUTEX,
            ParseOp::OpRegionObj => Btype::REGION,
            ParseOp::PowerResObj => Btype::POWER,
            ParseOp::ProcessorObj => Btype::PROCESSOR,
            ParseOp::ThermalZoneObj => Btype::THERMAL,
            ParseOp::BuffFieldObj => Btype::BUFFER_FIELD,
            ParseOp::DDBHandleObj => Btype::DDB_HANDLE,
            _ => return None,
        };
        Some(btype)
    }

    /// Type-set of a statically known value produced by this node.
    pub fn literal_btype(self) -> Option<Btype> {
        let btype = match self {
            ParseOp::Integer
            | ParseOp::Zero
            | ParseOp::One
            | ParseOp::Ones
            | ParseOp::EisaId => Btype::INTEGER,
            ParseOp::String => Btype::STRING,
            ParseOp::Buffer => Btype::BUFFER,
            ParseOp::Package | ParseOp::VarPackage => Btype::PACKAGE,
            _ => return None,
        };
        Some(btype)
    }
}

impl std::fmt::Display for ParseOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}
