//! Type-sets: unions of runtime object types a value may assume.

use bitflags::bitflags;

bitflags! {
    /// Set of runtime object types. The empty set means "any type".
    ///
    /// Type-sets are only ever widened (OR-ed); nothing in the analyzer removes bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
    pub struct Btype: u32 {
        const INTEGER = 1 << 0;
        const STRING = 1 << 1;
        const BUFFER = 1 << 2;
        const PACKAGE = 1 << 3;
        const FIELD_UNIT = 1 << 4;
        const DEVICE = 1 << 5;
        const EVENT = 1 << 6;
        const METHOD = 1 << 7;
        const MUTEX = 1 << 8;
        const REGION = 1 << 9;
        const POWER = 1 << 10;
        const PROCESSOR = 1 << 11;
        const THERMAL = 1 << 12;
        const BUFFER_FIELD = 1 << 13;
        const DDB_HANDLE = 1 << 14;
        const DEBUG_OBJECT = 1 << 15;
        const REFERENCE_OBJECT = 1 << 16;
        const RESOURCE = 1 << 17;

        const COMPUTE_DATA = Self::INTEGER.bits() | Self::STRING.bits() | Self::BUFFER.bits();
        const DATA = Self::COMPUTE_DATA.bits() | Self::PACKAGE.bits();
        const DATA_REFERENCE = Self::DATA.bits()
            | Self::REFERENCE_OBJECT.bits()
            | Self::DDB_HANDLE.bits();
        const ALL_OBJECTS = 0x0000_FFFF;
        const OBJECTS_AND_REFS = 0x0001_FFFF;
    }
}

impl Btype {
    /// The "any type" set.
    pub const ANY: Btype = Btype::empty();

    /// Whether a value of type `actual` is acceptable where `self` is expected.
    /// An empty expectation accepts everything.
    pub fn accepts(self, actual: Btype) -> bool {
        self.is_empty() || self.intersects(actual)
    }

    /// Human-readable list of the primitive types in this set.
    pub fn describe(self) -> String {
        if self.is_empty() {
            return "Any".to_string();
        }

        const NAMES: &[(Btype, &str)] = &[
            (Btype::INTEGER, "Integer"),
            (Btype::STRING, "String"),
            (Btype::BUFFER, "Buffer"),
            (Btype::PACKAGE, "Package"),
            (Btype::FIELD_UNIT, "FieldUnit"),
            (Btype::DEVICE, "Device"),
            (Btype::EVENT, "Event"),
            (Btype::METHOD, "Method"),
            (Btype::MUTEX, "Mutex"),
            (Btype::REGION, "Region"),
            (Btype::POWER, "Power"),
            (Btype::PROCESSOR, "Processor"),
            (Btype::THERMAL, "Thermal"),
            (Btype::BUFFER_FIELD, "BufferField"),
            (Btype::DDB_HANDLE, "DdbHandle"),
            (Btype::DEBUG_OBJECT, "Debug"),
            (Btype::REFERENCE_OBJECT, "Reference"),
            (Btype::RESOURCE, "Resource"),
        ];

        NAMES
            .iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join("|")
    }
}
