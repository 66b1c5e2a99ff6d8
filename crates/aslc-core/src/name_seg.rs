//! Four-character namespace name segments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TreeError;

/// A single namespace segment: exactly four characters, `[A-Z_][A-Z0-9_]{3}`.
///
/// Shorter identifiers are padded with trailing underscores, the way ASL
/// pads `Name (AB, ...)` to `AB__`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NameSeg([u8; 4]);

impl NameSeg {
    pub const HID: NameSeg = NameSeg(*b"_HID");
    pub const CID: NameSeg = NameSeg(*b"_CID");
    pub const ADR: NameSeg = NameSeg(*b"_ADR");
    pub const CRS: NameSeg = NameSeg(*b"_CRS");
    pub const PRS: NameSeg = NameSeg(*b"_PRS");
    pub const SRS: NameSeg = NameSeg(*b"_SRS");
    pub const DIS: NameSeg = NameSeg(*b"_DIS");
    pub const PS0: NameSeg = NameSeg(*b"_PS0");
    pub const PS1: NameSeg = NameSeg(*b"_PS1");
    pub const PS2: NameSeg = NameSeg(*b"_PS2");
    pub const PS3: NameSeg = NameSeg(*b"_PS3");
    pub const REG: NameSeg = NameSeg(*b"_REG");

    /// Build from raw bytes, validating the character set.
    pub fn new(bytes: [u8; 4]) -> Result<Self, TreeError> {
        let valid = bytes
            .iter()
            .enumerate()
            .all(|(i, &b)| b == b'_' || b.is_ascii_uppercase() || (i > 0 && b.is_ascii_digit()));
        if !valid {
            return Err(TreeError::InvalidNameSeg(
                String::from_utf8_lossy(&bytes).into_owned(),
            ));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII ever gets in through `new`.
        std::str::from_utf8(&self.0).unwrap_or("????")
    }

    /// Names beginning with `_` are reserved for the ACPI specification.
    pub fn is_reserved(&self) -> bool {
        self.0[0] == b'_'
    }

    /// Compiler-synthesized temporaries: `_T_0`, `_T_1`, ...
    pub fn is_compiler_temp(&self) -> bool {
        self.0.starts_with(b"_T_")
    }

    pub fn char_at(&self, index: usize) -> char {
        self.0[index] as char
    }

    /// Last segment of a name path: `\_SB.PCI0.FOO` yields `FOO`.
    pub fn from_path(path: &str) -> Result<Self, TreeError> {
        let last = path
            .trim_start_matches(['\\', '^'])
            .rsplit('.')
            .next()
            .unwrap_or_default();
        last.parse()
    }
}

impl FromStr for NameSeg {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > 4 || !s.is_ascii() {
            return Err(TreeError::InvalidNameSeg(s.to_string()));
        }

        let mut bytes = [b'_'; 4];
        for (slot, b) in bytes.iter_mut().zip(s.bytes()) {
            *slot = b.to_ascii_uppercase();
        }
        Self::new(bytes)
    }
}

impl TryFrom<String> for NameSeg {
    type Error = TreeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NameSeg> for String {
    fn from(value: NameSeg) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for NameSeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for NameSeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameSeg({})", self.as_str())
    }
}
