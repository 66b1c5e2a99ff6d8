//! ACPI predefined names.

use aslc_core::Btype;

/// Expected shape of one predefined name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredefinedInfo {
    pub name: &'static str,
    /// Required argument count when implemented as a method.
    pub arg_count: u8,
    /// Expected return type-set; `None` when nothing is returned.
    pub returns: Option<Btype>,
}

impl PredefinedInfo {
    /// Names that take arguments or return nothing can only be methods.
    pub fn must_be_method(&self) -> bool {
        self.arg_count > 0 || self.returns.is_none()
    }
}

const fn object(name: &'static str, returns: Btype) -> PredefinedInfo {
    PredefinedInfo {
        name,
        arg_count: 0,
        returns: Some(returns),
    }
}

const fn method(name: &'static str, arg_count: u8, returns: Option<Btype>) -> PredefinedInfo {
    PredefinedInfo {
        name,
        arg_count,
        returns,
    }
}

const INT: Btype = Btype::INTEGER;
const STR: Btype = Btype::STRING;
const BUF: Btype = Btype::BUFFER;
const PKG: Btype = Btype::PACKAGE;
const INT_STR: Btype = Btype::INTEGER.union(Btype::STRING);

pub(crate) const PREDEFINED_NAMES: &[PredefinedInfo] = &[
    // Device identification
    object("_ADR", INT),
    object("_CID", INT_STR.union(PKG)),
    object("_CLS", PKG),
    object("_DDN", STR),
    object("_HID", INT_STR),
    object("_HRV", INT),
    object("_MLS", PKG),
    object("_STR", BUF),
    object("_SUB", STR),
    object("_SUN", INT),
    object("_UID", INT_STR),
    // Device configuration
    object("_CCA", INT),
    object("_CRS", BUF),
    object("_DEP", PKG),
    method("_DIS", 0, None),
    object("_DMA", BUF),
    object("_FIX", PKG),
    object("_GSB", INT),
    object("_HPP", PKG),
    object("_MAT", BUF),
    method("_OSC", 4, Some(BUF)),
    object("_PRS", BUF),
    object("_PRT", PKG),
    object("_PXM", INT),
    object("_SEG", INT),
    object("_BBN", INT),
    method("_SRS", 1, None),
    method("_DSM", 4, Some(Btype::ALL_OBJECTS)),
    method("_INI", 0, None),
    method("_REG", 2, None),
    object("_STA", INT),
    // Device insertion and removal
    method("_DCK", 1, Some(INT)),
    method("_EJ0", 1, None),
    method("_EJ3", 1, None),
    method("_EJ4", 1, None),
    object("_EJD", STR),
    method("_LCK", 1, None),
    object("_RMV", INT),
    // Power management
    method("_OFF", 0, None),
    method("_ON_", 0, None),
    method("_PS0", 0, None),
    method("_PS1", 0, None),
    method("_PS2", 0, None),
    method("_PS3", 0, None),
    object("_PSC", INT),
    object("_PSE", INT),
    method("_PSW", 1, None),
    object("_PR0", PKG),
    object("_PR1", PKG),
    object("_PR2", PKG),
    object("_PR3", PKG),
    object("_PRE", PKG),
    object("_PRW", PKG),
    object("_S0D", INT),
    object("_S3D", INT),
    object("_S4D", INT),
    method("_DSW", 3, None),
    // System sleep
    object("_S0_", PKG),
    object("_S1_", PKG),
    object("_S2_", PKG),
    object("_S3_", PKG),
    object("_S4_", PKG),
    object("_S5_", PKG),
    method("_PTS", 1, None),
    method("_TTS", 1, None),
    method("_WAK", 1, Some(PKG.union(INT))),
    method("_SST", 1, None),
    method("_GTS", 1, None),
    method("_BFS", 1, None),
    // Processor
    object("_CST", PKG),
    object("_PCT", PKG),
    method("_PDC", 1, None),
    object("_PPC", INT),
    object("_PSS", PKG),
    object("_PTC", PKG),
    object("_TPC", INT),
    object("_TSS", PKG),
    object("_PSD", PKG),
    object("_CPC", PKG),
    // Thermal
    object("_AC0", INT),
    object("_AL0", PKG),
    object("_CRT", INT),
    object("_HOT", INT),
    object("_PSL", PKG),
    object("_PSV", INT),
    method("_SCP", 1, None),
    object("_TC1", INT),
    object("_TC2", INT),
    object("_TMP", INT),
    object("_TSP", INT),
    object("_TZD", PKG),
    object("_TZP", INT),
    // Battery and power source
    object("_BIF", PKG),
    object("_BIX", PKG),
    object("_BST", PKG),
    method("_BTP", 1, None),
    object("_PCL", PKG),
    object("_PSR", INT),
    // Display
    object("_BCL", PKG),
    method("_BCM", 1, None),
    object("_BQC", INT),
    object("_DCS", INT),
    object("_DDC", Btype::INTEGER.union(Btype::BUFFER)),
    object("_DGS", INT),
    object("_DOD", PKG),
    method("_DOS", 1, None),
    method("_DSS", 1, None),
    method("_ROM", 2, Some(BUF)),
    // Buttons, lid, embedded controller
    object("_GPE", INT.union(PKG)),
    object("_LID", INT),
    object("_GLK", INT),
    // Events and interrupts
    object("_AEI", BUF),
    method("_EVT", 1, None),
    method("_WED", 1, Some(Btype::ALL_OBJECTS)),
    // IDE and SATA
    object("_GTF", BUF),
    object("_GTM", BUF),
    method("_STM", 3, None),
    // Global objects
    method("_OSI", 1, Some(INT)),
    object("_OS_", STR),
    object("_REV", INT),
];
