use crate::{AmlOpcode, Btype, OpClass, ParseOp, Register};

#[test]
fn local_and_arg_indices_come_from_opcode_bits() {
    assert_eq!(AmlOpcode(0x60).local_index(), Some(0));
    assert_eq!(AmlOpcode(0x67).local_index(), Some(7));
    assert_eq!(AmlOpcode(0x68).local_index(), None);

    assert_eq!(AmlOpcode(0x68).arg_index(), Some(0));
    assert_eq!(AmlOpcode(0x6E).arg_index(), Some(6));
    assert_eq!(AmlOpcode(0x6F).arg_index(), None);
}

#[test]
fn registers_of_parse_ops() {
    assert_eq!(ParseOp::Local3.register(), Some(Register::Local(3)));
    assert_eq!(ParseOp::Arg6.register(), Some(Register::Arg(6)));
    assert_eq!(ParseOp::Store.register(), None);
    assert!(ParseOp::Local0.is_local());
    assert!(ParseOp::Arg0.is_arg());
    assert_eq!(Register::Local(5).to_string(), "Local5");
}

#[test]
fn opcode_classes() {
    assert_eq!(AmlOpcode::METHOD.class(), OpClass::NamedObject);
    assert_eq!(AmlOpcode::NAME.class(), OpClass::NamedObject);
    assert_eq!(AmlOpcode::FIELD.class(), OpClass::NamedObject);
    assert_eq!(AmlOpcode::CREATE_BIT_FIELD.class(), OpClass::Create);
    assert_eq!(AmlOpcode::WHILE.class(), OpClass::Control);
    assert_eq!(AmlOpcode::STORE.class(), OpClass::Execute);
    assert_eq!(AmlOpcode(0x62).class(), OpClass::Argument);
    assert_eq!(AmlOpcode::METHOD_CALL.class(), OpClass::Internal);
}

#[test]
fn keywords_round_trip_case_insensitively() {
    for &op in ParseOp::ALL {
        assert_eq!(ParseOp::from_keyword(op.keyword()), Some(op));
    }
    assert_eq!(ParseOp::from_keyword("while"), Some(ParseOp::While));
    assert_eq!(ParseOp::from_keyword("Frobnicate"), None);
}

#[test]
fn type_keywords() {
    assert_eq!(ParseOp::IntObj.type_keyword_btype(), Some(Btype::INTEGER));
    assert_eq!(
        ParseOp::UnknownObj.type_keyword_btype(),
        Some(Btype::OBJECTS_AND_REFS)
    );
    assert!(!ParseOp::Integer.is_type_keyword());
}

#[test]
fn declaration_predicates() {
    assert!(ParseOp::Method.declares_name());
    assert!(ParseOp::CreateDWordField.declares_name());
    assert!(!ParseOp::Store.declares_name());

    assert!(ParseOp::Mutex.is_reserved_checked_declaration());
    assert!(!ParseOp::Name.is_reserved_checked_declaration());

    assert!(ParseOp::Break.is_loop_transfer());
    assert!(!ParseOp::Return.is_loop_transfer());
    assert!(ParseOp::Return.is_control_transfer());
}

#[test]
fn btype_describe() {
    assert_eq!(Btype::ANY.describe(), "Any");
    assert_eq!((Btype::INTEGER | Btype::BUFFER).describe(), "Integer|Buffer");
    assert!(Btype::ANY.accepts(Btype::STRING));
    assert!(Btype::COMPUTE_DATA.accepts(Btype::STRING));
    assert!(!Btype::INTEGER.accepts(Btype::PACKAGE));
}
