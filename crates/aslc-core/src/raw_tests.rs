use indoc::indoc;

use crate::{CompileFlags, ParseOp, RawNode, parse_tree_json, to_raw};

#[test]
fn loads_nested_json() {
    let tree = parse_tree_json(indoc! {r#"
        { "op": "DefinitionBlock", "children": [
            { "op": "Method", "name": "\\_SB.FOO", "children": [
                { "op": "NameSeg", "name": "FOO" },
                { "op": "Integer", "value": 2 },
                { "op": "Return", "children": [{ "op": "String", "value": "hi" }] }
            ] }
        ] }
    "#})
    .unwrap();

    let root = tree.root().unwrap();
    let method = tree.child(root, 0).unwrap();
    assert_eq!(tree.op(method), ParseOp::Method);
    assert_eq!(tree.name(method).unwrap().as_str(), "FOO_");
    assert_eq!(
        tree.node(method).external_name().as_deref(),
        Some("\\_SB.FOO")
    );
    assert_eq!(tree.node(tree.child(method, 1).unwrap()).value.as_integer(), Some(2));
}

#[test]
fn rejects_unknown_ops_and_bad_names() {
    assert!(parse_tree_json(r#"{ "op": "Frobnicate" }"#).is_err());
    assert!(parse_tree_json(r#"{ "op": "Name", "name": "1BAD" }"#).is_err());
}

#[test]
fn dump_includes_annotations() {
    let mut tree = parse_tree_json(r#"{ "op": "Method", "name": "FOO" }"#).unwrap();
    let root = tree.root().unwrap();
    tree.insert_flags(root, CompileFlags::METHOD_NO_RETVAL);

    let raw = to_raw(&tree, root);
    let json = serde_json::to_string(&raw).unwrap();
    insta::assert_snapshot!(json, @r#"{"op":"Method","name":"FOO","flags":"METHOD_NO_RETVAL"}"#);

    let back: RawNode = serde_json::from_str(&json).unwrap();
    assert_eq!(back, raw);
}
