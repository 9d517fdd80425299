//! Signature-level emission rules (§4.3), exercised through the public
//! `SignatureBuilder` API rather than the private `grammar` functions
//! directly.

use elsim::method_model::{BasicMethod, SimpleInstruction};
use elsim::signature::{L0Spec, Level, SignatureBuilder};
use elsim::upstream::{ExceptionHandler, FieldRef, PackageRef, PackageRefKind, StringRef};

fn method_with_instructions(blocks: Vec<(u32, u32)>) -> BasicMethod {
    let instrs = vec![
        SimpleInstruction { op_value: 0x12, name: "const/4".into(), operand_text: "v0,1".into(), offset: 0, length: 2 },
        SimpleInstruction { op_value: 0x01, name: "move".into(), operand_text: "v1,v0".into(), offset: 2, length: 2 },
        SimpleInstruction { op_value: 0x0e, name: "return-void".into(), operand_text: "".into(), offset: 4, length: 2 },
    ];
    BasicMethod::new("Lcom/example/Foo;", "bar", "()V", instrs, blocks)
}

#[test]
fn empty_method_yields_empty_signature_and_zero_entropy() {
    let method = BasicMethod::new("Lx;", "m", "()V", vec![], vec![]);
    let mut builder = SignatureBuilder::new();
    let levels = vec![
        Level::L0(L0Spec::l0_4()),
        Level::L1,
        Level::L2,
        Level::L3,
        Level::L4(vec![]),
        Level::Hex,
    ];
    let sign = builder.get_method_signature(&method, &levels);
    assert_eq!(sign.get_string(), "");
    assert_eq!(elsim::compressor::entropy(sign.get_string().as_bytes()), 0.0);
}

#[test]
fn l1_concatenates_string_refs_replacing_newlines() {
    let mut method = method_with_instructions(vec![(0, 6)]);
    method.string_refs = vec![
        StringRef { offset: 0, value: "line one\nline two".into() },
        StringRef { offset: 4, value: "tail".into() },
    ];
    let mut builder = SignatureBuilder::new();
    let sign = builder.get_method_signature(&method, &[Level::L1]);
    assert_eq!(sign.get_string(), "line one line twotail");
}

#[test]
fn l2_concatenates_exception_handler_class_names() {
    let mut method = method_with_instructions(vec![(0, 6)]);
    method.exception_handlers = vec![
        ExceptionHandler { class_name: "Ljava/lang/Exception;".into() },
        ExceptionHandler { class_name: "Ljava/io/IOException;".into() },
    ];
    let mut builder = SignatureBuilder::new();
    let sign = builder.get_method_signature(&method, &[Level::L2]);
    assert_eq!(sign.get_string(), "Ljava/lang/Exception;Ljava/io/IOException;");
}

#[test]
fn l3_hex_encodes_fill_array_data_payloads() {
    let mut method = method_with_instructions(vec![(0, 6)]);
    method.fill_array_data_payloads = vec![vec![0x00, 0xff, 0x10]];
    let mut builder = SignatureBuilder::new();
    let sign = builder.get_method_signature(&method, &[Level::L3]);
    assert_eq!(sign.get_string(), "00ff10");
}

#[test]
fn l0_wraps_blocks_and_sorts_payload_by_offset() {
    let mut method = method_with_instructions(vec![(0, 6)]);
    method.string_refs = vec![StringRef { offset: 2, value: "hi".into() }];
    method.field_refs = vec![FieldRef { offset: 0, write: true }];

    let mut builder = SignatureBuilder::new();
    let sign = builder.get_method_signature(&method, &[Level::L0(L0Spec::l0_0())]);
    let s = sign.get_string();
    // field (offset 0) before string (offset 2) before the terminator (offset 5).
    assert_eq!(s, "B[F1SR]");
}

#[test]
fn package_prefixed1_decorates_external_matches_and_bare_non_matches() {
    let mut method = method_with_instructions(vec![(0, 6)]);
    method.package_refs = vec![
        PackageRef {
            offset: 0,
            class_name: "Landroid/os/Bundle;".into(),
            method_name: "get".into(),
            descriptor: "()V".into(),
            kind: PackageRefKind::Call,
            external: true,
        },
        PackageRef {
            offset: 1,
            class_name: "Lcom/other/Thing;".into(),
            method_name: "go".into(),
            descriptor: "()V".into(),
            kind: PackageRefKind::Call,
            external: true,
        },
    ];
    let mut builder = SignatureBuilder::new();
    let sign = builder.get_method_signature(&method, &[Level::L4(vec!["Landroid".into()])]);
    assert_eq!(sign.get_string(), "P1{Landroid/os/Bundle;get()V}P1");
}

#[test]
fn package_prefixed2_has_opposite_decoration_polarity() {
    let mut method = method_with_instructions(vec![(0, 6)]);
    method.package_refs = vec![PackageRef {
        offset: 0,
        class_name: "Lcom/other/Thing;".into(),
        method_name: "go".into(),
        descriptor: "()V".into(),
        kind: PackageRefKind::Call,
        external: true,
    }];
    let mut builder = SignatureBuilder::new();
    let sign = builder.get_method_signature(&method, &[Level::L0(L0Spec::l0_5())]);
    assert!(sign.get_string().contains("P1{Lcom/other/Thing;go()V}"));
}

#[test]
fn memoization_is_stable_across_calls() {
    let method = method_with_instructions(vec![(0, 6)]);
    let mut builder = SignatureBuilder::new();
    let levels = vec![Level::Hex];
    let a = builder.get_method_signature(&method, &levels).get_string();
    let b = builder.get_method_signature(&method, &levels).get_string();
    assert_eq!(a, b);
    assert_eq!(a, "const/4v0,1movev1,v0return-void");
}
