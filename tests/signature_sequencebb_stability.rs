//! Regression test pinning `sequencebb`'s output for a fixed synthetic
//! method (§6: "the only obligation this crate honors is `sequencebb`
//! output stability").

use elsim::method_model::{BasicMethod, SimpleInstruction};
use elsim::signature::{Level, SignatureBuilder};

fn fixed_method() -> BasicMethod {
    // Block 1: 8 instructions (>= default min of 6), block 2: 3 (excluded).
    let mut instrs = Vec::new();
    for i in 0..8 {
        instrs.push(SimpleInstruction {
            op_value: 0x01,
            name: "move".into(),
            operand_text: format!("v{i},v0"),
            offset: i * 2,
            length: 2,
        });
    }
    for i in 8..11 {
        instrs.push(SimpleInstruction {
            op_value: 0x0e,
            name: "return-void".into(),
            operand_text: "".into(),
            offset: i * 2,
            length: 2,
        });
    }
    BasicMethod::new("Lcom/example/Pinned;", "fixed", "()V", instrs, vec![(0, 16), (16, 22)])
}

#[test]
fn sequencebb_output_is_pinned() {
    let method = fixed_method();
    let mut builder = SignatureBuilder::new();
    let sign = builder.get_method_signature(&method, &[Level::SequenceBb { min_instructions: 6 }]);
    let list = sign.get_list().expect("sequencebb level present");

    assert_eq!(list.len(), 1, "only the 8-instruction block clears the 6-instruction floor");
    assert_eq!(list[0], "movemovemovemovemovemovemovemove");
}

#[test]
fn sequencebb_excludes_blocks_exactly_at_the_floor_minus_one() {
    let method = fixed_method();
    let mut builder = SignatureBuilder::new();
    // Raising the floor above 8 drops even the qualifying block.
    let sign = builder.get_method_signature(&method, &[Level::SequenceBb { min_instructions: 9 }]);
    assert!(sign.get_list().unwrap().is_empty());
}

#[test]
fn sequencebb_includes_blocks_exactly_at_the_floor() {
    let method = fixed_method();
    let mut builder = SignatureBuilder::new();
    // The 3-instruction block clears a floor set exactly to 3.
    let sign = builder.get_method_signature(&method, &[Level::SequenceBb { min_instructions: 3 }]);
    let list = sign.get_list().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1], "return-voidreturn-voidreturn-void");
}
