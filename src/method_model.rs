//! Minimal concrete [`MethodView`] implementation, used by this crate's own
//! tests and available to callers who want to build a method by hand rather
//! than adapt an existing disassembler.

use crate::upstream::{
    BasicBlockView, ExceptionHandler, FieldRef, InstructionView, MethodView, PackageRef, StringRef,
};

/// A plain, owned instruction.
#[derive(Debug, Clone)]
pub struct SimpleInstruction {
    pub op_value: u32,
    pub name: String,
    pub operand_text: String,
    pub offset: u32,
    pub length: u32,
}

impl InstructionView for SimpleInstruction {
    fn op_value(&self) -> u32 {
        self.op_value
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn operand_text(&self) -> &str {
        &self.operand_text
    }
    fn offset(&self) -> u32 {
        self.offset
    }
    fn length(&self) -> u32 {
        self.length
    }
}

/// A method built up programmatically: all cross-reference lists are plain
/// public fields so tests can populate exactly what they need.
#[derive(Clone)]
pub struct BasicMethod {
    class_name: String,
    method_name: String,
    descriptor: String,
    instructions: Vec<Box<dyn InstructionView>>,
    basic_blocks: Vec<BasicBlockView>,
    pub string_refs: Vec<StringRef>,
    pub field_refs: Vec<FieldRef>,
    pub package_refs: Vec<PackageRef>,
    pub exception_handlers: Vec<ExceptionHandler>,
    pub fill_array_data_payloads: Vec<Vec<u8>>,
}

impl Clone for Box<dyn InstructionView> {
    fn clone(&self) -> Self {
        Box::new(SimpleInstruction {
            op_value: self.op_value(),
            name: self.name().to_string(),
            operand_text: self.operand_text().to_string(),
            offset: self.offset(),
            length: self.length(),
        })
    }
}

impl BasicMethod {
    /// `blocks` are `(start, end)` byte-offset ranges; instruction ids are
    /// derived from which instructions' offsets fall inside each range.
    pub fn new(
        class_name: &str,
        method_name: &str,
        descriptor: &str,
        instructions: Vec<SimpleInstruction>,
        blocks: Vec<(u32, u32)>,
    ) -> Self {
        let instructions: Vec<Box<dyn InstructionView>> = instructions
            .into_iter()
            .map(|i| Box::new(i) as Box<dyn InstructionView>)
            .collect();

        let basic_blocks = blocks
            .into_iter()
            .map(|(start, end)| {
                let instruction_ids = instructions
                    .iter()
                    .enumerate()
                    .filter(|(_, i)| i.offset() >= start && i.offset() < end)
                    .map(|(idx, _)| idx)
                    .collect();
                BasicBlockView { start, end, instruction_ids }
            })
            .collect();

        BasicMethod {
            class_name: class_name.to_string(),
            method_name: method_name.to_string(),
            descriptor: descriptor.to_string(),
            instructions,
            basic_blocks,
            string_refs: Vec::new(),
            field_refs: Vec::new(),
            package_refs: Vec::new(),
            exception_handlers: Vec::new(),
            fill_array_data_payloads: Vec::new(),
        }
    }

    /// Total code length in bytes, derived from the last instruction's end.
    fn derived_code_length(&self) -> u32 {
        self.instructions
            .last()
            .map(|i| i.offset() + i.length())
            .unwrap_or(0)
    }
}

impl MethodView for BasicMethod {
    fn class_name(&self) -> &str {
        &self.class_name
    }
    fn method_name(&self) -> &str {
        &self.method_name
    }
    fn descriptor(&self) -> &str {
        &self.descriptor
    }
    fn code_length(&self) -> u32 {
        self.derived_code_length()
    }
    fn instructions(&self) -> &[Box<dyn InstructionView>] {
        &self.instructions
    }
    fn basic_blocks(&self) -> &[BasicBlockView] {
        &self.basic_blocks
    }
    fn string_refs(&self) -> &[StringRef] {
        &self.string_refs
    }
    fn field_refs(&self) -> &[FieldRef] {
        &self.field_refs
    }
    fn package_refs(&self) -> &[PackageRef] {
        &self.package_refs
    }
    fn exception_handlers(&self) -> &[ExceptionHandler] {
        &self.exception_handlers
    }
    fn fill_array_data_payloads(&self) -> &[Vec<u8>] {
        &self.fill_array_data_payloads
    }
}
