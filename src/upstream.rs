//! External interface contract (§6): the read-only view this crate expects
//! from a disassembler/parser collaborator. The collaborator itself
//! (parsing bytecode, building basic blocks, resolving cross-references) is
//! out of scope; only the shape of what it hands over is fixed here.

/// One instruction inside a method's bytecode.
pub trait InstructionView {
    /// Numeric opcode, used to classify terminators (§4.3).
    fn op_value(&self) -> u32;
    /// Canonical mnemonic, e.g. `"invoke-virtual"`.
    fn name(&self) -> &str;
    /// Canonicalised operand rendering (registers/constants normalised),
    /// used by the `hex` signature level.
    fn operand_text(&self) -> &str;
    /// Byte offset within the method's code.
    fn offset(&self) -> u32;
    /// Length in bytes.
    fn length(&self) -> u32;
}

/// A contiguous run of instruction indices within one method.
#[derive(Debug, Clone)]
pub struct BasicBlockView {
    pub start: u32,
    pub end: u32,
    /// Indices into the owning method's `instructions()` sequence.
    pub instruction_ids: Vec<usize>,
}

/// A string literal referenced by a method, at the site it is used.
#[derive(Debug, Clone)]
pub struct StringRef {
    pub offset: u32,
    pub value: String,
}

/// A field access site.
#[derive(Debug, Clone)]
pub struct FieldRef {
    pub offset: u32,
    /// `true` for a write (put), `false` for a read (get).
    pub write: bool,
}

/// The kind of cross-reference a [`PackageRef`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageRefKind {
    /// `new-instance`-style creation site.
    Create,
    /// Method invocation site.
    Call,
}

/// A call or instantiation site referencing another class/method.
#[derive(Debug, Clone)]
pub struct PackageRef {
    pub offset: u32,
    pub class_name: String,
    pub method_name: String,
    pub descriptor: String,
    pub kind: PackageRefKind,
    /// Whether the target resolves outside the binary under analysis.
    /// Internal calls are downgraded to access code `P2` and never carry
    /// a name (§4.3 "Package-access semantics").
    pub external: bool,
}

/// One exception handler entry.
#[derive(Debug, Clone)]
pub struct ExceptionHandler {
    pub class_name: String,
}

/// A read-only view of one disassembled method.
pub trait MethodView {
    fn class_name(&self) -> &str;
    fn method_name(&self) -> &str;
    fn descriptor(&self) -> &str;
    fn code_length(&self) -> u32;

    fn instructions(&self) -> &[Box<dyn InstructionView>];
    fn basic_blocks(&self) -> &[BasicBlockView];

    fn string_refs(&self) -> &[StringRef];
    fn field_refs(&self) -> &[FieldRef];
    fn package_refs(&self) -> &[PackageRef];
    fn exception_handlers(&self) -> &[ExceptionHandler];

    /// `fill-array-data-payload` blocks, raw bytes, in encounter order;
    /// consumed by the `L3` signature level.
    fn fill_array_data_payloads(&self) -> &[Vec<u8>] {
        &[]
    }

    /// Stable identity used as the signature builder's memoization key:
    /// `(class_name, method_name, descriptor)`.
    fn identity(&self) -> (String, String, String) {
        (
            self.class_name().to_string(),
            self.method_name().to_string(),
            self.descriptor().to_string(),
        )
    }
}
