//! Byte/code-string emission functions for each signature level (§4.3),
//! ported from `original_source/elsim/sign.py`'s `Signature` sub-strategies.

use crate::upstream::{MethodView, PackageRefKind};

/// Terminator class for a basic block's last instruction, by opcode value.
/// `None` for a block that falls through without a classified terminator
/// (no fallback code is ever emitted for those, matching the original).
pub fn terminator_code(op_value: u32) -> Option<char> {
    match op_value {
        0x0E..=0x11 => Some('R'),
        0x32..=0x3D => Some('I'),
        0x28..=0x2A => Some('G'),
        0x2B..=0x2C => Some('G'),
        _ => None,
    }
}

/// `S` per string use, one entry per site, offset-tagged.
pub fn strings_plain(method: &dyn MethodView) -> Vec<(u32, String)> {
    method
        .string_refs()
        .iter()
        .map(|s| (s.offset, "S".to_string()))
        .collect()
}

/// `S<len>` per string use.
pub fn strings_with_length(method: &dyn MethodView) -> Vec<(u32, String)> {
    method
        .string_refs()
        .iter()
        .map(|s| (s.offset, format!("S{}", s.value.len())))
        .collect()
}

/// `L1`: all referenced strings concatenated in offset order, newlines
/// replaced by spaces. Requires `string_refs()` to already be
/// offset-ascending (§4.3 SUPPLEMENT note: this crate pushes that ordering
/// responsibility to the upstream adapter).
pub fn strings_concat(method: &dyn MethodView) -> String {
    method
        .string_refs()
        .iter()
        .map(|s| s.value.replace('\n', " "))
        .collect()
}

/// `F0`/`F1` per field access site (read/write).
pub fn fields_plain(method: &dyn MethodView) -> Vec<(u32, String)> {
    method
        .field_refs()
        .iter()
        .map(|f| (f.offset, format!("F{}", f.write as u8)))
        .collect()
}

/// Plain package access codes: `P0` (create) / `P1` (call), never decorated
/// and never downgraded for internal calls.
pub fn packages_plain(method: &dyn MethodView) -> Vec<(u32, String)> {
    method
        .package_refs()
        .iter()
        .map(|p| {
            let access = match p.kind {
                PackageRefKind::Create => 0,
                PackageRefKind::Call => 1,
            };
            (p.offset, format!("P{access}"))
        })
        .collect()
}

fn class_matches_prefix(class_name: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| class_name.contains(p.as_str()))
}

/// `pa_1`-style package codes: calls to internal (non-external) targets are
/// downgraded to `P2` and never decorated; calls to external targets whose
/// class matches an include-prefix are decorated as `P1{class·method·desc}`,
/// otherwise bare `P1`; creates follow the same decoration rule under `P0`.
pub fn packages_prefixed1(method: &dyn MethodView, prefixes: &[String]) -> Vec<(u32, String)> {
    method
        .package_refs()
        .iter()
        .map(|p| {
            let present = class_matches_prefix(&p.class_name, prefixes);
            let code = match p.kind {
                PackageRefKind::Call => {
                    if !p.external {
                        "P2".to_string()
                    } else if present {
                        format!("P1{{{}{}{}}}", p.class_name, p.method_name, p.descriptor)
                    } else {
                        "P1".to_string()
                    }
                }
                PackageRefKind::Create => {
                    if present {
                        format!("P0{{{}}}", p.class_name)
                    } else {
                        "P0".to_string()
                    }
                }
            };
            (p.offset, code)
        })
        .collect()
}

/// `pa_2`-style package codes: never downgrades internal calls, decorates
/// with name unless the class matches an include-prefix (opposite polarity
/// from `pa_1`, faithfully reproducing `_get_packages_pa_2`'s asymmetry).
pub fn packages_prefixed2(method: &dyn MethodView, prefixes: &[String]) -> Vec<(u32, String)> {
    method
        .package_refs()
        .iter()
        .map(|p| {
            let present = class_matches_prefix(&p.class_name, prefixes);
            let access = match p.kind {
                PackageRefKind::Create => 0,
                PackageRefKind::Call => 1,
            };
            let code = if present {
                format!("P{access}")
            } else {
                match p.kind {
                    PackageRefKind::Call => {
                        format!("P1{{{}{}{}}}", p.class_name, p.method_name, p.descriptor)
                    }
                    PackageRefKind::Create => format!("P0{{{}}}", p.class_name),
                }
            };
            (p.offset, code)
        })
        .collect()
}

/// `L4`: package codes only (no `B[...]` framing), always `pa_1`-style,
/// matching `_get_packages` which hardwires that sub-strategy regardless of
/// the `L0` type in effect elsewhere.
pub fn packages_joined(method: &dyn MethodView, prefixes: &[String]) -> String {
    packages_prefixed1(method, prefixes)
        .into_iter()
        .map(|(_, code)| code)
        .collect()
}

/// `L2`: concatenated exception handler class names.
pub fn exceptions_concat(method: &dyn MethodView) -> String {
    method
        .exception_handlers()
        .iter()
        .map(|h| h.class_name.as_str())
        .collect()
}

/// `L3`: hex dump of every `fill-array-data-payload` block's raw bytes.
pub fn fill_array_data_hex(method: &dyn MethodView) -> String {
    let mut out = String::new();
    for payload in method.fill_array_data_payloads() {
        for byte in payload {
            out.push_str(&format!("{byte:02x}"));
        }
    }
    out
}

/// `hex`: the method's bytecode as mnemonic + canonical operand text,
/// concatenated with no separators.
pub fn hex_dump(method: &dyn MethodView) -> String {
    let mut out = String::new();
    for instr in method.instructions() {
        out.push_str(instr.name());
        out.push_str(instr.operand_text());
    }
    out
}

/// `sequencebb`: opcode-name strings for blocks with at least
/// `min_instructions` instructions, in block order.
pub fn sequence_bb(method: &dyn MethodView, min_instructions: usize) -> Vec<String> {
    let instructions = method.instructions();
    method
        .basic_blocks()
        .iter()
        .filter(|b| b.instruction_ids.len() >= min_instructions)
        .map(|b| {
            b.instruction_ids
                .iter()
                .map(|&idx| instructions[idx].name())
                .collect::<String>()
        })
        .collect()
}

/// Codes contributed by the configured string/field/package sub-strategies
/// for the whole method (not scoped to any one block yet).
pub struct SubStrategyOutputs {
    pub strings: Vec<(u32, String)>,
    pub fields: Vec<(u32, String)>,
    pub packages: Vec<(u32, String)>,
}

/// `L0`: per basic block, `B[` + sorted-by-offset payload + `]`, for every
/// block in the method, concatenated. `outputs` carries the whole-method
/// sub-strategy codes; each block re-filters them to its own offset range,
/// matching `_get_bb`'s "collect globally, sort, filter per block" shape.
pub fn basic_block_payload(method: &dyn MethodView, outputs: &SubStrategyOutputs) -> String {
    let mut out = String::new();
    for block in method.basic_blocks() {
        let mut entries: Vec<(u32, String)> = Vec::new();

        if let Some(&last_id) = block.instruction_ids.last() {
            let op_value = method.instructions()[last_id].op_value();
            if let Some(code) = terminator_code(op_value) {
                entries.push((block.end - 1, code.to_string()));
            }
        }

        entries.extend(outputs.strings.iter().cloned());
        entries.extend(outputs.fields.iter().cloned());
        entries.extend(outputs.packages.iter().cloned());
        entries.sort_by_key(|(offset, _)| *offset);
        entries.retain(|(offset, _)| *offset >= block.start && *offset < block.end);

        out.push('B');
        out.push('[');
        for (_, code) in &entries {
            out.push_str(code);
        }
        out.push(']');
    }
    out
}
