//! Element adapter (C4): wraps one raw domain item into an `Element`
//! carrying a 128-bit content hash and a lazily materialised signature.
//!
//! Laziness uses `std::cell::OnceCell` rather than a crate like
//! `once_cell`: elements are only ever touched from the single thread
//! driving a `ComparisonEngine` session (§5), so there is no need for the
//! `Sync`-safe `once_cell::sync::OnceCell` / `std::sync::OnceLock`.

use std::cell::{OnceCell, RefCell};

use murmur3::murmur3_x64_128;

/// Which side of the comparison an element came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// The domain kind a raw item was adapted from (§3, §9 "Polymorphic
/// elements"). Carried for reporting; does not affect hashing/signature
/// computation, which is uniform once `buffer`/`signature` are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Method,
    BasicBlock,
    StringLiteral,
    Sentence,
}

/// Operations every element kind exposes, regardless of what it wraps.
pub trait ElementData {
    fn buffer(&self) -> &[u8];
    fn hash(&self) -> u128;
    fn signature(&self) -> &[u8];
    fn entropy(&self) -> f64;
    fn length(&self) -> usize;
}

/// One adapted domain item. `buffer` is available eagerly (constructing it
/// is always cheap relative to hashing/compressing); `hash`, `signature`
/// and `entropy` are computed on first access and then frozen, matching
/// the "materialise on first access" design note.
pub struct Element {
    kind: ElementKind,
    side: Side,
    buffer: Vec<u8>,
    hash_cell: OnceCell<u128>,
    signature_cell: OnceCell<Vec<u8>>,
    // Taken and run exactly once by `signature()`. `None` after that.
    signature_fn: RefCell<Option<Box<dyn FnOnce() -> Vec<u8>>>>,
    entropy_cell: OnceCell<f64>,
    /// Human-readable identity, used by skip rules that need more than the
    /// buffer (e.g. a method's class name against an exclude regex) and by
    /// the reporter. Not part of the hashing/signature contract.
    label: Option<String>,
}

impl Element {
    /// `signature_fn` is invoked at most once, the first time
    /// [`ElementData::signature`] is called. For element kinds where the
    /// signature is just the buffer (basic blocks, strings, sentences),
    /// pass `move || buffer.clone()`.
    pub fn new(
        kind: ElementKind,
        side: Side,
        buffer: Vec<u8>,
        signature_fn: Box<dyn FnOnce() -> Vec<u8>>,
    ) -> Self {
        Element {
            kind,
            side,
            buffer,
            hash_cell: OnceCell::new(),
            signature_cell: OnceCell::new(),
            signature_fn: RefCell::new(Some(signature_fn)),
            entropy_cell: OnceCell::new(),
            label: None,
        }
    }

    /// Convenience constructor for kinds whose signature is just their
    /// buffer (basic blocks, string literals, sentences).
    pub fn with_buffer_as_signature(kind: ElementKind, side: Side, buffer: Vec<u8>) -> Self {
        let sig_source = buffer.clone();
        Element::new(kind, side, buffer, Box::new(move || sig_source))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn side(&self) -> Side {
        self.side
    }
}

fn murmur128(bytes: &[u8]) -> u128 {
    let mut cursor = std::io::Cursor::new(bytes);
    murmur3_x64_128(&mut cursor, 0).expect("hashing an in-memory buffer cannot fail")
}

impl ElementData for Element {
    fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    fn hash(&self) -> u128 {
        *self.hash_cell.get_or_init(|| murmur128(&self.buffer))
    }

    fn signature(&self) -> &[u8] {
        self.signature_cell.get_or_init(|| {
            let f = self
                .signature_fn
                .borrow_mut()
                .take()
                .expect("signature() called more than once internally");
            f()
        })
    }

    fn entropy(&self) -> f64 {
        *self
            .entropy_cell
            .get_or_init(|| crate::compressor::entropy(&self.buffer))
    }

    fn length(&self) -> usize {
        self.buffer.len()
    }
}
