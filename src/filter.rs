//! Filter descriptor (C5): four pluggable operations parameterising the
//! comparison engine for one element kind (§3, §4.5, and the "Dynamic-
//! dispatch filter" design note — bound once at construction, no
//! dictionary-keyed lookup at runtime).

use std::cell::RefCell;
use std::rc::Rc;

use regex::Regex;

use crate::config::{METHOD_MIN_SIZE_DEFAULT, THRESHOLD_SORT_DEFAULT, THRESHOLD_SORT_TEXT_DEFAULT};
use crate::element::{Element, ElementData, ElementKind, Side};
use crate::error::Result;
use crate::signature::{L0Spec, Level, SignatureBuilder};
use crate::similarity::SimilarityKernel;
use crate::upstream::MethodView;

/// One raw item to adapt into an [`Element`], tagged by the shape of data
/// each filter preset expects.
pub enum RawItem<'a> {
    Method(&'a dyn MethodView),
    BasicBlock { method: &'a dyn MethodView, block_index: usize },
    StringLiteral(&'a str),
    Sentence(&'a str),
}

pub type MakeElementFn = dyn for<'a> Fn(RawItem<'a>, Side) -> Element;
pub type SkipFn = dyn Fn(&Element) -> bool;
pub type DistanceFn = dyn Fn(&mut SimilarityKernel, &Element, &Element) -> Result<f64>;
/// `candidates` is `(candidate_id, distance)` in insertion order. Returns
/// the winning candidate id, or `None` if nothing clears `threshold`.
pub type RankFn = dyn Fn(&[(usize, f64)], f64) -> Option<usize>;

/// A bound filter: four operations plus the preset's own default
/// `τ_sort`, used when [`crate::engine::ComparisonEngine`] is built without
/// an explicit threshold override (§4.5 SUPPLEMENT).
pub struct Filter {
    pub make_element: Box<MakeElementFn>,
    pub skip: Box<SkipFn>,
    pub distance: Box<DistanceFn>,
    pub rank: Box<RankFn>,
    pub default_threshold: f64,
}

/// Sort ascending by distance, return the single best candidate iff its
/// distance is `<= threshold`. Ties break by insertion order: `min_by`
/// returns the first minimal element on a tie (§4.5).
pub fn rank_basic(candidates: &[(usize, f64)], threshold: f64) -> Option<usize> {
    candidates
        .iter()
        .min_by(|a, b| a.1.partial_cmp(&b.1).expect("distance is never NaN"))
        .filter(|&&(_, d)| d <= threshold)
        .map(|&(id, _)| id)
}

fn buffer_distance(sim: &mut SimilarityKernel, a: &Element, b: &Element) -> Result<f64> {
    sim.ncd(a.buffer(), b.buffer())
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| b.is_ascii_whitespace())
}

/// `NCD` of each method's `L0_4` signature, the canonical default
/// composition used throughout `original_source` (§4.3).
fn method_signature_distance(sim: &mut SimilarityKernel, a: &Element, b: &Element) -> Result<f64> {
    sim.ncd(a.signature(), b.signature())
}

impl Filter {
    /// The `Methods` preset: NCD of `L0_4` signature, skipping methods
    /// shorter than `min_size` bytes or whose class name matches
    /// `exclude`.
    pub fn methods(builder: Rc<RefCell<SignatureBuilder>>, min_size: usize, exclude: Option<Regex>) -> Self {
        let levels = vec![Level::L0(L0Spec::l0_4())];
        Filter {
            make_element: Box::new(move |raw, side| {
                let method = match raw {
                    RawItem::Method(m) => m,
                    _ => panic!("Methods filter given a non-Method raw item"),
                };
                let buffer = crate::signature::grammar::hex_dump(method).into_bytes();
                let identity = method.identity();
                // The signature is computed eagerly here rather than truly
                // deferred: `method` is only borrowed for the duration of
                // this call, so it cannot be captured into a closure that
                // outlives it. `Element`'s lazy-signature slot still caches
                // the result uniformly with the other element kinds.
                let signature = builder.borrow_mut().get_method_signature(method, &levels).get_string().into_bytes();
                let el = Element::new(ElementKind::Method, side, buffer, Box::new(move || signature));
                el.with_label(format!("{}->{}{}", identity.0, identity.1, identity.2))
            }),
            skip: Box::new(move |el| {
                if el.length() < min_size {
                    return true;
                }
                if let (Some(re), Some(label)) = (&exclude, el.label()) {
                    if re.is_match(label) {
                        return true;
                    }
                }
                false
            }),
            distance: Box::new(method_signature_distance),
            rank: Box::new(rank_basic),
            default_threshold: THRESHOLD_SORT_DEFAULT,
        }
    }

    /// The `Strings` preset: NCD of the literal's own bytes, skipping
    /// empty/whitespace-only strings.
    pub fn strings() -> Self {
        Filter {
            make_element: Box::new(|raw, side| {
                let text = match raw {
                    RawItem::StringLiteral(s) => s,
                    _ => panic!("Strings filter given a non-StringLiteral raw item"),
                };
                Element::with_buffer_as_signature(ElementKind::StringLiteral, side, text.as_bytes().to_vec())
                    .with_label(text.to_string())
            }),
            skip: Box::new(|el| is_blank(el.buffer())),
            distance: Box::new(buffer_distance),
            rank: Box::new(rank_basic),
            default_threshold: THRESHOLD_SORT_DEFAULT,
        }
    }

    /// The `BasicBlocks` preset: NCD of the block's own instruction bytes,
    /// no skip rule.
    pub fn basic_blocks() -> Self {
        Filter {
            make_element: Box::new(|raw, side| {
                let (method, block_index) = match raw {
                    RawItem::BasicBlock { method, block_index } => (method, block_index),
                    _ => panic!("BasicBlocks filter given a non-BasicBlock raw item"),
                };
                let block = &method.basic_blocks()[block_index];
                let mut buffer = Vec::new();
                for &idx in &block.instruction_ids {
                    let instr = &method.instructions()[idx];
                    buffer.extend_from_slice(instr.name().as_bytes());
                    buffer.extend_from_slice(instr.operand_text().as_bytes());
                }
                Element::with_buffer_as_signature(ElementKind::BasicBlock, side, buffer)
            }),
            skip: Box::new(|_| false),
            distance: Box::new(buffer_distance),
            rank: Box::new(rank_basic),
            default_threshold: THRESHOLD_SORT_DEFAULT,
        }
    }

    /// The `Text` preset: NCD of a sentence's trimmed bytes, skipping
    /// empty/whitespace-only sentences. Default threshold `0.6`, distinct
    /// from the other presets' `0.8` (§4.5 SUPPLEMENT,
    /// `original_source/elsim/text.py`'s `FILTER_SORT_VALUE`).
    pub fn text() -> Self {
        Filter {
            make_element: Box::new(|raw, side| {
                let text = match raw {
                    RawItem::Sentence(s) => s,
                    _ => panic!("Text filter given a non-Sentence raw item"),
                };
                let trimmed = text.trim().as_bytes().to_vec();
                Element::with_buffer_as_signature(ElementKind::Sentence, side, trimmed).with_label(text.to_string())
            }),
            skip: Box::new(|el| is_blank(el.buffer())),
            distance: Box::new(buffer_distance),
            rank: Box::new(rank_basic),
            default_threshold: THRESHOLD_SORT_TEXT_DEFAULT,
        }
    }
}
