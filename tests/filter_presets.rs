//! Each built-in [`Filter`] preset exercised end-to-end through a small
//! [`ComparisonEngine`] run (§4.5).

use std::cell::RefCell;
use std::rc::Rc;

use elsim::compressor::Codec;
use elsim::engine::ComparisonEngine;
use elsim::filter::{Filter, RawItem};
use elsim::method_model::{BasicMethod, SimpleInstruction};
use elsim::signature::SignatureBuilder;
use elsim::similarity::SimilarityKernel;

#[test]
fn strings_preset_default_threshold_is_point_eight() {
    assert_eq!(Filter::strings().default_threshold, 0.8);
}

#[test]
fn basic_blocks_preset_default_threshold_is_point_eight() {
    assert_eq!(Filter::basic_blocks().default_threshold, 0.8);
}

#[test]
fn text_preset_default_threshold_is_point_six() {
    assert_eq!(Filter::text().default_threshold, 0.6);
}

#[test]
fn methods_preset_default_threshold_is_point_eight() {
    let builder = Rc::new(RefCell::new(SignatureBuilder::new()));
    assert_eq!(Filter::methods(builder, 15, None).default_threshold, 0.8);
}

#[test]
fn strings_preset_end_to_end_skips_blank_and_matches_identical() {
    let filter = Filter::strings();
    let mut sim = SimilarityKernel::new(Codec::Zlib);
    let e1 = vec!["", "   ", "shared literal"].into_iter().map(RawItem::StringLiteral);
    let e2 = vec!["shared literal", "\n\n"].into_iter().map(RawItem::StringLiteral);
    let engine = ComparisonEngine::new(e1, e2, &filter, &mut sim, "ZLIB", None, true, true).unwrap();
    assert_eq!(engine.identical().len(), 1);
    assert_eq!(engine.skipped().len(), 3);
}

#[test]
fn basic_blocks_preset_end_to_end() {
    let filter = Filter::basic_blocks();
    let mut sim = SimilarityKernel::new(Codec::Zlib);

    let instrs1 = vec![
        SimpleInstruction { op_value: 1, name: "add".into(), operand_text: "v0,v1".into(), offset: 0, length: 2 },
        SimpleInstruction { op_value: 0x0e, name: "return-void".into(), operand_text: "".into(), offset: 2, length: 2 },
    ];
    let m1 = BasicMethod::new("Lx;", "a", "()V", instrs1, vec![(0, 4)]);

    let instrs2 = vec![
        SimpleInstruction { op_value: 1, name: "sub".into(), operand_text: "v0,v1".into(), offset: 0, length: 2 },
        SimpleInstruction { op_value: 0x0e, name: "return-void".into(), operand_text: "".into(), offset: 2, length: 2 },
    ];
    let m2 = BasicMethod::new("Lx;", "b", "()V", instrs2, vec![(0, 4)]);

    let e1 = vec![RawItem::BasicBlock { method: &m1, block_index: 0 }];
    let e2 = vec![RawItem::BasicBlock { method: &m2, block_index: 0 }];
    let engine = ComparisonEngine::new(e1, e2, &filter, &mut sim, "ZLIB", None, true, true).unwrap();
    assert!((0.0..=100.0).contains(&engine.score()));
}

#[test]
fn text_preset_splits_sentences_and_compares_them() {
    let filter = Filter::text();
    let mut sim = SimilarityKernel::new(Codec::Zlib);
    let e1 = vec!["the quick brown fox", "jumps over the lazy dog"].into_iter().map(RawItem::Sentence);
    let e2 = vec!["the quick brown fox", "leaps over the lazy dog"].into_iter().map(RawItem::Sentence);
    let engine = ComparisonEngine::new(e1, e2, &filter, &mut sim, "ZLIB", None, true, true).unwrap();
    assert_eq!(engine.identical().len(), 1);
}
