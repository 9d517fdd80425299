//! Cross-cutting invariants of `ComparisonEngine`, independent of any one
//! filter preset (§8, items 1-5).

use elsim::compressor::Codec;
use elsim::engine::ComparisonEngine;
use elsim::filter::{Filter, RawItem};
use elsim::similarity::SimilarityKernel;
use elsim::ElementData;

fn run(a: Vec<&str>, b: Vec<&str>) -> ComparisonEngine {
    let filter = Filter::strings();
    let mut sim = SimilarityKernel::new(Codec::Zlib);
    let e1: Vec<RawItem> = a.into_iter().map(RawItem::StringLiteral).collect();
    let e2: Vec<RawItem> = b.into_iter().map(RawItem::StringLiteral).collect();
    ComparisonEngine::new(e1, e2, &filter, &mut sim, "ZLIB", None, true, true).unwrap()
}

#[test]
fn partition_disjointness() {
    let engine = run(
        vec!["alpha one", "beta two", "gamma three", "delta four"],
        vec!["alpha one", "beta twoo", "epsilon five"],
    );
    let mut ptrs = std::collections::HashSet::new();
    for el in engine
        .identical()
        .into_iter()
        .chain(engine.similar())
        .chain(engine.deleted())
    {
        let ptr = std::rc::Rc::as_ptr(el) as usize;
        assert!(ptrs.insert(ptr), "side-1 element counted in more than one partition");
    }
}

#[test]
fn score_range() {
    let samples = [
        (vec!["a b c", "d e f"], vec!["a b c", "x y z"]),
        (vec![], vec!["new one"]),
        (vec!["lonely"], vec![]),
        (vec!["same text here"], vec!["same text here"]),
    ];
    for (a, b) in samples {
        let engine = run(a, b);
        assert!((0.0..=100.0).contains(&engine.score()), "score {} out of range", engine.score());
    }
}

#[test]
fn identical_inputs_are_fully_identical() {
    let engine = run(vec!["one fish", "two fish", "red fish"], vec!["one fish", "two fish", "red fish"]);
    assert_eq!(engine.identical().len(), 3);
    assert!(engine.similar().is_empty());
    assert!(engine.new_elements().is_empty());
    assert!(engine.deleted().is_empty());
    assert!((engine.score() - 100.0).abs() < 1e-9);
}

#[test]
fn empty_inputs_produce_empty_partitions_and_zero_score() {
    let engine = run(vec![], vec![]);
    assert!(engine.identical().is_empty());
    assert!(engine.similar().is_empty());
    assert!(engine.new_elements().is_empty());
    assert!(engine.deleted().is_empty());
    assert_eq!(engine.score(), 0.0);
}

#[test]
fn skip_monotonicity_blank_strings_never_surface_in_any_partition() {
    let engine = run(vec!["   ", "", "real content here"], vec!["real content here", "\t\t"]);
    assert_eq!(engine.skipped().len(), 3);
    for el in engine
        .identical()
        .into_iter()
        .chain(engine.similar())
        .chain(engine.deleted())
        .chain(engine.new_elements())
    {
        assert!(!el.buffer().iter().all(|b| b.is_ascii_whitespace()), "a skipped-shape element leaked into a partition");
    }
}
