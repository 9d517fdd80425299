//! Comparison engine (C6): the set-partitioning algorithm (§4.6). Built
//! once, read-only afterwards — mirrors `original_source/elsim/__init__.py`'s
//! `Elsim` four-phase constructor (`_init_index_elements`,
//! `_init_similarity`, `_init_sort_elements`, `_init_new_elements`), with
//! the non-determinism the design notes call out replaced by
//! insertion-ordered bookkeeping.
//!
//! Phase C (the similarity matrix) is embarrassingly parallel — every cell
//! is independent — and `rayon` is already in this crate's dependency
//! stack; a future `par_iter` over `hash_order[0]`'s residual
//! representatives is the natural extension point, each worker needing its
//! own [`SimilarityKernel`] (its cache state isn't `Sync`). The default
//! path below stays single-threaded and deterministic (§5).

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::config::THRESHOLD_SIM_DEFAULT;
use crate::element::{Element, ElementData};
use crate::error::Result;
use crate::filter::{Filter, RawItem};
use crate::similarity::SimilarityKernel;

/// A finished similarity session. Every field below is frozen once
/// construction returns.
pub struct ComparisonEngine {
    compressor_name: &'static str,
    threshold_sort: f64,
    /// Reported alongside the score; not applied when aggregating it (see
    /// the aggregation step below).
    threshold_sim: f64,

    elements: [Vec<Rc<Element>>; 2],
    skipped: Vec<Rc<Element>>,

    /// Side-1 indices.
    identical: Vec<usize>,
    /// Side-1 indices that survived ranking.
    similar: Vec<usize>,
    /// Side-1 indices rejected by `rank`.
    deleted: Vec<usize>,
    /// Side-1 index -> (side-2 index, distance) of its ranked winner.
    similar_to: HashMap<usize, (usize, f64)>,
    /// Side-2 indices with no side-1 counterpart at all.
    new_elements: Vec<usize>,

    score: f64,
}

impl ComparisonEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new<'a>(
        e1: impl IntoIterator<Item = RawItem<'a>>,
        e2: impl IntoIterator<Item = RawItem<'a>>,
        filter: &Filter,
        sim: &mut SimilarityKernel,
        compressor_name: &'static str,
        threshold: Option<f64>,
        include_new: bool,
        include_deleted: bool,
    ) -> Result<Self> {
        let threshold_sort = threshold.unwrap_or(filter.default_threshold);
        let threshold_sim = THRESHOLD_SIM_DEFAULT;

        let mut elements: [Vec<Rc<Element>>; 2] = [Vec::new(), Vec::new()];
        let mut hash_to_indices: [HashMap<u128, Vec<usize>>; 2] = [HashMap::new(), HashMap::new()];
        let mut hash_order: [Vec<u128>; 2] = [Vec::new(), Vec::new()];
        let mut skipped = Vec::new();

        // Phase A: indexing.
        for (side_idx, raw_side) in [e1, e2].into_iter().enumerate() {
            let side = if side_idx == 0 { crate::element::Side::First } else { crate::element::Side::Second };
            for raw in raw_side {
                let el = (filter.make_element)(raw, side);
                if (filter.skip)(&el) {
                    skipped.push(Rc::new(el));
                    continue;
                }
                let el = Rc::new(el);
                let hash = el.hash();
                let bucket = hash_to_indices[side_idx].entry(hash).or_insert_with(|| {
                    hash_order[side_idx].push(hash);
                    Vec::new()
                });
                bucket.push(elements[side_idx].len());
                elements[side_idx].push(el);
            }
        }

        // Phase B: identical / residue.
        let hashes1: HashSet<u128> = hash_to_indices[0].keys().copied().collect();
        let hashes2: HashSet<u128> = hash_to_indices[1].keys().copied().collect();

        let mut identical = Vec::new();
        for &h in &hash_order[0] {
            if hashes2.contains(&h) {
                identical.extend(hash_to_indices[0][&h].iter().copied());
            }
        }

        let cand2: Vec<usize> = hash_order[1]
            .iter()
            .filter(|h| !hashes1.contains(h))
            .map(|h| hash_to_indices[1][h][0])
            .collect();

        // Phase C: similarity matrix over one representative per residual
        // hash on side 1.
        let mut similar = Vec::new();
        let mut sim_matrix: HashMap<usize, Vec<(usize, f64)>> = HashMap::new();
        for &h in &hash_order[0] {
            if hashes2.contains(&h) {
                continue;
            }
            let idx = hash_to_indices[0][&h][0];
            let mut row = Vec::with_capacity(cand2.len());
            for &c_idx in &cand2 {
                let d = (filter.distance)(sim, &elements[0][idx], &elements[1][c_idx])?;
                row.push((c_idx, d));
            }
            sim_matrix.insert(idx, row);
            similar.push(idx);
        }

        // Phase D: ranking.
        let mut deleted = Vec::new();
        let mut similar_to = HashMap::new();
        let mut kept_similar = Vec::new();
        for idx in similar {
            let row = &sim_matrix[&idx];
            let winner = (filter.rank)(row, threshold_sort);
            match winner {
                None => deleted.push(idx),
                Some(c_idx) => {
                    let distance = row.iter().find(|(i, _)| *i == c_idx).map(|(_, d)| *d).unwrap_or(1.0);
                    similar_to.insert(idx, (c_idx, distance));
                    kept_similar.push(idx);
                }
            }
        }
        let similar = kept_similar;

        // Phase E: new.
        let matched_side2: HashSet<usize> = similar_to.values().map(|(c_idx, _)| *c_idx).collect();
        let mut new_elements = Vec::new();
        for (j, el) in elements[1].iter().enumerate() {
            if matched_side2.contains(&j) {
                continue;
            }
            if hashes1.contains(&el.hash()) {
                continue;
            }
            new_elements.push(j);
        }

        // Aggregate score. The original's `FILTER_SIM_VALUE_METH` is an
        // identity pass-through for every element kind (see
        // `get_similarity_value` in `examples/original_source/elsim/__init__.py`),
        // so a similar pair's real distance is never collapsed here; `τ_sim`
        // is retained on the struct purely as a reported/configured value,
        // not as a step in this aggregation.
        let mut values = Vec::new();
        for &idx in &similar {
            let (_, distance) = similar_to[&idx];
            values.push(distance);
        }
        for _ in &identical {
            values.push(0.0);
        }
        if include_new {
            for _ in &new_elements {
                values.push(1.0);
            }
        }
        if include_deleted {
            for _ in &deleted {
                values.push(1.0);
            }
        }

        let denom = values.len().max(1) as f64;
        let score = values.iter().map(|v| 1.0 - v).sum::<f64>() / denom * 100.0;

        Ok(ComparisonEngine {
            compressor_name,
            threshold_sort,
            threshold_sim,
            elements,
            skipped,
            identical,
            similar,
            deleted,
            similar_to,
            new_elements,
            score,
        })
    }

    pub fn compressor_name(&self) -> &'static str {
        self.compressor_name
    }

    pub fn threshold_sort(&self) -> f64 {
        self.threshold_sort
    }

    pub fn threshold_sim(&self) -> f64 {
        self.threshold_sim
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn identical(&self) -> Vec<&Rc<Element>> {
        self.identical.iter().map(|&i| &self.elements[0][i]).collect()
    }

    pub fn similar(&self) -> Vec<&Rc<Element>> {
        self.similar.iter().map(|&i| &self.elements[0][i]).collect()
    }

    pub fn deleted(&self) -> Vec<&Rc<Element>> {
        self.deleted.iter().map(|&i| &self.elements[0][i]).collect()
    }

    pub fn new_elements(&self) -> Vec<&Rc<Element>> {
        self.new_elements.iter().map(|&i| &self.elements[1][i]).collect()
    }

    pub fn skipped(&self) -> &[Rc<Element>] {
        &self.skipped
    }

    pub fn elements_side(&self, side: usize) -> &[Rc<Element>] {
        &self.elements[side]
    }

    /// The matched partner and distance for one similar element, by its
    /// position in [`ComparisonEngine::similar`]'s output.
    pub fn match_for(&self, side1_element: &Rc<Element>) -> Option<(&Rc<Element>, f64)> {
        let idx = self.elements[0].iter().position(|e| Rc::ptr_eq(e, side1_element))?;
        let (c_idx, distance) = *self.similar_to.get(&idx)?;
        Some((&self.elements[1][c_idx], distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compressor::Codec;
    use crate::filter::Filter;

    fn engine_for(
        a: Vec<&'static str>,
        b: Vec<&'static str>,
        threshold: Option<f64>,
        include_new: bool,
        include_deleted: bool,
    ) -> ComparisonEngine {
        let filter = Filter::strings();
        let mut sim = SimilarityKernel::new(Codec::Zlib);
        let e1 = a.into_iter().map(RawItem::StringLiteral);
        let e2 = b.into_iter().map(RawItem::StringLiteral);
        ComparisonEngine::new(e1, e2, &filter, &mut sim, "ZLIB", threshold, include_new, include_deleted).unwrap()
    }

    #[test]
    fn identical_inputs_score_100() {
        let engine = engine_for(vec!["hello"], vec!["hello"], None, true, true);
        assert!(engine.similar().is_empty());
        assert!(engine.deleted().is_empty());
        assert!(engine.new_elements().is_empty());
        assert_eq!(engine.identical().len(), 1);
        assert!((engine.score() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs_score_zero() {
        let engine = engine_for(vec![], vec![], None, true, true);
        assert_eq!(engine.score(), 0.0);
        assert!(engine.identical().is_empty());
        assert!(engine.similar().is_empty());
        assert!(engine.new_elements().is_empty());
        assert!(engine.deleted().is_empty());
    }

    #[test]
    fn partitions_are_disjoint() {
        let engine = engine_for(vec!["abc", "xyz", "hello world"], vec!["abc", "xyz2", "totally different"], None, true, true);
        let mut seen = HashSet::new();
        for el in engine.identical().iter().chain(engine.similar().iter()).chain(engine.deleted().iter()) {
            let ptr = Rc::as_ptr(el) as usize;
            assert!(seen.insert(ptr), "element appeared in more than one side-1 partition");
        }
    }

    #[test]
    fn score_is_bounded() {
        let engine = engine_for(vec!["quick brown fox"], vec!["slow red hen"], None, true, true);
        assert!((0.0..=100.0).contains(&engine.score()));
    }
}
