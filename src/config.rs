//! Compile-time configuration constants.
//!
//! Mirrors the teacher lineage's `config.rs`: one place collecting the
//! defaults that the CLI and the library constructors fall back to when the
//! caller doesn't override them.

/// Default compressor level, valid for ZLIB/BZ2/LZMA (1..=9).
pub const LEVEL_DEFAULT: i32 = 9;

/// Minimum accepted compression level.
pub const LEVEL_MIN: i32 = 1;

/// Maximum accepted compression level.
pub const LEVEL_MAX: i32 = 9;

/// Default selection threshold (`τ_sort`): candidates with distance above
/// this are rejected as "not similar" and fall into `deleted`.
pub const THRESHOLD_SORT_DEFAULT: f64 = 0.8;

/// `τ_sort` default for the sentence/text preset specifically (ported from
/// `original_source/elsim/text.py`'s `FILTER_SORT_VALUE = 0.6`).
pub const THRESHOLD_SORT_TEXT_DEFAULT: f64 = 0.6;

/// Default dissimilarity threshold (`τ_sim`), reported alongside a
/// comparison's score. Not applied to the score itself: a similar pair's
/// real NCD is reported as-is, matching `get_similarity_value`'s
/// pass-through `FILTER_SIM_VALUE_METH` in the original implementation.
pub const THRESHOLD_SIM_DEFAULT: f64 = 0.2;

/// Default minimum method code length (bytes) below which a method is
/// skipped by the `Methods` filter preset.
pub const METHOD_MIN_SIZE_DEFAULT: usize = 15;

/// Minimum number of instructions a basic block needs to be included in the
/// `sequencebb` signature level.
pub const SEQUENCEBB_MIN_INSTRUCTIONS: usize = 6;

/// Number of decompressions used to approximate Bennett logical depth.
pub const LOGICAL_DEPTH_ITERATIONS: u32 = 1000;

/// Capacity (number of entries) of each bounded LRU cache in the
/// similarity kernel. Spec budgets caches in bytes of metadata (~1 MiB); at
/// roughly 64 bytes/entry this bounds to a comparable footprint.
pub const CACHE_CAPACITY: usize = 16_384;
