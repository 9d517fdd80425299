//! Adler-32-keyed bounded caches, mirroring the `__caches`/`__rcaches`/
//! `__ecaches` triad of `original_source/elsim/similarity/__init__.py`'s
//! `SIMILARITYBase`: one per-codec compressed-length cache, one per-codec
//! pairwise-result cache keyed on the concatenation of both inputs (tried
//! both orderings, since `compress(a+b)` and `compress(b+a)` usually
//! coincide for the codecs here), and one compressor-independent entropy
//! cache.
//!
//! Bounded with an LRU policy (the original caches are unbounded dicts that
//! live for the process lifetime; a long comparison run over many methods
//! would otherwise grow without limit).

use lru::LruCache;
use std::num::NonZeroUsize;

use crate::compressor::Codec;
use crate::config::CACHE_CAPACITY;

fn adler32(bytes: &[u8]) -> u32 {
    adler32::RollingAdler32::from_buffer(bytes).hash()
}

fn capacity() -> NonZeroUsize {
    NonZeroUsize::new(CACHE_CAPACITY).expect("CACHE_CAPACITY must be nonzero")
}

/// Per-codec cache of `compress(bytes) -> length`.
pub(crate) struct LengthCache {
    per_codec: [LruCache<u32, usize>; 7],
}

fn codec_slot(codec: Codec) -> usize {
    match codec {
        Codec::Zlib => 0,
        Codec::Bz2 => 1,
        Codec::Smaz => 2,
        Codec::Lzma => 3,
        Codec::Xz => 4,
        Codec::Snappy => 5,
        Codec::BlockSort => 6,
    }
}

impl LengthCache {
    pub(crate) fn new() -> Self {
        LengthCache {
            per_codec: std::array::from_fn(|_| LruCache::new(capacity())),
        }
    }

    pub(crate) fn get(&mut self, codec: Codec, bytes: &[u8]) -> Option<usize> {
        self.per_codec[codec_slot(codec)].get(&adler32(bytes)).copied()
    }

    pub(crate) fn put(&mut self, codec: Codec, bytes: &[u8], len: usize) {
        self.per_codec[codec_slot(codec)].put(adler32(bytes), len);
    }

    pub(crate) fn clear(&mut self) {
        for cache in self.per_codec.iter_mut() {
            cache.clear();
        }
    }
}

/// Per-codec cache of pairwise results (NCD/NCS/cmid), keyed on the
/// concatenation of both operands so re-asking about the same unordered
/// pair is free.
pub(crate) struct PairCache {
    per_codec: [LruCache<u32, f64>; 7],
}

impl PairCache {
    pub(crate) fn new() -> Self {
        PairCache {
            per_codec: std::array::from_fn(|_| LruCache::new(capacity())),
        }
    }

    pub(crate) fn get(&mut self, codec: Codec, a: &[u8], b: &[u8]) -> Option<f64> {
        let cache = &mut self.per_codec[codec_slot(codec)];
        let mut concat = Vec::with_capacity(a.len() + b.len());
        concat.extend_from_slice(a);
        concat.extend_from_slice(b);
        if let Some(v) = cache.get(&adler32(&concat)) {
            return Some(*v);
        }
        concat.clear();
        concat.extend_from_slice(b);
        concat.extend_from_slice(a);
        cache.get(&adler32(&concat)).copied()
    }

    pub(crate) fn put(&mut self, codec: Codec, a: &[u8], b: &[u8], value: f64) {
        let mut concat = Vec::with_capacity(a.len() + b.len());
        concat.extend_from_slice(a);
        concat.extend_from_slice(b);
        let key = adler32(&concat);
        self.per_codec[codec_slot(codec)].put(key, value);
    }

    pub(crate) fn clear(&mut self) {
        for cache in self.per_codec.iter_mut() {
            cache.clear();
        }
    }
}

/// Compressor-independent entropy cache.
pub(crate) struct EntropyCache {
    inner: LruCache<u32, f64>,
}

impl EntropyCache {
    pub(crate) fn new() -> Self {
        EntropyCache {
            inner: LruCache::new(capacity()),
        }
    }

    pub(crate) fn get(&mut self, bytes: &[u8]) -> Option<f64> {
        self.inner.get(&adler32(bytes)).copied()
    }

    pub(crate) fn put(&mut self, bytes: &[u8], value: f64) {
        self.inner.put(adler32(bytes), value);
    }

    pub(crate) fn clear(&mut self) {
        self.inner.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_cache_roundtrips() {
        let mut cache = LengthCache::new();
        assert!(cache.get(Codec::Zlib, b"abc").is_none());
        cache.put(Codec::Zlib, b"abc", 42);
        assert_eq!(cache.get(Codec::Zlib, b"abc"), Some(42));
        assert!(cache.get(Codec::Bz2, b"abc").is_none());
    }

    #[test]
    fn pair_cache_is_order_insensitive() {
        let mut cache = PairCache::new();
        cache.put(Codec::Zlib, b"aa", b"bb", 0.5);
        assert_eq!(cache.get(Codec::Zlib, b"aa", b"bb"), Some(0.5));
        assert_eq!(cache.get(Codec::Zlib, b"bb", b"aa"), Some(0.5));
    }

    #[test]
    fn clear_empties_all_codecs() {
        let mut cache = LengthCache::new();
        cache.put(Codec::Zlib, b"abc", 1);
        cache.clear();
        assert!(cache.get(Codec::Zlib, b"abc").is_none());
    }
}
