//! Similarity kernel (C2): NCD/NCS/cmid/kolmogorov/logical-depth on top of
//! the compressor façade, with Adler-32-keyed memoization mirroring
//! `original_source/elsim/similarity/__init__.py`'s `SIMILARITYBase` /
//! `SIMILARITYPython`.

mod cache;

use cache::{EntropyCache, LengthCache, PairCache};

use crate::compressor::{Codec, Compressor};
use crate::error::Result;

/// Stateful similarity kernel: owns a [`Compressor`] plus its memoization
/// caches. Not `Sync`: callers that want concurrent comparisons give each
/// worker its own `SimilarityKernel` (§5).
pub struct SimilarityKernel {
    compressor: Compressor,
    lengths: LengthCache,
    ncd_cache: PairCache,
    entropy_cache: EntropyCache,
}

impl Default for SimilarityKernel {
    fn default() -> Self {
        SimilarityKernel {
            compressor: Compressor::default(),
            lengths: LengthCache::new(),
            ncd_cache: PairCache::new(),
            entropy_cache: EntropyCache::new(),
        }
    }
}

impl SimilarityKernel {
    pub fn new(codec: Codec) -> Self {
        SimilarityKernel {
            compressor: Compressor::new(codec),
            ..Self::default()
        }
    }

    pub fn codec(&self) -> Codec {
        self.compressor.codec()
    }

    pub fn set_compress_type(&mut self, codec: Codec) {
        self.compressor.set_type(codec);
        self.clear_caches();
    }

    pub fn set_level(&mut self, level: i32) -> Result<()> {
        self.compressor.set_level(level)?;
        self.clear_caches();
        Ok(())
    }

    /// Drops all memoized results. Called whenever the codec or level
    /// changes, since cached lengths/pairs are only valid for the
    /// configuration they were produced under.
    pub fn clear_caches(&mut self) {
        self.lengths.clear();
        self.ncd_cache.clear();
        self.entropy_cache.clear();
    }

    fn compressed_len(&mut self, bytes: &[u8]) -> Result<usize> {
        let codec = self.compressor.codec();
        if let Some(len) = self.lengths.get(codec, bytes) {
            return Ok(len);
        }
        let len = self.compressor.compress(bytes)?;
        self.lengths.put(codec, bytes, len);
        Ok(len)
    }

    /// Length in bytes of the compressed form of `bytes`.
    pub fn compress(&mut self, bytes: &[u8]) -> Result<usize> {
        self.compressed_len(bytes)
    }

    /// Normalized Compression Distance: `(C(a+b) - min(C(a), C(b))) / max(C(a), C(b))`,
    /// clamped to `[0.0, 1.0]`. Precondition: both inputs non-empty, else `1.0`.
    pub fn ncd(&mut self, a: &[u8], b: &[u8]) -> Result<f64> {
        if a.is_empty() || b.is_empty() {
            return Ok(1.0);
        }

        let codec = self.compressor.codec();
        if let Some(cached) = self.ncd_cache.get(codec, a, b) {
            return Ok(cached);
        }

        let len_a = self.compressed_len(a)? as f64;
        let len_b = self.compressed_len(b)? as f64;

        let mut combined = Vec::with_capacity(a.len() + b.len());
        combined.extend_from_slice(a);
        combined.extend_from_slice(b);
        let len_ab = self.compressor.compress(&combined)? as f64;

        let smax = len_a.max(len_b);
        let smin = len_a.min(len_b);
        let value = if smax == 0.0 {
            0.0
        } else {
            ((len_ab - smin) / smax).min(1.0).max(0.0)
        };

        self.ncd_cache.put(codec, a, b, value);
        Ok(value)
    }

    /// `1.0 - ncd(a, b)`.
    pub fn ncs(&mut self, a: &[u8], b: &[u8]) -> Result<f64> {
        Ok(1.0 - self.ncd(a, b)?)
    }

    /// Compression-based Mutual Inclusion Degree, `1 - |C(a) - C(b)| / max(C(a), C(b))`.
    ///
    /// Advisory only: no selection or ranking logic in this crate consults
    /// it, matching the upstream comparison engine, which never calls
    /// `cmid` either. Provided because the kernel's public interface mirrors
    /// `SIMILARITY`'s, and callers outside the default pipeline may still
    /// want it.
    pub fn cmid(&mut self, a: &[u8], b: &[u8]) -> Result<f64> {
        let len_a = self.compressed_len(a)? as f64;
        let len_b = self.compressed_len(b)? as f64;
        let smax = len_a.max(len_b);
        if smax == 0.0 {
            return Ok(1.0);
        }
        Ok(1.0 - (len_a - len_b).abs() / smax)
    }

    /// Upper bound on Kolmogorov complexity: the compressed length itself.
    pub fn kolmogorov(&mut self, bytes: &[u8]) -> Result<usize> {
        self.compressed_len(bytes)
    }

    /// Approximate Bennett logical depth (mean decompression wall-clock
    /// time in nanoseconds). Requires a codec with a decompressor.
    pub fn logical_depth(&self, bytes: &[u8]) -> Result<f64> {
        self.compressor.logical_depth(bytes)
    }

    /// Classical Shannon entropy, cached independently of the codec.
    pub fn entropy(&mut self, bytes: &[u8]) -> f64 {
        if let Some(cached) = self.entropy_cache.get(bytes) {
            return cached;
        }
        let value = self.compressor.entropy(bytes);
        self.entropy_cache.put(bytes, value);
        value
    }

    /// Standard edit distance, not cached (cheap relative to compression).
    pub fn levenshtein(&self, a: &[u8], b: &[u8]) -> usize {
        self.compressor.levenshtein(a, b)
    }
}
