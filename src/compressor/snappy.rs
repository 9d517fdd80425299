//! SNAPPY codec backed by `snap` (pure-Rust Snappy). Level is ignored. The
//! second codec (besides ZLIB) to expose a decompressor, used by
//! [`super::Compressor::logical_depth`].

use snap::raw::{Decoder, Encoder};

use crate::error::{ElsimError, Result};

fn fail() -> ElsimError {
    ElsimError::CodecFailure {
        codec: super::Codec::Snappy,
    }
}

pub(super) fn compress(bytes: &[u8]) -> Result<usize> {
    Ok(compress_bytes(bytes)?.len())
}

pub(super) fn compress_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    Encoder::new().compress_vec(bytes).map_err(|_| fail())
}

pub(super) fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    Decoder::new().decompress_vec(bytes).map_err(|_| fail())
}
