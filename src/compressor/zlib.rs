//! ZLIB codec backed by `flate2`. The only codec besides SNAPPY that exposes
//! a decompressor, so it is usable for [`super::Compressor::logical_depth`].

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{ElsimError, Result};

pub(super) fn compress(level: i32, bytes: &[u8]) -> Result<usize> {
    Ok(compress_bytes(level, bytes)?.len())
}

pub(super) fn compress_bytes(level: i32, bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level as u32));
    encoder
        .write_all(bytes)
        .map_err(|_| ElsimError::CodecFailure {
            codec: super::Codec::Zlib,
        })?;
    encoder.finish().map_err(|_| ElsimError::CodecFailure {
        codec: super::Codec::Zlib,
    })
}

pub(super) fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(bytes);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|_| ElsimError::CodecFailure {
            codec: super::Codec::Zlib,
        })?;
    Ok(out)
}
