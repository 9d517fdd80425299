//! LZMA codec (the "alone"/legacy format, not the `.xz` container) backed by
//! `xz2`'s raw `liblzma` stream bindings.

use xz2::stream::{LzmaOptions, Stream};
use xz2::write::XzEncoder;

use std::io::Write;

use crate::error::{ElsimError, Result};

fn fail() -> ElsimError {
    ElsimError::CodecFailure {
        codec: super::Codec::Lzma,
    }
}

pub(super) fn compress(level: i32, bytes: &[u8]) -> Result<usize> {
    let options = LzmaOptions::new_preset(level as u32).map_err(|_| fail())?;
    let stream = Stream::new_lzma_encoder(&options).map_err(|_| fail())?;
    let mut encoder = XzEncoder::new_stream(Vec::new(), stream);
    encoder.write_all(bytes).map_err(|_| fail())?;
    let out = encoder.finish().map_err(|_| fail())?;
    Ok(out.len())
}
