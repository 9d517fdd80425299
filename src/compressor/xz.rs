//! XZ codec (the `.xz` container format) backed by `xz2`.

use std::io::Write;

use xz2::write::XzEncoder;

use crate::error::{ElsimError, Result};

pub(super) fn compress(level: i32, bytes: &[u8]) -> Result<usize> {
    let mut encoder = XzEncoder::new(Vec::new(), level as u32);
    encoder
        .write_all(bytes)
        .map_err(|_| ElsimError::CodecFailure {
            codec: super::Codec::Xz,
        })?;
    let out = encoder.finish().map_err(|_| ElsimError::CodecFailure {
        codec: super::Codec::Xz,
    })?;
    Ok(out.len())
}
