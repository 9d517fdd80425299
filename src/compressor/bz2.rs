//! BZ2 codec backed by `bzip2`. No decompressor is wired up: the façade never
//! needs one and `logical_depth` rejects this codec before it would be used.

use std::io::Write;

use bzip2::write::BzEncoder;
use bzip2::Compression;

use crate::error::{ElsimError, Result};

pub(super) fn compress(level: i32, bytes: &[u8]) -> Result<usize> {
    let mut encoder = BzEncoder::new(Vec::new(), Compression::new(level as u32));
    encoder
        .write_all(bytes)
        .map_err(|_| ElsimError::CodecFailure {
            codec: super::Codec::Bz2,
        })?;
    let out = encoder.finish().map_err(|_| ElsimError::CodecFailure {
        codec: super::Codec::Bz2,
    })?;
    Ok(out.len())
}
