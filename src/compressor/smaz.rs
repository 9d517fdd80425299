//! Hand-rolled small-string codebook compressor in the spirit of Antirez's
//! SMAZ. No crate in the ecosystem implements it, so it is reimplemented
//! directly: a fixed table of common English fragments is greedily matched
//! against the input, longest fragment first; everything that doesn't match
//! is escaped as a verbatim run. Level is ignored.
//!
//! Output layout: a stream of tokens, each either
//!   - `0x00..=0x7F`        index into [`CODEBOOK`] (single byte)
//!   - `0x80 | len`, bytes  a verbatim run of `len` (1..=127) raw bytes
//!
//! This is a one-way codec: only [`compress`] is exposed, matching the
//! upstream filter's use of SMAZ purely as a size estimator.

const CODEBOOK: &[&str] = &[
    " ", "the", "e", "t", "a", "of", "o", "and", "i", "n", "s", "e ", "r", " th",
    " t", "in", "he", "th", "h", "he ", "to", "\r\n", "l", "s ", "d", " a", "an",
    "er", "c", " o", "d ", "on", " of", "re", "of ", "t ", ", ", "is", "u", "at",
    "   ", "n ", "or", "which", "f", "m", "as", "it", "that", "\n", "was", "en",
    "  ", " w", "es", " an", " i", "\r", "f ", "g", "p", "nd", " s", "nd ", "ed ",
    "w", "ed", "http://", "for", "te", "ing", "y ", "The", " c", "ti", "r ", "his",
    "st", " in", "ar", "nt", ",", " to", "y", "ng", " h", "with", "le", "al", "to ",
    "b", "ou", "be", "were", " b", "se", "o ", "ent", "ha", "ng ", "their", "\"",
    "hi", "from", " f", "in ", "de", "ion", "me", "v", ".", "ve", "all", "re ",
    "ri", "ro", "is ", "co", "f t", "are", "ea", ". ", "her", " m", "er ", " p",
    "es ", "by",
];

const MAX_FRAGMENT: usize = 7;

fn best_match(data: &[u8], pos: usize) -> Option<(u8, usize)> {
    let remaining = &data[pos..];
    let max_len = remaining.len().min(MAX_FRAGMENT);
    for len in (1..=max_len).rev() {
        let slice = &remaining[..len];
        if let Some(idx) = CODEBOOK.iter().position(|frag| frag.as_bytes() == slice) {
            return Some((idx as u8, len));
        }
    }
    None
}

fn flush_literal(out: &mut Vec<u8>, literal: &[u8]) {
    let mut chunk_start = 0;
    while chunk_start < literal.len() {
        let chunk_len = (literal.len() - chunk_start).min(127);
        out.push(0x80 | chunk_len as u8);
        out.extend_from_slice(&literal[chunk_start..chunk_start + chunk_len]);
        chunk_start += chunk_len;
    }
}

/// Compresses `bytes` and returns the size in bytes of the encoded form.
pub(super) fn compress(bytes: &[u8]) -> usize {
    compress_bytes(bytes).len()
}

pub(super) fn compress_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut literal_run: Vec<u8> = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match best_match(bytes, pos) {
            Some((code, len)) => {
                flush_literal(&mut out, &literal_run);
                literal_run.clear();
                out.push(code);
                pos += len;
            }
            None => {
                literal_run.push(bytes[pos]);
                pos += 1;
            }
        }
    }
    flush_literal(&mut out, &literal_run);
    out
}

#[cfg(test)]
mod tests {
    use super::compress_bytes;

    #[test]
    fn shrinks_common_english() {
        let input = b"the quick brown fox and the lazy dog in the the the";
        let out = compress_bytes(input);
        assert!(out.len() < input.len());
    }

    #[test]
    fn empty_input() {
        assert!(compress_bytes(b"").is_empty());
    }

    #[test]
    fn pure_literal_survives() {
        let input = [0xFFu8, 0x00, 0x01, 0x02];
        let out = compress_bytes(&input);
        assert!(!out.is_empty());
    }
}
