//! Text proxy: splits a plain-text buffer into sentence-like fragments,
//! grounded on `original_source/elsim/text.py`'s `ProxyText`. Self-contained
//! — it needs no [`crate::upstream::MethodView`] adaptation, only raw bytes.

use regex::bytes::Regex;

use crate::element::{Element, ElementKind, Side};

fn sentence_pattern() -> Regex {
    Regex::new(r"; |, |-|\.|\?|:|!").expect("static pattern is valid")
}

/// Splits `buff` into sentence fragments the way `ProxyText.__iter__` does:
/// newlines become spaces, then the buffer is split at `; `, `, `, `-`,
/// `.`, `?`, `:`, `!`. Each fragment keeps its leading whitespace except
/// that any run of leading spaces is consumed, mirroring `Text.__init__`.
pub fn split_sentences(buff: &[u8]) -> Vec<String> {
    let normalized: Vec<u8> = buff.iter().map(|&b| if b == b'\n' { b' ' } else { b }).collect();
    let pattern = sentence_pattern();
    pattern
        .split(&normalized)
        .map(|piece| {
            let leading_spaces = piece.iter().take_while(|&&b| b == b' ').count();
            String::from_utf8_lossy(&piece[leading_spaces..]).into_owned()
        })
        .collect()
}

/// Adapts a plain-text buffer into a stream of [`RawItem::Sentence`]-ready
/// strings for one side of a comparison.
pub struct TextProxy {
    sentences: Vec<String>,
}

impl TextProxy {
    /// `buff` must already be decoded; callers holding `str`/`String` text
    /// pass it straight through, callers holding an external encoding
    /// decode first (mirrors `ProxyText`'s bytes-or-str-plus-encoding
    /// constructor, minus the encoding parameter Rust's `str` makes moot).
    pub fn new(buff: &str) -> Self {
        TextProxy { sentences: split_sentences(buff.as_bytes()) }
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Builds a [`Sentence`](ElementKind::Sentence) element directly,
    /// bypassing [`crate::filter::Filter::text`]'s `make_element` for
    /// callers who already have a plain string and don't need the
    /// `RawItem` indirection.
    pub fn make_element(sentence: &str, side: Side) -> Element {
        let trimmed = sentence.trim().as_bytes().to_vec();
        Element::with_buffer_as_signature(ElementKind::Sentence, side, trimmed).with_label(sentence.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_sentence_punctuation() {
        let sentences = split_sentences(b"Hello world. How are you? Fine, thanks!");
        assert_eq!(sentences, vec!["Hello world", "How are you", "Fine", "thanks!"]);
    }

    #[test]
    fn newlines_become_spaces_before_split() {
        let sentences = split_sentences(b"line one\nline two.");
        assert_eq!(sentences, vec!["line one line two", ""]);
    }

    #[test]
    fn leading_spaces_are_trimmed_per_fragment() {
        let sentences = split_sentences(b"a.   b");
        assert_eq!(sentences[1], "b");
    }

    #[test]
    fn proxy_exposes_sentences() {
        let proxy = TextProxy::new("one; two, three");
        assert_eq!(proxy.sentences(), &["one", "two", "three"]);
    }
}
