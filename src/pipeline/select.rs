//! Sentence selection: pick the first few meaningful sentences.
//!
//! Extracted PDF text is noisy: headers, page numbers, table cells and
//! captions all end up in the stream. The selector splits on runs of
//! sentence-terminal punctuation and keeps a segment only if it is long
//! enough and has enough words to be worth a question.
//!
//! Selection is a truncation policy: the first `max_candidates` qualifying
//! segments in document order win. Nothing is reordered or ranked.

use crate::config::SelectionLimits;
use crate::document::ExtractedText;
use crate::output::SentenceCandidate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static RE_TERMINATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Select candidates with the default limits (> 20 chars, > 4 words, ≤ 5 kept).
pub fn select(text: &ExtractedText) -> Vec<SentenceCandidate> {
    select_with(text, &SelectionLimits::default())
}

/// Select candidates with explicit limits.
///
/// Total: never fails, and empty input yields an empty list.
pub fn select_with(text: &ExtractedText, limits: &SelectionLimits) -> Vec<SentenceCandidate> {
    let mut kept = Vec::with_capacity(limits.max_candidates);
    let mut scanned = 0usize;

    for segment in RE_TERMINATORS.split(text.as_str()) {
        if kept.len() >= limits.max_candidates {
            break;
        }
        scanned += 1;

        let trimmed = segment.trim();
        if is_meaningful(trimmed, limits) {
            kept.push(SentenceCandidate::new(trimmed));
        }
    }

    debug!("Selected {} of {} scanned segments", kept.len(), scanned);
    kept
}

/// Whether a trimmed segment passes the length and word-count filter.
pub fn is_meaningful(segment: &str, limits: &SelectionLimits) -> bool {
    segment.chars().count() > limits.min_chars
        && segment.split_whitespace().count() > limits.min_words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(candidates: &[SentenceCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(select(&ExtractedText::default()).is_empty());
    }

    #[test]
    fn short_segments_are_dropped() {
        assert!(select(&"Yes. No. Maybe so.".into()).is_empty());
    }

    #[test]
    fn einstein_scenario_keeps_both_sentences() {
        let text: ExtractedText = "Albert Einstein developed the theory of relativity. \
It was a major breakthrough in physics and changed everything we know."
            .into();
        let kept = select(&text);
        assert_eq!(
            texts(&kept),
            vec![
                "Albert Einstein developed the theory of relativity",
                "It was a major breakthrough in physics and changed everything we know"
            ]
        );
    }

    #[test]
    fn repeated_terminators_split_once() {
        let text: ExtractedText =
            "What a wonderful and surprising result this is?!? Indeed it was a very long day...".into();
        let kept = select(&text);
        assert_eq!(
            texts(&kept),
            vec![
                "What a wonderful and surprising result this is",
                "Indeed it was a very long day"
            ]
        );
    }

    #[test]
    fn thresholds_are_strict() {
        let limits = SelectionLimits::default();
        // 21 chars but only 4 words
        assert!(!is_meaningful("abcdefgh ijklm nop qr", &limits));
        // 5 words but exactly 20 chars
        assert!(!is_meaningful("abcd efgh ijk lm nop", &limits));
        // 5 words, 21 chars
        assert!(is_meaningful("abcd efgh ijk lm nopq", &limits));
    }

    #[test]
    fn stops_after_five_in_document_order() {
        let text: ExtractedText = (1..=8)
            .map(|i| format!("This is sentence number {i} in the document."))
            .collect::<Vec<_>>()
            .join(" ")
            .into();
        let kept = select(&text);
        assert_eq!(kept.len(), 5);
        for (i, c) in kept.iter().enumerate() {
            assert_eq!(c.as_str(), format!("This is sentence number {} in the document", i + 1));
        }
    }

    #[test]
    fn leading_and_trailing_segments_use_the_same_filter() {
        let text: ExtractedText =
            "\n  The opening fragment has no terminator at all before this. tail without end but long enough here"
                .into();
        let kept = select(&text);
        assert_eq!(
            texts(&kept),
            vec![
                "The opening fragment has no terminator at all before this",
                "tail without end but long enough here"
            ]
        );
    }

    #[test]
    fn page_breaks_do_not_split_sentences() {
        let text: ExtractedText = "A sentence that runs across\nthe page break is still one.".into();
        let kept = select(&text);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].as_str(), "A sentence that runs across\nthe page break is still one");
    }

    #[test]
    fn custom_limits() {
        let limits = SelectionLimits {
            min_chars: 3,
            min_words: 1,
            max_candidates: 2,
        };
        let kept = select_with(&"Short one. Another one. Third one.".into(), &limits);
        assert_eq!(texts(&kept), vec!["Short one", "Another one"]);
    }
}
