//! Question-side data types: candidate sentences and generated questions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Anchor used when a sentence has no whitespace-delimited token.
pub const DEFAULT_ANCHOR_WORD: &str = "this";

/// A trimmed sentence that survived the meaningfulness filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentenceCandidate(String);

impl SentenceCandidate {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// First whitespace-delimited token, or `"this"` when there is none.
    pub fn anchor_word(&self) -> &str {
        self.0
            .split_whitespace()
            .next()
            .unwrap_or(DEFAULT_ANCHOR_WORD)
    }

}

impl fmt::Display for SentenceCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SentenceCandidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The three question-generation strategies, in their fixed output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Wh-question templates around the anchor word.
    Template,
    /// Analysis-style prompts (the source's "BERT" mode).
    Contextual,
    /// Reading-comprehension prompts (the source's "T5" mode).
    Generative,
}

impl StrategyKind {
    /// All strategies in the order the synthesizer emits them.
    pub const ORDER: [StrategyKind; 3] = [
        StrategyKind::Template,
        StrategyKind::Contextual,
        StrategyKind::Generative,
    ];

    /// Lower-case tag used in ids and JSON.
    pub fn tag(self) -> &'static str {
        match self {
            StrategyKind::Template => "template",
            StrategyKind::Contextual => "contextual",
            StrategyKind::Generative => "generative",
        }
    }

    /// Human-readable label for result lists.
    pub fn display_name(self) -> &'static str {
        match self {
            StrategyKind::Template => "Template-based Questions",
            StrategyKind::Contextual => "Contextual Analysis",
            StrategyKind::Generative => "Generative Questions",
        }
    }

    /// Parse a tag; the source names `bert` and `t5` are accepted as aliases.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "template" => Some(StrategyKind::Template),
            "contextual" | "bert" => Some(StrategyKind::Contextual),
            "generative" | "t5" => Some(StrategyKind::Generative),
            _ => None,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Identity of a question within one synthesis run.
///
/// Each (strategy, candidate) pair yields exactly one question, so the pair
/// is unique without any clock or counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId {
    pub strategy: StrategyKind,
    /// 0-based index of the source sentence in the candidate list.
    pub candidate_index: usize,
}

impl QuestionId {
    pub fn new(strategy: StrategyKind, candidate_index: usize) -> Self {
        Self {
            strategy,
            candidate_index,
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.strategy.tag(), self.candidate_index)
    }
}

impl Serialize for QuestionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let (tag, index) = s
            .rsplit_once('-')
            .ok_or_else(|| serde::de::Error::custom(format!("malformed question id '{s}'")))?;
        let strategy = StrategyKind::from_tag(tag)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown strategy '{tag}'")))?;
        let candidate_index = index.parse().map_err(serde::de::Error::custom)?;
        Ok(QuestionId::new(strategy, candidate_index))
    }
}

/// One generated question, tied back to the sentence it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub id: QuestionId,
    pub question_text: String,
    pub strategy: StrategyKind,
    pub source_sentence: String,
}

impl GeneratedQuestion {
    /// `"Q{n}"` label for a 0-based position in the output list.
    pub fn display_label(position: usize) -> String {
        format!("Q{}", position + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_word_is_first_token() {
        let c = SentenceCandidate::new("Albert Einstein developed relativity");
        assert_eq!(c.anchor_word(), "Albert");
    }

    #[test]
    fn anchor_word_defaults_to_this() {
        assert_eq!(SentenceCandidate::new("").anchor_word(), "this");
        assert_eq!(SentenceCandidate::new("   ").anchor_word(), "this");
    }

    #[test]
    fn strategy_order_is_fixed() {
        assert_eq!(
            StrategyKind::ORDER,
            [
                StrategyKind::Template,
                StrategyKind::Contextual,
                StrategyKind::Generative
            ]
        );
    }

    #[test]
    fn strategy_aliases() {
        assert_eq!(StrategyKind::from_tag("BERT"), Some(StrategyKind::Contextual));
        assert_eq!(StrategyKind::from_tag("t5"), Some(StrategyKind::Generative));
        assert_eq!(StrategyKind::from_tag(" template "), Some(StrategyKind::Template));
        assert_eq!(StrategyKind::from_tag("gpt"), None);
    }

    #[test]
    fn question_id_json_roundtrip() {
        let id = QuestionId::new(StrategyKind::Contextual, 3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"contextual-3\"");
        let back: QuestionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_label_is_one_based() {
        assert_eq!(GeneratedQuestion::display_label(0), "Q1");
        assert_eq!(GeneratedQuestion::display_label(9), "Q10");
    }
}
