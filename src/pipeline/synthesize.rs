//! Question synthesis: fan each candidate out over the enabled strategies.
//!
//! Output order is part of the contract: candidates in selection order,
//! and for each candidate the enabled strategies in the fixed order
//! `[template, contextual, generative]`. Report export and result lists
//! number questions by this order.

use super::strategy::{default_strategies, GenerationStrategy, QuestionRequest, TemplatePicker};
use crate::config::GenerationOptions;
use crate::output::{GeneratedQuestion, QuestionId, SentenceCandidate, StrategyKind};
use std::sync::Arc;
use tracing::debug;

/// Holds one strategy per [`StrategyKind`] and applies them to candidates.
#[derive(Clone)]
pub struct Synthesizer {
    /// Indexed by [`slot`]; always three entries.
    strategies: Vec<Arc<dyn GenerationStrategy>>,
}

fn slot(kind: StrategyKind) -> usize {
    match kind {
        StrategyKind::Template => 0,
        StrategyKind::Contextual => 1,
        StrategyKind::Generative => 2,
    }
}

impl Synthesizer {
    /// Built-in template strategies sharing `picker`.
    pub fn new(picker: Arc<dyn TemplatePicker>) -> Self {
        Self {
            strategies: default_strategies(picker),
        }
    }

    /// Replace the strategy registered for `strategy.kind()`.
    pub fn with_strategy(mut self, strategy: Arc<dyn GenerationStrategy>) -> Self {
        let i = slot(strategy.kind());
        self.strategies[i] = strategy;
        self
    }

    pub fn strategy(&self, kind: StrategyKind) -> &Arc<dyn GenerationStrategy> {
        &self.strategies[slot(kind)]
    }

    /// One question per (candidate, enabled strategy).
    ///
    /// Total: zero candidates or zero enabled strategies yield an empty list.
    pub fn synthesize(
        &self,
        candidates: &[SentenceCandidate],
        options: &GenerationOptions,
    ) -> Vec<GeneratedQuestion> {
        let enabled: Vec<StrategyKind> = options.enabled().collect();
        let mut questions = Vec::with_capacity(candidates.len() * enabled.len());

        for (candidate_index, candidate) in candidates.iter().enumerate() {
            let request = QuestionRequest {
                sentence: candidate.as_str(),
                anchor_word: candidate.anchor_word(),
                candidate_index,
            };

            for &kind in &enabled {
                questions.push(GeneratedQuestion {
                    id: QuestionId::new(kind, candidate_index),
                    question_text: self.strategy(kind).generate(&request),
                    strategy: kind,
                    source_sentence: candidate.as_str().to_string(),
                });
            }
        }

        debug!(
            "Synthesized {} questions from {} candidates × {} strategies",
            questions.len(),
            candidates.len(),
            enabled.len()
        );
        questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::strategy::{FixedPicker, SeededPicker};
    use std::collections::HashSet;

    fn candidates() -> Vec<SentenceCandidate> {
        vec![
            SentenceCandidate::new("Albert Einstein developed the theory of relativity"),
            SentenceCandidate::new(
                "It was a major breakthrough in physics and changed everything we know",
            ),
        ]
    }

    struct Echo;

    impl GenerationStrategy for Echo {
        fn kind(&self) -> StrategyKind {
            StrategyKind::Generative
        }

        fn generate(&self, request: &QuestionRequest<'_>) -> String {
            format!("echo {} #{}", request.anchor_word, request.candidate_index)
        }
    }

    #[test]
    fn fan_out_is_candidates_times_strategies() {
        let synth = Synthesizer::new(Arc::new(SeededPicker::new(1)));
        let qs = synth.synthesize(&candidates(), &GenerationOptions::all());
        assert_eq!(qs.len(), 6);

        let order: Vec<(usize, StrategyKind)> = qs
            .iter()
            .map(|q| (q.id.candidate_index, q.strategy))
            .collect();
        assert_eq!(
            order,
            vec![
                (0, StrategyKind::Template),
                (0, StrategyKind::Contextual),
                (0, StrategyKind::Generative),
                (1, StrategyKind::Template),
                (1, StrategyKind::Contextual),
                (1, StrategyKind::Generative),
            ]
        );
    }

    #[test]
    fn ids_are_unique() {
        let synth = Synthesizer::new(Arc::new(FixedPicker(0)));
        let qs = synth.synthesize(&candidates(), &GenerationOptions::all());
        let ids: HashSet<String> = qs.iter().map(|q| q.id.to_string()).collect();
        assert_eq!(ids.len(), qs.len());
        assert_eq!(qs[4].id.to_string(), "contextual-1");
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        let synth = Synthesizer::new(Arc::new(FixedPicker(0)));
        assert!(synth.synthesize(&[], &GenerationOptions::all()).is_empty());
        assert!(synth
            .synthesize(&candidates(), &GenerationOptions::none())
            .is_empty());
    }

    #[test]
    fn disabling_a_strategy_removes_only_its_questions() {
        let synth = Synthesizer::new(Arc::new(SeededPicker::new(99)));
        let all = synth.synthesize(&candidates(), &GenerationOptions::all());
        let without = synth.synthesize(
            &candidates(),
            &GenerationOptions::all().with(StrategyKind::Contextual, false),
        );

        let expected: Vec<_> = all
            .into_iter()
            .filter(|q| q.strategy != StrategyKind::Contextual)
            .collect();
        assert_eq!(without, expected);
    }

    #[test]
    fn source_sentence_and_anchor() {
        let synth = Synthesizer::new(Arc::new(FixedPicker(2)));
        let qs = synth.synthesize(&candidates(), &GenerationOptions::only(StrategyKind::Template));
        assert_eq!(qs[0].question_text, "Where is Albert from?");
        assert_eq!(qs[1].question_text, "Where is It from?");
        assert_eq!(qs[1].source_sentence, candidates()[1].as_str());
    }

    #[test]
    fn custom_strategy_replaces_its_slot_only() {
        let synth = Synthesizer::new(Arc::new(FixedPicker(0))).with_strategy(Arc::new(Echo));
        let qs = synth.synthesize(&candidates(), &GenerationOptions::all());
        assert_eq!(qs[2].question_text, "echo Albert #0");
        assert_eq!(qs[5].question_text, "echo It #1");
        assert_eq!(qs[0].question_text, "Who albert?");
    }
}
