//! Flat text report of generated questions.
//!
//! The layout matches earlier exports byte for byte:
//!
//! ```text
//! 1. Who albert?
//!    Source: Albert Einstein developed the theory of relativity...
//!    Type: TEMPLATE
//!
//! 2. …
//! ```
//!
//! The source excerpt is the first 100 characters of the sentence, always
//! followed by `...` even when nothing was cut.

use crate::output::GeneratedQuestion;
use serde_json::{json, Value};

/// Characters of the source sentence shown in each record.
pub const SOURCE_EXCERPT_CHARS: usize = 100;

/// Render one record (1-based `number`).
pub fn format_record(number: usize, question: &GeneratedQuestion) -> String {
    let excerpt: String = question
        .source_sentence
        .chars()
        .take(SOURCE_EXCERPT_CHARS)
        .collect();
    format!(
        "{}. {}\n   Source: {}...\n   Type: {}\n",
        number,
        question.question_text,
        excerpt,
        question.strategy.tag().to_uppercase()
    )
}

/// Render every question in output order, records separated by a blank line.
pub fn format_report(questions: &[GeneratedQuestion]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| format_record(i + 1, q))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Questions as a JSON document, labelled `Q1`, `Q2`, … in output order.
pub fn questions_json(questions: &[GeneratedQuestion], text_len: usize) -> Value {
    let records: Vec<Value> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            json!({
                "label": GeneratedQuestion::display_label(i),
                "id": q.id,
                "question": q.question_text,
                "strategy": q.strategy,
                "strategy_name": q.strategy.display_name(),
                "source": q.source_sentence,
            })
        })
        .collect();
    json!({
        "text_length": text_len,
        "questions": records,
    })
}
