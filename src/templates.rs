//! Question template banks, one per strategy.
//!
//! Every bank is a fixed list of templates with exactly one placeholder:
//!
//! * `{anchor}`: the sentence's anchor word, verbatim
//! * `{anchor_lower}`: the anchor word lower-cased
//!
//! No two banks share a template. Changing question wording means editing
//! exactly one place; tests import the banks directly to check membership.

use crate::output::StrategyKind;

/// Wh-question templates.
pub const TEMPLATE_BANK: &[&str] = &[
    "Who {anchor_lower}?",
    "What is the main contribution of {anchor}?",
    "Where is {anchor} from?",
    "Why is {anchor} significant?",
    "How does {anchor} relate to the topic?",
];

/// Analysis prompts.
pub const CONTEXTUAL_BANK: &[&str] = &[
    "What can you tell about {anchor}?",
    "How would you analyze {anchor}?",
    "What is the significance of {anchor} in this context?",
    "Can you explain the role of {anchor}?",
];

/// Reading-comprehension prompts.
pub const GENERATIVE_BANK: &[&str] = &[
    "What does the text say about {anchor}?",
    "Based on this information, what is {anchor}?",
    "According to the passage, how is {anchor} defined?",
    "What key point does the text make about {anchor}?",
];

/// The bank owned by `kind`.
pub fn bank_for(kind: StrategyKind) -> &'static [&'static str] {
    match kind {
        StrategyKind::Template => TEMPLATE_BANK,
        StrategyKind::Contextual => CONTEXTUAL_BANK,
        StrategyKind::Generative => GENERATIVE_BANK,
    }
}

/// Substitute the anchor word into a template.
///
/// Substitution is single-pass, so an anchor that itself looks like a
/// placeholder is inserted literally.
pub fn render(template: &str, anchor: &str) -> String {
    if let Some((before, after)) = template.split_once("{anchor_lower}") {
        format!("{before}{}{after}", anchor.to_lowercase())
    } else if let Some((before, after)) = template.split_once("{anchor}") {
        format!("{before}{anchor}{after}")
    } else {
        template.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn banks_are_disjoint() {
        let mut seen = HashSet::new();
        for kind in StrategyKind::ORDER {
            for t in bank_for(kind) {
                assert!(seen.insert(*t), "template shared between banks: {t}");
            }
        }
    }

    #[test]
    fn every_template_has_one_placeholder() {
        for kind in StrategyKind::ORDER {
            for t in bank_for(kind) {
                let n = t.matches("{anchor").count();
                assert_eq!(n, 1, "template {t:?} has {n} placeholders");
            }
        }
    }

    #[test]
    fn render_verbatim_and_lowercase() {
        assert_eq!(render("Where is {anchor} from?", "Albert"), "Where is Albert from?");
        assert_eq!(render("Who {anchor_lower}?", "Albert"), "Who albert?");
    }

    #[test]
    fn render_is_single_pass() {
        assert_eq!(
            render("Why is {anchor} significant?", "{anchor}"),
            "Why is {anchor} significant?"
        );
    }
}
