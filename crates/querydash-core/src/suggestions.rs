//! Built-in query suggestions

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub text: &'static str,
    pub category: &'static str,
}

const fn suggestion(text: &'static str, category: &'static str) -> Suggestion {
    Suggestion { text, category }
}

static SUGGESTIONS: [Suggestion; 9] = [
    suggestion("Show me sales trends for the last quarter", "Trends"),
    suggestion("Show monthly growth rate", "Trends"),
    suggestion("Create a time series chart for monthly revenue", "Charts"),
    suggestion("Display customer satisfaction metrics", "Charts"),
    suggestion("Compare performance across regions", "Analysis"),
    suggestion("Compare revenue between departments", "Analysis"),
    suggestion("Analyze product performance by category", "Analysis"),
    suggestion("Compare year-over-year metrics", "Analysis"),
    suggestion("Check inventory stock levels", "Operations"),
];

pub fn all() -> &'static [Suggestion] {
    &SUGGESTIONS
}

/// Suggestions whose text contains `input`, ignoring case. Blank input
/// matches nothing.
pub fn filter(input: &str) -> Vec<Suggestion> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    SUGGESTIONS
        .iter()
        .filter(|s| s.text.to_lowercase().contains(&needle))
        .copied()
        .collect()
}

/// Suggestions grouped by category, categories in first-seen order
pub fn by_category() -> Vec<(&'static str, Vec<Suggestion>)> {
    let mut groups: Vec<(&'static str, Vec<Suggestion>)> = Vec::new();
    for s in SUGGESTIONS.iter() {
        match groups.iter_mut().find(|(category, _)| *category == s.category) {
            Some((_, items)) => items.push(*s),
            None => groups.push((s.category, vec![*s])),
        }
    }
    groups
}
