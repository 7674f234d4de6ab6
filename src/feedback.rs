//! Rule-based reflection feedback.
//!
//! The output is a pure function of the text: a base sentence picked by word
//! count, followed by one insight sentence picked by the first keyword group
//! that matches.

/// Word-count tiers as `(exclusive upper bound, sentence)`, checked in order.
const LENGTH_TIERS: &[(usize, &str)] = &[
    (
        20,
        "Your reflection is quite brief. Consider expanding on your thoughts to gain deeper insights.",
    ),
    (
        50,
        "You've made a good start. Try to connect these ideas to your previous knowledge.",
    ),
    (
        100,
        "This is a thoughtful reflection. Consider how you might apply these learnings in practice.",
    ),
];

const DETAILED: &str = "Your detailed reflection shows deep engagement with the material. \
Consider what specific actions you can take based on these insights.";

/// Keyword groups in priority order. Matching is a case-insensitive substring test.
const KEYWORD_RULES: &[(&[&str], &str)] = &[
    (
        &["learned", "discovered"],
        "Your focus on new discoveries is valuable for building knowledge.",
    ),
    (
        &["challenge", "difficult"],
        "Reflecting on challenges helps build resilience and problem-solving skills.",
    ),
    (
        &["connect", "relate"],
        "Making connections between concepts strengthens your understanding.",
    ),
];

const GENERIC_INSIGHT: &str = "Regular reflection like this builds self-awareness and metacognition.";

/// Words are runs of non-separator characters. The ASCII information
/// separators U+001C..=U+001F split words along with Unicode whitespace.
pub fn word_count(content: &str) -> usize {
    content
        .split(is_word_separator)
        .filter(|word| !word.is_empty())
        .count()
}

fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn base_sentence(words: usize) -> &'static str {
    LENGTH_TIERS
        .iter()
        .find(|(limit, _)| words < *limit)
        .map(|(_, sentence)| *sentence)
        .unwrap_or(DETAILED)
}

fn insight_sentence(content: &str) -> &'static str {
    let lowered = content.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, sentence)| *sentence)
        .unwrap_or(GENERIC_INSIGHT)
}

/// Generate feedback for a reflection body.
pub fn generate(content: &str) -> String {
    format!(
        "{} {}",
        base_sentence(word_count(content)),
        insight_sentence(content)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRIEF: &str = "Your reflection is quite brief. Consider expanding on your thoughts to gain deeper insights.";
    const GOOD_START: &str = "You've made a good start. Try to connect these ideas to your previous knowledge.";
    const THOUGHTFUL: &str = "This is a thoughtful reflection. Consider how you might apply these learnings in practice.";
    const DISCOVERY: &str = "Your focus on new discoveries is valuable for building knowledge.";
    const RESILIENCE: &str = "Reflecting on challenges helps build resilience and problem-solving skills.";
    const CONNECTION: &str = "Making connections between concepts strengthens your understanding.";

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn tier_boundaries() {
        assert!(generate(&words(19)).starts_with(BRIEF));
        assert!(generate(&words(20)).starts_with(GOOD_START));
        assert!(generate(&words(49)).starts_with(GOOD_START));
        assert!(generate(&words(50)).starts_with(THOUGHTFUL));
        assert!(generate(&words(99)).starts_with(THOUGHTFUL));
        assert!(generate(&words(100)).starts_with(DETAILED));
        assert!(generate(&words(500)).starts_with(DETAILED));
    }

    #[test]
    fn empty_content_is_brief_and_generic() {
        assert_eq!(generate(""), format!("{BRIEF} {GENERIC_INSIGHT}"));
    }

    #[test]
    fn whitespace_runs_count_once() {
        assert_eq!(word_count("  one\t two\n\nthree  "), 3);
    }

    #[test]
    fn information_separators_split_words() {
        assert_eq!(word_count("a\u{1c}b\u{1f}c\u{85}d"), 4);
        assert_eq!(word_count("a\u{1d}\u{1e}b\u{a0}c"), 3);
        assert_eq!(word_count("\u{1c}\u{1f}"), 0);
    }

    #[test]
    fn first_keyword_group_wins() {
        let both = "I learned a lot from this challenge";
        assert_eq!(generate(both), format!("{BRIEF} {DISCOVERY}"));

        let later = "It was difficult but I could relate";
        assert_eq!(generate(later), format!("{BRIEF} {RESILIENCE}"));

        assert_eq!(generate("how ideas connect"), format!("{BRIEF} {CONNECTION}"));
    }

    #[test]
    fn keywords_match_case_insensitively_and_inside_words() {
        assert!(generate("DISCOVERED it").ends_with(DISCOVERY));
        assert!(generate("challenges everywhere").ends_with(RESILIENCE));
        assert!(generate("relatedness").ends_with(CONNECTION));
    }

    #[test]
    fn documented_example() {
        let text = "I learned something new today about persistence";
        assert_eq!(word_count(text), 7);
        assert_eq!(generate(text), format!("{BRIEF} {DISCOVERY}"));
    }

    #[test]
    fn deterministic() {
        let text = words(73) + " difficult";
        assert_eq!(generate(&text), generate(&text));
    }
}
