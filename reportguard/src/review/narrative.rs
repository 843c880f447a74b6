//! Phrase tables and text edits for the report narrative (`generalComments`).
//!
//! Edits are plain case-insensitive substring replacements applied in table
//! order. Nothing here tokenizes or stems.

use regex::{NoExpand, Regex, RegexBuilder};

/// Narrative phrases that deny or downplay risk.
pub const RISK_DENIAL_PHRASES: &[&str] = &[
    "no significant risks",
    "minimal risk",
    "low risk profile",
    "no major concerns",
    "no risks highlighted",
    "risk-free",
];

/// Phrases asserting certainty in the valuation.
pub const CONFIDENCE_PHRASES: &[&str] = &["high confidence", "confident valuation"];

/// Phrases asserting a strong comparable base.
pub const MARKET_EVIDENCE_PHRASES: &[&str] = &["strong market evidence", "excellent comparables"];

/// Phrases asserting strong buyer appeal.
pub const MARKETABILITY_PHRASES: &[&str] = &["excellent marketability", "highly marketable"];

/// A single ordered replacement.
#[derive(Debug, Clone, Copy)]
pub struct Rewrite {
    pub pattern: &'static str,
    pub replacement: &'static str,
}

const fn rewrite(pattern: &'static str, replacement: &'static str) -> Rewrite {
    Rewrite {
        pattern,
        replacement,
    }
}

pub const CONFIDENCE_REWRITES: &[Rewrite] = &[
    rewrite("high confidence", "reasonable confidence"),
    rewrite("confident valuation", "considered valuation"),
    rewrite("very confident", "reasonably confident"),
];

pub const MARKET_EVIDENCE_REWRITES: &[Rewrite] = &[
    rewrite("strong market evidence", "available market evidence"),
    rewrite("excellent comparables", "relevant comparables"),
    rewrite("comprehensive market data", "available market data"),
];

pub const MARKETABILITY_REWRITES: &[Rewrite] = &[
    rewrite("excellent marketability", "reasonable marketability"),
    rewrite("highly marketable", "marketable"),
];

fn literal(pattern: &str) -> Option<Regex> {
    build(pattern, &regex::escape(pattern))
}

/// The phrase plus the blanks and the clause separator directly in front of it.
fn removal_site(phrase: &str) -> Option<Regex> {
    build(phrase, &format!(r"(?:[ \t]*[,;])?[ \t]*{}", regex::escape(phrase)))
}

fn build(pattern: &str, source: &str) -> Option<Regex> {
    match RegexBuilder::new(source).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "Skipping narrative pattern");
            None
        }
    }
}

/// True if `lowered` contains any of `phrases`. `lowered` must already be lower case.
pub fn contains_any(lowered: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| lowered.contains(phrase))
}

/// Apply each rewrite to the whole text, in order.
pub fn apply_rewrites(text: &str, rewrites: &[Rewrite]) -> String {
    rewrites.iter().fold(text.to_string(), |acc, rw| match literal(rw.pattern) {
        Some(re) => re.replace_all(&acc, NoExpand(rw.replacement)).into_owned(),
        None => acc,
    })
}

/// Remove every occurrence of `phrases`, then trim.
///
/// Only the removal sites are tidied: the blanks and any comma or semicolon
/// directly before a phrase go with it. The rest of the text is untouched.
pub fn strip_phrases(text: &str, phrases: &[&str]) -> String {
    phrases
        .iter()
        .fold(text.to_string(), |acc, phrase| match removal_site(phrase) {
            Some(re) => re.replace_all(&acc, NoExpand("")).into_owned(),
            None => acc,
        })
        .trim()
        .to_string()
}

/// Append a sentence, separating it from existing text.
pub fn append_sentence(text: &str, sentence: &str) -> String {
    let base = text.trim_end();
    if base.is_empty() {
        return sentence.to_string();
    }
    if base.ends_with(['.', '!', '?']) {
        format!("{base} {sentence}")
    } else {
        format!("{base}. {sentence}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_are_case_insensitive_and_global() {
        let out = apply_rewrites(
            "High Confidence here, and high confidence there.",
            CONFIDENCE_REWRITES,
        );
        assert_eq!(
            out,
            "reasonable confidence here, and reasonable confidence there."
        );
    }

    #[test]
    fn rewrites_apply_in_order() {
        let out = apply_rewrites(
            "We are very confident in this confident valuation.",
            CONFIDENCE_REWRITES,
        );
        assert_eq!(
            out,
            "We are reasonably confident in this considered valuation."
        );
    }

    #[test]
    fn replacement_text_is_literal() {
        let rewrites = [rewrite("price", "$1 value")];
        assert_eq!(apply_rewrites("price", &rewrites), "$1 value");
    }

    #[test]
    fn strip_phrases_tidies_gaps() {
        let out = strip_phrases(
            "Overall this property presents no significant risks to investors.",
            RISK_DENIAL_PHRASES,
        );
        assert_eq!(out, "Overall this property presents to investors.");
    }

    #[test]
    fn strip_phrases_removes_punctuation_gap() {
        let out = strip_phrases("A Risk-Free investment with minimal risk.", RISK_DENIAL_PHRASES);
        assert_eq!(out, "A investment with.");
    }

    #[test]
    fn strip_phrases_leaves_unrelated_spacing_alone() {
        let out = strip_phrases(
            "Rent : $400 per week  (two  spaces kept) , no major concerns.",
            RISK_DENIAL_PHRASES,
        );
        assert_eq!(out, "Rent : $400 per week  (two  spaces kept).");
    }

    #[test]
    fn strip_phrases_keeps_text_without_phrases() {
        let text = "Flood overlay : noted ;  see  schedule .";
        assert_eq!(strip_phrases(text, RISK_DENIAL_PHRASES), text);
    }

    #[test]
    fn append_sentence_adds_separator() {
        assert_eq!(append_sentence("", "Next."), "Next.");
        assert_eq!(append_sentence("Done.  ", "Next."), "Done. Next.");
        assert_eq!(append_sentence("Done", "Next."), "Done. Next.");
    }

    #[test]
    fn contains_any_matches_substrings() {
        assert!(contains_any("a low risk profile overall", RISK_DENIAL_PHRASES));
        assert!(!contains_any("some risk", RISK_DENIAL_PHRASES));
    }
}
