//! IEEE-style journal articles
//!
//! Typical layout:
//!
//!     # <paper title>
//!     <authors, membership grades, affiliations>
//!     # Abstract            (or an "Abstract—" paragraph)
//!     Index Terms—...
//!     # I. INTRODUCTION
//!     # II. RELATED WORK
//!     ## A. Subsection
//!     # V. CONCLUSION
//!     # REFERENCES

use super::descriptor::{DetectionFeatures, GenreDescriptor, ParseStrategy};
use crate::outline::detection::heuristics::{CountBuckets, UppercaseHeadings};
use crate::outline::patterns::{PatternTable, METADATA_LEVEL};
use once_cell::sync::Lazy;
use regex::Regex;

pub const NAME: &str = "journal";

/// Name of the descriptor that keeps the classic rule order, see [`legacy_descriptor`]
pub const LEGACY_NAME: &str = "journal-legacy";

pub const ABSTRACT_ROLE: &str = "abstract";

/// Headings that close the author block: `# Abstract...` or `# <Roman>.`
pub static FRONT_MATTER_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^# Abstract|^# [IVX]+\.").unwrap());

/// Marker of the keyword paragraph
pub const INDEX_TERMS_MARKER: &str = "Index Terms";

// Specific numbered sections come first. The generic roman-numeral section rule is anchored
// to single-`#` headings and must precede the lettered subsection rule, which would otherwise
// claim "III. SYSTEM MODEL" through its "I. S".
const HEADINGS: &[(&str, &str, i32)] = &[
    (r"I\.\s+INTRODUCTION", "introduction", 1),
    (r"(II|III)\.\s+(RELATED WORK|BACKGROUND)", "related_work", 1),
    (r"(III|IV|V)\.\s+(METHOD|METHODOLOGY|PROPOSED)", "methodology", 1),
    (r"(IV|V|VI)\.\s+(RESULT|EXPERIMENT)", "results", 1),
    (r"(V|VI|VII)\.\s+DISCUSSION", "discussion", 1),
    (r"(VI|VII|VIII|IX|X)\.\s+CONCLUSION", "conclusion", 1),
    (r"Abstract", ABSTRACT_ROLE, 1),
    (r"Index Terms[—\-]", "index_terms", METADATA_LEVEL),
    (r"^#\s+[IVX]+\.\s+[A-Z]", "section", 1),
    (r"[A-Z]\.\s+[A-Z]", "subsection", 2),
    (r"(REFERENCES|References)", "references", 1),
    (r"(ACKNOWLEDGMENT|ACKNOWLEDGEMENT)", "acknowledgment", 1),
];

// Classic order: lettered subsections before the unanchored roman-numeral fallback, which
// comes last.
const LEGACY_HEADINGS: &[(&str, &str, i32)] = &[
    (r"I\.\s+INTRODUCTION", "introduction", 1),
    (r"(II|III)\.\s+(RELATED WORK|BACKGROUND)", "related_work", 1),
    (r"(III|IV|V)\.\s+(METHOD|METHODOLOGY|PROPOSED)", "methodology", 1),
    (r"(IV|V|VI)\.\s+(RESULT|EXPERIMENT)", "results", 1),
    (r"(V|VI|VII)\.\s+DISCUSSION", "discussion", 1),
    (r"(VI|VII|VIII|IX|X)\.\s+CONCLUSION", "conclusion", 1),
    (r"Abstract", ABSTRACT_ROLE, 1),
    (r"Index Terms[—\-]", "index_terms", METADATA_LEVEL),
    (r"[A-Z]\.\s+[A-Z]", "subsection", 2),
    (r"(REFERENCES|References)", "references", 1),
    (r"(ACKNOWLEDGMENT|ACKNOWLEDGEMENT)", "acknowledgment", 1),
    (r"[IVX]+\.\s+[A-Z]", "section", 1),
];

const REQUIRED: &[(&str, f64)] = &[(r"#\s+[IVX]+\.\s+[A-Z]{3,}", 10.0)];

const OPTIONAL: &[(&str, f64)] = &[
    (r"Index Terms[—\-]", 5.0),
    (r"(IEEE|ACM).*?(Member|Fellow|Transactions)", 4.0),
    (r"#\s+I\.\s+INTRODUCTION", 4.0),
    (r"#\s+II\.\s+(RELATED WORK|BACKGROUND)", 3.0),
    (r"#\s+[IVX]+\.\s+CONCLUSION", 3.0),
    (r"##\s+[A-Z]\.\s+[A-Z]", 3.0),
    (r"^# Abstract$", 2.0),
    (r"Abstract[—\-]", 2.0),
    (r"^# (REFERENCES|References)$", 2.0),
    (r"Digital Object Identifier", 1.0),
    (r"doi\.org", 1.0),
];

const EXCLUSION: &[&str] = &[
    r"博士学位论文",
    r"第.*章",
    r"Association for the Advancement of Artificial Intelligence",
];

static TABLE: Lazy<PatternTable> =
    Lazy::new(|| PatternTable::from_rules(HEADINGS).expect("journal heading table"));

static LEGACY_TABLE: Lazy<PatternTable> =
    Lazy::new(|| PatternTable::from_rules(LEGACY_HEADINGS).expect("legacy journal heading table"));

pub fn descriptor() -> GenreDescriptor {
    GenreDescriptor::new(NAME, TABLE.clone(), features())
        .with_strategy(ParseStrategy::Journal)
        .with_description("IEEE journal article: roman numeral sections, lettered subsections")
}

/// Journal descriptor with the classic rule order.
///
/// Every numbered heading the specific rules miss is tried against the lettered subsection
/// rule first, so `# III. SYSTEM MODEL` lands at level 2 as a `subsection`. Not registered by
/// default; swap it in to reproduce outlines built with that order.
pub fn legacy_descriptor() -> GenreDescriptor {
    GenreDescriptor::new(LEGACY_NAME, LEGACY_TABLE.clone(), features())
        .with_strategy(ParseStrategy::Journal)
        .with_description("IEEE journal article, classic rule order (lettered rule first)")
}

fn features() -> DetectionFeatures {
    DetectionFeatures::from_patterns(REQUIRED, OPTIONAL, EXCLUSION)
        .expect("journal detection patterns")
        .with_heuristic(
            CountBuckets::new(
                "roman_numeral_sections",
                &[r"(?m)^#\s+[IVX]+\.\s+[A-Z]"],
                &[(5, 1.0), (3, 0.8), (1, 0.5)],
                0.0,
            )
            .expect("roman numeral pattern"),
            4.0,
        )
        .with_heuristic(
            CountBuckets::new(
                "letter_subsections",
                &[r"(?m)^##\s+[A-Z]\.\s+[A-Z]"],
                &[(3, 1.0), (1, 0.6)],
                0.0,
            )
            .expect("letter subsection pattern"),
            2.0,
        )
        .with_heuristic(UppercaseHeadings, 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::detection::confidence;
    use rstest::rstest;

    #[rstest]
    #[case("# I. INTRODUCTION", Some((1, "introduction")))]
    #[case("# II. RELATED WORK", Some((1, "related_work")))]
    #[case("# IV. EXPERIMENTS", Some((1, "results")))]
    #[case("# VII. CONCLUSION", Some((1, "conclusion")))]
    #[case("## A. Dataset Construction", Some((2, "subsection")))]
    #[case("# REFERENCES", Some((1, "references")))]
    #[case("# III. SYSTEM MODEL", Some((1, "section")))]
    #[case("# Abstract", Some((1, "abstract")))]
    fn classifies_journal_headings(#[case] line: &str, #[case] expected: Option<(i32, &str)>) {
        assert_eq!(descriptor().classify(line), expected);
    }

    #[rstest]
    #[case("# III. SYSTEM MODEL", Some((2, "subsection")))]
    #[case("## B. Threat Model", Some((2, "subsection")))]
    #[case("# I. INTRODUCTION", Some((1, "introduction")))]
    #[case("# REFERENCES", Some((1, "references")))]
    fn legacy_order_prefers_lettered_rule(
        #[case] line: &str,
        #[case] expected: Option<(i32, &str)>,
    ) {
        assert_eq!(legacy_descriptor().classify(line), expected);
    }

    #[test]
    fn legacy_shares_detection_and_strategy() {
        let legacy = legacy_descriptor();
        assert_eq!(legacy.name(), LEGACY_NAME);
        assert_eq!(legacy.strategy(), ParseStrategy::Journal);
        assert_eq!(legacy.patterns().len(), descriptor().patterns().len());

        let text = "# Title\n# I. INTRODUCTION\n## A. Scope\n# II. RELATED WORK\n";
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        assert_eq!(
            confidence(&legacy, text, &lines),
            confidence(&descriptor(), text, &lines)
        );
    }

    #[test]
    fn front_matter_end_marker() {
        assert!(FRONT_MATTER_END.is_match("# Abstract—We study"));
        assert!(FRONT_MATTER_END.is_match("# I. INTRODUCTION"));
        assert!(!FRONT_MATTER_END.is_match("# Fellow, IEEE"));
    }
}
