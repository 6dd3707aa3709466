//! Conference papers (AAAI, NeurIPS, ICML, ACL ...)
//!
//! Typical layout:
//!
//!     # <paper title>
//!     <authors and affiliations>
//!     # Abstract
//!     # Introduction
//!     # Related Work / Background
//!     # Method
//!     ## <subsections>
//!     # Experiments / Results
//!     # Conclusion
//!     # References
//!
//! Headings are title case and never carry roman numerals.

use super::descriptor::{DetectionFeatures, GenreDescriptor, ParseStrategy};
use crate::outline::detection::heuristics::{CountBuckets, MixedCaseHeadings, OrderedFlow};
use crate::outline::patterns::PatternTable;
use once_cell::sync::Lazy;

pub const NAME: &str = "conference";

const HEADINGS: &[(&str, &str, i32)] = &[
    (r"Abstract", "abstract", 1),
    (r"Introduction", "introduction", 1),
    (r"(Related Work|Background|Literature Review)", "related_work", 1),
    (
        r"(Method|Methodology|Approach|Proposed Method|Our Approach)",
        "methodology",
        1,
    ),
    (
        r"(Results|Experiments|Experimental Results|Evaluation)",
        "results",
        1,
    ),
    (r"Discussion", "discussion", 1),
    (r"(Conclusion|Conclusions|Concluding Remarks)", "conclusion", 1),
    (r"References", "references", 1),
    (
        r"(Acknowledgment|Acknowledgments|Acknowledgement|Acknowledgements)",
        "acknowledgment",
        1,
    ),
    (r"(Appendix|Appendices)", "appendix", 1),
];

/// Expected top-level flow, in order
const SECTION_FLOW: &[&str] = &[
    r"^# Abstract$",
    r"^# Introduction$",
    r"^# (Related Work|Background)",
    r"^# (Method|Methodology|Approach)",
    r"^# (Results|Experiments|Evaluation)",
    r"^# (Discussion|Analysis)",
    r"^# (Conclusion|Conclusions)",
    r"^# References$",
];

const REQUIRED: &[(&str, f64)] = &[(r"^# (Abstract|Introduction)$", 8.0)];

const OPTIONAL: &[(&str, f64)] = &[
    (r"(AAAI|NeurIPS|ICML|ICLR|ACL|EMNLP|CVPR|ICCV|ECCV)", 4.0),
    (r"Association for the Advancement of Artificial Intelligence", 4.0),
    (r"Conference on", 3.0),
    (r"^# Abstract$", 4.0),
    (r"^# Introduction$", 4.0),
    (r"^# Related Work$", 3.0),
    (r"^# (Method|Methodology)$", 3.0),
    (r"^# (Results|Experiments)$", 3.0),
    (r"^# Discussion$", 2.0),
    (r"^# (Conclusion|Conclusions)$", 4.0),
    (r"^# References$", 3.0),
    (r"Copyright ©.*20\d{2}", 2.0),
    (r"All rights reserved", 1.0),
    (r"Extended version", 1.0),
    (r"arXiv", 1.0),
];

const EXCLUSION: &[&str] = &[
    r"博士学位论文",
    r"第.*章",
    r"IEEE.*?(Member|Fellow)",
    r"Index Terms[—\-]",
    r"^# [IVX]+\.\s+[A-Z]",
];

/// Keywords that categorise an unrecognised top-level heading
pub const FALLBACK_CATEGORIES: &[(&[&str], &str)] = &[
    (&["Preliminary", "Preliminaries", "Notation", "Problem"], "preliminaries"),
    (&["Limitation", "Future Work", "Future"], "limitations"),
];

static TABLE: Lazy<PatternTable> =
    Lazy::new(|| PatternTable::from_rules(HEADINGS).expect("conference heading table"));

pub fn descriptor() -> GenreDescriptor {
    let features = DetectionFeatures::from_patterns(REQUIRED, OPTIONAL, EXCLUSION)
        .expect("conference detection patterns")
        .with_heuristic(
            OrderedFlow::new(SECTION_FLOW).expect("section flow patterns"),
            5.0,
        )
        .with_heuristic(MixedCaseHeadings, 3.0)
        .with_heuristic(
            CountBuckets::new(
                "no_roman_numerals",
                &[r"(?m)^# [IVX]+\.\s+"],
                &[(2, 0.0), (1, 0.3)],
                1.0,
            )
            .expect("roman numeral pattern"),
            2.0,
        );

    GenreDescriptor::new(NAME, TABLE.clone(), features)
        .with_strategy(ParseStrategy::Conference)
        .with_description("Conference paper: title-case Abstract / Introduction / ... / References")
}

/// Role for a top-level heading no table entry recognised
pub fn categorize_unknown_heading(title: &str) -> &'static str {
    FALLBACK_CATEGORIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| title.contains(k)))
        .map(|(_, role)| *role)
        .unwrap_or("section")
}
