//! Chinese doctoral thesis (博士学位论文)
//!
//! Typical layout:
//!
//!     # 博士学位论文
//!     # <thesis title>
//!     <school, author, supervisor ... front matter>
//!     # 摘要 / # Abstract / # 目录
//!     # 第一章 ...        chapters
//!     ## 1.1 ...          sections
//!     ### 1.1.1 ...       clauses
//!     # 参考文献
//!     # 作者介绍 / # 取得的研究成果   trailing matter

use super::descriptor::{DetectionFeatures, GenreDescriptor, ParseStrategy};
use crate::outline::detection::heuristics::CountBuckets;
use crate::outline::patterns::{PatternTable, METADATA_LEVEL};
use once_cell::sync::Lazy;
use regex::Regex;

pub const NAME: &str = "thesis";

/// Heading that opens the document proper
pub static DOCUMENT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)博\s*士\s*学\s*位\s*论\s*文").unwrap());

/// A bare, unmarked "参考文献" caption line
pub static REFERENCES_CAPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*参\s*考\s*文\s*献\s*$").unwrap());

pub const REFERENCES_ROLE: &str = "references";

/// Bucket key for trailing headings the table does not know
pub const TRAILER_FALLBACK_KEY: &str = "raw";

const HEADINGS: &[(&str, &str, i32)] = &[
    (r"第.*章", "chapter", 1),
    (r"\b\d+\.\d+\b", "section", 2),
    (r"\b\d+\.\d+\.\d+\b", "clause", 3),
    (r"（\d+）", "item", 4),
    (r"摘\s*要", "abstract_ch", 1),
    (r"Abstract", "abstract_en", 1),
    (r"作者介绍", "author_introduction", METADATA_LEVEL),
    (r"目\s*录", "table_of_contents", 1),
    (r"参\s*考\s*文\s*献", REFERENCES_ROLE, 1),
    (r"图\s*清\s*单", "list_of_figures", 1),
    (r"表\s*清\s*单", "list_of_tables", 1),
    (r"取得的研究成果", "research_results", METADATA_LEVEL),
];

const REQUIRED: &[(&str, f64)] = &[(r"博\s*士\s*学\s*位\s*论\s*文", 10.0)];

const OPTIONAL: &[(&str, f64)] = &[
    (r"第[一二三四五六七八九十]+章", 5.0),
    (r"第\d+章", 5.0),
    (r"摘\s*要", 3.0),
    (r"参\s*考\s*文\s*献", 3.0),
    (r"#\s*\d+\.\d+", 2.0),
    (r"目\s*录", 2.0),
    (r"作者介绍", 1.0),
    (r"取得的研究成果", 1.0),
];

const EXCLUSION: &[&str] = &[
    r"IEEE.*Member",
    r"Index Terms—",
    r"Association for the Advancement of Artificial Intelligence",
];

static TABLE: Lazy<PatternTable> =
    Lazy::new(|| PatternTable::from_rules(HEADINGS).expect("thesis heading table"));

pub fn descriptor() -> GenreDescriptor {
    let features = DetectionFeatures::from_patterns(REQUIRED, OPTIONAL, EXCLUSION)
        .expect("thesis detection patterns")
        .with_heuristic(
            CountBuckets::new(
                "chinese_chapters",
                &[r"#\s*第[一二三四五六七八九十\d]+章"],
                &[(3, 1.0), (1, 0.5)],
                0.0,
            )
            .expect("chapter pattern"),
            3.0,
        )
        .with_heuristic(
            CountBuckets::new(
                "hierarchical_numbering",
                &[r"##\s*\d+\.\d+\s", r"###\s*\d+\.\d+\.\d+\s"],
                &[(10, 1.0), (5, 0.7), (2, 0.4)],
                0.0,
            )
            .expect("numbering patterns"),
            2.0,
        );

    GenreDescriptor::new(NAME, TABLE.clone(), features)
        .with_strategy(ParseStrategy::Thesis)
        .with_description("Chinese doctoral thesis: 第N章 chapters, 1.1 sections, trailing author matter")
}
