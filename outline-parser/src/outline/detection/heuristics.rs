//! Structural heuristics
//!
//!     A heuristic looks at the whole document and returns a score in `[0, 1]`. The engine
//!     multiplies it by the weight declared next to it in the genre's feature set and does not
//!     care how the score was obtained.
//!
//!     Any `Fn(&str, &[String]) -> f64` is a heuristic. The canonical ones below are
//!     parameterised so that genres describe them as data:
//!
//!         - [`OrderedFlow`]: expected sections found, with a bonus when they appear in order
//!         - [`MixedCaseHeadings`]: share of title-case top-level headings
//!         - [`UppercaseHeadings`]: share of ALL-CAPS top-level headings
//!         - [`CountBuckets`]: match count mapped through a threshold table

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::fmt;

static TOP_LEVEL_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());
static TOP_LEVEL_HEADING_LOOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());
static ROMAN_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[IVX]+\.\s+").unwrap());

/// Bonus for expected sections that appear in document order
const ORDER_BONUS: f64 = 0.2;
/// Minimum number of found sections before order is taken into account
const ORDER_MIN_FOUND: usize = 3;
/// Share of uppercase letters above which a heading counts as ALL CAPS
const UPPERCASE_RATIO: f64 = 0.8;

pub trait Heuristic: Send + Sync {
    /// Score in `[0, 1]` for the document
    fn score(&self, text: &str, lines: &[String]) -> f64;

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Heuristic for F
where
    F: Fn(&str, &[String]) -> f64 + Send + Sync,
{
    fn score(&self, text: &str, lines: &[String]) -> f64 {
        self(text, lines)
    }
}

/// Compile a detection pattern: case-insensitive, `^`/`$` at line boundaries.
pub fn detection_regex(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
}

/// Fraction of expected section headings present, plus a bonus when they are in order.
pub struct OrderedFlow {
    expected: Vec<Regex>,
}

impl OrderedFlow {
    /// Expected heading patterns, in the order they should appear
    pub fn new(expected: &[&str]) -> Result<Self, regex::Error> {
        let expected = expected
            .iter()
            .map(|p| detection_regex(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { expected })
    }
}

impl Heuristic for OrderedFlow {
    fn score(&self, text: &str, _lines: &[String]) -> f64 {
        if self.expected.is_empty() {
            return 0.0;
        }

        let positions: Vec<usize> = self
            .expected
            .iter()
            .filter_map(|pattern| pattern.find(text).map(|m| m.start()))
            .collect();

        let score = positions.len() as f64 / self.expected.len() as f64;
        let in_order = positions.windows(2).all(|pair| pair[0] < pair[1]);

        if positions.len() >= ORDER_MIN_FOUND && in_order {
            (score + ORDER_BONUS).min(1.0)
        } else {
            score
        }
    }

    fn name(&self) -> &str {
        "ordered_flow"
    }
}

/// Share of top-level headings (title excluded) written in mixed case.
pub struct MixedCaseHeadings;

impl Heuristic for MixedCaseHeadings {
    fn score(&self, text: &str, _lines: &[String]) -> f64 {
        let headings: Vec<&str> = TOP_LEVEL_HEADING
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect();

        if headings.len() < 2 {
            return 0.0;
        }

        let mixed = headings[1..]
            .iter()
            .filter(|heading| {
                let has_upper = heading.chars().any(char::is_uppercase);
                let has_lower = heading.chars().any(char::is_lowercase);
                has_upper && has_lower && !is_all_caps(heading)
            })
            .count();

        mixed as f64 / (headings.len() - 1) as f64
    }

    fn name(&self) -> &str {
        "mixed_case_headings"
    }
}

/// Share of top-level headings (title excluded) written in capitals, ignoring a roman
/// numeral prefix.
pub struct UppercaseHeadings;

impl Heuristic for UppercaseHeadings {
    fn score(&self, text: &str, _lines: &[String]) -> f64 {
        let headings: Vec<&str> = TOP_LEVEL_HEADING_LOOSE
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect();

        if headings.len() < 2 {
            return 0.0;
        }

        let uppercase = headings[1..]
            .iter()
            .filter(|heading| {
                let cleaned = ROMAN_PREFIX.replace(heading, "");
                let letters: Vec<char> = cleaned.chars().filter(|c| c.is_alphabetic()).collect();
                if letters.is_empty() {
                    return false;
                }
                let upper = letters.iter().filter(|c| c.is_uppercase()).count();
                upper as f64 / letters.len() as f64 > UPPERCASE_RATIO
            })
            .count();

        uppercase as f64 / (headings.len() - 1) as f64
    }

    fn name(&self) -> &str {
        "uppercase_headings"
    }
}

/// Count matches of one or more patterns and map the total through bucket thresholds.
///
/// Thresholds are `(minimum count, score)` pairs checked in the order given, so list them
/// from the highest count down. A count below every threshold scores `fallback`, which is
/// how "absence is the positive signal" heuristics are expressed.
pub struct CountBuckets {
    name: String,
    patterns: Vec<Regex>,
    thresholds: Vec<(usize, f64)>,
    fallback: f64,
}

impl CountBuckets {
    /// Patterns are compiled as written (no implicit flags).
    pub fn new(
        name: impl Into<String>,
        patterns: &[&str],
        thresholds: &[(usize, f64)],
        fallback: f64,
    ) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.into(),
            patterns,
            thresholds: thresholds.to_vec(),
            fallback,
        })
    }

    pub fn count(&self, text: &str) -> usize {
        self.patterns
            .iter()
            .map(|pattern| pattern.find_iter(text).count())
            .sum()
    }

    pub fn bucket(&self, count: usize) -> f64 {
        self.thresholds
            .iter()
            .find(|(min, _)| count >= *min)
            .map(|(_, score)| *score)
            .unwrap_or(self.fallback)
    }
}

impl Heuristic for CountBuckets {
    fn score(&self, text: &str, _lines: &[String]) -> f64 {
        self.bucket(self.count(text))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CountBuckets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountBuckets")
            .field("name", &self.name)
            .field("thresholds", &self.thresholds)
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// True when every cased character is uppercase and there is at least one.
fn is_all_caps(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}
