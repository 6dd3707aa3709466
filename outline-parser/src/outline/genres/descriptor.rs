//! Genre descriptors
//!
//!     A genre descriptor bundles everything the crate knows about one document style:
//!
//!         - its heading vocabulary (a [`PatternTable`])
//!         - the features used to recognise it ([`DetectionFeatures`])
//!         - how its lines are turned into a tree ([`ParseStrategy`])
//!
//!     Descriptors are built once, handed to a [`GenreRegistry`](super::GenreRegistry) and
//!     never mutated afterwards.

use crate::outline::detection::heuristics::{detection_regex, Heuristic};
use crate::outline::patterns::PatternTable;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Suffixes tolerated when a genre is looked up by name ("ThesisParsingStrategy")
const NAME_SUFFIXES: &[&str] = &["strategy", "parsing", "paper"];

/// How a genre turns lines into a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// Plain stack builder, no metadata
    Generic,
    /// Doctoral thesis: marker, title, front matter, body, trailing matter
    Thesis,
    /// Conference paper: title, authors, body
    Conference,
    /// IEEE journal article: title, authors, body, index terms
    Journal,
}

/// A pattern with the weight it contributes to the confidence score
#[derive(Debug, Clone)]
pub struct WeightedPattern {
    pub pattern: Regex,
    pub weight: f64,
}

/// A structural heuristic with its weight
#[derive(Clone)]
pub struct WeightedHeuristic {
    pub heuristic: Arc<dyn Heuristic>,
    pub weight: f64,
}

impl fmt::Debug for WeightedHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedHeuristic")
            .field("heuristic", &self.heuristic.name())
            .field("weight", &self.weight)
            .finish()
    }
}

/// Everything the detection engine scores a document against
///
/// Required, optional and exclusion patterns are matched case-insensitively with `^`/`$`
/// anchoring at line boundaries.
#[derive(Debug, Clone, Default)]
pub struct DetectionFeatures {
    pub required: Vec<WeightedPattern>,
    pub optional: Vec<WeightedPattern>,
    pub structural: Vec<WeightedHeuristic>,
    pub exclusion: Vec<Regex>,
}

impl DetectionFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_patterns(
        required: &[(&str, f64)],
        optional: &[(&str, f64)],
        exclusion: &[&str],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            required: weighted(required)?,
            optional: weighted(optional)?,
            structural: Vec::new(),
            exclusion: exclusion
                .iter()
                .map(|p| detection_regex(p))
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn with_heuristic(mut self, heuristic: impl Heuristic + 'static, weight: f64) -> Self {
        self.structural.push(WeightedHeuristic {
            heuristic: Arc::new(heuristic),
            weight,
        });
        self
    }
}

fn weighted(patterns: &[(&str, f64)]) -> Result<Vec<WeightedPattern>, regex::Error> {
    patterns
        .iter()
        .map(|(pattern, weight)| {
            Ok(WeightedPattern {
                pattern: detection_regex(pattern)?,
                weight: *weight,
            })
        })
        .collect()
}

/// A named document style
#[derive(Debug, Clone)]
pub struct GenreDescriptor {
    name: String,
    description: String,
    patterns: PatternTable,
    features: DetectionFeatures,
    strategy: ParseStrategy,
}

impl GenreDescriptor {
    pub fn new(name: impl Into<String>, patterns: PatternTable, features: DetectionFeatures) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            patterns,
            features,
            strategy: ParseStrategy::Generic,
        }
    }

    pub fn with_strategy(mut self, strategy: ParseStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    pub fn features(&self) -> &DetectionFeatures {
        &self.features
    }

    pub fn strategy(&self) -> ParseStrategy {
        self.strategy
    }

    /// Classify a heading line against this genre's table
    pub fn classify(&self, line: &str) -> Option<(i32, &str)> {
        self.patterns.classify(line)
    }

    /// Case-insensitive name match that tolerates legacy suffixes
    /// (`Thesis`, `thesisparsingstrategy`, `ConferencePaper`).
    pub fn matches_name(&self, query: &str) -> bool {
        let own = self.name.to_lowercase();
        let mut candidate = query.trim().to_lowercase();
        loop {
            if candidate == own {
                return true;
            }
            match NAME_SUFFIXES
                .iter()
                .find(|suffix| candidate.len() > suffix.len() && candidate.ends_with(*suffix))
            {
                Some(suffix) => {
                    let cut = candidate.len() - suffix.len();
                    candidate.truncate(cut);
                }
                None => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str) -> GenreDescriptor {
        GenreDescriptor::new(name, PatternTable::default(), DetectionFeatures::new())
    }

    #[test]
    fn name_matching_tolerates_suffixes() {
        let thesis = descriptor("thesis");
        assert!(thesis.matches_name("thesis"));
        assert!(thesis.matches_name("Thesis"));
        assert!(thesis.matches_name("ThesisParsingStrategy"));
        assert!(thesis.matches_name("thesisparsing"));
        assert!(!thesis.matches_name("journal"));
        assert!(!thesis.matches_name("strategy"));

        let conference = descriptor("conference");
        assert!(conference.matches_name("ConferencePaperStrategy"));
        assert!(conference.matches_name("conferencepaper"));
    }

    #[test]
    fn detection_features_are_case_insensitive_multiline() {
        let features =
            DetectionFeatures::from_patterns(&[("^# abstract$", 1.0)], &[], &["index terms"]).unwrap();
        assert!(features.required[0].pattern.is_match("Title\n# Abstract\nbody"));
        assert!(features.exclusion[0].is_match("INDEX TERMS—x"));
    }

    #[test]
    fn default_strategy_is_generic() {
        let d = descriptor("plain");
        assert_eq!(d.strategy(), ParseStrategy::Generic);
        let d = d.with_strategy(ParseStrategy::Journal);
        assert_eq!(d.strategy(), ParseStrategy::Journal);
    }

    #[test]
    fn heuristics_debug_by_name() {
        let features = DetectionFeatures::new().with_heuristic(|_: &str, _: &[String]| 1.0, 2.0);
        let debug = format!("{:?}", features.structural[0]);
        assert!(debug.contains("custom"));
        assert!(debug.contains("2.0"));
    }
}
