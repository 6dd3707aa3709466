//! Genre detection
//!
//!     Every registered genre scores the document; the best confidence wins.
//!
//!     Scoring, per genre:
//!
//!         1. Any exclusion pattern present: confidence is 0.0, nothing else is looked at.
//!         2. Required patterns: `max += w`; present adds `w`, absent subtracts `w / 2`.
//!         3. Optional patterns: `max += w`; adds `min(count / 3, 1) * w`.
//!         4. Structural heuristics: `max += w`; adds `heuristic * w`.
//!         5. Confidence is `score / max` clamped to `[0, 1]` (0.0 when `max` is 0).
//!
//!     Ties go to the genre registered first. A winner below the confidence threshold is
//!     still returned, flagged and logged. Only an empty registry is an error.

pub mod heuristics;

use crate::outline::error::{OutlineError, OutlineResult};
use crate::outline::genres::{GenreDescriptor, GenreRegistry};
use serde::Serialize;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.3;

/// Penalty factor applied to the weight of a missing required pattern
const MISSING_REQUIRED_PENALTY: f64 = 0.5;
/// Optional patterns earn full weight at this many occurrences
const OPTIONAL_SATURATION: f64 = 3.0;

/// Confidence of one genre for one document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionScore {
    pub genre: String,
    pub confidence: f64,
}

/// Outcome of a detection run
#[derive(Debug, Clone)]
pub struct Detection<'a> {
    pub genre: &'a GenreDescriptor,
    pub confidence: f64,
    /// Every genre's score, in registration order
    pub scores: Vec<DetectionScore>,
    pub below_threshold: bool,
}

/// Selects a genre for a document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detector {
    threshold: f64,
}

impl Default for Detector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl Detector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold: f64) -> OutlineResult<Self> {
        let mut detector = Self::new();
        detector.set_confidence_threshold(threshold)?;
        Ok(detector)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_confidence_threshold(&mut self, threshold: f64) -> OutlineResult<()> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(OutlineError::InvalidArgument(format!(
                "confidence threshold must be between 0.0 and 1.0, got {threshold}"
            )));
        }
        self.threshold = threshold;
        Ok(())
    }

    /// Score every registered genre and pick the best one.
    pub fn detect<'a>(
        &self,
        registry: &'a GenreRegistry,
        text: &str,
        lines: &[String],
    ) -> OutlineResult<Detection<'a>> {
        if registry.is_empty() {
            return Err(OutlineError::Configuration(
                "no genres registered, register at least one before detecting".to_string(),
            ));
        }

        let mut scores = Vec::with_capacity(registry.len());
        let mut best: Option<(&GenreDescriptor, f64)> = None;

        for genre in registry.list() {
            let confidence = confidence(genre, text, lines);
            tracing::debug!(genre = genre.name(), confidence, "scored genre");
            scores.push(DetectionScore {
                genre: genre.name().to_string(),
                confidence,
            });
            // strictly greater: earlier registrations win ties
            if best.map_or(true, |(_, top)| confidence > top) {
                best = Some((genre, confidence));
            }
        }

        let (genre, confidence) = best.ok_or_else(|| {
            OutlineError::Configuration("no genres registered".to_string())
        })?;
        let below_threshold = confidence < self.threshold;

        if below_threshold {
            tracing::warn!(
                genre = genre.name(),
                confidence,
                threshold = self.threshold,
                "best genre is below the confidence threshold, using it anyway"
            );
        } else {
            tracing::info!(genre = genre.name(), confidence, "selected genre");
        }

        Ok(Detection {
            genre,
            confidence,
            scores,
            below_threshold,
        })
    }

    /// Resolve a genre by name when one is given, otherwise detect it.
    ///
    /// The confidence is only known when the genre was detected.
    pub fn select<'a>(
        &self,
        registry: &'a GenreRegistry,
        name: Option<&str>,
        text: &str,
        lines: &[String],
    ) -> OutlineResult<(&'a GenreDescriptor, Option<f64>)> {
        match name {
            Some(name) => {
                let genre = registry.find(name)?;
                tracing::info!(genre = genre.name(), "using requested genre");
                Ok((genre, None))
            }
            None => {
                let detection = self.detect(registry, text, lines)?;
                Ok((detection.genre, Some(detection.confidence)))
            }
        }
    }
}

/// Confidence in `[0, 1]` that `text` belongs to `genre`
pub fn confidence(genre: &GenreDescriptor, text: &str, lines: &[String]) -> f64 {
    let features = genre.features();

    if features.exclusion.iter().any(|p| p.is_match(text)) {
        return 0.0;
    }

    let mut score = 0.0;
    let mut max_score = 0.0;

    for required in &features.required {
        max_score += required.weight;
        if required.pattern.is_match(text) {
            score += required.weight;
        } else {
            score -= required.weight * MISSING_REQUIRED_PENALTY;
        }
    }

    for optional in &features.optional {
        max_score += optional.weight;
        let count = optional.pattern.find_iter(text).count() as f64;
        score += (count / OPTIONAL_SATURATION).min(1.0) * optional.weight;
    }

    for structural in &features.structural {
        max_score += structural.weight;
        score += structural.heuristic.score(text, lines) * structural.weight;
    }

    if max_score > 0.0 {
        (score / max_score).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::genres::DetectionFeatures;
    use crate::outline::patterns::PatternTable;

    fn genre(name: &str, features: DetectionFeatures) -> GenreDescriptor {
        GenreDescriptor::new(name, PatternTable::default(), features)
    }

    fn lines_of(text: &str) -> Vec<String> {
        text.lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn required_pattern_present_and_missing() {
        let features = DetectionFeatures::from_patterns(&[("alpha", 2.0), ("beta", 2.0)], &[], &[])
            .unwrap();
        let g = genre("g", features);
        // alpha present (+2), beta missing (-1) over max 4
        assert!((confidence(&g, "alpha", &[]) - 0.25).abs() < 1e-9);
        // both missing: negative score clamps to zero
        assert_eq!(confidence(&g, "gamma", &[]), 0.0);
    }

    #[test]
    fn optional_patterns_saturate_at_three() {
        let features = DetectionFeatures::from_patterns(&[], &[("x", 3.0)], &[]).unwrap();
        let g = genre("g", features);
        assert!((confidence(&g, "x", &[]) - 1.0 / 3.0).abs() < 1e-9);
        assert!((confidence(&g, "x x x x x", &[]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn structural_heuristics_are_weighted() {
        let features = DetectionFeatures::from_patterns(&[("alpha", 1.0)], &[], &[])
            .unwrap()
            .with_heuristic(|_: &str, _: &[String]| 0.5, 1.0);
        let g = genre("g", features);
        assert!((confidence(&g, "alpha", &[]) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn exclusion_zeroes_confidence() {
        let features =
            DetectionFeatures::from_patterns(&[("alpha", 10.0)], &[], &["forbidden"]).unwrap();
        let g = genre("g", features);
        assert_eq!(confidence(&g, "alpha FORBIDDEN alpha", &[]), 0.0);
    }

    #[test]
    fn no_features_means_zero() {
        let g = genre("g", DetectionFeatures::new());
        assert_eq!(confidence(&g, "anything", &[]), 0.0);
    }

    #[test]
    fn empty_registry_is_a_configuration_error() {
        let registry = GenreRegistry::new();
        let result = Detector::new().detect(&registry, "text", &[]);
        assert!(matches!(result, Err(OutlineError::Configuration(_))));
    }

    #[test]
    fn ties_go_to_first_registered() {
        let mut registry = GenreRegistry::new();
        registry.register(genre("first", DetectionFeatures::new()));
        registry.register(genre("second", DetectionFeatures::new()));
        let detection = Detector::new().detect(&registry, "nothing", &[]).unwrap();
        assert_eq!(detection.genre.name(), "first");
        assert_eq!(detection.confidence, 0.0);
        assert!(detection.below_threshold);
        assert_eq!(detection.scores.len(), 2);
    }

    #[test]
    fn threshold_validation() {
        let mut detector = Detector::new();
        assert_eq!(detector.threshold(), DEFAULT_CONFIDENCE_THRESHOLD);
        assert!(matches!(
            detector.set_confidence_threshold(1.5),
            Err(OutlineError::InvalidArgument(_))
        ));
        assert!(detector.set_confidence_threshold(f64::NAN).is_err());
        assert_eq!(detector.threshold(), DEFAULT_CONFIDENCE_THRESHOLD);
        detector.set_confidence_threshold(0.5).unwrap();
        assert_eq!(detector.threshold(), 0.5);
    }

    #[test]
    fn threshold_changes_low_confidence_flag() {
        let features = DetectionFeatures::from_patterns(&[("alpha", 2.0), ("beta", 2.0)], &[], &[])
            .unwrap();
        let mut registry = GenreRegistry::new();
        registry.register(genre("g", features));

        let lenient = Detector::with_threshold(0.2).unwrap();
        assert!(!lenient.detect(&registry, "alpha", &[]).unwrap().below_threshold);

        let strict = Detector::with_threshold(0.5).unwrap();
        let detection = strict.detect(&registry, "alpha", &[]).unwrap();
        assert!(detection.below_threshold);
        assert_eq!(detection.genre.name(), "g");
    }

    #[test]
    fn select_by_name_skips_detection() {
        let registry = GenreRegistry::with_defaults();
        let text = "# 博士学位论文\n# 题目\n";
        let (genre, confidence) = Detector::new()
            .select(&registry, Some("journal"), text, &lines_of(text))
            .unwrap();
        assert_eq!(genre.name(), "journal");
        assert_eq!(confidence, None);

        let (genre, confidence) = Detector::new()
            .select(&registry, None, text, &lines_of(text))
            .unwrap();
        assert_eq!(genre.name(), "thesis");
        assert!(confidence.unwrap() > 0.0);
    }
}
