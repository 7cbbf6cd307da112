//! Seller readiness scoring.
//!
//! Maps a `ProfileSubmission` to a `ReadinessReport`: a content-quality score,
//! a composite AI score, a completeness percentage, advice, and the
//! marketplace-readiness gate. Pure and deterministic: no I/O, no clock, no
//! randomness, so sellers can be scored in parallel without coordination.

mod advice;
pub mod lexicon;

use skillmart_types::config::ReadinessThresholds;
use skillmart_types::profile::ProfileSubmission;
use skillmart_types::score::ReadinessReport;

use lexicon::{CLIENT_FOCUS, Corpus, PROFESSIONAL_VOCABULARY, USP_PHRASES};

pub const CONTENT_QUALITY_FLOOR: i32 = 30;
pub const AI_SCORE_FLOOR: i32 = 35;
pub const SCORE_CEILING: i32 = 100;

/// Maximum of the weighted completeness sub-score.
pub const COMPLETENESS_MAX: i32 = 20;

/// Scorer bound to a set of readiness thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadinessScorer {
    thresholds: ReadinessThresholds,
}

impl ReadinessScorer {
    pub fn new(thresholds: ReadinessThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ReadinessThresholds {
        &self.thresholds
    }

    pub fn score(&self, submission: &ProfileSubmission) -> ReadinessReport {
        score(submission, &self.thresholds)
    }
}

/// The readiness gate: `ai_score >= min_ai_score`, `content_quality >=
/// min_content_quality`, and at least `min_portfolio_items` portfolio items.
pub fn readiness_gate(
    ai_score: u8,
    content_quality: u8,
    portfolio_items: usize,
    thresholds: &ReadinessThresholds,
) -> bool {
    ai_score >= thresholds.min_ai_score
        && content_quality >= thresholds.min_content_quality
        && portfolio_items >= thresholds.min_portfolio_items
}

/// Score a profile submission.
pub fn score(submission: &ProfileSubmission, thresholds: &ReadinessThresholds) -> ReadinessReport {
    let signals = Signals::collect(submission);

    let content_quality = signals.content_quality();
    let ai_score = signals.ai_score(content_quality);
    let readiness = readiness_gate(
        ai_score,
        content_quality,
        signals.portfolio_items,
        thresholds,
    );

    ReadinessReport {
        ai_score,
        content_quality,
        profile_completeness: signals.completeness_percent(),
        recommendations: advice::recommendations(&signals, ai_score),
        strengths: advice::strengths(&signals),
        readiness,
    }
}

/// Every point-bearing observation about a submission.
#[derive(Debug, Clone)]
pub(crate) struct Signals {
    pub corpus_chars: usize,
    pub vocabulary_hits: usize,
    pub best_cluster: Option<(&'static str, usize)>,
    pub portfolio_items: usize,
    pub bio_chars: usize,
    pub has_title: bool,
    pub skills: usize,
    pub has_experience: bool,
    pub packages: usize,
    pub languages: usize,
    pub certifications: usize,
    pub has_video: bool,
    pub has_image: bool,
    pub has_usp: bool,
    pub client_focus_points: i32,
    pub sentence_points: i32,
    pub has_sentences: bool,
}

impl Signals {
    pub(crate) fn collect(submission: &ProfileSubmission) -> Self {
        let corpus = Corpus::from_submission(submission);
        let average_sentence = corpus.average_sentence_words();

        Self {
            corpus_chars: corpus.char_len(),
            vocabulary_hits: corpus.distinct_matches(PROFESSIONAL_VOCABULARY),
            best_cluster: corpus.best_cluster(),
            portfolio_items: submission.portfolio.len(),
            bio_chars: submission.bio.trim().chars().count(),
            has_title: !submission.title.trim().is_empty(),
            skills: submission
                .skills
                .iter()
                .filter(|s| !s.trim().is_empty())
                .count(),
            has_experience: !submission.experience.trim().is_empty(),
            packages: submission.packages.len(),
            languages: submission
                .languages
                .iter()
                .filter(|l| !l.trim().is_empty())
                .count(),
            certifications: submission.certifications.len(),
            has_video: submission.has_showcase_video(),
            has_image: submission.has_profile_image(),
            has_usp: !submission.unique_selling_proposition.trim().is_empty()
                || corpus.distinct_matches(USP_PHRASES) > 0,
            client_focus_points: client_focus_points(
                corpus.occurrences(CLIENT_FOCUS),
                corpus.word_count(),
            ),
            sentence_points: sentence_points(average_sentence),
            has_sentences: average_sentence.is_some(),
        }
    }

    pub(crate) fn length_points(&self) -> i32 {
        match self.corpus_chars {
            n if n >= 2000 => 25,
            n if n >= 1200 => 20,
            n if n >= 800 => 15,
            n if n >= 500 => 10,
            n if n >= 200 => 5,
            _ => 0,
        }
    }

    pub(crate) fn vocabulary_points(&self) -> i32 {
        (self.vocabulary_hits as i32 * 2).min(20)
    }

    pub(crate) fn specialty_points(&self) -> i32 {
        let hits = self.best_cluster.map_or(0, |(_, hits)| hits);
        (hits as i32 * 3).min(15)
    }

    pub(crate) fn portfolio_points(&self) -> i32 {
        (self.portfolio_items.min(5) as i32) * 2
    }

    pub(crate) fn completeness_points(&self) -> i32 {
        let mut points = 0;
        if self.bio_chars >= 100 {
            points += 4;
        }
        if self.has_title {
            points += 2;
        }
        if self.skills >= 3 {
            points += 3;
        }
        if self.has_experience {
            points += 3;
        }
        if self.packages >= 1 {
            points += 3;
        }
        if self.portfolio_items >= 1 {
            points += 3;
        }
        if self.languages >= 1 {
            points += 2;
        }
        points.min(COMPLETENESS_MAX)
    }

    pub(crate) fn media_points(&self) -> i32 {
        let video = if self.has_video { 6 } else { 0 };
        let image = if self.has_image { 4 } else { 0 };
        video + image
    }

    pub(crate) fn package_points(&self) -> i32 {
        match self.packages {
            n if n >= 3 => 10,
            n if n >= 1 => 5,
            _ => 0,
        }
    }

    pub(crate) fn usp_points(&self) -> i32 {
        if self.has_usp { 5 } else { 0 }
    }

    fn content_quality(&self) -> u8 {
        let raw = CONTENT_QUALITY_FLOOR
            + self.length_points()
            + self.vocabulary_points()
            + self.specialty_points()
            + self.portfolio_points();
        raw.clamp(CONTENT_QUALITY_FLOOR, SCORE_CEILING) as u8
    }

    fn ai_score(&self, content_quality: u8) -> u8 {
        let raw = i32::from(content_quality)
            + self.completeness_points()
            + self.media_points()
            + self.package_points()
            + self.usp_points()
            + self.client_focus_points
            + self.sentence_points;
        raw.clamp(AI_SCORE_FLOOR, SCORE_CEILING) as u8
    }

    fn completeness_percent(&self) -> u8 {
        (self.completeness_points() * 100 / COMPLETENESS_MAX) as u8
    }
}

/// Up to 3 points by share of client-focused words, in per-mille.
fn client_focus_points(hits: usize, words: usize) -> i32 {
    if words == 0 || hits == 0 {
        return 0;
    }
    match hits * 1000 / words {
        d if d >= 30 => 3,
        d if d >= 15 => 2,
        _ => 1,
    }
}

/// Up to 2 points for a readable average sentence length.
fn sentence_points(average_words: Option<usize>) -> i32 {
    match average_words {
        Some(10..=25) => 2,
        Some(6..=35) => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::strong_submission;

    #[test]
    fn test_empty_submission_hits_floors() {
        let report = score(&ProfileSubmission::default(), &ReadinessThresholds::default());
        assert_eq!(report.content_quality, 30);
        assert_eq!(report.ai_score, 35);
        assert_eq!(report.profile_completeness, 0);
        assert!(!report.readiness);
        assert!(report.strengths.is_empty());
    }

    #[test]
    fn test_strong_submission_is_ready() {
        let report = score(&strong_submission(), &ReadinessThresholds::default());
        assert_eq!(report.content_quality, 100);
        assert_eq!(report.ai_score, 100);
        assert_eq!(report.profile_completeness, 100);
        assert!(report.readiness);
        assert!(!report.strengths.is_empty());
        assert!(report.strengths.len() <= 5);
    }

    #[test]
    fn test_score_is_deterministic() {
        let submission = strong_submission();
        let thresholds = ReadinessThresholds::default();
        assert_eq!(score(&submission, &thresholds), score(&submission, &thresholds));
    }

    #[test]
    fn test_strong_text_without_portfolio_is_not_ready() {
        let mut submission = strong_submission();
        submission.portfolio.clear();
        let report = score(&submission, &ReadinessThresholds::default());
        assert!(report.ai_score >= 75);
        assert!(report.content_quality >= 70);
        assert!(!report.readiness);
        assert!(
            report
                .recommendations
                .iter()
                .any(|r| r.contains("portfolio item"))
        );
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let mut submissions = vec![ProfileSubmission::default(), strong_submission()];
        let mut partial = strong_submission();
        partial.bio = "Designer.".to_string();
        partial.packages.truncate(1);
        partial.showcase_video_url = None;
        submissions.push(partial);

        for submission in &submissions {
            let report = score(submission, &ReadinessThresholds::default());
            assert!((30..=100).contains(&report.content_quality));
            assert!((35..=100).contains(&report.ai_score));
            assert!(report.profile_completeness <= 100);
        }
    }

    #[test]
    fn test_readiness_gate_boundaries() {
        let t = ReadinessThresholds::default();
        assert!(!readiness_gate(74, 70, 1, &t));
        assert!(readiness_gate(75, 70, 1, &t));
        assert!(!readiness_gate(75, 69, 1, &t));
        assert!(!readiness_gate(75, 70, 0, &t));
        assert!(readiness_gate(100, 100, 9, &t));
    }

    #[test]
    fn test_readiness_gate_respects_configured_thresholds() {
        let strict = ReadinessThresholds {
            min_ai_score: 90,
            min_content_quality: 90,
            min_portfolio_items: 3,
        };
        assert!(!readiness_gate(85, 95, 5, &strict));
        assert!(readiness_gate(90, 90, 3, &strict));
    }

    #[test]
    fn test_specialty_takes_best_cluster_not_sum() {
        let submission = ProfileSubmission {
            bio: "react typescript figma logo seo".to_string(),
            ..Default::default()
        };
        let signals = Signals::collect(&submission);
        // web development: 2 hits; design: 2 hits; marketing: 1 hit.
        assert_eq!(signals.specialty_points(), 6);
    }

    #[test]
    fn test_length_tapers() {
        let points = |chars: usize| {
            let submission = ProfileSubmission {
                bio: "a".repeat(chars),
                ..Default::default()
            };
            Signals::collect(&submission).length_points()
        };
        assert_eq!(points(150), 0);
        assert_eq!(points(200), 5);
        assert_eq!(points(500), 10);
        assert_eq!(points(800), 15);
        assert_eq!(points(1200), 20);
        assert_eq!(points(2000), 25);
    }

    #[test]
    fn test_vocabulary_caps_at_twenty() {
        let submission = ProfileSubmission {
            bio: PROFESSIONAL_VOCABULARY.join(" "),
            ..Default::default()
        };
        assert_eq!(Signals::collect(&submission).vocabulary_points(), 20);
    }

    #[test]
    fn test_completeness_weights() {
        let submission = ProfileSubmission {
            title: "Editor".to_string(),
            languages: vec!["French".into()],
            ..Default::default()
        };
        let signals = Signals::collect(&submission);
        assert_eq!(signals.completeness_points(), 4);
        assert_eq!(signals.completeness_percent(), 20);
    }

    #[test]
    fn test_media_and_packages() {
        let mut submission = strong_submission();
        submission.showcase_video_url = None;
        submission.packages.truncate(1);
        let signals = Signals::collect(&submission);
        assert_eq!(signals.media_points(), 4);
        assert_eq!(signals.package_points(), 5);
    }

    #[test]
    fn test_client_focus_density() {
        assert_eq!(client_focus_points(0, 100), 0);
        assert_eq!(client_focus_points(1, 100), 1);
        assert_eq!(client_focus_points(2, 100), 2);
        assert_eq!(client_focus_points(3, 100), 3);
        assert_eq!(client_focus_points(5, 0), 0);
    }

    #[test]
    fn test_sentence_length_points() {
        assert_eq!(sentence_points(None), 0);
        assert_eq!(sentence_points(Some(3)), 0);
        assert_eq!(sentence_points(Some(8)), 1);
        assert_eq!(sentence_points(Some(18)), 2);
        assert_eq!(sentence_points(Some(40)), 0);
    }

    #[test]
    fn test_scorer_uses_its_thresholds() {
        let lenient = ReadinessScorer::new(ReadinessThresholds {
            min_ai_score: 35,
            min_content_quality: 30,
            min_portfolio_items: 0,
        });
        assert!(lenient.score(&ProfileSubmission::default()).readiness);
    }
}
