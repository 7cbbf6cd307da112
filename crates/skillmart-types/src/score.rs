//! Readiness assessment output.

use serde::{Deserialize, Serialize};

/// Result of scoring one profile submission.
///
/// `ai_score` is always in [35, 100] and `content_quality` in [30, 100].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub ai_score: u8,
    pub content_quality: u8,
    /// Completeness sub-score as a percentage (0-100).
    pub profile_completeness: u8,
    /// Leading score-bracket summary followed by specific advice (max 8).
    pub recommendations: Vec<String>,
    /// What the profile already does well (max 5).
    pub strengths: Vec<String>,
    /// Marketplace-readiness gate.
    pub readiness: bool,
}
