//! Seller profile aggregate.
//!
//! Holds the seller's editable submission alongside the derived scores and
//! review status. The derived fields are private: they change only when a
//! fresh `ReadinessReport` is recorded or an admin moderates the profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skillmart_types::ids::{PackageId, SellerId};
use skillmart_types::profile::{ModerationAction, ProfileStatus, ProfileSubmission, ServicePackage};
use skillmart_types::score::ReadinessReport;

/// A seller's marketplace profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerProfile {
    seller_id: SellerId,
    submission: ProfileSubmission,
    status: ProfileStatus,
    ai_score: u8,
    content_quality: u8,
    profile_completeness: u8,
    marketplace_readiness: bool,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    strengths: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SellerProfile {
    /// A new, never-scored profile in `draft` status.
    pub fn draft(seller_id: SellerId, submission: ProfileSubmission, now: DateTime<Utc>) -> Self {
        Self {
            seller_id,
            submission,
            status: ProfileStatus::Draft,
            ai_score: 0,
            content_quality: 0,
            profile_completeness: 0,
            marketplace_readiness: false,
            recommendations: Vec::new(),
            strengths: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the submission and record its assessment in one step.
    ///
    /// Status follows the gate (`approved` / `pending-review`) except for
    /// suspended profiles, which stay suspended until reinstated.
    pub fn resubmit(
        &mut self,
        submission: ProfileSubmission,
        report: &ReadinessReport,
        now: DateTime<Utc>,
    ) {
        self.submission = submission;
        self.record_assessment(report, now);
    }

    fn record_assessment(&mut self, report: &ReadinessReport, now: DateTime<Utc>) {
        self.ai_score = report.ai_score;
        self.content_quality = report.content_quality;
        self.profile_completeness = report.profile_completeness;
        self.marketplace_readiness = report.readiness;
        self.recommendations = report.recommendations.clone();
        self.strengths = report.strengths.clone();
        if self.status != ProfileStatus::Suspended {
            self.status = self.gate_status();
        }
        self.updated_at = now;
    }

    /// Apply an admin moderation action.
    ///
    /// `reinstate` re-derives the status from the stored scores.
    pub fn moderate(&mut self, action: ModerationAction, now: DateTime<Utc>) {
        self.status = match action {
            ModerationAction::Reject => ProfileStatus::Rejected,
            ModerationAction::Suspend => ProfileStatus::Suspended,
            ModerationAction::Reinstate => self.gate_status(),
        };
        self.updated_at = now;
    }

    fn gate_status(&self) -> ProfileStatus {
        if self.marketplace_readiness {
            ProfileStatus::Approved
        } else {
            ProfileStatus::PendingReview
        }
    }

    /// Approved and past the readiness gate.
    pub fn is_bookable(&self) -> bool {
        self.status == ProfileStatus::Approved && self.marketplace_readiness
    }

    pub fn package(&self, id: &PackageId) -> Option<&ServicePackage> {
        self.submission.package(id)
    }

    pub fn seller_id(&self) -> &SellerId {
        &self.seller_id
    }

    pub fn submission(&self) -> &ProfileSubmission {
        &self.submission
    }

    pub fn status(&self) -> ProfileStatus {
        self.status
    }

    pub fn ai_score(&self) -> u8 {
        self.ai_score
    }

    pub fn content_quality(&self) -> u8 {
        self.content_quality
    }

    pub fn profile_completeness(&self) -> u8 {
        self.profile_completeness
    }

    pub fn marketplace_readiness(&self) -> bool {
        self.marketplace_readiness
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    pub fn strengths(&self) -> &[String] {
        &self.strengths
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
