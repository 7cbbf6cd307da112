//! Seller profile service.
//!
//! Validates and scores submissions, derives the review status and persists
//! the result. Scoring itself is pure; this is the only place it meets storage.

use std::collections::HashSet;

use rust_decimal::Decimal;

use skillmart_types::config::ReadinessThresholds;
use skillmart_types::error::ProfileError;
use skillmart_types::ids::SellerId;
use skillmart_types::profile::{ModerationAction, ProfileSubmission};
use skillmart_types::score::ReadinessReport;

use crate::profile::SellerProfile;
use crate::repository::profile::ProfileRepository;
use crate::scoring::ReadinessScorer;
use crate::service::clock::Clock;

pub struct ProfileService<R: ProfileRepository, C: Clock> {
    repo: R,
    clock: C,
    scorer: ReadinessScorer,
}

impl<R: ProfileRepository, C: Clock> ProfileService<R, C> {
    pub fn new(repo: R, clock: C, thresholds: ReadinessThresholds) -> Self {
        Self {
            repo,
            clock,
            scorer: ReadinessScorer::new(thresholds),
        }
    }

    /// Score a submission without persisting anything.
    pub fn preview(&self, submission: &ProfileSubmission) -> ReadinessReport {
        self.scorer.score(submission)
    }

    /// Create or fully rescore a seller's profile.
    ///
    /// The whole submission replaces the stored one; there are no partial
    /// updates, so derived fields always match the content they describe.
    pub async fn submit(
        &self,
        seller_id: &SellerId,
        submission: ProfileSubmission,
    ) -> Result<(SellerProfile, ReadinessReport), ProfileError> {
        if seller_id.is_blank() {
            return Err(ProfileError::Validation("seller id cannot be empty".to_string()));
        }
        validate_submission(&submission)?;

        let report = self.scorer.score(&submission);
        let now = self.clock.now();

        let mut profile = match self.repo.load(seller_id).await? {
            Some(existing) => existing,
            None => SellerProfile::draft(seller_id.clone(), ProfileSubmission::default(), now),
        };
        let previous = profile.status();
        profile.resubmit(submission, &report, now);
        self.repo.save(&profile).await?;

        tracing::info!(
            seller_id = %seller_id,
            ai_score = report.ai_score,
            content_quality = report.content_quality,
            readiness = report.readiness,
            from = %previous,
            status = %profile.status(),
            "profile scored"
        );

        Ok((profile, report))
    }

    pub async fn get(&self, seller_id: &SellerId) -> Result<SellerProfile, ProfileError> {
        self.repo
            .load(seller_id)
            .await?
            .ok_or_else(|| ProfileError::NotFound(seller_id.to_string()))
    }

    /// Apply an admin moderation action and persist it.
    pub async fn moderate(
        &self,
        seller_id: &SellerId,
        action: ModerationAction,
    ) -> Result<SellerProfile, ProfileError> {
        let mut profile = self.get(seller_id).await?;
        let previous = profile.status();
        profile.moderate(action, self.clock.now());
        self.repo.save(&profile).await?;

        tracing::info!(
            seller_id = %seller_id,
            action = ?action,
            from = %previous,
            status = %profile.status(),
            "profile moderated"
        );
        Ok(profile)
    }

    pub fn is_bookable(&self, profile: &SellerProfile) -> bool {
        profile.is_bookable()
    }

    pub fn thresholds(&self) -> &ReadinessThresholds {
        self.scorer.thresholds()
    }
}

fn validate_submission(submission: &ProfileSubmission) -> Result<(), ProfileError> {
    let mut seen = HashSet::new();
    for package in &submission.packages {
        if package.id.is_blank() {
            return Err(ProfileError::Validation(format!(
                "package '{}' has an empty id",
                package.name
            )));
        }
        if !seen.insert(package.id.as_str()) {
            return Err(ProfileError::Validation(format!(
                "duplicate package id '{}'",
                package.id
            )));
        }
        if package.price <= Decimal::ZERO {
            return Err(ProfileError::Validation(format!(
                "package '{}' must have a positive price",
                package.id
            )));
        }
    }
    Ok(())
}
