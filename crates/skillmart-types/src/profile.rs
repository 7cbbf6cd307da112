//! Seller profile submission types.
//!
//! `ProfileSubmission` is everything a seller can edit. The derived scores and
//! the review status live on the `SellerProfile` aggregate in skillmart-core,
//! which is the only place they are written.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::ids::PackageId;

/// Review status of a seller profile.
///
/// - Draft: created but never scored
/// - PendingReview: scored below the readiness gate
/// - Approved: passed the readiness gate, bookable
/// - Rejected: turned down by an admin, may resubmit
/// - Suspended: blocked by an admin until reinstated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileStatus {
    #[default]
    Draft,
    PendingReview,
    Approved,
    Rejected,
    Suspended,
}

impl ProfileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileStatus::Draft => "draft",
            ProfileStatus::PendingReview => "pending-review",
            ProfileStatus::Approved => "approved",
            ProfileStatus::Rejected => "rejected",
            ProfileStatus::Suspended => "suspended",
        }
    }
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(ProfileStatus::Draft),
            "pending-review" | "pending_review" => Ok(ProfileStatus::PendingReview),
            "approved" => Ok(ProfileStatus::Approved),
            "rejected" => Ok(ProfileStatus::Rejected),
            "suspended" => Ok(ProfileStatus::Suspended),
            other => Err(format!("invalid profile status: '{other}'")),
        }
    }
}

/// Admin moderation actions on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Reject,
    Suspend,
    Reinstate,
}

impl FromStr for ModerationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(ModerationAction::Reject),
            "suspend" => Ok(ModerationAction::Suspend),
            "reinstate" => Ok(ModerationAction::Reinstate),
            other => Err(format!("invalid moderation action: '{other}'")),
        }
    }
}

/// A bookable service package embedded in a seller profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePackage {
    pub id: PackageId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    /// Calendar days from booking to expected delivery.
    #[serde(default = "default_delivery_days")]
    pub delivery_days: u32,
    /// Number of client revision requests included. Copied into each booking.
    #[serde(default)]
    pub revisions: u32,
}

fn default_delivery_days() -> u32 {
    7
}

/// A showcased piece of past work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Everything a seller edits on their profile.
///
/// Structured lists are deserialized leniently: a non-list value becomes an
/// empty list and malformed entries inside a list are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSubmission {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub business_description: String,
    #[serde(default)]
    pub unique_selling_proposition: String,
    /// Free-text work history.
    #[serde(default)]
    pub experience: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub portfolio: Vec<PortfolioItem>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub packages: Vec<ServicePackage>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub showcase_video_url: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl ProfileSubmission {
    /// Free-text fields in corpus order.
    pub fn free_text(&self) -> [&str; 5] {
        [
            &self.title,
            &self.bio,
            &self.business_description,
            &self.unique_selling_proposition,
            &self.experience,
        ]
    }

    pub fn package(&self, id: &PackageId) -> Option<&ServicePackage> {
        self.packages.iter().find(|p| &p.id == id)
    }

    pub fn has_showcase_video(&self) -> bool {
        has_text(self.showcase_video_url.as_deref())
    }

    pub fn has_profile_image(&self) -> bool {
        has_text(self.profile_image_url.as_deref())
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Deserialize a list field, recovering from malformed input.
///
/// Accepts anything: a JSON array keeps the entries that parse as `T`, every
/// other shape (null, string, object, number) yields an empty list.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
