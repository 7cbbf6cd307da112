//! Seller profile CLI commands: score, submit, show, moderate.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use serde::Serialize;

use skillmart_core::profile::SellerProfile;
use skillmart_observe::attrs;
use skillmart_types::config::ReadinessThresholds;
use skillmart_types::ids::SellerId;
use skillmart_types::profile::{ModerationAction, ProfileSubmission};
use skillmart_types::score::ReadinessReport;

use super::{Output, format};
use crate::state::AppState;

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Score a submission file without saving it.
    Score {
        /// JSON file containing the profile submission.
        file: PathBuf,
    },

    /// Create or replace a seller's profile from a submission file.
    Submit {
        seller: SellerId,
        /// JSON file containing the profile submission.
        file: PathBuf,
    },

    /// Show a stored profile with its scores.
    Show { seller: SellerId },

    /// Admin moderation: reject, suspend, or reinstate.
    Moderate {
        seller: SellerId,
        action: ModerationAction,
    },
}

impl ProfileCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ProfileCommand::Score { .. } => "profile.score",
            ProfileCommand::Submit { .. } => "profile.submit",
            ProfileCommand::Show { .. } => "profile.show",
            ProfileCommand::Moderate { .. } => "profile.moderate",
        }
    }
}

pub async fn run(state: &AppState, command: ProfileCommand, out: Output) -> Result<()> {
    match command {
        ProfileCommand::Score { file } => score(state, &file, out).await,
        ProfileCommand::Submit { seller, file } => submit(state, &seller, &file, out).await,
        ProfileCommand::Show { seller } => show(state, &seller, out).await,
        ProfileCommand::Moderate { seller, action } => moderate(state, &seller, action, out).await,
    }
}

async fn read_submission(path: &Path) -> Result<ProfileSubmission> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid profile submission", path.display()))
}

async fn score(state: &AppState, file: &Path, out: Output) -> Result<()> {
    let submission = read_submission(file).await?;
    let report = state.profile_service.preview(&submission);

    if out.emit_json(&report)? {
        return Ok(());
    }
    print_report(&report, state.profile_service.thresholds());
    Ok(())
}

#[derive(Serialize)]
struct SubmitResult<'a> {
    profile: &'a SellerProfile,
    report: &'a ReadinessReport,
}

async fn submit(state: &AppState, seller: &SellerId, file: &Path, out: Output) -> Result<()> {
    tracing::Span::current().record(attrs::SELLER_ID, seller.as_str());

    let submission = read_submission(file).await?;
    let (profile, report) = state.profile_service.submit(seller, submission).await?;

    if out.emit_json(&SubmitResult {
        profile: &profile,
        report: &report,
    })? {
        return Ok(());
    }

    println!();
    println!(
        "  {} Profile saved for {}",
        style("✓").green().bold(),
        style(seller).cyan()
    );
    println!("  {}  {}", style("Status:").bold(), format::profile_status(profile.status()));
    print_report(&report, state.profile_service.thresholds());
    Ok(())
}

async fn show(state: &AppState, seller: &SellerId, out: Output) -> Result<()> {
    tracing::Span::current().record(attrs::SELLER_ID, seller.as_str());

    let profile = state.profile_service.get(seller).await?;
    if out.emit_json(&profile)? {
        return Ok(());
    }

    let submission = profile.submission();
    let thresholds = state.profile_service.thresholds();

    println!();
    println!("  {}", style(seller).cyan().bold());
    if !submission.title.is_empty() {
        println!("  {}", style(&submission.title).dim());
    }
    println!();
    println!("  {}", style("── Review ──").dim());
    println!("  {}        {}", style("Status:").bold(), format::profile_status(profile.status()));
    println!(
        "  {}      {}",
        style("Bookable:").bold(),
        format::check_mark(state.profile_service.is_bookable(&profile))
    );
    println!(
        "  {}      {}",
        style("AI score:").bold(),
        format::score(profile.ai_score(), thresholds.min_ai_score)
    );
    println!(
        "  {}       {}",
        style("Content:").bold(),
        format::score(profile.content_quality(), thresholds.min_content_quality)
    );
    println!(
        "  {}  {:>3}%",
        style("Completeness:").bold(),
        profile.profile_completeness()
    );
    println!("  {}       {}", style("Updated:").bold(), format::datetime(&profile.updated_at()));

    if !submission.packages.is_empty() {
        println!();
        println!("  {}", style("── Packages ──").dim());
        for package in &submission.packages {
            println!(
                "  {} {:<12} {:>10}  {}d, {} revision(s)",
                style("•").dim(),
                package.id.as_str(),
                package.price,
                package.delivery_days,
                package.revisions
            );
        }
    }

    print_advice(profile.strengths(), profile.recommendations());
    Ok(())
}

async fn moderate(
    state: &AppState,
    seller: &SellerId,
    action: ModerationAction,
    out: Output,
) -> Result<()> {
    tracing::Span::current().record(attrs::SELLER_ID, seller.as_str());

    let profile = state.profile_service.moderate(seller, action).await?;
    if out.emit_json(&profile)? {
        return Ok(());
    }

    println!();
    println!(
        "  {} {} is now {}",
        style("✓").green().bold(),
        style(seller).cyan(),
        format::profile_status(profile.status())
    );
    println!();
    Ok(())
}

fn print_report(report: &ReadinessReport, thresholds: &ReadinessThresholds) {
    println!();
    println!("  {}", style("── Readiness ──").dim());
    println!(
        "  {}      {}",
        style("AI score:").bold(),
        format::score(report.ai_score, thresholds.min_ai_score)
    );
    println!(
        "  {}       {}",
        style("Content:").bold(),
        format::score(report.content_quality, thresholds.min_content_quality)
    );
    println!(
        "  {}  {:>3}%",
        style("Completeness:").bold(),
        report.profile_completeness
    );
    println!(
        "  {}         {}",
        style("Ready:").bold(),
        format::check_mark(report.readiness)
    );
    print_advice(&report.strengths, &report.recommendations);
}

fn print_advice(strengths: &[String], recommendations: &[String]) {
    if !strengths.is_empty() {
        println!();
        println!("  {}", style("── Strengths ──").dim());
        for strength in strengths {
            println!("  {} {strength}", style("+").green());
        }
    }
    if !recommendations.is_empty() {
        println!();
        println!("  {}", style("── Recommendations ──").dim());
        for recommendation in recommendations {
            println!("  {} {recommendation}", style("→").yellow());
        }
    }
    println!();
}
