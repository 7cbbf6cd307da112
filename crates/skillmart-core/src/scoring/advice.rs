//! Recommendation and strength messages derived from scoring signals.

use super::Signals;

const MAX_RECOMMENDATIONS: usize = 8;
const MAX_STRENGTHS: usize = 5;

/// Score-bracket summary followed by specific advice, de-duplicated and capped.
pub(crate) fn recommendations(signals: &Signals, ai_score: u8) -> Vec<String> {
    let mut out = vec![bracket_summary(ai_score).to_string()];

    if signals.portfolio_items == 0 {
        out.push(
            "Add at least one portfolio item; profiles without portfolio work are not listed"
                .to_string(),
        );
    }
    if signals.length_points() < 15 {
        out.push(
            "Expand your bio and business description to at least 800 characters".to_string(),
        );
    }
    if signals.vocabulary_hits < 5 {
        out.push(
            "Describe your process and results with more professional vocabulary".to_string(),
        );
    }
    if signals.best_cluster.is_none() {
        out.push(
            "Name the tools and techniques of your specialty so clients can find you".to_string(),
        );
    }
    if signals.packages == 0 {
        out.push("Create at least one service package so clients can book you".to_string());
    } else if signals.packages < 3 {
        out.push(
            "Offer three service packages (basic, standard, premium) to give clients options"
                .to_string(),
        );
    }
    if !signals.has_image {
        out.push("Upload a professional profile image".to_string());
    }
    if !signals.has_video {
        out.push("Add a short showcase video introducing your work".to_string());
    }
    if (1..5).contains(&signals.portfolio_items) {
        out.push("Add more portfolio items; five or more earns full credit".to_string());
    }
    if !signals.has_usp {
        out.push("Explain what sets you apart from other sellers".to_string());
    }
    if signals.skills < 3 {
        out.push("List at least three skills".to_string());
    }
    if signals.bio_chars < 100 {
        out.push("Write a bio of at least 100 characters".to_string());
    }
    if !signals.has_experience {
        out.push("Describe your relevant work experience".to_string());
    }
    if signals.languages == 0 {
        out.push("List the languages you work in".to_string());
    }
    if signals.client_focus_points < 2 {
        out.push("Speak more directly to your clients' needs and goals".to_string());
    }
    if signals.has_sentences && signals.sentence_points == 0 {
        out.push("Keep sentences between 10 and 25 words for readability".to_string());
    }

    dedup_capped(out, MAX_RECOMMENDATIONS)
}

/// What the profile already does well, de-duplicated and capped.
pub(crate) fn strengths(signals: &Signals) -> Vec<String> {
    let mut out = Vec::new();

    if signals.length_points() >= 20 {
        out.push("Detailed, substantial profile content".to_string());
    }
    if signals.vocabulary_points() >= 16 {
        out.push("Strong professional vocabulary".to_string());
    }
    if let Some((cluster, hits)) = signals.best_cluster {
        if hits >= 2 {
            out.push(format!("Clear specialization in {cluster}"));
        }
    }
    if signals.portfolio_items >= 5 {
        out.push("Well-stocked portfolio".to_string());
    }
    if signals.has_video {
        out.push("Showcase video included".to_string());
    }
    if signals.packages >= 3 {
        out.push("Full range of service packages".to_string());
    }
    if signals.has_usp {
        out.push("Clear unique selling proposition".to_string());
    }
    if signals.certifications > 0 {
        out.push("Certifications listed".to_string());
    }
    if signals.client_focus_points == 3 {
        out.push("Client-focused language".to_string());
    }

    dedup_capped(out, MAX_STRENGTHS)
}

fn bracket_summary(ai_score: u8) -> &'static str {
    match ai_score {
        90.. => "Excellent profile: ready to stand out in the marketplace",
        75..=89 => "Strong profile: a few refinements will make it even better",
        60..=74 => "Good foundation: work through the recommendations to reach marketplace readiness",
        _ => "Profile needs significant work before it can be listed",
    }
}

fn dedup_capped(messages: Vec<String>, cap: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(cap);
    for message in messages {
        if out.len() == cap {
            break;
        }
        if !out.contains(&message) {
            out.push(message);
        }
    }
    out
}
