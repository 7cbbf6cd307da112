//! Styled formatting helpers shared by the CLI commands.

use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color};
use console::style;

use skillmart_types::booking::{BookingStatus, PaymentStatus};
use skillmart_types::profile::ProfileStatus;

pub fn booking_status(status: BookingStatus) -> String {
    let label = status.as_str();
    match status {
        BookingStatus::Completed => format!("{}", style(format!("● {label}")).green()),
        BookingStatus::Cancelled | BookingStatus::Refunded => {
            format!("{}", style(format!("◌ {label}")).dim())
        }
        BookingStatus::Disputed => format!("{}", style(format!("▲ {label}")).red()),
        BookingStatus::Revision => format!("{}", style(format!("↺ {label}")).yellow()),
        _ => format!("{}", style(format!("○ {label}")).cyan()),
    }
}

pub fn booking_status_cell(status: BookingStatus) -> Cell {
    let color = match status {
        BookingStatus::Completed => Color::Green,
        BookingStatus::Cancelled | BookingStatus::Refunded => Color::DarkGrey,
        BookingStatus::Disputed => Color::Red,
        BookingStatus::Revision => Color::Yellow,
        _ => Color::Cyan,
    };
    Cell::new(status.as_str()).fg(color)
}

pub fn payment_status(status: PaymentStatus) -> String {
    match status {
        PaymentStatus::Escrowed => format!("{}", style("escrowed").cyan()),
        PaymentStatus::Released => format!("{}", style("released").green()),
        PaymentStatus::Refunded => format!("{}", style("refunded").dim()),
        PaymentStatus::Failed => format!("{}", style("failed").red()),
        PaymentStatus::Pending => format!("{}", style("pending").yellow()),
    }
}

pub fn profile_status(status: ProfileStatus) -> String {
    let label = status.as_str();
    match status {
        ProfileStatus::Approved => format!("{}", style(format!("● {label}")).green()),
        ProfileStatus::PendingReview | ProfileStatus::Draft => {
            format!("{}", style(format!("○ {label}")).yellow())
        }
        ProfileStatus::Rejected | ProfileStatus::Suspended => {
            format!("{}", style(format!("✗ {label}")).red())
        }
    }
}

/// A score out of 100, colored against its threshold.
pub fn score(value: u8, threshold: u8) -> String {
    let text = format!("{value:>3}/100");
    if value >= threshold {
        format!("{}", style(text).green().bold())
    } else {
        format!("{}", style(text).red().bold())
    }
}

pub fn check_mark(ok: bool) -> String {
    if ok {
        format!("{}", style("✓").green())
    } else {
        format!("{}", style("✗").red())
    }
}

pub fn datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// "in 3d", "2h ago" relative to `now`.
pub fn relative(dt: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = *dt - now;
    let (amount, future) = if delta.num_seconds() >= 0 {
        (delta, true)
    } else {
        (-delta, false)
    };
    let text = if amount.num_days() > 0 {
        format!("{}d", amount.num_days())
    } else if amount.num_hours() > 0 {
        format!("{}h", amount.num_hours())
    } else {
        format!("{}m", amount.num_minutes())
    };
    if future {
        format!("in {text}")
    } else {
        format!("{text} ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_relative() {
        let now = Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap();
        assert_eq!(relative(&(now + Duration::days(3)), now), "in 3d");
        assert_eq!(relative(&(now - Duration::hours(2)), now), "2h ago");
        assert_eq!(relative(&(now + Duration::minutes(5)), now), "in 5m");
    }

    #[test]
    fn test_datetime() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 6, 9, 5, 0).unwrap();
        assert_eq!(datetime(&dt), "2025-01-06 09:05 UTC");
    }
}
