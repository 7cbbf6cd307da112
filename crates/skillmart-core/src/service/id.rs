//! Booking id generation.
//!
//! Ids look like `BK_<base36 millis>_<suffix>`, all uppercase, e.g.
//! `BK_LZ3F2K1A_X7Q2PD`. The random suffix comes from the generator
//! implementation; formatting is shared here so every generator agrees.

use chrono::{DateTime, Utc};

use skillmart_types::ids::BookingId;

/// Produces fresh booking ids.
pub trait BookingIdGenerator: Send + Sync {
    fn next_id(&self, now: DateTime<Utc>) -> BookingId;
}

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Build `BK_<BASE36(millis)>_<SUFFIX>`.
///
/// Negative timestamps (before 1970) are clamped to zero.
pub fn format_booking_id(millis: i64, suffix: &str) -> BookingId {
    BookingId::new(format!(
        "BK_{}_{}",
        to_base36(millis.max(0).unsigned_abs()),
        suffix.to_uppercase()
    ))
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "LOYW3V28");
    }

    #[test]
    fn test_format_booking_id() {
        let id = format_booking_id(1_700_000_000_000, "ab12cd");
        assert_eq!(id.as_str(), "BK_LOYW3V28_AB12CD");
    }

    #[test]
    fn test_negative_millis_clamped() {
        assert_eq!(format_booking_id(-5, "X").as_str(), "BK_0_X");
    }
}
