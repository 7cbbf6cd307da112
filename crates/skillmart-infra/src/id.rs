//! Random booking id generator.

use chrono::{DateTime, Utc};
use rand::Rng;

use skillmart_core::service::id::{BookingIdGenerator, format_booking_id};
use skillmart_types::ids::BookingId;

const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 6;

/// `BK_<base36 millis>_<6 random uppercase alphanumerics>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBookingIdGenerator;

impl BookingIdGenerator for RandomBookingIdGenerator {
    fn next_id(&self, now: DateTime<Utc>) -> BookingId {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
            .collect();
        format_booking_id(now.timestamp_millis(), &suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_id_shape() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let id = RandomBookingIdGenerator.next_id(now);
        let parts: Vec<&str> = id.as_str().split('_').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "BK");
        assert_eq!(parts[1], "LOYW3V28");
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(
            parts[2]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_ids_differ() {
        let now = Utc::now();
        let ids: std::collections::HashSet<_> = (0..50)
            .map(|_| RandomBookingIdGenerator.next_id(now))
            .collect();
        assert_eq!(ids.len(), 50);
    }
}
