//! Platform fee split in decimal arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};

use skillmart_types::booking::FeeBreakdown;
use skillmart_types::config::FeePolicy;
use skillmart_types::error::BookingError;

use super::Booking;
use super::policy;

/// Fractional digits kept on money amounts.
pub const MONEY_SCALE: u32 = 2;

/// `platform_fee = price * rate` rounded half away from zero to cents;
/// `seller_earning = price - platform_fee`, so the two always sum to the price.
pub fn platform_fee(price: Decimal, policy: &FeePolicy) -> FeeBreakdown {
    let platform_fee = (price * policy.platform_fee_rate)
        .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    FeeBreakdown {
        platform_fee,
        seller_earning: price - platform_fee,
    }
}

pub(crate) fn validate_price(price: Decimal) -> Result<(), BookingError> {
    if price <= Decimal::ZERO {
        return Err(BookingError::Validation(format!(
            "agreed price must be positive, got {price}"
        )));
    }
    if price.scale() > MONEY_SCALE && price.round_dp(MONEY_SCALE) != price {
        return Err(BookingError::Validation(format!(
            "agreed price {price} has more than {MONEY_SCALE} decimal places"
        )));
    }
    Ok(())
}

impl Booking {
    /// The fee split for this booking.
    ///
    /// Before payment it is recomputed from the current agreed price; once the
    /// booking is paid the stored split is frozen and returned as-is.
    pub fn calculate_platform_fee(&self, policy: &FeePolicy) -> FeeBreakdown {
        if self.fees_frozen() {
            self.fees
        } else {
            platform_fee(self.agreed_price, policy)
        }
    }

    pub fn fees_frozen(&self) -> bool {
        !policy::price_negotiable(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_five_percent_of_one_thousand() {
        let split = platform_fee(dec!(1000.00), &FeePolicy::default());
        assert_eq!(split.platform_fee, dec!(50.00));
        assert_eq!(split.seller_earning, dec!(950.00));
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 0.05 * 10.10 = 0.505
        let split = platform_fee(dec!(10.10), &FeePolicy::default());
        assert_eq!(split.platform_fee, dec!(0.51));
        assert_eq!(split.seller_earning, dec!(9.59));
    }

    #[test]
    fn test_split_always_sums_to_price() {
        for price in [dec!(0.01), dec!(19.99), dec!(333.33), dec!(12345.67)] {
            let split = platform_fee(price, &FeePolicy::default());
            assert_eq!(split.platform_fee + split.seller_earning, price);
        }
    }

    #[test]
    fn test_custom_rate() {
        let policy = FeePolicy {
            platform_fee_rate: dec!(0.125),
        };
        let split = platform_fee(dec!(200), &policy);
        assert_eq!(split.platform_fee, dec!(25.00));
        assert_eq!(split.seller_earning, dec!(175.00));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(dec!(10.50)).is_ok());
        assert!(validate_price(dec!(10.500)).is_ok());
        assert!(validate_price(dec!(0)).is_err());
        assert!(validate_price(dec!(-5)).is_err());
        assert!(validate_price(dec!(10.555)).is_err());
    }
}
