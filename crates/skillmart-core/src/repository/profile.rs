//! Seller profile repository trait.

use skillmart_types::error::RepositoryError;
use skillmart_types::ids::SellerId;

use crate::profile::SellerProfile;

/// Persistence for seller profiles, keyed by seller id.
pub trait ProfileRepository: Send + Sync {
    /// Load a profile. `Ok(None)` when the seller has never submitted one.
    fn load(
        &self,
        seller_id: &SellerId,
    ) -> impl std::future::Future<Output = Result<Option<SellerProfile>, RepositoryError>> + Send;

    /// Insert or replace the profile for its seller.
    fn save(
        &self,
        profile: &SellerProfile,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
