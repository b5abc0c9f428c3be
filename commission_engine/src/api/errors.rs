use thiserror::Error;

use crate::traits::CommerceError;

/// A fatal ingestion failure, wrapped so callers see which operation failed while the original cause stays available
/// for diagnostics.
#[derive(Debug, Error)]
pub enum OrderProcessingError {
    #[error("Failed to process order: {0}")]
    Backend(#[from] CommerceError),
    #[error("Failed to process order: {0}")]
    AffiliateRegistration(#[from] AffiliateCreateError),
}

impl OrderProcessingError {
    /// The underlying backend error, however deeply it is wrapped.
    pub fn cause(&self) -> &CommerceError {
        match self {
            OrderProcessingError::Backend(e) => e,
            OrderProcessingError::AffiliateRegistration(e) => e.cause(),
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to create affiliate: {source}")]
pub struct AffiliateCreateError {
    #[from]
    source: CommerceError,
}

impl AffiliateCreateError {
    pub fn cause(&self) -> &CommerceError {
        &self.source
    }
}

#[derive(Debug, Error)]
#[error("Failed to create merchant: {source}")]
pub struct MerchantCreateError {
    #[from]
    source: CommerceError,
}

impl MerchantCreateError {
    pub fn cause(&self) -> &CommerceError {
        &self.source
    }
}

#[derive(Debug, Error)]
#[error("Failed to payout affiliate: {source}")]
pub struct PayoutError {
    #[from]
    source: CommerceError,
}

impl PayoutError {
    pub fn cause(&self) -> &CommerceError {
        &self.source
    }
}

#[derive(Debug, Error)]
#[error("Failed to compute order statistics: {source}")]
pub struct StatsError {
    #[from]
    source: CommerceError,
}

impl StatsError {
    pub fn cause(&self) -> &CommerceError {
        &self.source
    }
}
