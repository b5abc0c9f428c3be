//! Canned [`DiscountCodeIssuer`] implementations for exercising registration flows without a live collaborator.
use std::time::Duration;

use crate::{
    db_types::Merchant,
    traits::{CollaboratorError, DiscountCodeIssuer},
};

/// Always answers immediately with the configured code (or no code).
#[derive(Clone, Default)]
pub struct FixedIssuer {
    code: Option<String>,
}

impl FixedIssuer {
    pub fn with_code<S: Into<String>>(code: S) -> Self {
        Self { code: Some(code.into()) }
    }

    pub fn no_code() -> Self {
        Self { code: None }
    }
}

impl DiscountCodeIssuer for FixedIssuer {
    async fn create_discount_code(&self, _merchant: &Merchant) -> Result<Option<String>, CollaboratorError> {
        Ok(self.code.clone())
    }
}

/// Always fails, as a collaborator outage would.
#[derive(Clone, Default)]
pub struct FailingIssuer;

impl DiscountCodeIssuer for FailingIssuer {
    async fn create_discount_code(&self, _merchant: &Merchant) -> Result<Option<String>, CollaboratorError> {
        Err(CollaboratorError("issuer is down".to_string()))
    }
}

/// Answers with a code, but only after the configured delay. Used to exercise the registry's timeout.
#[derive(Clone)]
pub struct SlowIssuer {
    delay: Duration,
}

impl SlowIssuer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl DiscountCodeIssuer for SlowIssuer {
    async fn create_discount_code(&self, _merchant: &Merchant) -> Result<Option<String>, CollaboratorError> {
        tokio::time::sleep(self.delay).await;
        Ok(Some("TOO-LATE".to_string()))
    }
}
