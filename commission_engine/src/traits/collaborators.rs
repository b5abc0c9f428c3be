use thiserror::Error;

use crate::db_types::Merchant;

/// The external discount-code issuing service, scoped to a merchant.
///
/// The engine consumes this interface during affiliate registration; it never implements it. Implementations may
/// fail, or succeed without producing a code, and callers must tolerate both: registration proceeds with no discount
/// code rather than failing.
#[allow(async_fn_in_trait)]
pub trait DiscountCodeIssuer: Clone + Send + Sync {
    async fn create_discount_code(&self, merchant: &Merchant) -> Result<Option<String>, CollaboratorError>;
}

#[derive(Debug, Clone, Error)]
#[error("External collaborator call failed: {0}")]
pub struct CollaboratorError(pub String);
