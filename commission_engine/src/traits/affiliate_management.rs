use crate::{
    db_types::{Affiliate, NewAffiliate},
    traits::CommerceError,
};

#[allow(async_fn_in_trait)]
pub trait AffiliateManagement {
    /// Two-step lookup: affiliate-role account by email, then the affiliate linked to it. Returns `None` when the
    /// email is unknown, or known only as a non-affiliate account.
    async fn fetch_affiliate_for_email(&self, email: &str) -> Result<Option<Affiliate>, CommerceError>;

    async fn fetch_affiliate_by_id(&self, affiliate_id: i64) -> Result<Option<Affiliate>, CommerceError>;

    /// Creates the affiliate in a single atomic transaction: the affiliate-role account (with a placeholder
    /// credential, never a caller-supplied one) and the linked affiliate record commit or roll back together.
    ///
    /// Fails with [`CommerceError::AccountAlreadyExists`] if any account, of any role, holds the email. The
    /// uniqueness check is global across the account table, not scoped to the merchant.
    async fn insert_affiliate(&self, affiliate: NewAffiliate) -> Result<Affiliate, CommerceError>;
}
