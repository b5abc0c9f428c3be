use crate::{
    db_types::{Merchant, NewMerchant},
    traits::CommerceError,
};

#[allow(async_fn_in_trait)]
pub trait MerchantManagement {
    /// Registers a new merchant.
    ///
    /// In a single atomic transaction, creates a merchant-role account (with the API key as its secret) and the
    /// linked merchant record. On any failure both writes are rolled back.
    ///
    /// Fails with [`CommerceError::AccountAlreadyExists`] if any account holds the email, and with
    /// [`CommerceError::MerchantAlreadyExists`] if the domain is taken.
    async fn insert_merchant(&self, merchant: NewMerchant) -> Result<Merchant, CommerceError>;

    /// Looks a merchant up by its storefront domain, the external lookup key carried on order webhooks.
    async fn fetch_merchant_by_domain(&self, domain: &str) -> Result<Option<Merchant>, CommerceError>;

    /// Resolves the merchant presenting the given API key, or `None` if the key matches no merchant account.
    async fn fetch_merchant_by_api_key(&self, api_key: &str) -> Result<Option<Merchant>, CommerceError>;

    /// Two-step lookup: account by email, then the merchant linked to it. Either step may come up empty.
    async fn fetch_merchant_for_email(&self, email: &str) -> Result<Option<Merchant>, CommerceError>;
}
