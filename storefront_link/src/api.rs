use std::sync::Arc;

use commission_engine::{
    db_types::{Merchant, Order},
    traits::{CollaboratorError, DiscountCodeIssuer},
};
use log::{debug, info, trace};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::StorefrontConfig,
    data_objects::{DiscountCodeResponse, NewDiscountCode, PayoutTask, WelcomeNotification},
    StorefrontApiError,
};

#[derive(Clone)]
pub struct StorefrontApi {
    config: StorefrontConfig,
    client: Arc<Client>,
}

impl StorefrontApi {
    pub fn new(config: StorefrontConfig) -> Result<Self, StorefrontApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(config.access_token.reveal().as_str())
            .map_err(|e| StorefrontApiError::Initialization(e.to_string()))?;
        headers.insert("X-Storefront-Access-Token", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| StorefrontApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, StorefrontApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| StorefrontApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| StorefrontApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| StorefrontApiError::RestResponseError(e.to_string()))?;
            Err(StorefrontApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Asks the storefront to issue a discount code scoped to the merchant. The storefront is free to answer without
    /// a code.
    pub async fn request_discount_code(&self, merchant: &Merchant) -> Result<Option<String>, StorefrontApiError> {
        let body = NewDiscountCode {
            merchant_domain: merchant.domain.clone(),
            merchant_name: merchant.display_name.clone(),
        };
        debug!("Requesting discount code for merchant [{}]", merchant.domain);
        let result =
            self.rest_query::<DiscountCodeResponse, _>(Method::POST, "/discount_codes", Some(body)).await?;
        Ok(result.code)
    }

    /// Hands the welcome notification for a freshly registered affiliate to the mail service.
    pub async fn send_welcome(
        &self,
        email: &str,
        name: &str,
        discount_code: Option<&str>,
    ) -> Result<(), StorefrontApiError> {
        let body = WelcomeNotification {
            email: email.to_string(),
            name: name.to_string(),
            discount_code: discount_code.map(|s| s.to_string()),
        };
        let _: serde_json::Value = self.rest_query(Method::POST, "/notifications/welcome", Some(body)).await?;
        info!("Welcome notification for {email} handed to the mail service");
        Ok(())
    }

    /// Hands one payout task to the worker queue. The worker's retries and the order's status transition happen on
    /// its side.
    pub async fn enqueue_payout(&self, order: &Order) -> Result<(), StorefrontApiError> {
        let task = PayoutTask::from(order);
        let _: serde_json::Value = self.rest_query(Method::POST, "/payout_tasks", Some(task)).await?;
        info!("Payout task for order [{}] enqueued", order.external_order_id);
        Ok(())
    }
}

impl DiscountCodeIssuer for StorefrontApi {
    async fn create_discount_code(&self, merchant: &Merchant) -> Result<Option<String>, CollaboratorError> {
        self.request_discount_code(merchant).await.map_err(|e| CollaboratorError(e.to_string()))
    }
}
