//! Request handler definitions
//!
//! Define each route and its handler here.
//!
//! Handlers are generic over the backend so that endpoint tests can swap the SQLite database for mocks. The concrete
//! types are pinned when routes are registered in [`crate::server`].
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use commission_engine::{
    db_types::IncomingOrder,
    traits::{
        AffiliateManagement,
        CommerceDatabase,
        CommerceError,
        DiscountCodeIssuer,
        MerchantManagement,
        OrderManagement,
    },
    MerchantApi,
    OrderFlowApi,
    PayoutApi,
};
use log::{info, trace, warn};

use crate::{
    data_objects::{JsonResponse, MerchantRegistration, OrderStatsResponse, StatsParams, WebhookOrder},
    errors::ServerError,
};

/// Merchants authenticate stats and payout calls by presenting their API key in this header.
pub const API_KEY_HEADER: &str = "acg-api-key";

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Webhook  ----------------------------------------------------
/// Order webhook intake.
///
/// Webhook responses are always in the 200 range, otherwise the storefront will keep retrying; success or failure is
/// carried in the JSON body instead. A replayed order id reports success, since the order is already safely stored.
pub async fn order_webhook<B, C>(
    req: HttpRequest,
    body: web::Json<WebhookOrder>,
    api: web::Data<OrderFlowApi<B, C>>,
) -> HttpResponse
where
    B: CommerceDatabase,
    C: DiscountCodeIssuer,
{
    trace!("🛒️ Received webhook request: {}", req.uri());
    let payload = body.into_inner();
    let result = match IncomingOrder::try_from(payload) {
        Err(e) => {
            warn!("🛒️ Could not convert webhook payload. {e}");
            JsonResponse::failure(e)
        },
        Ok(incoming) => {
            let order_id = incoming.external_order_id.clone();
            match api.process_order(incoming).await {
                Ok(Some(order)) => {
                    info!("🛒️ Order [{}] processed successfully.", order.external_order_id);
                    JsonResponse::success("Order processed successfully.")
                },
                Ok(None) => {
                    info!("🛒️ Order [{order_id}] has already been processed.");
                    JsonResponse::success("Order already processed.")
                },
                Err(e) => {
                    warn!("🛒️ Could not process order [{order_id}]. {e}");
                    JsonResponse::failure(e)
                },
            }
        },
    };
    HttpResponse::Ok().json(result)
}

//----------------------------------------------    Stats   ----------------------------------------------------
/// Order statistics for the authenticated merchant. `from`/`to` default to the trailing 24 hours.
pub async fn order_stats<B>(
    req: HttpRequest,
    params: web::Query<StatsParams>,
    api: web::Data<MerchantApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: MerchantManagement + OrderManagement,
{
    let merchant = merchant_context(&req, &api).await?;
    let params = params.into_inner();
    let stats = api
        .order_stats(&merchant, params.from, params.to)
        .await
        .map_err(|e| ServerError::BackendError(e.to_string()))?;
    Ok(HttpResponse::Ok().json(OrderStatsResponse::from(stats)))
}

//----------------------------------------------  Merchants ----------------------------------------------------
pub async fn register_merchant<B>(
    body: web::Json<MerchantRegistration>,
    api: web::Data<MerchantApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: MerchantManagement + OrderManagement,
{
    let registration = body.into_inner();
    let merchant = api.register(registration.into()).await.map_err(|e| match e.cause() {
        CommerceError::AccountAlreadyExists { .. } | CommerceError::MerchantAlreadyExists(_) => {
            ServerError::Conflict(e.to_string())
        },
        _ => ServerError::BackendError(e.to_string()),
    })?;
    info!("💻️ Merchant [{}] registered.", merchant.domain);
    Ok(HttpResponse::Ok().json(merchant))
}

//----------------------------------------------   Payouts  ----------------------------------------------------
/// Queues one payout task per unpaid order of the given affiliate, on behalf of the authenticated merchant.
pub async fn trigger_payout<B>(
    req: HttpRequest,
    path: web::Path<i64>,
    payouts: web::Data<PayoutApi<B>>,
    merchants: web::Data<MerchantApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: MerchantManagement + OrderManagement + AffiliateManagement,
{
    let merchant = merchant_context(&req, &merchants).await?;
    let affiliate_id = path.into_inner();
    let queued = payouts.payout_for_merchant(merchant.id, affiliate_id).await.map_err(|e| match e.cause() {
        CommerceError::AffiliateNotFound(_) => ServerError::NoRecordFound(e.to_string()),
        _ => ServerError::BackendError(e.to_string()),
    })?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("{} payout tasks queued.", queued.len()))))
}

/// Resolves the calling merchant from the API key header. Callers with no key, or a key that matches no merchant,
/// are rejected before any query parameters are looked at.
async fn merchant_context<B>(
    req: &HttpRequest,
    api: &MerchantApi<B>,
) -> Result<commission_engine::db_types::Merchant, ServerError>
where
    B: MerchantManagement + OrderManagement,
{
    let api_key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(ServerError::MissingApiKey)?;
    api.merchant_for_api_key(api_key)
        .await
        .map_err(|e| ServerError::BackendError(e.to_string()))?
        .ok_or_else(|| ServerError::NoRecordFound("No merchant is associated with this API key".to_string()))
}
