use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use commission_engine::{
    events::EventProducers,
    AffiliateApi,
    MerchantApi,
    OrderFlowApi,
    PayoutApi,
    SqliteDatabase,
};
use storefront_link::StorefrontApi;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    hooks::create_storefront_event_handlers,
    routes::{health, order_stats, order_webhook, register_merchant, trigger_payout},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let storefront = StorefrontApi::new(config.storefront.clone())
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let handlers = create_storefront_event_handlers(storefront.clone(), config.event_buffer_size);
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, db, storefront, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    storefront: StorefrontApi,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let registry = AffiliateApi::new(db.clone(), storefront.clone(), producers.clone())
            .with_discount_timeout(config.discount_timeout);
        let order_flow = OrderFlowApi::new(db.clone(), registry);
        let merchant_api = MerchantApi::new(db.clone());
        let payout_api = PayoutApi::new(db.clone(), producers.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("acg::access_log"))
            .app_data(web::Data::new(order_flow))
            .app_data(web::Data::new(merchant_api))
            .app_data(web::Data::new(payout_api))
            .service(health)
            .service(
                web::resource("/webhook/order")
                    .route(web::post().to(order_webhook::<SqliteDatabase, StorefrontApi>)),
            )
            .service(
                web::scope("/api")
                    .service(web::resource("/stats").route(web::get().to(order_stats::<SqliteDatabase>)))
                    .service(web::resource("/merchants").route(web::post().to(register_merchant::<SqliteDatabase>)))
                    .service(
                        web::resource("/payouts/{affiliate_id}")
                            .route(web::post().to(trigger_payout::<SqliteDatabase>)),
                    ),
            )
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
