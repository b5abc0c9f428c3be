//! Wires the engine's fire-and-forget events to the storefront collaborators.
//!
//! Two events matter to the outside world:
//!
//! 1. `AffiliateCreatedEvent` — after a registration commits, the welcome notification is handed to the storefront's
//!    mail service. A delivery failure is logged and goes no further; the registration stands.
//! 2. `PayoutQueuedEvent` — each unpaid order in a payout run becomes one task on the storefront's worker queue. The
//!    worker owns retries and the order's status transition.
use commission_engine::events::{EventHandlers, EventHooks};
use log::{error, info};
use storefront_link::StorefrontApi;

pub fn create_storefront_event_handlers(api: StorefrontApi, buffer_size: usize) -> EventHandlers {
    let mut hooks = EventHooks::default();
    let api_clone = api.clone();
    // --- On AffiliateCreated handler ---
    hooks.on_affiliate_created(move |ev| {
        let api = api_clone.clone();
        Box::pin(async move {
            match api.send_welcome(&ev.email, &ev.name, ev.affiliate.discount_code.as_deref()).await {
                Ok(()) => info!("📧️ Welcome notification for {} handed off.", ev.email),
                Err(e) => error!("📧️ Could not hand off welcome notification for {}. {e}", ev.email),
            }
        })
    });
    // --- On PayoutQueued handler ---
    hooks.on_payout_queued(move |ev| {
        let api = api.clone();
        Box::pin(async move {
            let order_id = ev.order.external_order_id.clone();
            match api.enqueue_payout(&ev.order).await {
                Ok(()) => info!("💸️ Payout task for order [{order_id}] enqueued."),
                Err(e) => error!("💸️ Could not enqueue payout task for order [{order_id}]. {e}"),
            }
        })
    });
    EventHandlers::new(buffer_size, hooks)
}
