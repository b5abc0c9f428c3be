use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{AffiliateCreatedEvent, EventHandler, EventProducer, Handler, PayoutQueuedEvent};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub affiliate_created_producer: Vec<EventProducer<AffiliateCreatedEvent>>,
    pub payout_queued_producer: Vec<EventProducer<PayoutQueuedEvent>>,
}

pub struct EventHandlers {
    pub on_affiliate_created: Option<EventHandler<AffiliateCreatedEvent>>,
    pub on_payout_queued: Option<EventHandler<PayoutQueuedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_affiliate_created = hooks.on_affiliate_created.map(|f| EventHandler::new(buffer_size, f));
        let on_payout_queued = hooks.on_payout_queued.map(|f| EventHandler::new(buffer_size, f));
        Self { on_affiliate_created, on_payout_queued }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_affiliate_created {
            result.affiliate_created_producer.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_payout_queued {
            result.payout_queued_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_affiliate_created {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
        if let Some(handler) = self.on_payout_queued {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_affiliate_created: Option<Handler<AffiliateCreatedEvent>>,
    pub on_payout_queued: Option<Handler<PayoutQueuedEvent>>,
}

impl EventHooks {
    pub fn on_affiliate_created<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(AffiliateCreatedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_affiliate_created = Some(Arc::new(f));
        self
    }

    pub fn on_payout_queued<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(PayoutQueuedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_payout_queued = Some(Arc::new(f));
        self
    }
}
