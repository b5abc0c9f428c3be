use crate::db_types::{Affiliate, Order};

/// Emitted after an affiliate registration has committed. Subscribers typically hand the welcome notification to the
/// mail collaborator; failures there never undo the registration.
#[derive(Debug, Clone)]
pub struct AffiliateCreatedEvent {
    pub affiliate: Affiliate,
    /// Email and display name of the new affiliate's account, so notification handlers need no extra lookup.
    pub email: String,
    pub name: String,
}

/// Emitted once per unpaid order when a payout run is dispatched. Subscribers hand the order to the downstream payout
/// worker; the engine does not wait for or track the task's completion.
#[derive(Debug, Clone)]
pub struct PayoutQueuedEvent {
    pub order: Order,
}
