//! The destination calendar, as seen by the sync engine.

use crate::date_range::DateRange;
use crate::error::SyncResult;
use crate::event::Event;

/// A calendar that events can be listed from, inserted into and deleted from.
#[allow(async_fn_in_trait)]
pub trait EventStore {
    /// Events in the window, recurring instances expanded, ordered by start.
    async fn list(&self, range: &DateRange) -> SyncResult<Vec<Event>>;

    /// Create an event and return it as stored (with its new id).
    async fn insert(&self, event: &Event) -> SyncResult<Event>;

    async fn delete(&self, event_id: &str) -> SyncResult<()>;
}
