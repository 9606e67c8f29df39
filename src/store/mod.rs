use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};

use crate::models::Slot;

#[cfg(test)]
pub mod memory;

/// Outcome of a successful booking insert
#[derive(Debug, Clone, PartialEq)]
pub struct InsertedBooking {
    pub inserted_id: JsonValue,
}

/// Persistence operations the HTTP handlers need.
///
/// Nothing here makes a lookup and a later insert atomic: two callers can
/// both see a free slot and both book it.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Round-trip to the store to confirm the connection works.
    async fn ping(&self) -> Result<()>;

    /// Whether at least one booking matches all three slot fields exactly.
    async fn slot_taken(&self, slot: &Slot) -> Result<bool>;

    /// Persist `booking` as-is. The store assigns `_id` when it is absent.
    async fn insert_booking(&self, booking: Map<String, JsonValue>) -> Result<InsertedBooking>;
}
