use anyhow::{anyhow, Result};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::{Map, Value as JsonValue};
use std::sync::Mutex;

use super::{BookingStore, InsertedBooking};
use crate::models::Slot;

/// In-process store used by handler tests
#[derive(Default)]
pub struct MemoryStore {
    bookings: Mutex<Vec<Map<String, JsonValue>>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails, as if the database were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn bookings(&self) -> Vec<Map<String, JsonValue>> {
        self.bookings.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            Err(anyhow!("store unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        self.check_available()
    }

    async fn slot_taken(&self, slot: &Slot) -> Result<bool> {
        self.check_available()?;
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings.iter().any(|booking| {
            booking.get("studio") == Some(&slot.studio)
                && booking.get("date") == Some(&slot.date)
                && booking.get("time") == Some(&slot.time)
        }))
    }

    async fn insert_booking(&self, mut booking: Map<String, JsonValue>) -> Result<InsertedBooking> {
        self.check_available()?;
        let inserted_id = booking
            .entry("_id")
            .or_insert_with(|| JsonValue::String(ObjectId::new().to_hex()))
            .clone();
        self.bookings.lock().unwrap().push(booking);
        Ok(InsertedBooking { inserted_id })
    }
}
