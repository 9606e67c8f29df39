use anyhow::{Context, Result};
use async_trait::async_trait;
use mongodb::bson::{doc, Bson, Document};
use mongodb::error::ErrorKind;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection};
use serde_json::{Map, Value as JsonValue};

use crate::models::Slot;
use crate::store::{BookingStore, InsertedBooking};

pub const DATABASE_NAME: &str = "StudioBooking";
pub const BOOKINGS_COLLECTION: &str = "bookings";

/// Shareable MongoDB-backed booking store for use across async handlers
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    bookings: Collection<Document>,
}

impl MongoStore {
    /// Create a client for `uri` and bind it to the bookings collection of `database`.
    ///
    /// The driver connects lazily, so this only fails for an unusable
    /// connection string (bad syntax, SRV lookup failure). Call
    /// [`MongoStore::verify_connection`] before serving to reach the server.
    ///
    /// The client pins Stable API version 1 in strict mode.
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .context("Failed to parse MongoDB connection string")?;

        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options).context("Failed to create MongoDB client")?;
        let bookings = client.database(database).collection(BOOKINGS_COLLECTION);

        tracing::info!(database = %database, "MongoDB client ready");

        Ok(Self { client, bookings })
    }

    /// First round trip to the deployment.
    ///
    /// Fails when no server can be selected or authentication is rejected;
    /// the process cannot serve bookings in either case. Any other ping
    /// error is logged and the connection is treated as usable.
    pub async fn verify_connection(&self) -> Result<()> {
        match self.run_ping().await {
            Ok(()) => {
                tracing::info!("Pinged MongoDB deployment, connection is live");
                Ok(())
            }
            Err(e) if is_connection_failure(&e) => {
                Err(anyhow::Error::new(e).context("Cannot connect to MongoDB"))
            }
            Err(e) => {
                tracing::error!("Ping failed: {}", e);
                Ok(())
            }
        }
    }

    async fn run_ping(&self) -> mongodb::error::Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }

    fn slot_filter(slot: &Slot) -> Document {
        doc! {
            "studio": json_to_bson(&slot.studio),
            "date": json_to_bson(&slot.date),
            "time": json_to_bson(&slot.time),
        }
    }
}

fn is_connection_failure(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::ServerSelection { .. } | ErrorKind::Authentication { .. }
    )
}

/// Converts caller JSON to BSON the way a JavaScript client would store it:
/// integers that fit become Int32/Int64, everything else numeric (including
/// integers above `i64::MAX`) becomes a Double.
fn json_to_bson(value: &JsonValue) -> Bson {
    match value {
        JsonValue::Null => Bson::Null,
        JsonValue::Bool(b) => Bson::Boolean(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).map(Bson::Int32).unwrap_or(Bson::Int64(i)),
            None => Bson::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        JsonValue::String(s) => Bson::String(s.clone()),
        JsonValue::Array(items) => Bson::Array(items.iter().map(json_to_bson).collect()),
        JsonValue::Object(map) => Bson::Document(json_to_document(map)),
    }
}

fn json_to_document(map: &Map<String, JsonValue>) -> Document {
    map.iter()
        .map(|(key, value)| (key.clone(), json_to_bson(value)))
        .collect()
}

#[async_trait]
impl BookingStore for MongoStore {
    async fn ping(&self) -> Result<()> {
        self.run_ping().await.context("MongoDB ping failed")
    }

    async fn slot_taken(&self, slot: &Slot) -> Result<bool> {
        let filter = Self::slot_filter(slot);

        let existing = self
            .bookings
            .find_one(filter, None)
            .await
            .context("Failed to query bookings")?;

        tracing::debug!(taken = existing.is_some(), "Looked up slot {:?}", slot);
        Ok(existing.is_some())
    }

    async fn insert_booking(&self, booking: Map<String, JsonValue>) -> Result<InsertedBooking> {
        let document = json_to_document(&booking);

        let result = self
            .bookings
            .insert_one(document, None)
            .await
            .context("Failed to insert booking")?;

        let inserted_id = match result.inserted_id {
            Bson::ObjectId(oid) => JsonValue::String(oid.to_hex()),
            other => other.into_relaxed_extjson(),
        };

        tracing::debug!("Inserted booking with id: {}", inserted_id);
        Ok(InsertedBooking { inserted_id })
    }
}
