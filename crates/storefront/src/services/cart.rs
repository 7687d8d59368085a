//! The visitor's cart.
//!
//! The session carries only a visitor id. Each visitor's saved cart lives in
//! a [`CartBook`] slot: a small key/value map behind an async mutex, which
//! plays the part of the browser's local storage. [`VisitorCart`] is an
//! extractor that locks the visitor's slot and opens a [`CartStore`] over it.
//! The lock is held until the handler returns, so one visitor's requests
//! apply their cart changes one after another, each on top of the last.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::{extract::FromRequestParts, http::request::Parts};
use baobab_core::cart::{CartStorage, CartStore, StorageError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::session::SESSION_EXPIRY_SECONDS;
use crate::state::AppState;

/// Session key holding the visitor id.
const VISITOR_ID_KEY: &str = "visitor_id";

/// Slots untouched for this long belong to expired sessions.
const SLOT_IDLE_TIMEOUT: Duration = Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs());

type Values = HashMap<String, String>;

struct Slot {
    values: Arc<AsyncMutex<Values>>,
    last_seen: Instant,
}

/// Every visitor's saved cart, keyed by visitor id.
#[derive(Default)]
pub struct CartBook {
    slots: Mutex<HashMap<Uuid, Slot>>,
}

impl CartBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock `visitor`'s slot, creating it on first use.
    ///
    /// Waits while another request for the same visitor holds the slot.
    /// Other visitors are not affected.
    pub async fn lock(&self, visitor: Uuid) -> SlotStorage {
        let values = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            let now = Instant::now();
            if !slots.contains_key(&visitor) {
                slots.retain(|_, slot| now.duration_since(slot.last_seen) < SLOT_IDLE_TIMEOUT);
            }
            let slot = slots.entry(visitor).or_insert_with(|| Slot {
                values: Arc::default(),
                last_seen: now,
            });
            slot.last_seen = now;
            Arc::clone(&slot.values)
        };

        SlotStorage {
            values: values.lock_owned().await,
        }
    }

    /// Number of visitors with a slot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One visitor's slot, locked for the current request.
#[derive(Debug)]
pub struct SlotStorage {
    values: OwnedMutexGuard<Values>,
}

impl CartStorage for SlotStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    async fn write(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

fn session_error(e: &tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("session error: {e}"))
}

/// The visitor id stored in `session`, assigning a new one if absent.
async fn visitor_id(session: &Session) -> Result<Uuid, AppError> {
    if let Some(id) = session
        .get::<Uuid>(VISITOR_ID_KEY)
        .await
        .map_err(|e| session_error(&e))?
    {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    session
        .insert(VISITOR_ID_KEY, id)
        .await
        .map_err(|e| session_error(&e))?;
    tracing::debug!(visitor_id = %id, "New visitor");
    Ok(id)
}

/// The current visitor's cart store.
#[derive(Debug)]
pub struct VisitorCart(CartStore<SlotStorage>);

impl Deref for VisitorCart {
    type Target = CartStore<SlotStorage>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for VisitorCart {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromRequestParts<AppState> for VisitorCart {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| AppError::Internal(message.to_string()))?;

        let visitor = visitor_id(&session).await?;
        let slot = state.carts().lock(visitor).await;
        let store = CartStore::open(slot).await?;
        Ok(Self(store))
    }
}
