//! The cart store: state plus write-through persistence.

use super::state::{CartState, LineItem};
use super::storage::{CartStorage, StorageError};
use crate::types::Price;

/// Key the serialized cart is stored under.
pub const CART_STORAGE_KEY: &str = "baobabCart";

/// A visitor's cart, mirrored to a [`CartStorage`] backend.
///
/// The in-memory state is the source of truth. Every mutation applies the
/// transition to it first and then rewrites the whole cart to storage.
#[derive(Debug)]
pub struct CartStore<S> {
    state: CartState,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Rehydrate a store from `storage`.
    ///
    /// A missing value yields an empty cart. A value that fails to decode is
    /// logged at WARN and replaced in storage with an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend read, or the rewrite of a
    /// rejected value, fails.
    pub async fn open(storage: S) -> Result<Self, StorageError> {
        let Some(raw) = storage.read(CART_STORAGE_KEY).await? else {
            return Ok(Self {
                state: CartState::new(),
                storage,
            });
        };

        match CartState::from_json(&raw) {
            Ok(state) => Ok(Self { state, storage }),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored cart");
                let mut store = Self {
                    state: CartState::new(),
                    storage,
                };
                store.persist().await?;
                Ok(store)
            }
        }
    }

    /// Add one unit of `name` at `price` (first-seen price wins).
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if persisting fails. The in-memory state
    /// is updated regardless.
    pub async fn add_item(&mut self, name: &str, price: Price) -> Result<(), StorageError> {
        self.state.add_item(name, price);
        self.persist().await
    }

    /// Remove the line for `name`, if present.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if persisting fails.
    pub async fn remove_item(&mut self, name: &str) -> Result<(), StorageError> {
        self.state.remove_item(name);
        self.persist().await
    }

    /// Set the quantity of `name`; zero or below removes the line.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if persisting fails.
    pub async fn update_quantity(
        &mut self,
        name: &str,
        new_quantity: i64,
    ) -> Result<(), StorageError> {
        self.state.update_quantity(name, new_quantity);
        self.persist().await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if persisting fails.
    pub async fn clear_cart(&mut self) -> Result<(), StorageError> {
        self.state.clear();
        self.persist().await
    }

    #[must_use]
    pub fn calculate_total(&self) -> Price {
        self.state.calculate_total()
    }

    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.state.total_quantity()
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    async fn persist(&mut self) -> Result<(), StorageError> {
        let json = self.state.to_json()?;
        self.storage.write(CART_STORAGE_KEY, json).await
    }
}
