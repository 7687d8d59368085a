//! Shopping cart state and persistence.
//!
//! - [`CartState`] holds the line items and implements every transition
//!   synchronously, with no I/O.
//! - [`CartStorage`] is the durable key/value backend (one visitor's slot
//!   in the storefront's cart book, [`MemoryStorage`] in tests).
//! - [`CartStore`] pairs the two: it rehydrates from storage when opened and
//!   writes the whole state back after every mutation.

mod state;
mod storage;
mod store;

pub use state::{CartError, CartState, LineItem};
pub use storage::{CartStorage, MemoryStorage, StorageError};
pub use store::{CART_STORAGE_KEY, CartStore};
