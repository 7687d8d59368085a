//! Services backing the route handlers.
//!
//! - `cart` - Per-visitor cart slots and the `VisitorCart` extractor

pub mod cart;

pub use cart::{CartBook, SlotStorage, VisitorCart};
