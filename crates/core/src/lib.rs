//! Baobab Core - Domain types and cart state.
//!
//! This crate provides the pieces of the Baobab Restaurant site that carry
//! state or invariants, independent of HTTP:
//!
//! - [`types`] - Newtype wrappers for ids, prices and email addresses
//! - [`catalog`] - The static menu and its category filter
//! - [`cart`] - Line items, the cart store and its storage backends
//! - [`gallery`] - Gallery slides and the wrapping carousel index
//! - [`notification`] - Toast messages
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no HTTP, no sessions.
//! Storage is reached through the [`cart::CartStorage`] trait, which the
//! storefront implements with one locked slot per visitor.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod gallery;
pub mod notification;
pub mod types;

pub use types::*;
