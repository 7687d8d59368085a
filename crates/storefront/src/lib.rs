//! Baobab Restaurant website library.
//!
//! This crate provides the site as a library, so the binary and the HTTP
//! tests build the same router via [`app::build_router`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
