//! Library entrypoint for RocketCart.
//!
//! The binary only wires settings into these pieces; integration tests under
//! `tests/` build the same `AppState` with in-memory collaborators.

use std::sync::Arc;

pub mod config;
pub mod models;
pub mod services;

pub mod controllers;
pub mod routes;

use services::cart_service::CartStore;

#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub cart: Arc<CartStore>,
}
