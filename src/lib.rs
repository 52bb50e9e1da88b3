//! ProdTrack API Library
//!
//! Production tracking for a small manufacturing floor: raw-material and
//! finished-product logs are correlated by batch id, stock is derived from
//! the full history, and a daily report flags efficiency anomalies.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod services;
pub mod store;

pub use handlers::{api_router, AppState};
