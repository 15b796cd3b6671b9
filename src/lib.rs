//! Hearth - REST backend for the wellness companion
//!
//! A single-process HTTP service: users check in daily, journal, track habits
//! and moods, and share community posts. The server computes consecutive-day
//! streaks, awards achievements at exact thresholds, aggregates 30-day
//! statistics, and persists the entire state as one JSON snapshot on disk.
//!
//! ## Services
//!
//! - **Store**: the single in-memory state document plus snapshot persistence
//! - **Domain**: streak engine, achievement evaluator, aggregation engine,
//!   and the per-route mutation operations
//! - **Auth**: Argon2 password hashing and 30-day JWT bearer tokens
//! - **Server**: hyper http1 routing with a uniform JSON envelope

pub mod auth;
pub mod config;
pub mod domain;
pub mod models;
pub mod routes;
pub mod server;
pub mod store;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{HearthError, Result};
