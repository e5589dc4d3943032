//! Swipe Match - atomic swipe-and-match service for dating apps
//!
//! Two users liking each other produce a match recorded for both, decided
//! atomically inside the key-value store. The crate also ships a concurrent
//! swipe simulator that hammers the store and reports per-user matches.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{StoreKey, SimulationConfig, SimulationReport, SwipeSimulator};
pub use error::SwipeError;
pub use models::SwipeAction;
pub use services::{MatchService, MemoryStore, RedisStore, SwipeStore};
