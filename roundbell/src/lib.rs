//! # Roundbell
//!
//! A small coordination service for workout countdown timers.
//!
//! Roundbell keeps a set of independent, named countdown timers and rings a
//! broadcast channel when each one elapses, alongside a bounded
//! most-recently-used list of workout records.
//!
//! ## Core Concepts
//!
//! - **TimerRegistry**: the concurrency-safe set of countdown timers. Timers
//!   are created with a caller-supplied id, can be paused and resumed
//!   individually or in bulk, and fire exactly once at their deadline.
//! - **Event-Driven**: observers subscribe to the registry's event streams
//!   (`TimerEvent`, `SystemEvent`) via `tokio::sync::broadcast` and react to
//!   expirations as they happen.
//! - **RecentsQueue**: a fixed-capacity, deduplicating MRU list of workout
//!   snapshots, hydrated from disk at startup and flushed back on shutdown.
//! - **Configuration-Driven**: storage paths and capacities come from a
//!   `RoundbellConfig`, optionally loaded from a TOML file.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use roundbell::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RoundbellConfig::default();
//!     let service = WorkoutService::new(&config)?;
//!     service.hydrate().await;
//!
//!     // Subscribe to expirations before starting any timers.
//!     let mut events = service.subscribe_timer_events();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Timer rang: {:?}", event);
//!         }
//!     });
//!
//!     service
//!         .create_timer("round-1", Duration::from_secs(180), "Round one done!")
//!         .await?;
//!
//!     tokio::signal::ctrl_c().await?;
//!     service.flush().await;
//!     Ok(())
//! }
//! ```

pub const SERVICE_NAME: &str = "Roundbell";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Declare all the modules in the crate.
pub mod config;
pub mod error;
pub mod events;
pub mod recents;
pub mod registry;
pub mod service;
pub mod store;
pub mod time;
pub mod workout;

/// A prelude module for easy importing of the most common Roundbell types.
pub mod prelude {
    pub use crate::config::RoundbellConfig;
    pub use crate::error::{StoreError, TimerError};
    pub use crate::events::{SystemEvent, TimerEvent};
    pub use crate::recents::RecentsQueue;
    pub use crate::registry::TimerRegistry;
    pub use crate::service::WorkoutService;
    pub use crate::store::WorkoutStore;
    pub use crate::workout::{Exercise, Round, Workout};
}
