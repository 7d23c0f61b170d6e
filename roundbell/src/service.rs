//! The service facade the request layer talks to.
//!
//! `WorkoutService` wires the timer registry, the file store and the recents
//! queue together: timers are delegated straight to the registry, recents
//! mutations go through one mutex, and the queue is hydrated from disk at
//! startup and flushed back at shutdown.

use crate::config::RoundbellConfig;
use crate::error::{StoreError, TimerError};
use crate::events::{SystemEvent, TimerEvent};
use crate::recents::RecentsQueue;
use crate::registry::TimerRegistry;
use crate::store::WorkoutStore;
use crate::workout::Workout;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

pub struct WorkoutService {
    registry: TimerRegistry,
    store: WorkoutStore,
    recents: Mutex<RecentsQueue>,
    recents_max: usize,
}

impl WorkoutService {
    /// Builds the service from configuration, opening the store directories.
    pub fn new(config: &RoundbellConfig) -> Result<Self, StoreError> {
        let store = WorkoutStore::open(
            &config.workout_dir,
            &config.exercise_dir,
            &config.recents_path,
        )?;
        Ok(Self {
            registry: TimerRegistry::new(config.channel_capacity),
            store,
            recents: Mutex::new(RecentsQueue::new(config.recents_max)),
            recents_max: config.recents_max,
        })
    }

    /// Restores the recents queue from its persisted snapshot. Any store
    /// failure falls back to an empty queue; startup never aborts over it.
    pub async fn hydrate(&self) {
        match self.store.load_recents(self.recents_max) {
            Ok(queue) => {
                info!(len = queue.len(), "recents restored");
                *self.recents.lock().await = queue;
            }
            Err(err) => {
                warn!(%err, "could not restore recents, starting empty");
            }
        }
    }

    /// Persists the recents queue. Failures are logged and swallowed since
    /// this runs on the way out of the process.
    pub async fn flush(&self) {
        let recents = self.recents.lock().await;
        if let Err(err) = self.store.save_recents(&recents) {
            warn!(%err, "failed to persist recents on shutdown");
        }
    }

    // --- Timers ---

    pub async fn create_timer(
        &self,
        id: &str,
        duration: Duration,
        message: &str,
    ) -> Result<(), TimerError> {
        self.registry.create(id, duration, message).await
    }

    pub async fn pause_all_timers(&self) {
        self.registry.pause_all().await;
    }

    pub async fn resume_all_timers(&self) {
        self.registry.resume_all().await;
    }

    pub async fn cancel_timer(&self, id: &str) {
        self.registry.cancel(id).await;
    }

    pub fn subscribe_timer_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.registry.subscribe()
    }

    pub fn subscribe_system_events(&self) -> broadcast::Receiver<SystemEvent> {
        self.registry.subscribe_system_events()
    }

    /// The underlying registry, for callers that need the per-timer
    /// pause/resume primitives.
    pub fn registry(&self) -> &TimerRegistry {
        &self.registry
    }

    // --- Recents ---

    /// Marks a workout snapshot as just-used.
    pub async fn touch_recent(&self, workout: Workout) {
        self.recents.lock().await.enqueue(workout);
    }

    /// Resolves `name` through the store and marks the stored workout as
    /// just-used. Surfaces `NotFound` for unknown names and leaves the queue
    /// unchanged in that case.
    pub async fn touch_recent_by_name(&self, name: &str) -> Result<(), StoreError> {
        let workout = self.store.read_workout(name)?;
        self.recents.lock().await.enqueue(workout);
        Ok(())
    }

    /// Recently used workouts, most-recent first.
    pub async fn list_recents(&self) -> Vec<Workout> {
        self.recents.lock().await.to_snapshot()
    }

    /// The underlying store, for workout/exercise CRUD.
    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }
}
