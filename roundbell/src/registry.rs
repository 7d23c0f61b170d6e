//! The timer registry: named, pausable countdown timers with expiry
//! broadcast.
//!
//! Every mutation and every expiry callback serializes through one
//! `tokio::sync::Mutex` around the entry map. The registry is designed to be
//! cloned and shared across tasks, providing a handle to the running
//! instance.

use crate::error::TimerError;
use crate::events::{SystemEvent, TimerEvent};
use crate::time::Clock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Full state of one countdown.
///
/// Exactly one of {a pending expiry task, `paused == true`} holds at any
/// time. `remaining` is authoritative only while paused; `epoch` is bumped
/// on every pause so an expiry task that already woke can never fire against
/// a paused entry.
struct TimerEntry {
    message: String,
    started_at: Instant,
    deadline: Instant,
    remaining: Duration,
    paused: bool,
    epoch: u64,
    expiry: Option<AbortHandle>,
}

/// The set of active countdown timers, keyed by caller-supplied id.
#[derive(Clone)]
pub struct TimerRegistry {
    timers: Arc<Mutex<HashMap<String, TimerEntry>>>,
    epochs: Arc<AtomicU64>,
    timer_event_sender: broadcast::Sender<TimerEvent>,
    system_event_sender: broadcast::Sender<SystemEvent>,
    clock: Clock,
}

impl TimerRegistry {
    /// Creates an empty registry whose fired-timer channel holds up to
    /// `channel_capacity` undelivered events per receiver.
    pub fn new(channel_capacity: usize) -> Self {
        let (timer_event_sender, _) = broadcast::channel(channel_capacity);
        let (system_event_sender, _) = broadcast::channel(64);
        Self {
            timers: Arc::new(Mutex::new(HashMap::new())),
            epochs: Arc::new(AtomicU64::new(0)),
            timer_event_sender,
            system_event_sender,
            clock: Clock::new(),
        }
    }

    /// Registers a new countdown that will broadcast `message` when
    /// `duration` elapses.
    ///
    /// Fails with `DuplicateTimer` if `id` is already registered (the
    /// existing entry is untouched) and with `InvalidArgument` for an empty
    /// id or a zero duration.
    pub async fn create(
        &self,
        id: &str,
        duration: Duration,
        message: &str,
    ) -> Result<(), TimerError> {
        if id.is_empty() {
            return Err(TimerError::InvalidArgument(
                "timer id must not be empty".to_string(),
            ));
        }
        if duration.is_zero() {
            return Err(TimerError::InvalidArgument(
                "timer duration must be positive".to_string(),
            ));
        }

        let mut timers = self.timers.lock().await;
        if timers.contains_key(id) {
            return Err(TimerError::DuplicateTimer(id.to_string()));
        }

        let now = self.clock.now();
        let deadline = now + duration;
        let epoch = self.next_epoch();
        let expiry = self.spawn_expiry(id.to_string(), epoch, deadline);
        timers.insert(
            id.to_string(),
            TimerEntry {
                message: message.to_string(),
                started_at: now,
                deadline,
                remaining: duration,
                paused: false,
                epoch,
                expiry: Some(expiry),
            },
        );
        drop(timers);

        debug!(id, ?duration, "timer created");
        self.system_event_sender
            .send(SystemEvent::TimerCreated { id: id.to_string() })
            .ok();
        Ok(())
    }

    /// Pauses one timer. Idempotent for already-paused entries; a no-op for
    /// absent ids.
    pub async fn pause(&self, id: &str) {
        let now = self.clock.now();
        let mut timers = self.timers.lock().await;
        if let Some(entry) = timers.get_mut(id) {
            if self.pause_entry(entry, now) {
                trace!(id, remaining = ?entry.remaining, "timer paused");
            }
        }
    }

    /// Resumes one timer, re-basing its deadline from the stored remaining
    /// duration. Idempotent for running entries; a no-op for absent ids.
    pub async fn resume(&self, id: &str) {
        let now = self.clock.now();
        let mut timers = self.timers.lock().await;
        if let Some(entry) = timers.get_mut(id) {
            if self.resume_entry(id, entry, now) {
                trace!(id, deadline = ?entry.deadline, "timer resumed");
            }
        }
    }

    /// Pauses every running timer as one atomic bulk transition.
    pub async fn pause_all(&self) {
        let now = self.clock.now();
        let mut timers = self.timers.lock().await;
        let mut count = 0;
        for entry in timers.values_mut() {
            if self.pause_entry(entry, now) {
                count += 1;
            }
        }
        drop(timers);

        debug!(count, "paused all running timers");
        self.system_event_sender
            .send(SystemEvent::TimersPaused { count })
            .ok();
    }

    /// Resumes every paused timer as one atomic bulk transition.
    pub async fn resume_all(&self) {
        let now = self.clock.now();
        let mut timers = self.timers.lock().await;
        let mut count = 0;
        for (id, entry) in timers.iter_mut() {
            if self.resume_entry(id, entry, now) {
                count += 1;
            }
        }
        drop(timers);

        debug!(count, "resumed all paused timers");
        self.system_event_sender
            .send(SystemEvent::TimersResumed { count })
            .ok();
    }

    /// Removes a timer and cancels its pending expiry. A no-op (not an
    /// error) if `id` is absent.
    pub async fn cancel(&self, id: &str) {
        let mut timers = self.timers.lock().await;
        if let Some(mut entry) = timers.remove(id) {
            if let Some(handle) = entry.expiry.take() {
                handle.abort();
            }
            drop(timers);

            debug!(id, "timer cancelled");
            self.system_event_sender
                .send(SystemEvent::TimerCancelled { id: id.to_string() })
                .ok();
        }
    }

    /// Time left on a timer, or `None` if `id` is absent. Exact while
    /// paused; derived from the deadline while running.
    pub async fn remaining(&self, id: &str) -> Option<Duration> {
        let timers = self.timers.lock().await;
        timers.get(id).map(|entry| {
            if entry.paused {
                entry.remaining
            } else {
                entry.deadline.saturating_duration_since(self.clock.now())
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.timers.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.timers.lock().await.is_empty()
    }

    /// Subscribes to fired-timer notifications. This is the broadcast sink
    /// observers hang off.
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.timer_event_sender.subscribe()
    }

    /// Subscribes to the `SystemEvent` stream.
    pub fn subscribe_system_events(&self) -> broadcast::Receiver<SystemEvent> {
        self.system_event_sender.subscribe()
    }
}

// Internal expiry and state-transition plumbing.
impl TimerRegistry {
    fn next_epoch(&self) -> u64 {
        self.epochs.fetch_add(1, Ordering::Relaxed)
    }

    /// Parks a task until `deadline`, then attempts to fire `id`.
    fn spawn_expiry(&self, id: String, epoch: u64, deadline: Instant) -> AbortHandle {
        let registry = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            registry.fire(&id, epoch).await;
        })
        .abort_handle()
    }

    /// Completes one expiry: removes the entry and broadcasts its message.
    ///
    /// The epoch comparison happens under the map lock, so a pause or cancel
    /// that won the lock first leaves a stale epoch behind and this call
    /// does nothing. Once the entry is observed live here, the notification
    /// always goes out, exactly once.
    async fn fire(&self, id: &str, epoch: u64) {
        let mut timers = self.timers.lock().await;
        let live = matches!(
            timers.get(id),
            Some(entry) if !entry.paused && entry.epoch == epoch
        );
        if !live {
            trace!(id, "stale expiry discarded");
            return;
        }
        if let Some(entry) = timers.remove(id) {
            drop(timers);
            debug!(id, elapsed = ?entry.started_at.elapsed(), "timer fired");
            self.timer_event_sender
                .send(TimerEvent::Fired {
                    id: id.to_string(),
                    message: entry.message,
                })
                .ok();
        }
    }

    /// Caller must hold the map lock. Returns whether a transition happened.
    fn pause_entry(&self, entry: &mut TimerEntry, now: Instant) -> bool {
        if entry.paused {
            return false;
        }
        if let Some(handle) = entry.expiry.take() {
            handle.abort();
        }
        // Invalidate any expiry task that already woke and is waiting on the
        // lock behind us.
        entry.epoch = self.next_epoch();
        entry.remaining = entry.deadline.saturating_duration_since(now);
        entry.paused = true;
        true
    }

    /// Caller must hold the map lock. Returns whether a transition happened.
    fn resume_entry(&self, id: &str, entry: &mut TimerEntry, now: Instant) -> bool {
        if !entry.paused {
            return false;
        }
        entry.deadline = now + entry.remaining;
        entry.paused = false;
        entry.expiry = Some(self.spawn_expiry(id.to_string(), entry.epoch, entry.deadline));
        true
    }
}
