//! Defines the event types broadcast by the timer registry.
//!
//! Observers subscribe to these streams to react to expirations and registry
//! state changes. Delivery is best-effort fan-out: a send with no receivers
//! is not an error, and lagging receivers miss events rather than block the
//! registry.

/// Delivered to every subscribed observer when a timer elapses.
#[derive(Debug, Clone)]
pub enum TimerEvent {
    /// A countdown reached its deadline. `message` is the opaque payload
    /// supplied when the timer was created.
    Fired { id: String, message: String },
}

/// Events describing registry state changes, useful for logging and
/// introspection.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// A new timer was registered.
    TimerCreated { id: String },
    /// A timer was removed before its deadline.
    TimerCancelled { id: String },
    /// A bulk pause transitioned `count` running timers to paused.
    TimersPaused { count: usize },
    /// A bulk resume transitioned `count` paused timers back to running.
    TimersResumed { count: usize },
}
