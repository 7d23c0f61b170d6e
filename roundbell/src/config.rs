//! Defines the configuration structure for the Roundbell service.
//!
//! The struct is designed to be deserialized from a configuration file
//! (e.g., a TOML file) using `serde`. Every field carries a default, so the
//! service runs with no file present at all.

use serde::Deserialize;
use std::path::PathBuf;

/// The top-level configuration for the Roundbell service.
#[derive(Debug, Clone, Deserialize)]
pub struct RoundbellConfig {
    /// Directory holding one JSON file per workout.
    #[serde(default = "default_workout_dir")]
    pub workout_dir: PathBuf,

    /// Directory holding one JSON file per exercise.
    #[serde(default = "default_exercise_dir")]
    pub exercise_dir: PathBuf,

    /// File the recents snapshot is persisted to.
    #[serde(default = "default_recents_path")]
    pub recents_path: PathBuf,

    /// Capacity of the recents queue.
    #[serde(default = "default_recents_max")]
    pub recents_max: usize,

    /// Capacity of the timer event broadcast channel.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl RoundbellConfig {
    /// Loads the configuration from `roundbell.toml` in the working
    /// directory (if present), with `ROUNDBELL_*` environment variables
    /// layered on top.
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("roundbell").required(false))
            .add_source(config::Environment::with_prefix("ROUNDBELL"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

// --- Default value functions for serde ---

fn default_workout_dir() -> PathBuf {
    PathBuf::from("./workouts")
}

fn default_exercise_dir() -> PathBuf {
    PathBuf::from("./exercises")
}

fn default_recents_path() -> PathBuf {
    PathBuf::from("./recents.json")
}

fn default_recents_max() -> usize {
    10
}

fn default_channel_capacity() -> usize {
    64
}

impl Default for RoundbellConfig {
    fn default() -> Self {
        Self {
            workout_dir: default_workout_dir(),
            exercise_dir: default_exercise_dir(),
            recents_path: default_recents_path(),
            recents_max: default_recents_max(),
            channel_capacity: default_channel_capacity(),
        }
    }
}
