//! Value types for workout and exercise records.
//!
//! These are plain data snapshots. Structural equality (`PartialEq`) is the
//! contract the recents queue relies on for deduplication, and the serde
//! derives define the on-disk JSON shape (camelCase field names, matching
//! the records the request layer exchanges).

use serde::{Deserialize, Serialize};

/// One timed segment of a workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub name: String,
    /// Length of the round in whole seconds.
    pub time: u64,
}

/// A named sequence of rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub name: String,
    pub rounds: Vec<Round>,
}

/// A single exercise record, stored independently of workouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    /// Working time per set, in seconds.
    pub duration: u64,
    /// Rest between sets, in seconds.
    pub break_time: u64,
    pub reps: u32,
    pub sets: u32,
}
