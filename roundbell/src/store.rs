//! JSON file persistence for workouts, exercises and the recents snapshot.
//!
//! One file per record, named `<record>.json`, under the configured
//! directories. All access is synchronous; callers reach in at startup,
//! shutdown and per-request.

use crate::error::StoreError;
use crate::recents::RecentsQueue;
use crate::workout::{Exercise, Workout};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const RECORD_EXT: &str = ".json";

/// The persistence gateway: file-backed storage for workout and exercise
/// records plus the recents snapshot.
#[derive(Debug)]
pub struct WorkoutStore {
    workout_dir: PathBuf,
    exercise_dir: PathBuf,
    recents_path: PathBuf,
}

impl WorkoutStore {
    /// Opens the store, creating the storage directories if needed.
    pub fn open(
        workout_dir: impl Into<PathBuf>,
        exercise_dir: impl Into<PathBuf>,
        recents_path: impl Into<PathBuf>,
    ) -> Result<Self, StoreError> {
        let workout_dir = workout_dir.into();
        let exercise_dir = exercise_dir.into();
        let recents_path = recents_path.into();

        fs::create_dir_all(&workout_dir)?;
        fs::create_dir_all(&exercise_dir)?;
        if let Some(parent) = recents_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self {
            workout_dir,
            exercise_dir,
            recents_path,
        })
    }

    // --- Workout records ---

    /// Writes a workout record, overwriting any existing file of that name.
    pub fn write_workout(&self, workout: &Workout) -> Result<(), StoreError> {
        let path = record_path(&self.workout_dir, &workout.name)?;
        fs::write(&path, serde_json::to_vec_pretty(workout)?)?;
        Ok(())
    }

    /// Reads a workout record by name.
    pub fn read_workout(&self, name: &str) -> Result<Workout, StoreError> {
        let path = record_path(&self.workout_dir, name)?;
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(serde_json::from_slice(&fs::read(&path)?)?)
    }

    /// Deletes a workout record. A no-op if the record is absent.
    pub fn delete_workout(&self, name: &str) -> Result<(), StoreError> {
        let path = record_path(&self.workout_dir, name)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    pub fn has_workout(&self, name: &str) -> bool {
        record_path(&self.workout_dir, name)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Names of every stored workout, in directory order.
    pub fn list_workout_names(&self) -> Result<Vec<String>, StoreError> {
        list_record_names(&self.workout_dir)
    }

    // --- Exercise records ---

    pub fn write_exercise(&self, exercise: &Exercise) -> Result<(), StoreError> {
        let path = record_path(&self.exercise_dir, &exercise.name)?;
        fs::write(&path, serde_json::to_vec_pretty(exercise)?)?;
        Ok(())
    }

    pub fn read_exercise(&self, name: &str) -> Result<Exercise, StoreError> {
        let path = record_path(&self.exercise_dir, name)?;
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(serde_json::from_slice(&fs::read(&path)?)?)
    }

    pub fn delete_exercise(&self, name: &str) -> Result<(), StoreError> {
        let path = record_path(&self.exercise_dir, name)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    pub fn has_exercise(&self, name: &str) -> bool {
        record_path(&self.exercise_dir, name)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Loads every stored exercise record.
    pub fn all_exercises(&self) -> Result<Vec<Exercise>, StoreError> {
        let mut exercises = Vec::new();
        for name in list_record_names(&self.exercise_dir)? {
            exercises.push(self.read_exercise(&name)?);
        }
        Ok(exercises)
    }

    // --- Recents snapshot ---

    /// Loads the persisted recents list into a queue of capacity `max`.
    /// A missing snapshot is an empty queue, not an error.
    pub fn load_recents(&self, max: usize) -> Result<RecentsQueue, StoreError> {
        if !self.recents_path.exists() {
            return Ok(RecentsQueue::new(max));
        }
        let items: Vec<Workout> = serde_json::from_slice(&fs::read(&self.recents_path)?)?;
        Ok(RecentsQueue::from_snapshot(max, items))
    }

    /// Persists the recents queue, front-to-back.
    pub fn save_recents(&self, recents: &RecentsQueue) -> Result<(), StoreError> {
        fs::write(
            &self.recents_path,
            serde_json::to_vec(&recents.to_snapshot())?,
        )?;
        Ok(())
    }
}

/// Maps a record name to its file path, rejecting names that are empty or
/// would escape the storage directory.
fn record_path(dir: &Path, name: &str) -> Result<PathBuf, StoreError> {
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(dir.join(format!("{name}{RECORD_EXT}")))
}

fn list_record_names(dir: &Path) -> Result<Vec<String>, StoreError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            warn!(path = ?entry.path(), "skipping record with non-utf8 name");
            continue;
        };
        if let Some(name) = file_name.strip_suffix(RECORD_EXT) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::Round;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> WorkoutStore {
        WorkoutStore::open(
            dir.path().join("workouts"),
            dir.path().join("exercises"),
            dir.path().join("recents.json"),
        )
        .unwrap()
    }

    fn sample_workout(name: &str) -> Workout {
        Workout {
            name: name.to_string(),
            rounds: vec![Round {
                name: "burpees".to_string(),
                time: 45,
            }],
        }
    }

    #[test]
    fn workout_records_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let workout = sample_workout("hiit");

        store.write_workout(&workout).unwrap();
        assert!(store.has_workout("hiit"));
        assert_eq!(store.read_workout("hiit").unwrap(), workout);
        assert_eq!(store.list_workout_names().unwrap(), vec!["hiit"]);

        store.delete_workout("hiit").unwrap();
        assert!(!store.has_workout("hiit"));
    }

    #[test]
    fn reading_a_missing_workout_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(matches!(
            store.read_workout("nope"),
            Err(StoreError::NotFound(name)) if name == "nope"
        ));
    }

    #[test]
    fn deleting_a_missing_workout_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store.delete_workout("nope").unwrap();
    }

    #[test]
    fn names_with_path_separators_are_rejected() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        for bad in ["", "../escape", "a/b", "a\\b"] {
            assert!(matches!(
                store.read_workout(bad),
                Err(StoreError::InvalidName(_))
            ));
        }
    }

    #[test]
    fn exercise_records_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        let exercise = Exercise {
            name: "squats".to_string(),
            duration: 60,
            break_time: 30,
            reps: 12,
            sets: 3,
        };

        store.write_exercise(&exercise).unwrap();
        assert!(store.has_exercise("squats"));
        assert_eq!(store.read_exercise("squats").unwrap(), exercise);
        assert_eq!(store.all_exercises().unwrap(), vec![exercise]);

        store.delete_exercise("squats").unwrap();
        assert!(!store.has_exercise("squats"));
    }

    #[test]
    fn recents_snapshot_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let mut recents = RecentsQueue::new(3);
        recents.enqueue(sample_workout("a"));
        recents.enqueue(sample_workout("b"));
        store.save_recents(&recents).unwrap();

        let restored = store.load_recents(3).unwrap();
        assert_eq!(restored.to_snapshot(), recents.to_snapshot());
    }

    #[test]
    fn missing_recents_snapshot_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(store.load_recents(5).unwrap().is_empty());
    }

    #[test]
    fn recents_load_truncates_to_capacity() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let mut recents = RecentsQueue::new(3);
        recents.enqueue(sample_workout("a"));
        recents.enqueue(sample_workout("b"));
        recents.enqueue(sample_workout("c"));
        store.save_recents(&recents).unwrap();

        let restored = store.load_recents(2).unwrap();
        assert_eq!(
            restored.to_snapshot(),
            vec![sample_workout("c"), sample_workout("b")]
        );
    }

    #[test]
    fn corrupt_recents_snapshot_is_malformed() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        fs::write(dir.path().join("recents.json"), b"not json").unwrap();
        assert!(matches!(
            store.load_recents(3),
            Err(StoreError::Malformed(_))
        ));
    }
}
