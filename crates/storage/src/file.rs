//! File-backed persistence.
//!
//! Settings live in a single JSON document; the workout log is a JSON
//! lines file that is only ever appended to.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use liftcoach_domain::{
    LogRow, ReadError, Settings, SettingsRepository, StorageError, WorkoutLogRepository,
    WriteError,
};
use log::debug;
use tokio::io::AsyncWriteExt;

const SETTINGS_FILE: &str = "settings.json";
const WORKOUT_LOG_FILE: &str = "workout_log.jsonl";

pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn default_dir() -> Result<PathBuf, StorageError> {
        dirs::data_dir()
            .map(|dir| dir.join("liftcoach"))
            .ok_or_else(|| {
                StorageError::Inaccessible("could not determine data directory".to_string())
            })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    fn log_path(&self) -> PathBuf {
        self.dir.join(WORKOUT_LOG_FILE)
    }

    async fn ensure_dir(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| StorageError::Inaccessible(err.to_string()))
    }
}

impl SettingsRepository for FileStorage {
    async fn read_settings(&self) -> Result<Settings, ReadError> {
        match tokio::fs::read(self.settings_path()).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| ReadError::Malformed(err.to_string())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Settings::default()),
            Err(err) => Err(StorageError::Inaccessible(err.to_string()).into()),
        }
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), WriteError> {
        self.ensure_dir().await?;
        let bytes = serde_json::to_vec_pretty(&settings)
            .map_err(|err| WriteError::Malformed(err.to_string()))?;
        tokio::fs::write(self.settings_path(), bytes)
            .await
            .map_err(|err| StorageError::Inaccessible(err.to_string()).into())
    }
}

impl WorkoutLogRepository for FileStorage {
    async fn append_rows(&self, rows: Vec<LogRow>) -> Result<(), WriteError> {
        self.ensure_dir().await?;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path())
            .await
            .map_err(|err| StorageError::Inaccessible(err.to_string()))?;

        let mut buffer = String::new();
        for row in rows {
            let line = serde_json::to_string(&row)
                .map_err(|err| WriteError::Malformed(err.to_string()))?;
            buffer.push_str(&line);
            buffer.push('\n');
        }
        file.write_all(buffer.as_bytes())
            .await
            .map_err(|err| StorageError::Inaccessible(err.to_string()).into())
    }

    async fn read_recent(&self, limit: usize) -> Result<Vec<LogRow>, ReadError> {
        let content = match tokio::fs::read_to_string(self.log_path()).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StorageError::Inaccessible(err.to_string()).into()),
        };

        // A partially written trailing line must not hide the rest of the
        // history.
        let rows = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<LogRow>(line) {
                Ok(row) => Some(row),
                Err(err) => {
                    debug!("skipping malformed log line: {err}");
                    None
                }
            })
            .collect::<Vec<_>>();

        let skip = rows.len().saturating_sub(limit);
        Ok(rows.into_iter().skip(skip).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use liftcoach_domain::{Name, Reps, Sets, Weight};
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(hour: u32, exercise: &str) -> LogRow {
        LogRow {
            time: Utc.with_ymd_and_hms(2024, 2, 1, hour, 0, 0).unwrap(),
            exercise: Name::new(exercise).unwrap(),
            weight: Weight::new(80.0).unwrap(),
            reps: Reps::new(10).unwrap(),
            sets: Sets::new(3).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_read_settings_defaults_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(
            storage.read_settings().await.unwrap(),
            Settings::default()
        );
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let settings = Settings {
            session_counter: 11,
            ..Settings::default()
        };
        storage.write_settings(settings.clone()).await.unwrap();

        assert_eq!(storage.read_settings().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_read_settings_rejects_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        tokio::fs::write(storage.settings_path(), b"not json")
            .await
            .unwrap();

        assert!(matches!(
            storage.read_settings().await,
            Err(ReadError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_read_recent_empty_without_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.read_recent(10).await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_append_is_cumulative_and_ordered() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage
            .append_rows(vec![row(8, "Bench Press"), row(9, "Squat")])
            .await
            .unwrap();
        storage.append_rows(vec![row(10, "Deadlift")]).await.unwrap();

        assert_eq!(
            storage.read_recent(10).await.unwrap(),
            vec![row(8, "Bench Press"), row(9, "Squat"), row(10, "Deadlift")]
        );
    }

    #[tokio::test]
    async fn test_read_recent_returns_only_the_latest_rows() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage
            .append_rows((0..8).map(|hour| row(hour, "Squat")).collect())
            .await
            .unwrap();

        let recent = storage.read_recent(3).await.unwrap();
        assert_eq!(recent, vec![row(5, "Squat"), row(6, "Squat"), row(7, "Squat")]);
    }

    #[tokio::test]
    async fn test_read_recent_skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.append_rows(vec![row(8, "Bench Press")]).await.unwrap();
        let mut content = tokio::fs::read_to_string(storage.log_path()).await.unwrap();
        content.push_str("{truncated\n");
        tokio::fs::write(storage.log_path(), content).await.unwrap();
        storage.append_rows(vec![row(9, "Squat")]).await.unwrap();

        assert_eq!(
            storage.read_recent(10).await.unwrap(),
            vec![row(8, "Bench Press"), row(9, "Squat")]
        );
    }
}
