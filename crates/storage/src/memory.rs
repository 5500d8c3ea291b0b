//! In-memory storage, used as a test double and for dry runs.

use std::sync::Mutex;

use liftcoach_domain::{
    LogRow, ReadError, Settings, SettingsRepository, StorageError, WorkoutLogRepository,
    WriteError,
};

#[derive(Default)]
pub struct MemoryStorage {
    settings: Mutex<Option<Settings>>,
    rows: Mutex<Vec<LogRow>>,
}

impl MemoryStorage {
    fn poisoned() -> StorageError {
        StorageError::Inaccessible("storage lock poisoned".to_string())
    }
}

impl SettingsRepository for MemoryStorage {
    async fn read_settings(&self) -> Result<Settings, ReadError> {
        let settings = self.settings.lock().map_err(|_| Self::poisoned())?;
        Ok(settings.clone().unwrap_or_default())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), WriteError> {
        let mut stored = self.settings.lock().map_err(|_| Self::poisoned())?;
        *stored = Some(settings);
        Ok(())
    }
}

impl WorkoutLogRepository for MemoryStorage {
    async fn append_rows(&self, rows: Vec<LogRow>) -> Result<(), WriteError> {
        let mut stored = self.rows.lock().map_err(|_| Self::poisoned())?;
        stored.extend(rows);
        Ok(())
    }

    async fn read_recent(&self, limit: usize) -> Result<Vec<LogRow>, ReadError> {
        let stored = self.rows.lock().map_err(|_| Self::poisoned())?;
        Ok(stored[stored.len().saturating_sub(limit)..].to_vec())
    }
}
