//! Append-only workout log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Name, ReadError, Reps, Sets, Weight, WriteError};

/// One logged set prescription. Rows are only ever appended; there is no
/// update or delete path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogRow {
    pub time: DateTime<Utc>,
    pub exercise: Name,
    pub weight: Weight,
    pub reps: Reps,
    pub sets: Sets,
}

#[allow(async_fn_in_trait)]
pub trait WorkoutLogRepository {
    async fn append_rows(&self, rows: Vec<LogRow>) -> Result<(), WriteError>;
    /// The most recent `limit` rows, oldest first.
    async fn read_recent(&self, limit: usize) -> Result<Vec<LogRow>, ReadError>;
}
