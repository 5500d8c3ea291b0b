//! Working state of one planning-to-logging cycle.

use chrono::{DateTime, Utc};

use crate::{
    ExerciseEntry, LogRow,
    generator::{GeneratedPlan, PlanSource},
    plan,
};

/// The entries extracted from one generated plan, held between planning
/// and logging. Entries are only mutated through [`Session::replace_entry`]
/// (the user edit path) and are discarded once the session is logged.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    plan_text: String,
    source: PlanSource,
    entries: Vec<ExerciseEntry>,
}

impl Session {
    #[must_use]
    pub fn new(generated: GeneratedPlan) -> Self {
        let entries = plan::extract(&generated.text).collect();
        Self {
            plan_text: generated.text,
            source: generated.source,
            entries,
        }
    }

    #[must_use]
    pub fn plan_text(&self) -> &str {
        &self.plan_text
    }

    #[must_use]
    pub fn source(&self) -> &PlanSource {
        &self.source
    }

    #[must_use]
    pub fn entries(&self) -> &[ExerciseEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn replace_entry(&mut self, index: usize, entry: ExerciseEntry) -> Result<(), SessionError> {
        if index >= self.entries.len() {
            return Err(SessionError::NoSuchEntry(index));
        }
        self.entries[index] = entry;
        Ok(())
    }

    /// Rows to append to the workout log, all stamped with `time`.
    #[must_use]
    pub fn log_rows(&self, time: DateTime<Utc>) -> Vec<LogRow> {
        self.entries
            .iter()
            .map(|entry| LogRow {
                time,
                exercise: entry.name.clone(),
                weight: entry.weight,
                reps: entry.reps,
                sets: entry.sets,
            })
            .collect()
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("no entry at index {0}")]
    NoSuchEntry(usize),
}
