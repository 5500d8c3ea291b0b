use chrono::Utc;
use log::{debug, error, info};

use crate::{
    Lift, LogRow, ReadError, Session, Settings, WriteError,
    cycle,
    generator::{PlanProvider, PlanSource},
    log::WorkoutLogRepository,
    plan, prompt,
    settings::SettingsRepository,
};

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func.await;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
}

/// Orchestrates one user interaction: planner → prompt → generator →
/// extractor, and the append-only logging that ends a session.
pub struct Service<R, P> {
    repository: R,
    provider: P,
}

impl<R, P> Service<R, P>
where
    R: SettingsRepository + WorkoutLogRepository,
    P: PlanProvider,
{
    pub fn new(repository: R, provider: P) -> Self {
        Self {
            repository,
            provider,
        }
    }

    /// Generates today's menu and returns it as a working session.
    ///
    /// The cycle position is read from the persisted session counter; the
    /// counter is not advanced until the session is logged.
    pub async fn plan_session(&self, lift: Lift, body_parts: &[String]) -> Result<Session, ReadError> {
        let settings = log_on_error!(self.repository.read_settings(), "read", "settings")?;
        let step = cycle::plan_for(settings.session_counter);
        let target_weight = step.target_weight(settings.one_rep_max(lift));
        let prompt = prompt::build(&settings, lift, &step, target_weight, body_parts);
        let fallback = plan::fallback_line(lift, &step, target_weight);

        let generated = self.provider.provide(&prompt, fallback).await;
        match &generated.source {
            PlanSource::Generated { model } => debug!("plan generated by {model}"),
            PlanSource::Fallback => info!("all generators failed, using fallback plan"),
        }

        Ok(Session::new(generated))
    }

    /// Appends the session's rows to the workout log and advances the
    /// session counter. Returns the new counter value.
    pub async fn log_session(&self, session: &Session) -> Result<u32, WriteError> {
        let rows = session.log_rows(Utc::now());
        if rows.is_empty() {
            debug!("logging session without entries");
        } else {
            log_on_error!(self.repository.append_rows(rows), "append to", "workout log")?;
        }

        let mut settings = self.repository.read_settings().await?;
        settings.session_counter += 1;
        let counter = settings.session_counter;
        log_on_error!(self.repository.write_settings(settings), "write", "settings")?;
        Ok(counter)
    }

    pub async fn recent_history(&self, limit: usize) -> Result<Vec<LogRow>, ReadError> {
        log_on_error!(self.repository.read_recent(limit), "read", "workout log")
    }

    pub async fn get_settings(&self) -> Result<Settings, ReadError> {
        log_on_error!(self.repository.read_settings(), "read", "settings")
    }

    pub async fn set_settings(&self, settings: Settings) -> Result<(), WriteError> {
        log_on_error!(self.repository.write_settings(settings), "write", "settings")
    }
}
