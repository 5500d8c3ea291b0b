#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod cycle;
pub mod error;
pub mod generator;
pub mod log;
pub mod name;
pub mod plan;
pub mod prompt;
pub mod quantity;
pub mod service;
pub mod session;
pub mod settings;

pub use crate::cycle::{CycleStep, plan_for};
pub use crate::error::{ReadError, StorageError, WriteError};
pub use crate::generator::{GenerateError, GeneratedPlan, Generator, PlanProvider, PlanSource};
pub use crate::log::{LogRow, WorkoutLogRepository};
pub use crate::name::{Name, NameError};
pub use crate::plan::{Entries, ExerciseEntry, Field, extract, fallback_line};
pub use crate::quantity::{Reps, RepsError, Sets, SetsError, Weight, WeightError};
pub use crate::service::Service;
pub use crate::session::{Session, SessionError};
pub use crate::settings::{Lift, LiftError, Settings, SettingsRepository};
