use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ReadError, Weight, WriteError};

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, ReadError>;
    async fn write_settings(&self, settings: Settings) -> Result<(), WriteError>;
}

/// User-editable configuration consumed by the planner and the prompt.
///
/// The session counter increments once per logged session and selects the
/// position within the intensity cycle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub bench_max: Weight,
    pub squat_max: Weight,
    pub deadlift_max: Weight,
    pub session_counter: u32,
    pub knowledge_base: String,
    pub custom_constraints: String,
}

impl Settings {
    #[must_use]
    pub fn one_rep_max(&self, lift: Lift) -> Weight {
        match lift {
            Lift::Bench => self.bench_max,
            Lift::Squat => self.squat_max,
            Lift::Deadlift => self.deadlift_max,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bench_max: Weight(103.5),
            squat_max: Weight(168.8),
            deadlift_max: Weight(150.0),
            session_counter: 0,
            knowledge_base: String::from(
                "For hypertrophy rest 3 minutes between sets, open with a compound \
                 lift and increase weekly volume progressively.",
            ),
            custom_constraints: String::from(
                "After heavy work finish with an isolation exercise for a pump. \
                 Add abs at the end.",
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lift {
    Bench,
    Squat,
    Deadlift,
}

impl fmt::Display for Lift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Lift::Bench => "Bench Press",
                Lift::Squat => "Squat",
                Lift::Deadlift => "Deadlift",
            }
        )
    }
}

impl TryFrom<&str> for Lift {
    type Error = LiftError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "bench" | "bench press" => Ok(Lift::Bench),
            "squat" => Ok(Lift::Squat),
            "deadlift" => Ok(Lift::Deadlift),
            _ => Err(LiftError::Unknown(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LiftError {
    #[error("Unknown lift: {0} (expected bench, squat or deadlift)")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Lift::Bench, Weight(103.5))]
    #[case(Lift::Squat, Weight(168.8))]
    #[case(Lift::Deadlift, Weight(150.0))]
    fn test_one_rep_max(#[case] lift: Lift, #[case] expected: Weight) {
        assert_eq!(Settings::default().one_rep_max(lift), expected);
    }

    #[rstest]
    #[case("bench", Ok(Lift::Bench))]
    #[case("Bench Press", Ok(Lift::Bench))]
    #[case("  SQUAT ", Ok(Lift::Squat))]
    #[case("deadlift", Ok(Lift::Deadlift))]
    #[case("curl", Err(LiftError::Unknown("curl".to_string())))]
    fn test_lift_from_str(#[case] input: &str, #[case] expected: Result<Lift, LiftError>) {
        assert_eq!(Lift::try_from(input), expected);
    }

    #[test]
    fn test_settings_serde_round_trip() {
        let settings = Settings {
            session_counter: 7,
            ..Settings::default()
        };
        let serialized = serde_json::to_string(&settings).unwrap();
        assert_eq!(
            serde_json::from_str::<Settings>(&serialized).unwrap(),
            settings
        );
    }
}
