use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};

/// Load in kilograms, restricted to the resolution of common plate math.
#[derive(
    Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd, Serialize, Deserialize,
)]
pub struct Weight(pub(crate) f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }

    /// Rounds to one decimal place before validating, the way prescribed
    /// loads are derived from a one-rep max.
    pub fn rounded(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() {
            return Err(WeightError::OutOfRange);
        }
        Self::new((value * 10.0).round() / 10.0)
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(
    Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Reps(pub(crate) u32);

impl Reps {
    /// Substitute used when a plan text carries no readable rep count.
    pub const DEFAULT: Reps = Reps(10);

    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl Default for Reps {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(
    Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Sets(pub(crate) u32);

impl Sets {
    /// Substitute used when a plan text carries no readable set count.
    pub const DEFAULT: Sets = Sets(3);

    pub fn new(value: u32) -> Result<Self, SetsError> {
        if !(1..100).contains(&value) {
            return Err(SetsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl Default for Sets {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<&str> for Sets {
    type Error = SetsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Sets::new(parsed_value),
            Err(_) => Err(SetsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetsError {
    #[error("Sets must be in the range 1 to 99")]
    OutOfRange,
    #[error("Sets must be an integer")]
    ParseError,
}
