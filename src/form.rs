use crate::workout::{Coordinates, Workout, WorkoutKind};
use thiserror::Error;

/// What the form hands over on submit. `raw_extra` is cadence (spm) for
/// running and elevation gain (m) for cycling.
#[derive(Clone, Debug)]
pub struct FormInput {
    pub kind: WorkoutKind,
    pub raw_distance: String,
    pub raw_duration: String,
    pub raw_extra: String,
}

impl FormInput {
    pub fn new(kind: WorkoutKind, distance: &str, duration: &str, extra: &str) -> Self {
        Self {
            kind,
            raw_distance: distance.to_string(),
            raw_duration: duration.to_string(),
            raw_extra: extra.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0}")]
    InvalidInput(String),
}

/// Turn raw form fields plus a map coordinate into a typed workout.
///
/// Distance and duration must be positive finite numbers for both kinds.
/// Cadence must be positive for running; elevation gain only has to be
/// finite — descents are allowed. No side effects on success: the caller
/// decides what to do with the record.
pub fn create_workout(
    kind: WorkoutKind,
    coordinates: Coordinates,
    raw_distance: &str,
    raw_duration: &str,
    raw_extra: &str,
) -> Result<Workout, InputError> {
    let distance_km = parse_positive("distance", raw_distance)?;
    let duration_min = parse_positive("duration", raw_duration)?;

    match kind {
        WorkoutKind::Running => {
            let cadence_spm = parse_positive("cadence", raw_extra)?;
            Ok(Workout::running(
                coordinates,
                distance_km,
                duration_min,
                cadence_spm,
            ))
        }
        WorkoutKind::Cycling => {
            let elevation_gain_m = parse_finite("elevation gain", raw_extra)?;
            Ok(Workout::cycling(
                coordinates,
                distance_km,
                duration_min,
                elevation_gain_m,
            ))
        }
    }
}

fn parse_finite(field: &str, raw: &str) -> Result<f64, InputError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::InvalidInput(format!("{field} must be a number")))
}

fn parse_positive(field: &str, raw: &str) -> Result<f64, InputError> {
    let value = parse_finite(field, raw)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(InputError::InvalidInput(format!(
            "{field} must be a positive number"
        )))
    }
}
