use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A latitude/longitude pair. Persisted as a two-element `[lat, lng]` array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for (f64, f64) {
    fn from(c: Coordinates) -> Self {
        (c.lat, c.lng)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Capitalized name used in descriptions ("Running on March 4").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Cycling => write!(f, "cycling"),
        }
    }
}

/// Variant-specific payload. The derived metric is computed once at
/// construction and carried alongside the base fields from then on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkoutDetails {
    #[serde(rename_all = "camelCase")]
    Running {
        cadence_spm: f64,
        pace_min_per_km: f64,
    },
    #[serde(rename_all = "camelCase")]
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

impl WorkoutDetails {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running { .. } => WorkoutKind::Running,
            Self::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// A single recorded workout. Immutable once constructed; the derived metric
/// and description are set here and restored verbatim on reload, never
/// recomputed (see `persist`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    id: String,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    description: String,
    #[serde(flatten)]
    details: WorkoutDetails,
}

impl Workout {
    /// Build a running workout. Pace is minutes per km.
    ///
    /// Inputs are not validated here; callers go through
    /// `form::create_workout` for that.
    pub fn running(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Self {
        let pace_min_per_km = duration_min / distance_km;
        Self::new(
            coordinates,
            distance_km,
            duration_min,
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            },
        )
    }

    /// Build a cycling workout. Speed is km per hour.
    pub fn cycling(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        let speed_km_per_h = distance_km / (duration_min / 60.0);
        Self::new(
            coordinates,
            distance_km,
            duration_min,
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            },
        )
    }

    fn new(
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        details: WorkoutDetails,
    ) -> Self {
        let created_at = Utc::now();
        let description = describe(details.kind(), created_at);
        let workout = Self {
            id: Uuid::new_v4().to_string(),
            created_at,
            coordinates,
            distance_km,
            duration_min,
            description,
            details,
        };
        tracing::debug!(id = %workout.id, kind = %details.kind(), "new workout: {}", workout.description);
        workout
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    /// Whether a record (typically one reconstructed from persisted data)
    /// satisfies the base invariants: finite coordinates, positive finite
    /// distance and duration, positive cadence for running, finite elevation
    /// and derived metrics.
    pub fn is_well_formed(&self) -> bool {
        let base_ok = !self.id.is_empty()
            && self.coordinates.is_finite()
            && self.distance_km.is_finite()
            && self.distance_km > 0.0
            && self.duration_min.is_finite()
            && self.duration_min > 0.0;

        let details_ok = match self.details {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => cadence_spm.is_finite() && cadence_spm > 0.0 && pace_min_per_km.is_finite(),
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => elevation_gain_m.is_finite() && speed_km_per_h.is_finite(),
        };

        base_ok && details_ok
    }
}

/// "Running on March 4" — capitalized kind, full month name, day of month.
fn describe(kind: WorkoutKind, when: DateTime<Utc>) -> String {
    format!("{} on {}", kind.label(), when.format("%B %-d"))
}
