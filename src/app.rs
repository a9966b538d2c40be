use crate::form::{self, FormInput, InputError};
use crate::persist::{BlobStore, LoadError, SaveError, WorkoutLog};
use crate::store::{StoreError, WorkoutStore};
use crate::workout::{Coordinates, Workout, WorkoutKind};
use std::io;
use thiserror::Error;

/// Zoom level used whenever the map is recentered.
pub const DEFAULT_ZOOM: u8 = 13;

/// Source of the user's starting position.
pub trait GeolocationProvider {
    fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unable to get your position")]
pub struct GeolocationError;

/// Opaque rendering surface for markers and view changes. The real widget
/// lives outside this crate; tests plug in a recording fake.
pub trait MapView {
    fn add_marker(&mut self, coordinates: Coordinates, popup_content: &str, style_class: &str);
    fn recenter(&mut self, coordinates: Coordinates, zoom: u8);
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("pick a point on the map first")]
    NoPendingLocation,
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Application state: the map handle, the last clicked coordinate, the
/// canonical workout list and its persistence. One logical thread of
/// control; every operation runs to completion within its call.
#[derive(Debug)]
pub struct App<M: MapView, B: BlobStore> {
    map: M,
    log: WorkoutLog<B>,
    workouts: WorkoutStore,
    pending_click: Option<Coordinates>,
    default_zoom: u8,
}

impl<M: MapView, B: BlobStore> App<M, B> {
    pub fn new(map: M, log: WorkoutLog<B>) -> Self {
        Self {
            map,
            log,
            workouts: WorkoutStore::new(),
            pending_click: None,
            default_zoom: DEFAULT_ZOOM,
        }
    }

    /// Restore the persisted workout list at startup and render a marker per
    /// record. Missing data is normal; unreadable data logs a warning and
    /// leaves the store empty. Neither propagates.
    pub fn hydrate(&mut self) {
        match self.log.load() {
            Ok(records) => {
                if let Err(err) = self.workouts.replace(records) {
                    tracing::warn!(%err, "ignoring saved workouts");
                    return;
                }
                for workout in self.workouts.all() {
                    render_marker(&mut self.map, workout);
                }
                tracing::info!(count = self.workouts.len(), "restored saved workouts");
            }
            Err(LoadError::EmptyOrAbsent) => {
                tracing::debug!("no saved workouts");
            }
            Err(LoadError::Malformed(msg)) => {
                tracing::warn!(%msg, "saved workouts unreadable, starting empty");
            }
        }
    }

    /// Center the map on the user's current position.
    pub fn locate<G: GeolocationProvider>(&mut self, geo: &G) -> Result<(), GeolocationError> {
        let position = geo.current_position()?;
        self.map.recenter(position, self.default_zoom);
        Ok(())
    }

    /// A map click picks the coordinate the next submitted workout is pinned
    /// to. Showing the form is the UI's business.
    pub fn on_map_click(&mut self, coordinates: Coordinates) {
        self.pending_click = Some(coordinates);
    }

    pub fn pending_click(&self) -> Option<Coordinates> {
        self.pending_click
    }

    /// Handle a form submission: validate, construct, render, append, save.
    /// Validation failures keep the pending coordinate so the user can fix
    /// the form and retry. Returns the created record.
    pub fn submit(&mut self, input: &FormInput) -> Result<Workout, SubmitError> {
        let coordinates = self.pending_click.ok_or(SubmitError::NoPendingLocation)?;
        let workout = form::create_workout(
            input.kind,
            coordinates,
            &input.raw_distance,
            &input.raw_duration,
            &input.raw_extra,
        )?;

        render_marker(&mut self.map, &workout);
        let record = workout.clone();
        self.workouts.append(workout)?;
        self.log.save(&self.workouts)?;
        self.pending_click = None;
        Ok(record)
    }

    /// Recenter the map on a listed workout. Unknown ids are a no-op, same
    /// as clicking dead space in the sidebar.
    pub fn select(&mut self, id: &str) {
        if let Some(workout) = self.workouts.find_by_id(id) {
            self.map.recenter(workout.coordinates(), self.default_zoom);
        }
    }

    /// Drop everything, in memory and on disk. The original app reloads the
    /// page right after; here the shell decides what restart means.
    pub fn reset(&mut self) -> io::Result<()> {
        self.workouts.clear();
        self.log.reset()
    }

    pub fn workouts(&self) -> &[Workout] {
        self.workouts.all()
    }

    pub fn map(&self) -> &M {
        &self.map
    }
}

fn render_marker<M: MapView>(map: &mut M, workout: &Workout) {
    let icon = match workout.kind() {
        WorkoutKind::Running => "🏃‍♂️",
        WorkoutKind::Cycling => "🚴‍♀️",
    };
    let popup = format!("{icon} {}", workout.description());
    let style_class = format!("{}-popup", workout.kind());
    map.add_marker(workout.coordinates(), &popup, &style_class);
}
