// End-to-end lifecycle against a real file-backed blob store: record
// workouts in one app instance, restart into a fresh instance, and check the
// persisted list comes back intact.

use assert_matches::assert_matches;
use tempfile::tempdir;

use waylog::app::{App, MapView, DEFAULT_ZOOM};
use waylog::form::FormInput;
use waylog::persist::{BlobStore, FileBlobStore, WorkoutLog, STORAGE_KEY};
use waylog::workout::{Coordinates, WorkoutDetails, WorkoutKind};

#[derive(Debug, Default)]
struct RecordingMap {
    markers: Vec<(Coordinates, String, String)>,
    recenters: Vec<(Coordinates, u8)>,
}

impl MapView for RecordingMap {
    fn add_marker(&mut self, coordinates: Coordinates, popup_content: &str, style_class: &str) {
        self.markers
            .push((coordinates, popup_content.to_string(), style_class.to_string()));
    }

    fn recenter(&mut self, coordinates: Coordinates, zoom: u8) {
        self.recenters.push((coordinates, zoom));
    }
}

fn app_at(root: &std::path::Path) -> App<RecordingMap, FileBlobStore> {
    App::new(
        RecordingMap::default(),
        WorkoutLog::new(FileBlobStore::with_root(root)),
    )
}

#[test]
fn workouts_survive_a_restart() {
    let dir = tempdir().unwrap();

    // First session: one run, one ride.
    let mut first = app_at(dir.path());
    first.hydrate();
    assert!(first.workouts().is_empty());

    first.on_map_click(Coordinates::new(44.66, -124.06776));
    let run = first
        .submit(&FormInput::new(WorkoutKind::Running, "3", "20", "178"))
        .unwrap();
    first.on_map_click(Coordinates::new(44.5655, -124.7655));
    let ride = first
        .submit(&FormInput::new(WorkoutKind::Cycling, "10", "30", "500"))
        .unwrap();

    // Second session: same data directory, fresh state.
    let mut second = app_at(dir.path());
    second.hydrate();

    let restored = second.workouts();
    assert_eq!(restored.len(), 2);
    assert_eq!(restored[0], run);
    assert_eq!(restored[1], ride);

    // Derived fields came back verbatim, one marker per record was rendered.
    assert_matches!(
        *restored[0].details(),
        WorkoutDetails::Running { pace_min_per_km, .. } if pace_min_per_km == 20.0 / 3.0
    );
    assert_matches!(
        *restored[1].details(),
        WorkoutDetails::Cycling { speed_km_per_h, .. } if speed_km_per_h == 20.0
    );
    assert_eq!(second.map().markers.len(), 2);

    // Selecting a restored workout recenters on its pin.
    second.select(run.id());
    assert_eq!(
        second.map().recenters,
        vec![(run.coordinates(), DEFAULT_ZOOM)]
    );
}

#[test]
fn corrupted_blob_means_a_clean_start() {
    let dir = tempdir().unwrap();

    let mut first = app_at(dir.path());
    first.on_map_click(Coordinates::new(44.66, -124.06776));
    first
        .submit(&FormInput::new(WorkoutKind::Running, "5", "25", "170"))
        .unwrap();

    // Someone hand-edited the file into nonsense.
    let mut blobs = FileBlobStore::with_root(dir.path());
    blobs.set(STORAGE_KEY, "[{\"kind\": \"swimming\"}]").unwrap();

    let mut second = app_at(dir.path());
    second.hydrate();
    assert!(second.workouts().is_empty());
}

#[test]
fn reset_removes_the_persisted_list() {
    let dir = tempdir().unwrap();

    let mut app = app_at(dir.path());
    app.on_map_click(Coordinates::new(44.66, -124.06776));
    app.submit(&FormInput::new(WorkoutKind::Cycling, "10", "30", "-50"))
        .unwrap();

    let blobs = FileBlobStore::with_root(dir.path());
    assert!(blobs.get(STORAGE_KEY).is_some());

    app.reset().unwrap();
    assert!(app.workouts().is_empty());
    assert!(blobs.get(STORAGE_KEY).is_none());

    // A restart after reset starts from nothing.
    let mut next = app_at(dir.path());
    next.hydrate();
    assert!(next.workouts().is_empty());
}
