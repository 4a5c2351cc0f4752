use tempfile::NamedTempFile;
use time::macros::datetime;
use witw::core::db::{MemoryStore, ProjectStore};
use witw::core::engine::{ActivityEngine, ManualClock};
use witw::models::{Activity, ActivityForm, Attendee, Identity};

/// Fixed start time for engine clocks: 2025-06-01 12:00 UTC.
pub fn test_clock() -> ManualClock {
    ManualClock::new(datetime!(2025-06-01 12:00 UTC))
}

/// An engine over an empty in-memory store. The store handle shares contents with the engine.
pub fn memory_engine() -> (ActivityEngine<MemoryStore, ManualClock>, MemoryStore) {
    let store = MemoryStore::new();
    (ActivityEngine::with_clock(store.clone(), test_clock()), store)
}

/// Creates a ProjectStore with a temporary tar.zst file.
/// Returns both the store and the temp directory (which must be kept alive).
pub async fn create_test_project() -> (ProjectStore, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("test.board");
    let store = ProjectStore::open(&path)
        .await
        .expect("Failed to create test project");
    (store, dir)
}

/// Writes a few bytes to a temp file with the given extension, standing in for an image.
pub fn create_test_image(suffix: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp image file");
    std::fs::write(file.path(), b"\x89PNG\r\n\x1a\nnot really").expect("Failed to write test image");
    file
}

pub fn tester() -> Identity {
    Identity::new(99, "Tester")
}

pub fn other_user() -> Identity {
    Identity::new(7, "Otra Persona")
}

/// Activity with the given capacity and attendee ids.
pub fn make_activity(id: i64, capacity: u32, attendee_ids: &[i64]) -> Activity {
    Activity {
        id,
        name: format!("Actividad {id}"),
        place: "Santiago".to_string(),
        date: "2026-03-01".to_string(),
        time: "10:00".to_string(),
        description: String::new(),
        image_ref: String::new(),
        capacity,
        attendees: attendee_ids
            .iter()
            .map(|&id| Attendee {
                id,
                name: format!("Persona {id}"),
            })
            .collect(),
        comments: vec![],
    }
}

/// The form a user fills in to create "Evento Jest".
pub fn jest_form() -> ActivityForm {
    ActivityForm::from_fields([
        (ActivityForm::NAME, "Evento Jest"),
        (ActivityForm::PLACE, "Parque Test"),
        (ActivityForm::DATE, "2025-12-01"),
        (ActivityForm::TIME, "18:00"),
        (ActivityForm::DESCRIPTION, "Descripción de prueba"),
        (ActivityForm::IMAGE_REF, "http://ejemplo.com/img.jpg"),
        (ActivityForm::CAPACITY, "50"),
    ])
}
