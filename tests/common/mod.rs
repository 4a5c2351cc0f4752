mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from witw for tests
pub use witw::core::db::{
    ACTIVITIES_KEY, ActivityRepository, AssetStore, CURRENT_USER_KEY, DARK_MODE_KEY, MemoryStore,
    PreferenceRepository, ProjectStore, StateStore, UserRepository,
};
pub use witw::core::engine::{ActivityEngine, ManualClock, Outcome, Rejection, parse_date};
pub use witw::core::profile::{ProfileError, ProfileService};
pub use witw::core::view::{
    AttendAction, BoardView, InputField, Notice, Section, ViewCommand, ViewCommands,
};
pub use witw::models::{Activity, ActivityForm, Attendee, CurrentUser, Identity, ProfileForm};
