pub mod config;
pub mod core;
pub mod models;

pub use core::db::{
    ActivityRepository, AssetStore, MemoryStore, PreferenceRepository, ProjectStore, StateStore,
    UserRepository,
};
pub use core::engine::{ActivityEngine, Outcome, Rejection};
pub use core::view::{BoardView, ViewCommands, ViewSink};
pub use models::{Activity, ActivityForm, Attendee, Comment, CurrentUser, Identity, ProfileForm};

#[cfg(feature = "gui")]
pub mod gui;
