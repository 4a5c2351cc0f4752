pub mod board;
pub mod loading_page;
pub mod map;
pub mod new_activity;
pub mod profile;

/// Render an engine or store failure for display in the window.
pub(crate) fn describe(error: anyhow::Error) -> String {
    format!("{error:#}")
}
