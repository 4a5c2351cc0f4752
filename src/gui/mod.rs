mod app;
mod message;
mod screens;
mod state;
mod widgets;

use std::path::PathBuf;

pub use app::WitwApp;
pub use message::Message;
pub use state::{AppState, Session};

/// Open the desktop window on the given board file and block until it closes.
pub fn run(project_file: PathBuf) -> anyhow::Result<()> {
    iced::application(
        move || WitwApp::boot(project_file.clone()),
        WitwApp::update,
        WitwApp::view,
    )
    .title("WITW - Actividades")
    .theme(WitwApp::theme)
    .run()
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}
