use std::path::PathBuf;

use crate::{
    ActivityEngine, BoardView, CurrentUser, ProjectStore, UserRepository,
    core::{profile::ProfileService, view::Section},
};

/// An open board and who is using it.
#[derive(Debug, Clone)]
pub struct Session {
    pub engine: ActivityEngine<ProjectStore>,
    pub profiles: ProfileService<ProjectStore>,
    pub user: CurrentUser,
    pub board: BoardView,
    pub dark_mode: bool,
}

impl Session {
    pub async fn open(project_file: PathBuf) -> anyhow::Result<Self> {
        let store = ProjectStore::open(project_file).await?;
        let engine = ActivityEngine::new(store.clone());
        let profiles = ProfileService::new(store.clone());
        let user = store.current_user().await?;
        let board = engine.render(&user.identity()).await?;
        let dark_mode = profiles.dark_mode().await?;
        Ok(Self {
            engine,
            profiles,
            user,
            board,
            dark_mode,
        })
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    pub session: Option<Session>,
    pub section: Section,
    pub notice: Option<String>,
    pub error: Option<String>,
}
