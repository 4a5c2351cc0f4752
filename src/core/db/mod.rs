mod fixtures;
mod memory;
mod state;

use std::{
    future::Future,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};
use state::ProjectState;
use tracing::debug;

use crate::models::{Activity, CurrentUser};

pub use fixtures::{default_user, seed_activities};
pub use memory::MemoryStore;

pub const ACTIVITIES_KEY: &str = "activities";
pub const CURRENT_USER_KEY: &str = "currentUser";
pub const DARK_MODE_KEY: &str = "darkMode";

/// Whole-value key-value persistence, in the manner of browser local storage.
///
/// `save` replaces whatever was stored under the key; there are no partial
/// updates and no transactions spanning keys.
pub trait StateStore {
    fn load(&self, key: &str) -> impl Future<Output = anyhow::Result<Option<String>>>;
    fn save(&self, key: &str, value: String) -> impl Future<Output = anyhow::Result<()>>;
}

/// Stores binary assets (avatar images) next to the key-value data.
pub trait AssetStore {
    fn store_asset(&self, src: &Path) -> impl Future<Output = anyhow::Result<String>>;
    fn asset_path(&self, asset_ref: &str) -> PathBuf;
}

pub trait ActivityRepository {
    /// Every stored activity, seeding the fixture set first if nothing is stored yet.
    fn activities(&self) -> impl Future<Output = anyhow::Result<Vec<Activity>>>;
    fn save_activities(&self, activities: &[Activity]) -> impl Future<Output = anyhow::Result<()>>;
}

pub trait UserRepository {
    /// The session user, seeding the default identity first if nothing is stored yet.
    fn current_user(&self) -> impl Future<Output = anyhow::Result<CurrentUser>>;
    fn save_current_user(&self, user: &CurrentUser) -> impl Future<Output = anyhow::Result<()>>;
}

pub trait PreferenceRepository {
    fn dark_mode(&self) -> impl Future<Output = anyhow::Result<bool>>;
    fn set_dark_mode(&self, enabled: bool) -> impl Future<Output = anyhow::Result<()>>;
}

async fn load_json<S, T>(store: &S, key: &str) -> anyhow::Result<Option<T>>
where
    S: StateStore + ?Sized,
    T: DeserializeOwned,
{
    match store.load(key).await? {
        Some(raw) => {
            let value = serde_json::from_str(&raw)
                .with_context(|| format!("Stored value for {key:?} is not valid"))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

async fn save_json<S, T>(store: &S, key: &str, value: &T) -> anyhow::Result<()>
where
    S: StateStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)
        .with_context(|| format!("Failed to encode value for {key:?}"))?;
    store.save(key, raw).await
}

impl<S: StateStore> ActivityRepository for S {
    async fn activities(&self) -> anyhow::Result<Vec<Activity>> {
        if let Some(activities) = load_json(self, ACTIVITIES_KEY).await? {
            return Ok(activities);
        }
        let seeded = seed_activities();
        debug!(count = seeded.len(), "seeding activity fixtures");
        self.save_activities(&seeded).await?;
        Ok(seeded)
    }

    async fn save_activities(&self, activities: &[Activity]) -> anyhow::Result<()> {
        debug!(count = activities.len(), "saving activities");
        save_json(self, ACTIVITIES_KEY, activities).await
    }
}

impl<S: StateStore> UserRepository for S {
    async fn current_user(&self) -> anyhow::Result<CurrentUser> {
        if let Some(user) = load_json(self, CURRENT_USER_KEY).await? {
            return Ok(user);
        }
        let user = default_user();
        debug!(user_id = user.id, "seeding default user");
        self.save_current_user(&user).await?;
        Ok(user)
    }

    async fn save_current_user(&self, user: &CurrentUser) -> anyhow::Result<()> {
        save_json(self, CURRENT_USER_KEY, user).await
    }
}

impl<S: StateStore> PreferenceRepository for S {
    async fn dark_mode(&self) -> anyhow::Result<bool> {
        Ok(self.load(DARK_MODE_KEY).await?.as_deref() == Some("1"))
    }

    async fn set_dark_mode(&self, enabled: bool) -> anyhow::Result<()> {
        let value = if enabled { "1" } else { "0" };
        self.save(DARK_MODE_KEY, value.to_string()).await
    }
}

/// A board stored in a single compressed project file.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    state: Arc<ProjectState>,
}

impl ProjectStore {
    pub async fn open<P: AsRef<Path>>(project_file: P) -> anyhow::Result<Self> {
        Ok(Self {
            state: Arc::new(ProjectState::new(project_file).await?),
        })
    }

    /// Pack the working copy back into the project file.
    pub async fn save_project(&self) -> anyhow::Result<()> {
        self.state.save_project().await
    }

    pub fn project_file(&self) -> &Path {
        self.state.project_file()
    }
}

impl StateStore for ProjectStore {
    async fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut conn = self.state.conn().await?;
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = $1")
            .bind(key)
            .fetch_optional(&mut **conn)
            .await
            .with_context(|| format!("Failed to read {key:?}"))?;
        Ok(value)
    }

    async fn save(&self, key: &str, value: String) -> anyhow::Result<()> {
        {
            let mut conn = self.state.conn().await?;
            sqlx::query(
                r#"INSERT INTO kv_store (key, value) VALUES ($1, $2)
                ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value"#,
            )
            .bind(key)
            .bind(value)
            .execute(&mut **conn)
            .await
            .with_context(|| format!("Failed to write {key:?}"))?;
        }
        self.save_project().await
    }
}

impl AssetStore for ProjectStore {
    async fn store_asset(&self, src: &Path) -> anyhow::Result<String> {
        let asset_ref = self.state.store_avatar(src).await?;
        self.save_project().await?;
        Ok(asset_ref)
    }

    fn asset_path(&self, asset_ref: &str) -> PathBuf {
        self.state.avatar_path(asset_ref)
    }
}
