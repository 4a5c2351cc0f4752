use sqlx::{
    Sqlite,
    pool::PoolConnection,
    sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
    },
};
use tempdir::TempDir;
use tokio::{
    fs as async_fs,
    sync::{RwLock, RwLockReadGuard},
};

use std::{
    fs::{self, File},
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
};
use anyhow::Context;
use tracing::debug;
use uuid::Uuid;

use tar::{Archive, Builder};
use zstd::stream::{read::Decoder as ZstdDecoder, write::Encoder as ZstdEncoder};

const DB_FILE_NAME: &str = "store.db";
const AVATAR_DIR_NAME: &str = "avatars";

pub(super) struct ProjectState {
    project_file: PathBuf,
    working_dir: TempDir,
    pool: RwLock<SqlitePool>,
}

impl std::fmt::Debug for ProjectState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectState")
            .field("project_file", &self.project_file)
            .field("working_dir", &self.working_dir.path())
            .finish()
    }
}

impl ProjectState {
    /// Acquire a pooled connection and hold the pool read lock for the entire lifetime
    /// of the returned guard.
    pub(super) async fn conn(&self) -> anyhow::Result<DbConnGuard<'_>> {
        let pool_guard = self.pool.read().await;

        // The connection must be taken while the read lock is held so packing
        // cannot close the pool underneath it.
        let conn = pool_guard.acquire().await?;

        Ok(DbConnGuard {
            _pool_guard: pool_guard,
            conn,
        })
    }

    pub(super) fn project_file(&self) -> &Path {
        &self.project_file
    }

    pub(super) fn avatar_path(&self, avatar_fname: &str) -> PathBuf {
        self.working_dir
            .path()
            .join(AVATAR_DIR_NAME)
            .join(avatar_fname)
    }

    /// Copy an avatar image into the project, returning the filename used.
    pub(super) async fn store_avatar<P: AsRef<Path>>(&self, img_path: P) -> anyhow::Result<String> {
        let img_path = img_path.as_ref();
        let ext = img_path
            .extension()
            .and_then(|ext| ext.to_str())
            .with_context(|| format!("Avatar image {:?} has no usable extension", img_path))?;
        let img_fname = format!("{}.{}", Uuid::new_v4(), ext);
        let dest_path = self.avatar_path(&img_fname);
        async_fs::copy(img_path, &dest_path)
            .await
            .with_context(|| format!(
                "Failed to copy avatar image from {:?} to {:?}",
                img_path,
                dest_path
            ))?;
        Ok(img_fname)
    }

    /// Create a tar.zst archive from the working directory.
    fn save_tar_zstd(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.project_file.parent() {
            fs::create_dir_all(parent)?;
        }

        let out = File::create(&self.project_file)
            .with_context(|| format!("Failed to create project archive {:?}", self.project_file))?;

        let encoder = ZstdEncoder::new(out, 3)
            .with_context(|| format!("Failed to create zstd encoder for {:?}", self.project_file))?;

        let mut tar = Builder::new(encoder);

        tar.append_dir_all(".", self.working_dir.path())
            .with_context(|| format!("Failed to add {:?} to tar", self.working_dir.path()))?;

        // Finish tar, then finish zstd stream
        let encoder = tar.into_inner()
            .with_context(|| format!("Failed to finalize tar for {:?}", self.project_file))?;

        encoder.finish()
            .with_context(|| format!("Failed to finalize zstd stream for {:?}", self.project_file))?;

        Ok(())
    }

    /// Exclusive close+pack:
    /// - waits for all in-flight queries (because it takes a WRITE lock)
    /// - checkpoints WAL so store.db is current
    /// - closes the pool to release file handles
    /// - archives the working dir and reopens the pool
    pub(super) async fn save_project(&self) -> anyhow::Result<()> {
        let mut pool_guard = self.pool.write().await;

        sqlx::query("PRAGMA wal_checkpoint(TRUNCATE);")
            .execute(&*pool_guard)
            .await?;

        pool_guard.close().await;

        // Synchronous IO; boards are small.
        self.save_tar_zstd()?;
        debug!(project = ?self.project_file, "packed project archive");

        *pool_guard = open_pool(&self.working_dir.path().join(DB_FILE_NAME)).await?;
        Ok(())
    }

    pub(super) async fn new<P: AsRef<Path>>(project_file: P) -> anyhow::Result<Self> {
        let project_file = project_file.as_ref().to_path_buf();

        // A missing project file becomes an empty archive, provided its directory exists.
        if !project_file.is_file() {
            if project_file.parent().map(|p| p.as_os_str().is_empty() || p.is_dir()).unwrap_or(false) {
                let out = File::create(&project_file)
                    .with_context(|| format!("Failed to create project archive {:?}", project_file))?;

                let encoder = ZstdEncoder::new(out, 3)
                    .with_context(|| format!("Failed to create zstd encoder for {:?}", project_file))?;

                let tar = Builder::new(encoder);
                let encoder = tar.into_inner()
                    .with_context(|| format!("Failed to finalize empty tar {:?}", project_file))?;

                encoder.finish()
                    .with_context(|| format!("Failed to finalize empty zstd stream {:?}", project_file))?;
                debug!(project = ?project_file, "created empty project archive");
            } else {
                anyhow::bail!("Project file parent does not exist: {:?}", project_file);
            }
        }

        let working_dir = TempDir::new("witw_project")?;

        {
            let f = File::open(&project_file)
                .with_context(|| format!("Failed to open project archive {:?}", project_file))?;

            let decoder = ZstdDecoder::new(f)
                .with_context(|| format!("Invalid zstd stream in {:?}", project_file))?;

            let mut archive = Archive::new(decoder);
            archive.unpack(working_dir.path())
                .with_context(|| format!(
                    "Failed to extract archive {:?} into {:?}",
                    project_file,
                    working_dir.path()
                ))?;
        }

        let db_file = working_dir.path().join(DB_FILE_NAME);
        let avatar_dir = working_dir.path().join(AVATAR_DIR_NAME);

        match (db_file.is_file(), avatar_dir.is_dir()) {
            (true, true) => {}
            (false, false) => {
                fs::create_dir_all(&avatar_dir)?;
                File::create(&db_file)?;
            }
            (true, false) => anyhow::bail!(
                "Corrupt project: database exists ({:?}) but avatar dir missing ({:?})",
                db_file,
                avatar_dir
            ),
            (false, true) => anyhow::bail!(
                "Corrupt project: avatar dir exists ({:?}) but database missing ({:?})",
                avatar_dir,
                db_file
            ),
        }

        let pool = open_pool(&db_file).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self {
            project_file,
            working_dir,
            pool: RwLock::new(pool),
        })
    }
}

async fn open_pool(db_file: &Path) -> anyhow::Result<SqlitePool> {
    let connect_opts = SqliteConnectOptions::new()
        .filename(db_file)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_opts)
        .await
        .with_context(|| format!("Failed to open store database {:?}", db_file))?;
    Ok(pool)
}

pub struct DbConnGuard<'a> {
    _pool_guard: RwLockReadGuard<'a, SqlitePool>,
    conn: PoolConnection<Sqlite>,
}

impl<'a> Deref for DbConnGuard<'a> {
    type Target = PoolConnection<Sqlite>;
    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl<'a> DerefMut for DbConnGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}
