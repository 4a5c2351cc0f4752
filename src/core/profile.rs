use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::Mutex;
use tracing::info;

use crate::{
    core::db::{AssetStore, PreferenceRepository, StateStore, UserRepository},
    models::{CurrentUser, ProfileForm},
};

pub const MIN_PASSWORD_LEN: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("El nombre es obligatorio.")]
    MissingName,

    #[error("Las contraseñas no coinciden.")]
    PasswordMismatch,

    #[error("La contraseña es muy corta (mínimo {min} caracteres).")]
    PasswordTooShort { min: usize },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Checks a profile edit before anything is written.
pub fn validate(form: &ProfileForm) -> Result<(), ProfileError> {
    if form.name.trim().is_empty() {
        return Err(ProfileError::MissingName);
    }
    if !form.password.is_empty() || !form.confirm_password.is_empty() {
        if form.password != form.confirm_password {
            return Err(ProfileError::PasswordMismatch);
        }
        if form.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ProfileError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
    }
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Edits the session user's profile and display preferences.
///
/// Clones share one lock, so edits to the user record never overlap.
#[derive(Debug, Clone)]
pub struct ProfileService<S> {
    store: S,
    user_lock: Arc<Mutex<()>>,
}

impl<S: StateStore> ProfileService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            user_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn current_user(&self) -> anyhow::Result<CurrentUser> {
        let _user = self.user_lock.lock().await;
        self.store.current_user().await
    }

    /// Replace name, email and bio. The password is checked but never stored.
    pub async fn save_profile(&self, form: &ProfileForm) -> Result<CurrentUser, ProfileError> {
        validate(form)?;
        let _user = self.user_lock.lock().await;
        let mut user = self.store.current_user().await?;
        user.name = form.name.trim().to_string();
        user.email = non_empty(&form.email);
        user.bio = non_empty(&form.bio);
        self.store.save_current_user(&user).await?;
        info!(user_id = user.id, "profile updated");
        Ok(user)
    }

    pub async fn dark_mode(&self) -> anyhow::Result<bool> {
        self.store.dark_mode().await
    }

    pub async fn set_dark_mode(&self, enabled: bool) -> anyhow::Result<()> {
        self.store.set_dark_mode(enabled).await
    }
}

impl<S: StateStore + AssetStore> ProfileService<S> {
    /// Copy `image` into the store and make it the user's avatar.
    pub async fn set_avatar(&self, image: &Path) -> anyhow::Result<CurrentUser> {
        let avatar_ref = self.store.store_asset(image).await?;
        let _user = self.user_lock.lock().await;
        let mut user = self.store.current_user().await?;
        user.avatar_ref = Some(avatar_ref);
        self.store.save_current_user(&user).await?;
        info!(user_id = user.id, "avatar updated");
        Ok(user)
    }

    pub fn avatar_path(&self, user: &CurrentUser) -> Option<PathBuf> {
        user.avatar_ref
            .as_deref()
            .map(|avatar_ref| self.store.asset_path(avatar_ref))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, password: &str, confirm: &str) -> ProfileForm {
        ProfileForm {
            name: name.into(),
            password: password.into(),
            confirm_password: confirm.into(),
            ..ProfileForm::default()
        }
    }

    #[test]
    fn passwords_are_optional() {
        assert!(validate(&form("Ana", "", "")).is_ok());
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        assert!(matches!(
            validate(&form("Ana", "abcd", "abce")),
            Err(ProfileError::PasswordMismatch)
        ));
        assert!(matches!(
            validate(&form("Ana", "", "abcd")),
            Err(ProfileError::PasswordMismatch)
        ));
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(matches!(
            validate(&form("Ana", "abc", "abc")),
            Err(ProfileError::PasswordTooShort { min: 4 })
        ));
        assert!(validate(&form("Ana", "abcd", "abcd")).is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            validate(&form("  ", "", "")),
            Err(ProfileError::MissingName)
        ));
    }
}
