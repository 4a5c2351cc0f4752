use std::path::PathBuf;

use iced::{
    Element, Task,
    widget::{button, column, row, text, text_input, toggler},
};
use rfd::AsyncFileDialog;

use crate::{
    CurrentUser, ProfileForm,
    gui::{Message, screens::describe, state::Session},
};

#[derive(Debug, Clone)]
pub enum ProfileMessage {
    NameChanged(String),
    EmailChanged(String),
    BioChanged(String),
    PasswordChanged(String),
    ConfirmPasswordChanged(String),
    Save,
    PickAvatar,
    AvatarPicked(Option<PathBuf>),
    DarkModeToggled(bool),
}

#[derive(Debug, Default)]
pub struct ProfileScreen {
    form: ProfileForm,
}

impl ProfileScreen {
    /// Fill the form from the stored profile, dropping any typed passwords.
    pub fn load(&mut self, user: &CurrentUser) {
        self.form = ProfileForm {
            name: user.name.clone(),
            email: user.email.clone().unwrap_or_default(),
            bio: user.bio.clone().unwrap_or_default(),
            ..ProfileForm::default()
        };
    }

    pub fn view<'a>(&'a self, session: &'a Session) -> Element<'a, ProfileMessage> {
        let avatar = session
            .profiles
            .avatar_path(&session.user)
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "Sin foto".to_string());

        column![
            text(session.user.name.as_str()).size(28),
            row![
                text(avatar).size(12),
                button("Cambiar foto").on_press(ProfileMessage::PickAvatar),
            ]
            .spacing(10),
            text_input("Nombre", &self.form.name).on_input(ProfileMessage::NameChanged),
            text_input("Email", &self.form.email).on_input(ProfileMessage::EmailChanged),
            text_input("Biografía", &self.form.bio).on_input(ProfileMessage::BioChanged),
            text_input("Nueva contraseña", &self.form.password)
                .secure(true)
                .on_input(ProfileMessage::PasswordChanged),
            text_input("Confirmar contraseña", &self.form.confirm_password)
                .secure(true)
                .on_input(ProfileMessage::ConfirmPasswordChanged),
            button("Guardar cambios").on_press(ProfileMessage::Save),
            toggler(session.dark_mode)
                .label("Modo oscuro")
                .on_toggle(ProfileMessage::DarkModeToggled),
        ]
        .spacing(10)
        .into()
    }

    pub fn update(&mut self, message: ProfileMessage, session: &Session) -> Task<Message> {
        match message {
            ProfileMessage::NameChanged(value) => self.form.name = value,
            ProfileMessage::EmailChanged(value) => self.form.email = value,
            ProfileMessage::BioChanged(value) => self.form.bio = value,
            ProfileMessage::PasswordChanged(value) => self.form.password = value,
            ProfileMessage::ConfirmPasswordChanged(value) => self.form.confirm_password = value,
            ProfileMessage::Save => {
                let form = self.form.clone();
                let profiles = session.profiles.clone();
                return Task::perform(
                    async move { profiles.save_profile(&form).await },
                    |result| Message::ProfileSaved(result.map_err(|e| e.to_string())),
                );
            }
            ProfileMessage::PickAvatar => {
                return Task::perform(
                    AsyncFileDialog::new()
                        .set_title("Foto de perfil")
                        .add_filter("Imagen", &["png", "jpg", "jpeg", "gif", "webp"])
                        .pick_file(),
                    |handle| {
                        Message::Profile(ProfileMessage::AvatarPicked(
                            handle.map(|data| data.path().to_path_buf()),
                        ))
                    },
                );
            }
            ProfileMessage::AvatarPicked(Some(path)) => {
                let profiles = session.profiles.clone();
                return Task::perform(
                    async move { profiles.set_avatar(&path).await },
                    |result| Message::ProfileSaved(result.map_err(describe)),
                );
            }
            ProfileMessage::AvatarPicked(None) => {}
            ProfileMessage::DarkModeToggled(enabled) => {
                let profiles = session.profiles.clone();
                return Task::perform(
                    async move { profiles.set_dark_mode(enabled).await.map(|()| enabled) },
                    |result| Message::DarkModeSaved(result.map_err(describe)),
                );
            }
        }
        Task::none()
    }
}
