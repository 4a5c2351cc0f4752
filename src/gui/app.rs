use std::path::PathBuf;

use iced::{Element, Task, Theme};

use crate::{
    core::{
        map::MapView,
        view::{BoardView, InputField, Notice, Section, ViewSink},
    },
    gui::{
        Message,
        screens::{
            board::BoardScreen, loading_page, map, new_activity::NewActivityScreen,
            profile::ProfileScreen,
        },
        state::{AppState, Session},
        widgets::layout,
    },
};

pub struct WitwApp {
    state: AppState,
    board: BoardScreen,
    new_activity: NewActivityScreen,
    profile: ProfileScreen,
    map: MapView,
}

impl WitwApp {
    pub fn boot(project_file: PathBuf) -> (Self, Task<Message>) {
        (
            Self {
                state: AppState::default(),
                board: BoardScreen::default(),
                new_activity: NewActivityScreen::default(),
                profile: ProfileScreen::default(),
                map: MapView::default(),
            },
            Task::perform(Session::open(project_file), |result| {
                Message::Opened(result.map_err(|e| format!("{e:#}")))
            }),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Opened(Ok(session)) => {
                self.profile.load(&session.user);
                self.state.session = Some(session);
                self.state.section = Section::default();
                Task::none()
            }
            Message::Opened(Err(error)) => {
                tracing::error!(%error, "failed to open board");
                self.state.error = Some(error);
                Task::none()
            }
            Message::Navigate(section) => {
                self.navigate(section);
                Task::none()
            }
            Message::Synced(Ok(commands)) => {
                commands.replay(self);
                Task::none()
            }
            Message::ProfileSaved(Ok(user)) => {
                self.profile.load(&user);
                if let Some(session) = &mut self.state.session {
                    session.user = user;
                }
                self.state.notice = Some("¡Perfil actualizado con éxito!".to_string());
                Task::none()
            }
            Message::DarkModeSaved(Ok(enabled)) => {
                if let Some(session) = &mut self.state.session {
                    session.dark_mode = enabled;
                }
                Task::none()
            }
            Message::Synced(Err(error))
            | Message::ProfileSaved(Err(error))
            | Message::DarkModeSaved(Err(error)) => {
                tracing::warn!(%error, "action failed");
                self.state.notice = Some(error);
                Task::none()
            }
            Message::DismissNotice => {
                self.state.notice = None;
                Task::none()
            }
            Message::Board(msg) => match &self.state.session {
                Some(session) => self.board.update(msg, session),
                None => Task::none(),
            },
            Message::NewActivity(msg) => match &self.state.session {
                Some(session) => self.new_activity.update(msg, session),
                None => Task::none(),
            },
            Message::Profile(msg) => match &self.state.session {
                Some(session) => self.profile.update(msg, session),
                None => Task::none(),
            },
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let Some(session) = &self.state.session else {
            return loading_page::view(self.state.error.as_deref());
        };

        let content: Element<'_, Message> = match self.state.section {
            Section::Home => self.board.view(&session.board).map(Message::Board),
            Section::Map => map::view(&self.map),
            Section::NewActivity => self.new_activity.view().map(Message::NewActivity),
            Section::Profile => self.profile.view(session).map(Message::Profile),
        };

        layout(
            self.state.section,
            Message::Navigate,
            self.state
                .notice
                .as_deref()
                .map(|notice| (notice, Message::DismissNotice)),
            content,
        )
    }

    pub fn theme(&self) -> Theme {
        match &self.state.session {
            Some(session) if !session.dark_mode => Theme::Light,
            _ => Theme::Dark,
        }
    }
}

impl ViewSink for WitwApp {
    fn show_activities(&mut self, board: BoardView) {
        if let Some(session) = &mut self.state.session {
            session.board = board;
        }
    }

    fn clear_input(&mut self, field: InputField) {
        match field {
            InputField::Comment(activity_id) => self.board.clear_draft(activity_id),
            InputField::ActivityForm => self.new_activity.reset(),
        }
    }

    fn navigate(&mut self, section: Section) {
        // Leaving the profile discards unsaved edits.
        if self.state.section == Section::Profile {
            if let Some(session) = &self.state.session {
                self.profile.load(&session.user);
            }
        }
        self.state.section = section;
    }

    fn notify(&mut self, notice: Notice) {
        self.state.notice = Some(notice.to_string());
    }
}
