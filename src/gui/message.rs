use crate::{
    CurrentUser, ViewCommands,
    core::view::Section,
    gui::{
        screens::{board::BoardMessage, new_activity::NewActivityMessage, profile::ProfileMessage},
        state::Session,
    },
};

#[derive(Debug, Clone)]
pub enum Message {
    Opened(Result<Session, String>),
    Navigate(Section),
    Board(BoardMessage),
    NewActivity(NewActivityMessage),
    Profile(ProfileMessage),
    /// View signals recorded by an engine call, to be applied to the window.
    Synced(Result<ViewCommands, String>),
    ProfileSaved(Result<CurrentUser, String>),
    DarkModeSaved(Result<bool, String>),
    DismissNotice,
}
