use std::collections::HashMap;

use iced::{
    Element, Length, Task,
    widget::{Column, button, column, container, progress_bar, row, scrollable, text, text_input},
};
use iced_widget::container::bordered_box;

use crate::{
    ViewCommands,
    core::view::{ActivityView, BoardView},
    gui::{Message, screens::describe, state::Session},
};

#[derive(Debug, Clone)]
pub enum BoardMessage {
    ToggleAttendance(i64),
    CommentChanged(i64, String),
    SubmitComment(i64),
}

/// Activity cards plus the per-card comment drafts.
#[derive(Debug, Default)]
pub struct BoardScreen {
    drafts: HashMap<i64, String>,
}

impl BoardScreen {
    pub fn clear_draft(&mut self, activity_id: i64) {
        self.drafts.remove(&activity_id);
    }

    pub fn view<'a>(&'a self, board: &'a BoardView) -> Element<'a, BoardMessage> {
        if board.activities.is_empty() {
            return text("No hay actividades.").into();
        }
        let cards = Column::with_children(board.activities.iter().map(|activity| self.card(activity)))
            .spacing(20);
        scrollable(cards).height(Length::Fill).into()
    }

    fn card<'a>(&'a self, activity: &'a ActivityView) -> Element<'a, BoardMessage> {
        let comments = Column::with_children(activity.comments.iter().map(|comment| {
            text(format!("{}: {}", comment.author_name, comment.text))
                .size(14)
                .into()
        }))
        .spacing(4);

        let draft = self
            .drafts
            .get(&activity.id)
            .map(String::as_str)
            .unwrap_or_default();
        let id = activity.id;

        container(
            column![
                text(activity.name.as_str()).size(22),
                text(format!("{} - {} {}", activity.place, activity.date, activity.time)),
                text(activity.description.as_str()).size(14),
                progress_bar(0.0..=100.0, activity.completion_percent as f32),
                text(activity.seats_label()).size(12),
                button(text(activity.action.label()))
                    .on_press(BoardMessage::ToggleAttendance(id))
                    .width(Length::Fill),
                text("Comentarios").size(16),
                comments,
                row![
                    text_input("Comentar...", draft)
                        .on_input(move |value| BoardMessage::CommentChanged(id, value))
                        .on_submit(BoardMessage::SubmitComment(id)),
                    button("Enviar").on_press(BoardMessage::SubmitComment(id)),
                ]
                .spacing(10),
            ]
            .spacing(8),
        )
        .style(bordered_box)
        .padding(15)
        .width(Length::Fill)
        .into()
    }

    pub fn update(&mut self, message: BoardMessage, session: &Session) -> Task<Message> {
        match message {
            BoardMessage::CommentChanged(activity_id, value) => {
                self.drafts.insert(activity_id, value);
                Task::none()
            }
            BoardMessage::ToggleAttendance(activity_id) => {
                let engine = session.engine.clone();
                let actor = session.user.identity();
                Task::perform(
                    async move {
                        let mut commands = ViewCommands::new();
                        engine
                            .toggle_attendance(activity_id, &actor, &mut commands)
                            .await?;
                        Ok::<_, anyhow::Error>(commands)
                    },
                    |result: anyhow::Result<ViewCommands>| Message::Synced(result.map_err(describe)),
                )
            }
            BoardMessage::SubmitComment(activity_id) => {
                let text = self.drafts.get(&activity_id).cloned().unwrap_or_default();
                let engine = session.engine.clone();
                let actor = session.user.identity();
                Task::perform(
                    async move {
                        let mut commands = ViewCommands::new();
                        engine
                            .add_comment(activity_id, &actor, &text, &mut commands)
                            .await?;
                        Ok::<_, anyhow::Error>(commands)
                    },
                    |result: anyhow::Result<ViewCommands>| Message::Synced(result.map_err(describe)),
                )
            }
        }
    }
}
