//! What the engine hands to whatever draws the board.
//!
//! The engine never touches widgets. After each mutation it pushes a fresh
//! [`BoardView`] through a [`ViewSink`], along with the few other signals a
//! front end needs (clear an input, switch section, show a notice).

use std::fmt;

use time::OffsetDateTime;

use crate::models::{Activity, Comment, Identity};

pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=No+Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Home,
    Map,
    NewActivity,
    Profile,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::Map,
        Section::NewActivity,
        Section::Profile,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "Inicio",
            Section::Map => "Mapa",
            Section::NewActivity => "Agregar",
            Section::Profile => "Perfil",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// The comment box on one activity card.
    Comment(i64),
    /// Every field of the "new activity" form.
    ActivityForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    CapacityReached { activity_id: i64 },
    ActivityCreated { activity_id: i64 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::CapacityReached { .. } => f.write_str("¡Capacidad máxima alcanzada!"),
            Notice::ActivityCreated { .. } => f.write_str("¡Actividad agregada!"),
        }
    }
}

/// What the attendance button on a card offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendAction {
    Cancel,
    Full,
    Attend,
}

impl AttendAction {
    pub fn label(self) -> &'static str {
        match self {
            AttendAction::Cancel => "Cancelar",
            AttendAction::Full => "Lleno",
            AttendAction::Attend => "Asistir",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentView {
    pub id: i64,
    pub author_name: String,
    pub text: String,
    pub created_at: OffsetDateTime,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            author_name: comment.author_name.clone(),
            text: comment.text.clone(),
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityView {
    pub id: i64,
    pub name: String,
    pub place: String,
    pub date: String,
    pub time: String,
    pub description: String,
    pub image_ref: String,
    pub capacity: u32,
    pub attendee_count: usize,
    pub is_attending: bool,
    pub is_full: bool,
    pub completion_percent: f64,
    pub action: AttendAction,
    pub comments: Vec<CommentView>,
}

impl ActivityView {
    pub fn project(activity: &Activity, viewer: &Identity) -> Self {
        let is_attending = activity.is_attending(viewer.id);
        let is_full = activity.is_full();
        let action = if is_attending {
            AttendAction::Cancel
        } else if is_full {
            AttendAction::Full
        } else {
            AttendAction::Attend
        };
        let image_ref = if activity.image_ref.trim().is_empty() {
            PLACEHOLDER_IMAGE.to_string()
        } else {
            activity.image_ref.clone()
        };
        Self {
            id: activity.id,
            name: activity.name.clone(),
            place: activity.place.clone(),
            date: activity.date.clone(),
            time: activity.time.clone(),
            description: activity.description.clone(),
            image_ref,
            capacity: activity.capacity,
            attendee_count: activity.attendees.len(),
            is_attending,
            is_full,
            completion_percent: activity.completion_percent(),
            action,
            comments: activity.comments.iter().map(CommentView::from).collect(),
        }
    }

    pub fn seats_label(&self) -> String {
        format!("{}/{} Asistentes", self.attendee_count, self.capacity)
    }
}

/// Everything on the board as seen by one viewer, in stored order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoardView {
    pub viewer_id: i64,
    pub activities: Vec<ActivityView>,
}

impl BoardView {
    pub fn project<'a>(activities: impl IntoIterator<Item = &'a Activity>, viewer: &Identity) -> Self {
        Self {
            viewer_id: viewer.id,
            activities: activities
                .into_iter()
                .map(|activity| ActivityView::project(activity, viewer))
                .collect(),
        }
    }

    pub fn get(&self, activity_id: i64) -> Option<&ActivityView> {
        self.activities.iter().find(|a| a.id == activity_id)
    }
}

/// The rendering collaborator.
pub trait ViewSink {
    /// Replace the visible list with these activities.
    fn show_activities(&mut self, board: BoardView);
    fn clear_input(&mut self, field: InputField);
    fn navigate(&mut self, section: Section);
    fn notify(&mut self, notice: Notice);
}

impl<T: ViewSink + ?Sized> ViewSink for &mut T {
    fn show_activities(&mut self, board: BoardView) {
        (**self).show_activities(board)
    }

    fn clear_input(&mut self, field: InputField) {
        (**self).clear_input(field)
    }

    fn navigate(&mut self, section: Section) {
        (**self).navigate(section)
    }

    fn notify(&mut self, notice: Notice) {
        (**self).notify(notice)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    ShowActivities(BoardView),
    ClearInput(InputField),
    Navigate(Section),
    Notify(Notice),
}

/// Records view signals so they can be replayed later, e.g. across a task boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewCommands {
    commands: Vec<ViewCommand>,
}

impl ViewCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[ViewCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Most recent board pushed, if any.
    pub fn last_board(&self) -> Option<&BoardView> {
        self.commands.iter().rev().find_map(|c| match c {
            ViewCommand::ShowActivities(board) => Some(board),
            _ => None,
        })
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.commands.iter().filter_map(|c| match c {
            ViewCommand::Notify(notice) => Some(notice),
            _ => None,
        })
    }

    pub fn replay<V: ViewSink + ?Sized>(self, view: &mut V) {
        for command in self.commands {
            match command {
                ViewCommand::ShowActivities(board) => view.show_activities(board),
                ViewCommand::ClearInput(field) => view.clear_input(field),
                ViewCommand::Navigate(section) => view.navigate(section),
                ViewCommand::Notify(notice) => view.notify(notice),
            }
        }
    }
}

impl ViewSink for ViewCommands {
    fn show_activities(&mut self, board: BoardView) {
        self.commands.push(ViewCommand::ShowActivities(board));
    }

    fn clear_input(&mut self, field: InputField) {
        self.commands.push(ViewCommand::ClearInput(field));
    }

    fn navigate(&mut self, section: Section) {
        self.commands.push(ViewCommand::Navigate(section));
    }

    fn notify(&mut self, notice: Notice) {
        self.commands.push(ViewCommand::Notify(notice));
    }
}
