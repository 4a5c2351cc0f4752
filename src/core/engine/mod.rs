//! The activity interaction engine.
//!
//! Every mutation runs the same cycle: load the whole activity list, change
//! one activity in memory, write the whole list back, then push a freshly
//! rendered board to the view. Nothing is cached between calls, so the view
//! always reflects what is stored.
//!
//! Cycles never overlap: an engine and its clones share one lock held for the
//! whole cycle, so a second action sees the first one's result.

mod ids;
mod outcome;

use std::sync::Arc;

use time::{Date, macros::format_description};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    core::{
        db::{ActivityRepository, StateStore},
        view::{BoardView, InputField, Notice, Section, ViewSink},
    },
    models::{Activity, ActivityForm, Comment, Identity},
};

pub use ids::{Clock, IdGenerator, ManualClock, SystemClock};
pub use outcome::{Outcome, Rejection};

#[derive(Debug, Clone)]
pub struct ActivityEngine<S, C = SystemClock> {
    store: S,
    ids: IdGenerator<C>,
    cycle: Arc<Mutex<()>>,
}

impl<S: StateStore> ActivityEngine<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: StateStore, C: Clock> ActivityEngine<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            ids: IdGenerator::new(clock),
            cycle: Arc::new(Mutex::new(())),
        }
    }

    pub async fn activities(&self) -> anyhow::Result<Vec<Activity>> {
        let _cycle = self.cycle.lock().await;
        self.store.activities().await
    }

    /// Project the stored board for `viewer`. Writes nothing beyond first-access seeding.
    pub async fn render(&self, viewer: &Identity) -> anyhow::Result<BoardView> {
        let _cycle = self.cycle.lock().await;
        let activities = self.store.activities().await?;
        Ok(BoardView::project(&activities, viewer))
    }

    /// Push a freshly rendered board to the view.
    pub async fn refresh<V: ViewSink + ?Sized>(
        &self,
        viewer: &Identity,
        view: &mut V,
    ) -> anyhow::Result<()> {
        let _cycle = self.cycle.lock().await;
        self.show_board(viewer, view).await
    }

    // Callers hold the cycle lock.
    async fn show_board<V: ViewSink + ?Sized>(
        &self,
        viewer: &Identity,
        view: &mut V,
    ) -> anyhow::Result<()> {
        let activities = self.store.activities().await?;
        view.show_activities(BoardView::project(&activities, viewer));
        Ok(())
    }

    /// Add `actor` to the activity's attendees, or remove them if already there.
    ///
    /// Joining a full activity is rejected and the view is told so; leaving is
    /// always allowed.
    pub async fn toggle_attendance<V: ViewSink + ?Sized>(
        &self,
        activity_id: i64,
        actor: &Identity,
        view: &mut V,
    ) -> anyhow::Result<Outcome> {
        let _cycle = self.cycle.lock().await;
        let mut activities = self.store.activities().await?;
        let Some(activity) = activities.iter_mut().find(|a| a.id == activity_id) else {
            debug!(activity_id, "attendance toggle for unknown activity ignored");
            return Ok(Outcome::NotFound);
        };

        if activity.is_attending(actor.id) {
            activity.attendees.retain(|a| a.id != actor.id);
            info!(activity_id, user_id = actor.id, "attendance cancelled");
        } else {
            if activity.is_full() {
                let capacity = activity.capacity;
                warn!(activity_id, user_id = actor.id, capacity, "activity is full");
                view.notify(Notice::CapacityReached { activity_id });
                return Ok(Outcome::Rejected(Rejection::CapacityExceeded {
                    activity_id,
                    capacity,
                }));
            }
            activity.attendees.push(actor.into());
            info!(activity_id, user_id = actor.id, "attendance confirmed");
        }

        self.store.save_activities(&activities).await?;
        self.show_board(actor, view).await?;
        Ok(Outcome::Applied)
    }

    /// Append a comment by `actor`. Blank text is dropped without a word.
    ///
    /// The comment box is cleared unless the activity does not exist.
    pub async fn add_comment<V: ViewSink + ?Sized>(
        &self,
        activity_id: i64,
        actor: &Identity,
        text: &str,
        view: &mut V,
    ) -> anyhow::Result<Outcome> {
        let _cycle = self.cycle.lock().await;
        let outcome = self.append_comment(activity_id, actor, text).await?;
        match outcome {
            Outcome::NotFound => return Ok(outcome),
            Outcome::Applied => self.show_board(actor, view).await?,
            Outcome::Rejected(_) => {}
        }
        view.clear_input(InputField::Comment(activity_id));
        Ok(outcome)
    }

    async fn append_comment(
        &self,
        activity_id: i64,
        actor: &Identity,
        text: &str,
    ) -> anyhow::Result<Outcome> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Outcome::Rejected(Rejection::EmptyInput));
        }

        let mut activities = self.store.activities().await?;
        let floor = activities
            .iter()
            .flat_map(|a| a.comments.iter().map(|c| c.id))
            .max()
            .unwrap_or(0);
        let Some(activity) = activities.iter_mut().find(|a| a.id == activity_id) else {
            debug!(activity_id, "comment for unknown activity ignored");
            return Ok(Outcome::NotFound);
        };

        let comment = Comment {
            id: self.ids.next_id(floor)?,
            author_id: actor.id,
            author_name: actor.name.clone(),
            text: text.to_string(),
            created_at: self.ids.now(),
        };
        info!(activity_id, comment_id = comment.id, user_id = actor.id, "comment added");
        activity.comments.push(comment);

        self.store.save_activities(&activities).await?;
        Ok(Outcome::Applied)
    }

    /// Create an activity from a submitted form and append it to the board.
    ///
    /// Text fields are copied as given. Afterwards the form is cleared and the
    /// view is sent back to the default section.
    pub async fn create_activity<V: ViewSink + ?Sized>(
        &self,
        form: &ActivityForm,
        viewer: &Identity,
        view: &mut V,
    ) -> anyhow::Result<Activity> {
        let _cycle = self.cycle.lock().await;
        let mut activities = self.store.activities().await?;
        let floor = activities.iter().map(|a| a.id).max().unwrap_or(0);

        let activity = Activity {
            id: self.ids.next_id(floor)?,
            name: form.text(ActivityForm::NAME),
            place: form.text(ActivityForm::PLACE),
            date: form.text(ActivityForm::DATE),
            time: form.text(ActivityForm::TIME),
            description: form.text(ActivityForm::DESCRIPTION),
            image_ref: form.text(ActivityForm::IMAGE_REF),
            capacity: form.capacity(),
            attendees: Vec::new(),
            comments: Vec::new(),
        };
        activities.push(activity.clone());
        self.store.save_activities(&activities).await?;
        info!(activity_id = activity.id, name = %activity.name, "activity created");

        view.notify(Notice::ActivityCreated {
            activity_id: activity.id,
        });
        view.clear_input(InputField::ActivityForm);
        self.show_board(viewer, view).await?;
        view.navigate(Section::default());
        Ok(activity)
    }

    /// Activities whose name contains `query`, ignoring case.
    pub async fn search(&self, query: &str, viewer: &Identity) -> anyhow::Result<BoardView> {
        let needle = query.trim().to_lowercase();
        let _cycle = self.cycle.lock().await;
        let activities = self.store.activities().await?;
        Ok(BoardView::project(
            activities
                .iter()
                .filter(|a| a.name.to_lowercase().contains(&needle)),
            viewer,
        ))
    }

    /// Activities dated on or after `from`. Undated or unparseable entries are left out.
    pub async fn upcoming(&self, from: Date, viewer: &Identity) -> anyhow::Result<BoardView> {
        let _cycle = self.cycle.lock().await;
        let activities = self.store.activities().await?;
        Ok(BoardView::project(
            activities
                .iter()
                .filter(|a| parse_date(&a.date).is_some_and(|date| date >= from)),
            viewer,
        ))
    }
}

pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}
