use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Capacity used when the submitted value is missing or not a positive number.
pub const DEFAULT_CAPACITY: u32 = 10;

/// An event people can sign up for and discuss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub place: String,
    pub date: String,
    pub time: String,
    pub description: String,
    pub image_ref: String,
    pub capacity: u32,
    pub attendees: Vec<Attendee>,
    pub comments: Vec<Comment>,
}

impl Activity {
    pub fn is_attending(&self, user_id: i64) -> bool {
        self.attendees.iter().any(|a| a.id == user_id)
    }

    pub fn is_full(&self) -> bool {
        self.attendees.len() >= self.capacity as usize
    }

    /// Share of seats taken, in percent. Not clamped.
    pub fn completion_percent(&self) -> f64 {
        self.attendees.len() as f64 / f64::from(self.capacity) * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: i64,
    pub name: String,
}

/// A single entry in an activity's comment thread. Never edited once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The person using this board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<String>,
}

impl CurrentUser {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Who is acting. Passed explicitly into every engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub name: String,
}

impl Identity {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl From<&Identity> for Attendee {
    fn from(identity: &Identity) -> Self {
        Attendee {
            id: identity.id,
            name: identity.name.clone(),
        }
    }
}

/// Flat field-name to value mapping submitted by the "new activity" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityForm {
    fields: BTreeMap<String, String>,
}

impl ActivityForm {
    pub const NAME: &'static str = "name";
    pub const PLACE: &'static str = "place";
    pub const DATE: &'static str = "date";
    pub const TIME: &'static str = "time";
    pub const DESCRIPTION: &'static str = "description";
    pub const IMAGE_REF: &'static str = "imageRef";
    pub const CAPACITY: &'static str = "capacity";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Value of a text field, empty when the form did not carry it.
    pub fn text(&self, field: &str) -> String {
        self.get(field).unwrap_or_default().to_string()
    }

    /// Capacity from the form, falling back to [`DEFAULT_CAPACITY`].
    pub fn capacity(&self) -> u32 {
        self.get(Self::CAPACITY)
            .and_then(parse_capacity)
            .unwrap_or(DEFAULT_CAPACITY)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

/// Reads the leading run of digits, so "12 people" gives 12.
fn parse_capacity(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let digits = raw
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, c)| &raw[..i + c.len_utf8()])?;
    digits.parse::<u32>().ok().filter(|capacity| *capacity > 0)
}

/// Submitted profile edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub password: String,
    pub confirm_password: String,
}
