//! Shapes and helpers shared by the feature clients.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::cache::{Tag, TagKind};

/// Standard `{ data, message? }` response body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of write endpoints that only answer with an optional message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Teacher,
    Staff,
    Student,
    SuperAdmin,
}

impl Role {
    /// Roles an operator can pick on the profile screen.
    pub const SELECTABLE: [Self; 4] = [Self::Admin, Self::Teacher, Self::Staff, Self::Student];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Staff => "staff",
            Self::Student => "student",
            Self::SuperAdmin => "super_admin",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Teacher => "Teacher",
            Self::Staff => "Staff",
            Self::Student => "Student",
            Self::SuperAdmin => "Super Admin",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
            Self::PreferNotToSay => "prefer_not_to_say",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
            Self::PreferNotToSay => "Prefer not to say",
        }
    }

    /// Parses the wire value or the label, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        [Self::Male, Self::Female, Self::Other, Self::PreferNotToSay]
            .into_iter()
            .find(|gender| gender.as_str() == value || gender.label().to_ascii_lowercase() == value)
    }
}

/// Populated `user_id` reference on student and teacher records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// One line of an education or experience history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub year_from: i32,
    pub year_to: i32,
    pub description: String,
}

/// Accepts a JSON string or number and keeps it as text. Roll numbers come
/// back either way.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

/// Tags for a list result: one per id plus the `LIST` sentinel.
pub(crate) fn list_tags<'a>(kind: TagKind, ids: impl IntoIterator<Item = &'a str>) -> Vec<Tag> {
    let mut tags: Vec<Tag> = ids.into_iter().map(|id| Tag::id(kind, id)).collect();
    tags.push(Tag::list(kind));
    tags
}

/// Blocks a second submit while one is in flight. Clones share the flag.
#[derive(Clone, Debug, Default)]
pub struct SubmitGate {
    busy: Arc<AtomicBool>,
}

impl SubmitGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a submit as started, or returns `None` if one already is.
    #[must_use]
    pub fn begin(&self) -> Option<SubmitGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard {
                busy: Arc::clone(&self.busy),
            })
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the gate when dropped.
#[derive(Debug)]
pub struct SubmitGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
