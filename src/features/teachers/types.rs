use serde::{Deserialize, Serialize};

use crate::features::common::{Gender, HistoryEntry, UserRef};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub education: Vec<HistoryEntry>,
    #[serde(default)]
    pub experience: Vec<HistoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

impl Teacher {
    #[must_use]
    pub fn name(&self) -> &str {
        self.user_id.as_ref().map_or("", |user| user.name.as_str())
    }
}

/// Add/edit teacher form, sent as `{ "teacher": ... }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// `YYYY-MM-DD`.
    pub dob: String,
    pub address: String,
    #[serde(default)]
    pub subjects: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct TeacherBody<'a> {
    pub teacher: &'a TeacherInput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_history() -> Result<(), serde_json::Error> {
        let teacher: Teacher = serde_json::from_value(json!({
            "_id": "t1",
            "user_id": {"name": "R. Kumar"},
            "subjects": ["Physics"],
            "education": [{"yearFrom": 2006, "yearTo": 2010, "description": "B.Tech"}]
        }))?;
        assert_eq!(teacher.name(), "R. Kumar");
        assert_eq!(teacher.education[0].year_to, 2010);
        assert!(teacher.experience.is_empty());
        Ok(())
    }
}
