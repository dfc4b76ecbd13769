use serde::{Deserialize, Serialize};

use crate::features::common::{Gender, Role};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetails {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub role: Role,
    #[serde(rename = "isEmailVerified", default)]
    pub is_email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

/// Editable profile fields. Only the fields that are set are sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct ProfileBody<'a> {
    pub profile: &'a ProfileUpdate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_profile() -> Result<(), serde_json::Error> {
        let profile: ProfileDetails = serde_json::from_value(json!({
            "id": "u1",
            "name": "Asha",
            "phone_number": "9876543210",
            "email": "asha@school.edu",
            "role": "admin",
            "gender": "prefer_not_to_say",
            "isEmailVerified": true,
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-02T00:00:00Z",
            "deleted_at": null
        }))?;
        assert_eq!(profile.role, Role::Admin);
        assert_eq!(profile.gender, Some(Gender::PreferNotToSay));
        assert!(profile.is_email_verified);
        assert_eq!(profile.deleted_at, None);
        Ok(())
    }

    #[test]
    fn update_sends_only_set_fields() -> Result<(), serde_json::Error> {
        let update = ProfileUpdate {
            name: Some("Asha K".to_string()),
            ..ProfileUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(ProfileBody { profile: &update })?,
            json!({"profile": {"name": "Asha K"}})
        );
        assert!(ProfileUpdate::default().is_empty());
        Ok(())
    }
}
