use serde::{Deserialize, Serialize};

/// Creator reference, populated by the backend when available.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowListEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub phone: String,
    #[serde(default)]
    pub created_by: CreatedBy,
    #[serde(rename = "deleted_at", default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct NewAllowListEntry<'a> {
    pub phone: &'a str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AllowListBody<'a> {
    pub allow_list: NewAllowListEntry<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_entry_with_populated_creator() -> Result<(), serde_json::Error> {
        let entry: AllowListEntry = serde_json::from_value(json!({
            "_id": "a1",
            "phone": "9876543210",
            "createdBy": {"name": "Asha", "phone_number": "9000000000"},
            "deleted_at": null,
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-01T00:00:00Z"
        }))?;
        assert_eq!(entry.created_by.name.as_deref(), Some("Asha"));
        assert_eq!(entry.deleted_at, None);
        Ok(())
    }

    #[test]
    fn create_body_shape() -> Result<(), serde_json::Error> {
        let body = AllowListBody {
            allow_list: NewAllowListEntry { phone: "9876543210" },
        };
        assert_eq!(
            serde_json::to_value(body)?,
            json!({"allowList": {"phone": "9876543210"}})
        );
        Ok(())
    }
}
