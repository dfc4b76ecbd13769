use serde::{Deserialize, Serialize};

use crate::validation::{is_valid_email, is_valid_phone, is_valid_pincode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchoolLevel {
    Primary,
    Secondary,
    #[serde(rename = "Higher Secondary")]
    HigherSecondary,
    Composite,
}

impl SchoolLevel {
    pub const ALL: [Self; 4] = [
        Self::Primary,
        Self::Secondary,
        Self::HigherSecondary,
        Self::Composite,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::HigherSecondary => "Higher Secondary",
            Self::Composite => "Composite",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchoolBoard {
    #[serde(rename = "CBSE")]
    Cbse,
    #[serde(rename = "HSLC")]
    Hslc,
    #[serde(rename = "ICSE")]
    Icse,
    #[serde(rename = "State Board")]
    StateBoard,
    Other,
}

impl SchoolBoard {
    pub const ALL: [Self; 5] = [
        Self::Cbse,
        Self::Hslc,
        Self::Icse,
        Self::StateBoard,
        Self::Other,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cbse => "CBSE",
            Self::Hslc => "HSLC",
            Self::Icse => "ICSE",
            Self::StateBoard => "State Board",
            Self::Other => "Other",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchoolType {
    Government,
    Private,
}

impl SchoolType {
    pub const ALL: [Self; 2] = [Self::Government, Self::Private];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Government => "Government",
            Self::Private => "Private",
        }
    }
}

/// Finds the variant whose label matches `value`, ignoring case.
pub fn parse_label<T: Copy>(all: &[T], label: impl Fn(T) -> &'static str, value: &str) -> Option<T> {
    let value = value.trim();
    all.iter().copied().find(|item| label(*item).eq_ignore_ascii_case(value))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
    pub level: SchoolLevel,
    pub board: SchoolBoard,
    #[serde(rename = "type")]
    pub school_type: SchoolType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_contact_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl School {
    /// Messages for every field the details form would reject.
    #[must_use]
    pub fn problems(&self) -> Vec<&'static str> {
        let mut problems = Vec::new();
        let required = [
            (&self.name, "School name is required"),
            (&self.phone_number, "Phone number is required"),
            (&self.email, "Email is required"),
            (&self.address_line, "Address is required"),
            (&self.pincode, "Pincode is required"),
            (&self.city, "City is required"),
            (&self.state, "State is required"),
            (&self.country, "Country is required"),
        ];
        for (value, message) in required {
            if value.trim().is_empty() {
                problems.push(message);
            }
        }

        if !self.phone_number.is_empty() && !is_valid_phone(&self.phone_number) {
            problems.push("Please enter a valid 10-digit phone number");
        }
        if !is_valid_email(&self.email) {
            problems.push("Invalid email address");
        }
        if !self.pincode.is_empty() && !is_valid_pincode(&self.pincode) {
            problems.push("Please enter a valid 6-digit pincode");
        }
        if self
            .primary_contact_number
            .as_deref()
            .is_some_and(|number| !number.is_empty() && !is_valid_phone(number))
        {
            problems.push("Please enter a valid 10-digit phone number");
        }
        problems
    }
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct SchoolBody<'a> {
    pub school: &'a School,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn school() -> School {
        School {
            id: None,
            name: "Green Valley".to_string(),
            phone_number: "9876543210".to_string(),
            email: "office@greenvalley.edu".to_string(),
            address_line: "12 Hill Road".to_string(),
            city: "Shillong".to_string(),
            state: "Meghalaya".to_string(),
            country: "India".to_string(),
            pincode: "793001".to_string(),
            level: SchoolLevel::HigherSecondary,
            board: SchoolBoard::StateBoard,
            school_type: SchoolType::Private,
            primary_contact_name: None,
            primary_contact_number: None,
            logo_url: None,
        }
    }

    #[test]
    fn classifications_use_backend_strings() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(school())?;
        assert_eq!(value["level"], json!("Higher Secondary"));
        assert_eq!(value["board"], json!("State Board"));
        assert_eq!(value["type"], json!("Private"));
        assert!(value.get("_id").is_none());
        Ok(())
    }

    #[test]
    fn labels_parse_back() {
        assert_eq!(
            parse_label(&SchoolBoard::ALL, SchoolBoard::label, "state board"),
            Some(SchoolBoard::StateBoard)
        );
        assert_eq!(
            parse_label(&SchoolLevel::ALL, SchoolLevel::label, "Composite"),
            Some(SchoolLevel::Composite)
        );
        assert_eq!(parse_label(&SchoolType::ALL, SchoolType::label, "charter"), None);
    }

    #[test]
    fn complete_school_has_no_problems() {
        assert!(school().problems().is_empty());
    }

    #[test]
    fn bad_fields_are_reported() {
        let mut school = school();
        school.city.clear();
        school.pincode = "79300".to_string();
        school.email = "office".to_string();
        assert_eq!(
            school.problems(),
            vec![
                "City is required",
                "Invalid email address",
                "Please enter a valid 6-digit pincode"
            ]
        );
    }
}
