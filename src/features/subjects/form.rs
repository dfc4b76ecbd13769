//! "Add subject" input on the academics screen.

use tracing::debug;

use crate::{
    api::ApiClient,
    features::{
        common::SubmitGate,
        subjects::{client::create_subject, types::NewSubject},
    },
    notice::Notice,
};

#[derive(Clone, Debug, Default)]
pub struct SubjectForm {
    pub name: String,
    gate: SubmitGate,
}

impl SubjectForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn gate(&self) -> &SubmitGate {
        &self.gate
    }

    /// Creates the subject named by the trimmed input. Blank input and a
    /// submit while another is in flight do nothing and return `None`. On
    /// success the input is cleared.
    pub async fn submit(&mut self, api: &ApiClient) -> Option<Notice> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            debug!("ignoring blank subject name");
            return None;
        }
        let _guard = self.gate.begin()?;

        let subject = NewSubject { name, code: None };
        match create_subject(api, &subject).await {
            Ok(_) => {
                self.name.clear();
                Some(Notice::success("Subject added"))
            }
            Err(err) => Some(Notice::from_error(&err, "Failed to add subject")),
        }
    }
}
