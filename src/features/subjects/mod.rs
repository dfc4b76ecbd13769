pub mod client;
pub mod form;
pub mod types;

pub use client::{create_subject, list_subjects};
pub use form::SubjectForm;
pub use types::{NewSubject, Subject};
