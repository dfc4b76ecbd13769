//! # Schooldesk (school management console)
//!
//! `schooldesk` is the administrative client for a school management backend.
//! It signs operators in, keeps their session, and drives the CRUD screens for
//! students, teachers, subjects, exams, assessments, school/profile settings
//! and the SMS allow list.
//!
//! ## Request layer
//!
//! Every call goes through [`api::ApiClient`]. The client reads the bearer
//! credential from the [`session::Session`] at request time and runs the
//! registered status handlers (`401` clears the session and redirects to
//! `/auth/login`) before handing the result back to the caller.
//!
//! ## Cache
//!
//! Reads are declared as [`api::Query`] endpoints that provide cache tags,
//! writes as [`api::Mutation`] endpoints that invalidate them. After a
//! successful mutation every subscribed read whose tag was invalidated is
//! refetched; unsubscribed reads are dropped. Student and Teacher use per-id
//! tags plus a `LIST` sentinel, every other entity uses one tag per type.
//!
//! ## Validation
//!
//! Form checks in [`validation`] are pure functions keyed by a
//! [`validation::FormContext`], so `confirm_password` compares against
//! `password` on register and against `newPassword` on the password reset
//! screens.

pub mod api;
pub mod cache;
pub mod cli;
pub mod context;
pub mod features;
pub mod guard;
pub mod navigation;
pub mod notice;
pub mod session;
pub mod validation;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub use context::AppContext;
