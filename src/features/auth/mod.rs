//! Sign-in, registration and password recovery.

pub mod client;
pub mod flow;
pub mod types;

pub use flow::{AuthOutcome, forgot_password, identity, login, logout, register, reset_password};
