pub mod client;
pub mod types;

pub use client::{get_profile, save_profile, update_profile};
pub use types::{ProfileDetails, ProfileUpdate};
