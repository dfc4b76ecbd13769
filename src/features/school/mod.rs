pub mod client;
pub mod types;

pub use client::{get_school, save_school, upsert_school};
pub use types::{School, SchoolBoard, SchoolLevel, SchoolType, parse_label};
