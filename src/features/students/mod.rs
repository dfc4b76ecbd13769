//! Student records, list filters and the students screen.

pub mod client;
pub mod filters;
pub mod screen;
pub mod types;

pub use client::{create_student, delete_student, get_student, list_students};
pub use filters::{Debouncer, DobRange, FilterKey, StudentFilters};
pub use screen::StudentsScreen;
pub use types::{NewStudent, Student};
