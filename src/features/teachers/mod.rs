pub mod client;
pub mod types;

pub use client::{
    add_teacher, create_teacher, delete_teacher, get_teacher, list_teachers, update_teacher,
};
pub use types::{Teacher, TeacherInput};
