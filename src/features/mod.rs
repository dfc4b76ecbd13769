//! Feature modules, one per dashboard area. Each holds its wire types, its
//! query/mutation endpoints and, where the screen keeps state, a small form
//! struct.

pub mod allow_list;
pub mod assessment;
pub mod auth;
pub mod common;
pub mod exams;
pub mod profile;
pub mod school;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod upload;
