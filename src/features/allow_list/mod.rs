pub mod client;
pub mod types;

pub use client::{
    add_phone, create_allow_list_entry, delete_allow_list_entry, list_allow_list, remove_phone,
};
pub use types::{AllowListEntry, CreatedBy};
