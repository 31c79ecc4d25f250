//! # Rampart Models
//!
//! Domain models and DTOs for the Rampart API.
//!
//! - [`users`]: The user document and its update DTO

pub mod users;

pub use users::{SEARCHABLE_FIELDS, UpdateUserDto, User};
