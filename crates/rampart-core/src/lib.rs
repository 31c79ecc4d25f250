//! # Rampart Core
//!
//! Core types, errors, and utilities for the Rampart API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`filter`]: Backend-neutral filter tree used by list queries
//! - [`pagination`]: Pagination request parsing and response envelopes
//! - [`roles`]: The closed set of account roles
//!
//! # Example
//!
//! ```ignore
//! use rampart_core::{AppError, Filter, PaginationRequest, Role};
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//! let request = PaginationRequest::from_query(&query);
//! let base = Filter::eq("isActive", true);
//! let role: Role = "admin".parse()?;
//! ```

pub mod errors;
pub mod filter;
pub mod pagination;
pub mod roles;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use filter::Filter;
pub use pagination::{
    ApiResponse, PaginatedResponse, PaginationMeta, PaginationRequest, SortOrder,
};
pub use roles::{Role, UnknownRole};
