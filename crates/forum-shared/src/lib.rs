//! # Forum Shared
//!
//! Wire types of the HTTP API: request shapes with their validation rules,
//! response shapes, and the problem-details error body.

pub mod dto;
pub mod response;
pub mod validation;

pub use response::ErrorResponse;
pub use validation::{FieldError, Validate, ValidationErrors};
