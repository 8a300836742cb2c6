//! Domain types and validation for the cinema catalog.
//!
//! Pure logic only: no database or HTTP dependencies.

pub mod error;
pub mod movie;
pub mod types;
pub mod validation;
