//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers extract path and body, delegate to the service layer, and wrap
//! the result in the [`crate::response::Envelope`]. Errors map via
//! [`crate::error::AppError`].

pub mod movie;
