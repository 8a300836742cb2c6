//! Row structs for database tables.
//!
//! Each submodule holds a `FromRow` struct matching the table columns and a
//! conversion into the domain type from `cinema_core`.

pub mod movie;
