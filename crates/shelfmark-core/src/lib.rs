//! Core domain model for shelfmark.
//!
//! This crate defines the catalog entities (Genre, Book), the SQLite
//! schema, and the data access operations the front end calls directly.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod store;

pub use error::{Error, Result};
pub use store::Database;
