//! Shared storefront domain model.
//!
//! This crate owns the document shapes and validation rules used by both the
//! `server` (persistence + REST) and the `admin` console client. Everything
//! here is synchronous and free of I/O except the inventory spreadsheet
//! codec, which works over any `Read`/`Write`.

pub mod footer;
pub mod format;
pub mod gallery;
pub mod hero;
pub mod inventory;
pub mod marquee;
pub mod rate;
pub mod validate;

pub use validate::ValidationResult;
