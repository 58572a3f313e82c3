// src/catalog/mod.rs

//! Course records and the catalog they live in.
//!
//! - [`course`] defines the normalized [`Course`] record.
//! - [`arena`] holds courses keyed by id ([`Catalog`]) plus cycle diagnostics.
//! - [`loader`] parses catalog JSON exports.
//! - [`majors`] lists and filters courses by subject.

pub mod arena;
pub mod course;
pub mod loader;
pub mod majors;

pub use arena::Catalog;
pub use course::{Course, CourseId};
pub use loader::{load_catalog, parse_catalog};
pub use majors::{filter_by_major, subjects};
