// src/progress/mod.rs

//! A student's completed courses and where they are persisted.

pub mod set;
pub mod store;

pub use set::{CompletedSet, ToggleEvent};
pub use store::{CompletionStore, FileStore, MemoryStore};
