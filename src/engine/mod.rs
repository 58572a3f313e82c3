// src/engine/mod.rs

//! Session engine for coursedag.
//!
//! This module ties together:
//! - the course catalog and its level assignment
//! - the current layout and per-course statuses
//! - the completed set and the toggle (mutation) entry point
//!
//! The pure core state machine lives in [`core`]; the IO shell that persists
//! the completed set and publishes notifications is implemented in
//! [`runtime`].

use crate::catalog::{Course, CourseId};
use crate::graph::GraphLayout;
use crate::progress::{CompletedSet, ToggleEvent};

/// Events flowing into the session from loaders, storage and the UI.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A fresh course list arrived (e.g. a different major was selected).
    CoursesLoaded(Vec<Course>),
    /// The completed set was read back from storage at session start.
    Hydrated(CompletedSet),
    /// The user flipped a course's completed / incomplete state.
    ToggleRequested { id: CourseId },
}

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Save this completed set through the store.
    Persist(CompletedSet),
    /// Tell observers about a toggle.
    Notify(ToggleEvent),
    /// Positions changed; renderers should take the full layout.
    Relayout(GraphLayout),
    /// Only these nodes changed status; positions are unchanged.
    Recolor(Vec<CourseId>),
}

/// Decision returned by the core after handling a single `SessionEvent`.
#[derive(Debug, Clone, Default)]
pub struct SessionStep {
    pub commands: Vec<SessionCommand>,
}

pub mod core;
pub mod handlers;
pub mod runtime;

pub use self::core::CoreSession;
pub use self::runtime::Runtime;
