// src/engine/core.rs

//! Pure core session state machine.
//!
//! This module contains a synchronous, deterministic "core session" that
//! consumes [`SessionEvent`]s and produces:
//! - an updated core state (catalog, levels, layout, completed set)
//! - a list of commands describing what the IO shell should do next
//!
//! The IO shell (`engine::runtime::Runtime`) is responsible for:
//! - saving the completed set through a `CompletionStore`
//! - publishing toggle notifications and layout updates
//!
//! The core is intended to be extensively unit tested without any Tokio,
//! channels, or filesystem.

use crate::catalog::Catalog;
use crate::engine::handlers::{handle_courses_loaded, handle_hydrated, handle_toggle};
use crate::engine::{SessionEvent, SessionStep};
use crate::graph::{
    classify_all, AvailabilitySummary, GraphLayout, LayoutOptions, LevelAssignment,
};
use crate::progress::CompletedSet;
use crate::types::CourseStatus;

/// Derived graph state for the current course set.
///
/// `levels` only changes when the course set changes; `layout` statuses
/// change on every toggle.
#[derive(Debug, Clone, Default)]
pub struct GraphState {
    pub catalog: Catalog,
    pub levels: LevelAssignment,
    pub layout: GraphLayout,
}

/// Pure core session state.
///
/// It has **no** channels, no Tokio types, and does not perform any IO.
#[derive(Debug)]
pub struct CoreSession {
    graph: GraphState,
    completed: CompletedSet,
    options: LayoutOptions,
}

impl CoreSession {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            graph: GraphState::default(),
            completed: CompletedSet::new(),
            options,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.graph.catalog
    }

    pub fn levels(&self) -> &LevelAssignment {
        &self.graph.levels
    }

    pub fn layout(&self) -> &GraphLayout {
        &self.graph.layout
    }

    pub fn completed(&self) -> &CompletedSet {
        &self.completed
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Status of every course, in catalog order.
    pub fn statuses(&self) -> Vec<(&str, CourseStatus)> {
        classify_all(&self.graph.catalog, &self.completed)
    }

    pub fn summary(&self) -> AvailabilitySummary {
        AvailabilitySummary::from_statuses(self.graph.layout.nodes.iter().map(|n| n.status))
    }

    /// Handle a single session event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: SessionEvent) -> SessionStep {
        match event {
            SessionEvent::CoursesLoaded(courses) => {
                handle_courses_loaded(&mut self.graph, &self.completed, &self.options, courses)
            }
            SessionEvent::Hydrated(set) => {
                handle_hydrated(&mut self.graph, &mut self.completed, set)
            }
            SessionEvent::ToggleRequested { id } => {
                handle_toggle(&mut self.graph, &mut self.completed, id)
            }
        }
    }
}
