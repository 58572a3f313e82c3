// src/engine/handlers.rs

//! Event handling logic for the core session.

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Course, CourseId};
use crate::engine::core::GraphState;
use crate::engine::{SessionCommand, SessionStep};
use crate::graph::{plan_layout_with_levels, resolve_levels_with, LayoutOptions};
use crate::progress::{CompletedSet, ToggleEvent};

/// Handle a new course list.
///
/// Rebuilds the catalog, re-resolves levels and re-plans the whole layout.
/// The completed set is kept as is: it may name courses outside this list.
pub fn handle_courses_loaded(
    graph: &mut GraphState,
    completed: &CompletedSet,
    options: &LayoutOptions,
    courses: Vec<Course>,
) -> SessionStep {
    let catalog = Catalog::new(courses);

    for cycle in catalog.prerequisite_cycles() {
        warn!(?cycle, "catalog contains a prerequisite cycle");
    }
    let dangling = catalog.dangling_references();
    if !dangling.is_empty() {
        debug!(?dangling, "catalog references courses outside the working set");
    }

    let levels = resolve_levels_with(&catalog, &options.nominal);
    let layout = plan_layout_with_levels(&catalog, &levels, completed, options);

    info!(courses = catalog.len(), "course set loaded");

    *graph = GraphState {
        catalog,
        levels,
        layout,
    };

    SessionStep {
        commands: vec![SessionCommand::Relayout(graph.layout.clone())],
    }
}

/// Handle the one-time hydration of the completed set from storage.
///
/// This is the only place the set is replaced wholesale.
pub fn handle_hydrated(
    graph: &mut GraphState,
    completed: &mut CompletedSet,
    set: CompletedSet,
) -> SessionStep {
    *completed = set;
    let changed = graph.layout.recolor(&graph.catalog, completed);
    debug!(count = completed.len(), changed = changed.len(), "completed set hydrated");

    let mut commands = Vec::new();
    if !changed.is_empty() {
        commands.push(SessionCommand::Recolor(changed));
    }
    SessionStep { commands }
}

/// Handle a completion toggle.
///
/// - flips membership of `id` (unknown ids are written like any other)
/// - emits exactly one `Notify`, then a `Persist` of the new set
/// - re-derives statuses for the toggled course and its dependents only;
///   levels and positions are left alone
pub fn handle_toggle(
    graph: &mut GraphState,
    completed: &mut CompletedSet,
    id: CourseId,
) -> SessionStep {
    let new_state = completed.toggle(&id);

    if !graph.catalog.contains(&id) {
        debug!(course = %id, "toggled course is not in the current course set");
    }
    info!(course = %id, completed = new_state, "course completion toggled");

    let changed = graph
        .layout
        .recolor_after_toggle(&graph.catalog, completed, &id);

    let mut commands = vec![
        SessionCommand::Notify(ToggleEvent { id, new_state }),
        SessionCommand::Persist(completed.clone()),
    ];
    if !changed.is_empty() {
        commands.push(SessionCommand::Recolor(changed));
    }

    SessionStep { commands }
}
