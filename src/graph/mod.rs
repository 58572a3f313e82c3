// src/graph/mod.rs

//! The course dependency graph engine.
//!
//! - [`levels`] assigns each course a level (row band) in the diagram.
//! - [`availability`] classifies courses as completed / available / locked.
//! - [`layout`] buckets courses by level, positions them and emits edges.
//! - [`style`] derives render-time colors from status and edge kind.
//!
//! Everything here is synchronous and pure: inputs in, values out, no I/O
//! and no state kept between calls.

pub mod availability;
pub mod layout;
pub mod levels;
pub mod style;

pub use availability::{affected_by, classify, classify_all, AvailabilitySummary};
pub use layout::{
    plan_layout, plan_layout_with_levels, GraphLayout, LayoutEdge, LayoutNode, LayoutOptions,
};
pub use levels::{resolve_levels, resolve_levels_with, LevelAssignment, NominalLevelRule};
pub use style::{
    edge_style, node_style, style_for, style_of_edge, EdgeStyle, LineKind, NodeStyle,
};
