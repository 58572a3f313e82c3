// src/graph/style.rs

//! Render-time styling derived from status and edge kind.
//!
//! Nothing here is stored on layout nodes; renderers call these on every
//! draw, so a completion toggle only changes the derived style.

use serde::Serialize;

use crate::graph::layout::{LayoutEdge, LayoutNode};
use crate::types::{CourseStatus, EdgeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub text: &'static str,
    /// Locked courses are drawn dimmed.
    pub dimmed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Default curved connector.
    Bezier,
    Straight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeStyle {
    pub stroke: &'static str,
    pub animated: bool,
    pub line: LineKind,
}

pub fn style_for(status: CourseStatus) -> NodeStyle {
    match status {
        CourseStatus::Completed => NodeStyle {
            fill: "#e6f4ea",
            stroke: "#2e7d32",
            text: "#1b5e20",
            dimmed: false,
        },
        CourseStatus::Available => NodeStyle {
            fill: "#f0e6ff",
            stroke: "#9c27b0",
            text: "#4a0e4e",
            dimmed: false,
        },
        CourseStatus::Locked => NodeStyle {
            fill: "#eeeeee",
            stroke: "#9e9e9e",
            text: "#616161",
            dimmed: true,
        },
    }
}

pub fn node_style(node: &LayoutNode) -> NodeStyle {
    style_for(node.status)
}

pub fn edge_style(kind: EdgeKind) -> EdgeStyle {
    match kind {
        EdgeKind::Prerequisite => EdgeStyle {
            stroke: "#9c27b0",
            animated: true,
            line: LineKind::Bezier,
        },
        EdgeKind::Corequisite => EdgeStyle {
            stroke: "#27b0b0",
            animated: true,
            line: LineKind::Straight,
        },
    }
}

pub fn style_of_edge(edge: &LayoutEdge) -> EdgeStyle {
    edge_style(edge.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_status_has_a_distinct_fill() {
        let fills = [
            style_for(CourseStatus::Completed).fill,
            style_for(CourseStatus::Available).fill,
            style_for(CourseStatus::Locked).fill,
        ];
        assert_ne!(fills[0], fills[1]);
        assert_ne!(fills[1], fills[2]);
        assert_ne!(fills[0], fills[2]);
        assert!(style_for(CourseStatus::Locked).dimmed);
    }

    #[test]
    fn corequisites_are_straight() {
        assert_eq!(edge_style(EdgeKind::Corequisite).line, LineKind::Straight);
        assert_eq!(edge_style(EdgeKind::Prerequisite).line, LineKind::Bezier);
    }
}
