// src/graph/layout.rs

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Course, CourseId};
use crate::config::model::LayoutSection;
use crate::errors::{CoursedagError, Result};
use crate::graph::availability::{affected_by, classify};
use crate::graph::levels::{resolve_levels_with, LevelAssignment, NominalLevelRule};
use crate::progress::CompletedSet;
use crate::types::{CourseStatus, EdgeKind};

pub const DEFAULT_SLOTS_PER_ROW: usize = 5;
pub const DEFAULT_HORIZONTAL_SPACING: f64 = 250.0;
pub const DEFAULT_LEVEL_SPACING: f64 = 150.0;

/// Placement parameters.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Maximum nodes per row inside one level; extra nodes wrap to new rows.
    pub slots_per_row: usize,
    pub horizontal_spacing: f64,
    /// Distance between consecutive rows.
    pub level_spacing: f64,
    pub nominal: NominalLevelRule,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            slots_per_row: DEFAULT_SLOTS_PER_ROW,
            horizontal_spacing: DEFAULT_HORIZONTAL_SPACING,
            level_spacing: DEFAULT_LEVEL_SPACING,
            nominal: NominalLevelRule::first_digit(),
        }
    }
}

impl LayoutOptions {
    /// Build options from a validated `[layout]` section.
    pub fn from_section(section: &LayoutSection) -> Result<Self> {
        let nominal = match section.level_pattern.as_deref() {
            Some(pattern) => NominalLevelRule::from_pattern(pattern).map_err(|e| {
                CoursedagError::ConfigError(format!("invalid [layout].level_pattern: {e}"))
            })?,
            None => NominalLevelRule::first_digit(),
        };

        Ok(Self {
            slots_per_row: section.slots_per_row.max(1),
            horizontal_spacing: section.horizontal_spacing,
            level_spacing: section.level_spacing,
            nominal,
        })
    }
}

/// A positioned course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub id: CourseId,
    pub level: u32,
    /// Position inside the level's bucket, in placement order.
    pub index_in_level: usize,
    /// Row within the level (`index_in_level / slots_per_row`).
    pub row: usize,
    /// Column within the row (`index_in_level % slots_per_row`).
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub status: CourseStatus,
}

/// A directed relation between two course ids.
///
/// `target`/`source` may name a course that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutEdge {
    /// `"<source>-<target>"`.
    pub id: String,
    pub source: CourseId,
    pub target: CourseId,
    pub kind: EdgeKind,
}

/// Output of one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

impl GraphLayout {
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Node ids grouped per level, ascending, in placement order.
    pub fn levels(&self) -> BTreeMap<u32, Vec<&str>> {
        let mut levels: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
        for node in &self.nodes {
            levels.entry(node.level).or_default().push(node.id.as_str());
        }
        levels
    }

    /// Re-derive every node's status. Positions and edges are untouched.
    ///
    /// Returns the ids whose status changed.
    pub fn recolor(&mut self, catalog: &Catalog, completed: &CompletedSet) -> Vec<CourseId> {
        let mut changed = Vec::new();
        for node in &mut self.nodes {
            if let Some(course) = catalog.get(&node.id) {
                let status = classify(course, completed);
                if status != node.status {
                    node.status = status;
                    changed.push(node.id.clone());
                }
            }
        }
        changed
    }

    /// Re-derive the status of the nodes affected by toggling `toggled`.
    ///
    /// Returns the ids whose status actually changed.
    pub fn recolor_after_toggle(
        &mut self,
        catalog: &Catalog,
        completed: &CompletedSet,
        toggled: &str,
    ) -> Vec<CourseId> {
        let affected: HashSet<&str> = affected_by(catalog, toggled).into_iter().collect();
        let mut changed = Vec::new();

        for node in &mut self.nodes {
            if !affected.contains(node.id.as_str()) {
                continue;
            }
            if let Some(course) = catalog.get(&node.id) {
                let status = classify(course, completed);
                if status != node.status {
                    node.status = status;
                    changed.push(node.id.clone());
                }
            }
        }

        changed
    }
}

/// Resolve levels, then place and classify every course.
pub fn plan_layout(
    catalog: &Catalog,
    completed: &CompletedSet,
    options: &LayoutOptions,
) -> GraphLayout {
    let levels = resolve_levels_with(catalog, &options.nominal);
    plan_layout_with_levels(catalog, &levels, completed, options)
}

/// Place and classify every course using an existing level assignment.
///
/// Courses missing from `levels` are placed at level 0.
pub fn plan_layout_with_levels(
    catalog: &Catalog,
    levels: &LevelAssignment,
    completed: &CompletedSet,
    options: &LayoutOptions,
) -> GraphLayout {
    let nodes = place_nodes(catalog, levels, completed, options);
    let edges = emit_edges(catalog);

    info!(
        nodes = nodes.len(),
        edges = edges.len(),
        max_level = levels.max_level().unwrap_or(0),
        "planned course layout"
    );

    GraphLayout { nodes, edges }
}

fn place_nodes(
    catalog: &Catalog,
    levels: &LevelAssignment,
    completed: &CompletedSet,
    options: &LayoutOptions,
) -> Vec<LayoutNode> {
    // Buckets keep catalog order; the stable sort below only reorders by
    // nominal level.
    let mut buckets: BTreeMap<u32, Vec<&Course>> = BTreeMap::new();
    for course in catalog.courses() {
        let level = levels.level_of(&course.id).unwrap_or(0);
        buckets.entry(level).or_default().push(course);
    }

    let slots = options.slots_per_row.max(1);
    let h = options.horizontal_spacing;
    let v = options.level_spacing;

    let mut nodes = Vec::with_capacity(catalog.len());
    // First y coordinate not yet occupied by a previous level's rows.
    let mut next_free_y = f64::NEG_INFINITY;

    for (level, mut bucket) in buckets {
        bucket.sort_by_key(|course| options.nominal.level_of(&course.id));

        let rows = bucket.len().div_ceil(slots);
        let offset = centering_offset(bucket.len(), slots, h);

        // Nominal band top is `level * 2 * v`; wide levels push later ones down.
        let band_top = (f64::from(level) * 2.0 * v).max(next_free_y);
        next_free_y = band_top + rows as f64 * v;

        debug!(level, size = bucket.len(), rows, band_top, "placing level bucket");

        for (index, course) in bucket.into_iter().enumerate() {
            let row = index / slots;
            let column = index % slots;
            nodes.push(LayoutNode {
                id: course.id.clone(),
                level,
                index_in_level: index,
                row,
                column,
                x: column as f64 * h - offset,
                y: band_top + row as f64 * v,
                status: classify(course, completed),
            });
        }
    }

    nodes
}

/// Half the width of a bucket's widest row, so rows center on `x = 0`.
fn centering_offset(bucket_size: usize, slots: usize, h: f64) -> f64 {
    let columns = bucket_size.min(slots);
    if columns == 0 {
        return 0.0;
    }
    (columns - 1) as f64 * h / 2.0
}

/// One edge per declared relation: `prereq -> course` for prerequisites and
/// `course -> coreq` for corequisites.
///
/// Symmetric corequisite declarations yield two edges with swapped ends.
/// A relation declared twice (same endpoints) is emitted once; the first
/// declaration wins. Distinct relations whose ids collide because an id
/// contains `-` are both kept; the later one gets a `#n` suffix.
fn emit_edges(catalog: &Catalog) -> Vec<LayoutEdge> {
    let mut edges: Vec<LayoutEdge> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();

    let mut push = |source: &str, target: &str, kind: EdgeKind| {
        let base = format!("{source}-{target}");
        let mut id = base.clone();
        let mut suffix = 1;

        while let Some(&existing) = by_id.get(&id) {
            let other = &edges[existing];
            if other.source == source && other.target == target {
                debug!(edge = %id, %kind, "duplicate relation skipped");
                return;
            }
            suffix += 1;
            id = format!("{base}#{suffix}");
        }

        if suffix > 1 {
            warn!(
                edge = %base,
                %source,
                %target,
                renamed = %id,
                "edge id collides with a different relation"
            );
        }

        by_id.insert(id.clone(), edges.len());
        edges.push(LayoutEdge {
            id,
            source: source.to_string(),
            target: target.to_string(),
            kind,
        });
    };

    for course in catalog.courses() {
        for prereq in &course.prerequisites {
            push(prereq, &course.id, EdgeKind::Prerequisite);
        }
        for coreq in &course.corequisites {
            push(&course.id, coreq, EdgeKind::Corequisite);
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(layout: &GraphLayout) -> Vec<&str> {
        layout.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn single_level_is_centered() {
        let catalog = Catalog::new(vec![Course::new("A1"), Course::new("B1"), Course::new("C1")]);
        let layout = plan_layout(&catalog, &CompletedSet::new(), &LayoutOptions::default());

        let xs: Vec<f64> = layout.nodes.iter().map(|n| n.x).collect();
        assert_eq!(xs, vec![-250.0, 0.0, 250.0]);
        assert!(layout.nodes.iter().all(|n| n.y == 300.0));
    }

    #[test]
    fn bucket_sorted_by_nominal_level_stably() {
        // All three land on level 3; C is nominal 1 but pulled down by B.
        let catalog = Catalog::new(vec![
            Course::new("X3"),
            Course::new("B2"),
            Course::new("C1").with_prerequisites(["B2"]),
            Course::new("Y3"),
        ]);

        let layout = plan_layout(&catalog, &CompletedSet::new(), &LayoutOptions::default());
        let levels = layout.levels();
        assert_eq!(levels[&2], vec!["B2"]);
        assert_eq!(levels[&3], vec!["C1", "X3", "Y3"]);
    }

    #[test]
    fn wraps_rows_and_keeps_levels_apart() {
        let mut courses: Vec<Course> = (0..7).map(|i| Course::new(format!("L1-{i}"))).collect();
        courses.push(Course::new("N2").with_prerequisites(["L1-0"]));
        let catalog = Catalog::new(courses);

        let options = LayoutOptions {
            slots_per_row: 3,
            horizontal_spacing: 10.0,
            level_spacing: 5.0,
            ..LayoutOptions::default()
        };
        let layout = plan_layout(&catalog, &CompletedSet::new(), &options);

        let first = layout.node("L1-0").unwrap();
        let seventh = layout.node("L1-6").unwrap();
        assert_eq!((first.row, first.column), (0, 0));
        assert_eq!((seventh.row, seventh.column), (2, 0));
        assert_eq!(first.y, 10.0);
        assert_eq!(seventh.y, 20.0);

        // Level 1 occupies three rows; level 2 starts below them.
        let n2 = layout.node("N2").unwrap();
        assert_eq!(n2.level, 2);
        assert_eq!(n2.y, 25.0);
    }

    #[test]
    fn edges_follow_declaration_order() {
        let catalog = Catalog::new(vec![
            Course::new("A"),
            Course::new("B").with_prerequisites(["A"]).with_corequisites(["C"]),
            Course::new("C").with_corequisites(["B"]),
        ]);

        let layout = plan_layout(&catalog, &CompletedSet::new(), &LayoutOptions::default());
        let edge_ids: Vec<&str> = layout.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(edge_ids, vec!["A-B", "B-C", "C-B"]);
        assert_eq!(layout.edges[0].kind, EdgeKind::Prerequisite);
        assert_eq!(layout.edges[1].kind, EdgeKind::Corequisite);
    }

    #[test]
    fn duplicate_declarations_emit_one_edge() {
        let catalog = Catalog::new(vec![
            Course::new("A"),
            Course::new("B").with_prerequisites(["A", "A"]),
        ]);
        let layout = plan_layout(&catalog, &CompletedSet::new(), &LayoutOptions::default());
        assert_eq!(layout.edges.len(), 1);
    }

    #[test]
    fn colliding_edge_ids_keep_both_relations() {
        let catalog = Catalog::new(vec![
            Course::new("C").with_prerequisites(["A-B"]),
            Course::new("A").with_corequisites(["B-C"]),
        ]);
        let layout = plan_layout(&catalog, &CompletedSet::new(), &LayoutOptions::default());

        let edges: Vec<(&str, &str, &str)> = layout
            .edges
            .iter()
            .map(|e| (e.id.as_str(), e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(
            edges,
            vec![("A-B-C", "A-B", "C"), ("A-B-C#2", "A", "B-C")]
        );
    }

    #[test]
    fn dangling_prerequisite_still_gets_an_edge() {
        let catalog = Catalog::new(vec![Course::new("Z").with_prerequisites(["NONEXISTENT"])]);
        let layout = plan_layout(&catalog, &CompletedSet::new(), &LayoutOptions::default());
        assert_eq!(ids(&layout), vec!["Z"]);
        assert_eq!(layout.edges[0].source, "NONEXISTENT");
    }

    #[test]
    fn recolor_after_toggle_reports_changes() {
        let catalog = Catalog::new(vec![
            Course::new("A"),
            Course::new("B").with_prerequisites(["A"]),
            Course::new("C"),
        ]);
        let mut completed = CompletedSet::new();
        let mut layout = plan_layout(&catalog, &completed, &LayoutOptions::default());
        let positions: Vec<(f64, f64)> = layout.nodes.iter().map(|n| (n.x, n.y)).collect();

        completed.toggle("A");
        let changed = layout.recolor_after_toggle(&catalog, &completed, "A");

        assert_eq!(changed, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(layout.node("A").unwrap().status, CourseStatus::Completed);
        assert_eq!(layout.node("B").unwrap().status, CourseStatus::Available);
        let after: Vec<(f64, f64)> = layout.nodes.iter().map(|n| (n.x, n.y)).collect();
        assert_eq!(positions, after);

        let mut full = layout.clone();
        assert!(full.recolor(&catalog, &completed).is_empty());
        assert_eq!(full, layout);
    }
}
