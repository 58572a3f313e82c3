// src/report.rs

//! Stdout rendering for the CLI subcommands.
//!
//! Every writer takes an `io::Write` so tests can capture the output; the
//! binary passes a locked stdout. Logs never go through here.

use std::io::{self, Write};

use serde::Serialize;

use crate::catalog::{Catalog, Course};
use crate::config::ConfigFile;
use crate::engine::CoreSession;
use crate::graph::{
    node_style, style_of_edge, AvailabilitySummary, EdgeStyle, GraphLayout, LayoutEdge,
    LayoutNode, NodeStyle,
};
use crate::progress::ToggleEvent;
use crate::types::CourseStatus;

#[derive(Serialize)]
struct StyledNode<'a> {
    #[serde(flatten)]
    node: &'a LayoutNode,
    title: &'a str,
    style: NodeStyle,
}

#[derive(Serialize)]
struct StyledEdge<'a> {
    #[serde(flatten)]
    edge: &'a LayoutEdge,
    style: EdgeStyle,
}

#[derive(Serialize)]
struct StyledLayout<'a> {
    nodes: Vec<StyledNode<'a>>,
    edges: Vec<StyledEdge<'a>>,
    summary: AvailabilitySummary,
}

/// Pretty JSON of the layout, with render styles attached to every node
/// and edge.
pub fn write_layout_json<W: Write>(
    out: &mut W,
    layout: &GraphLayout,
    catalog: &Catalog,
) -> io::Result<()> {
    let styled = StyledLayout {
        nodes: layout
            .nodes
            .iter()
            .map(|node| StyledNode {
                node,
                title: catalog.get(&node.id).map(|c| c.title.as_str()).unwrap_or(""),
                style: node_style(node),
            })
            .collect(),
        edges: layout
            .edges
            .iter()
            .map(|edge| StyledEdge {
                edge,
                style: style_of_edge(edge),
            })
            .collect(),
        summary: AvailabilitySummary::from_statuses(layout.nodes.iter().map(|n| n.status)),
    };

    serde_json::to_writer_pretty(&mut *out, &styled)?;
    writeln!(out)
}

/// Level-by-level listing of the layout followed by its edges.
pub fn write_layout_text<W: Write>(out: &mut W, layout: &GraphLayout) -> io::Result<()> {
    for (level, ids) in layout.levels() {
        writeln!(out, "level {level}:")?;
        for id in ids {
            if let Some(node) = layout.node(id) {
                writeln!(
                    out,
                    "  {:<12} row {} col {}  ({:.1}, {:.1})  {}",
                    node.id, node.row, node.column, node.x, node.y, node.status
                )?;
            }
        }
    }

    if !layout.edges.is_empty() {
        writeln!(out, "edges:")?;
        for edge in &layout.edges {
            writeln!(out, "  {:<24} {}", edge.id, edge.kind)?;
        }
    }
    Ok(())
}

/// One line per course: id, status, title.
pub fn write_statuses<W: Write>(out: &mut W, session: &CoreSession) -> io::Result<()> {
    for (id, status) in session.statuses() {
        let title = session
            .catalog()
            .get(id)
            .map(|c| c.title.as_str())
            .unwrap_or("");
        write_status_line(out, id, status, title)?;
    }
    write_summary(out, &session.summary())
}

/// Detail block for a single course.
pub fn write_course<W: Write>(
    out: &mut W,
    course: &Course,
    status: CourseStatus,
    level: Option<u32>,
) -> io::Result<()> {
    write_status_line(out, &course.id, status, &course.title)?;
    if let Some(level) = level {
        writeln!(out, "  level: {level}")?;
    }
    if !course.prerequisites.is_empty() {
        writeln!(out, "  prerequisites: {}", course.prerequisites.join(", "))?;
    }
    if !course.corequisites.is_empty() {
        writeln!(out, "  corequisites: {}", course.corequisites.join(", "))?;
    }
    if !course.description.is_empty() {
        writeln!(out, "  {}", course.description)?;
    }
    Ok(())
}

fn write_status_line<W: Write>(
    out: &mut W,
    id: &str,
    status: CourseStatus,
    title: &str,
) -> io::Result<()> {
    if title.is_empty() {
        writeln!(out, "{id:<12} {status:<10}")
    } else {
        writeln!(out, "{id:<12} {status:<10} {title}")
    }
}

pub fn write_summary<W: Write>(out: &mut W, summary: &AvailabilitySummary) -> io::Result<()> {
    writeln!(
        out,
        "{} courses: {} completed, {} available, {} locked",
        summary.total(),
        summary.completed,
        summary.available,
        summary.locked
    )
}

pub fn write_toggle<W: Write>(out: &mut W, event: &ToggleEvent) -> io::Result<()> {
    let state = if event.new_state {
        "completed"
    } else {
        "not completed"
    };
    writeln!(out, "{} marked {state}", event.id)
}

pub fn write_majors<W: Write>(out: &mut W, majors: &[String]) -> io::Result<()> {
    if majors.is_empty() {
        return writeln!(out, "no subjects in catalog");
    }
    for major in majors {
        writeln!(out, "{major}")?;
    }
    Ok(())
}

pub fn write_cycles<W: Write>(out: &mut W, cycles: &[Vec<String>]) -> io::Result<()> {
    if cycles.is_empty() {
        return writeln!(out, "no prerequisite cycles");
    }
    for cycle in cycles {
        writeln!(out, "cycle: {}", cycle.join(", "))?;
    }
    Ok(())
}

/// Simple dry-run output: effective settings and what the catalog holds.
pub fn write_dry_run<W: Write>(
    out: &mut W,
    cfg: &ConfigFile,
    all_courses: &[Course],
    catalog: &Catalog,
) -> io::Result<()> {
    writeln!(out, "coursedag dry-run")?;
    writeln!(out, "  layout.slots_per_row = {}", cfg.layout.slots_per_row)?;
    writeln!(
        out,
        "  layout.horizontal_spacing = {}",
        cfg.layout.horizontal_spacing
    )?;
    writeln!(out, "  layout.level_spacing = {}", cfg.layout.level_spacing)?;
    if let Some(ref pattern) = cfg.layout.level_pattern {
        writeln!(out, "  layout.level_pattern = {pattern}")?;
    }
    if let Some(ref path) = cfg.catalog.path {
        writeln!(out, "  catalog.path = {}", path.display())?;
    }
    if let Some(ref major) = cfg.catalog.major {
        writeln!(out, "  catalog.major = {major}")?;
    }
    writeln!(out, "  progress.storage = {:?}", cfg.progress.storage)?;
    writeln!(out, "  progress.path = {}", cfg.progress.path.display())?;
    writeln!(out)?;

    writeln!(
        out,
        "courses: {} loaded, {} after filtering",
        all_courses.len(),
        catalog.len()
    )?;
    let dangling = catalog.dangling_references();
    if !dangling.is_empty() {
        writeln!(out, "dangling references: {}", dangling.join(", "))?;
    }
    let cycles = catalog.prerequisite_cycles();
    if !cycles.is_empty() {
        writeln!(out, "prerequisite cycles: {}", cycles.len())?;
    }
    Ok(())
}
