// src/catalog/arena.rs

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use tracing::warn;

use crate::catalog::course::{Course, CourseId};

/// Id-keyed arena of courses.
///
/// Courses are stored once, in input order; relations stay as id lists so
/// cyclic prerequisite data is representable without shared ownership.
/// Reverse edges (dependents) are precomputed for every declared prerequisite id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<CourseId, usize>,
    /// Direct dependents: for each prerequisite id (known or dangling), the
    /// courses listing it (input order, no duplicates).
    dependents: HashMap<CourseId, Vec<CourseId>>,
}

impl Catalog {
    /// Build an arena from a course list.
    ///
    /// Duplicate ids keep the first record; later duplicates are dropped with
    /// a warning.
    pub fn new(courses: Vec<Course>) -> Self {
        let mut kept: Vec<Course> = Vec::with_capacity(courses.len());
        let mut index: HashMap<CourseId, usize> = HashMap::with_capacity(courses.len());

        for course in courses {
            if index.contains_key(&course.id) {
                warn!(course = %course.id, "duplicate course id; keeping first record");
                continue;
            }
            index.insert(course.id.clone(), kept.len());
            kept.push(course);
        }

        let mut dependents: HashMap<CourseId, Vec<CourseId>> = HashMap::new();
        for course in &kept {
            for prereq in &course.prerequisites {
                let list = dependents.entry(prereq.clone()).or_default();
                if !list.contains(&course.id) {
                    list.push(course.id.clone());
                }
            }
        }

        Self {
            courses: kept,
            index,
            dependents,
        }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Courses in input order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Position of a course in input order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&Course> {
        self.position(id).map(|idx| &self.courses[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Courses that list `id` as a prerequisite. `id` need not be a course
    /// in this catalog.
    pub fn dependents_of(&self, id: &str) -> &[CourseId] {
        self.dependents
            .get(id)
            .map(|d| d.as_slice())
            .unwrap_or(&[])
    }

    /// Referenced ids (prerequisite or corequisite) with no course in this
    /// catalog, in first-seen order.
    pub fn dangling_references(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for course in &self.courses {
            for id in course.prerequisites.iter().chain(course.corequisites.iter()) {
                if !self.contains(id) && !seen.contains(&id.as_str()) {
                    seen.push(id.as_str());
                }
            }
        }
        seen
    }

    /// Prerequisite cycles among known courses.
    ///
    /// Each entry is a strongly connected component with more than one
    /// member, or a single course listing itself as a prerequisite. Members
    /// are reported in input order. Purely diagnostic: layout and leveling
    /// tolerate cycles on their own.
    pub fn prerequisite_cycles(&self) -> Vec<Vec<CourseId>> {
        // Edge direction: prerequisite -> course
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
        for course in &self.courses {
            graph.add_node(course.id.as_str());
        }
        for course in &self.courses {
            for prereq in &course.prerequisites {
                if self.contains(prereq) {
                    graph.add_edge(prereq.as_str(), course.id.as_str(), ());
                }
            }
        }

        let mut cycles: Vec<Vec<CourseId>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|mut scc| {
                scc.sort_by_key(|id| self.position(id).unwrap_or(usize::MAX));
                scc.into_iter().map(str::to_string).collect()
            })
            .collect();

        cycles.sort_by_key(|members: &Vec<CourseId>| {
            members
                .first()
                .and_then(|id| self.position(id))
                .unwrap_or(usize::MAX)
        });
        cycles
    }
}
