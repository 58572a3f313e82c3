// src/graph/availability.rs

//! Completion-based gating of courses.
//!
//! A course is `Completed` if its id is in the completed set, `Available`
//! if every prerequisite id is completed, and `Locked` otherwise.
//!
//! Unlike leveling, availability does not skip dangling prerequisites: an id
//! that names no course in the catalog can still only be satisfied by being
//! present in the completed set, so it keeps its dependent locked until then.

use serde::Serialize;

use crate::catalog::{Catalog, Course};
use crate::progress::CompletedSet;
use crate::types::CourseStatus;

/// Classify a single course. Pure function of `(course, completed)`.
pub fn classify(course: &Course, completed: &CompletedSet) -> CourseStatus {
    if completed.contains(&course.id) {
        CourseStatus::Completed
    } else if course.prerequisites.iter().all(|p| completed.contains(p)) {
        CourseStatus::Available
    } else {
        CourseStatus::Locked
    }
}

/// Classify every course in catalog (input) order.
pub fn classify_all<'a>(
    catalog: &'a Catalog,
    completed: &CompletedSet,
) -> Vec<(&'a str, CourseStatus)> {
    catalog
        .courses()
        .iter()
        .map(|c| (c.id.as_str(), classify(c, completed)))
        .collect()
}

/// Courses whose status may change when `id` is toggled: the course itself
/// (if known) and the courses listing it as a prerequisite, even when `id`
/// is a dangling reference.
///
/// Re-classifying just these yields the same statuses as re-classifying the
/// whole catalog.
pub fn affected_by<'a>(catalog: &'a Catalog, id: &'a str) -> Vec<&'a str> {
    let mut affected = Vec::new();
    if catalog.contains(id) {
        affected.push(id);
    }
    affected.extend(catalog.dependents_of(id).iter().map(|s| s.as_str()));
    affected
}

/// Course counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AvailabilitySummary {
    pub completed: usize,
    pub available: usize,
    pub locked: usize,
}

impl AvailabilitySummary {
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = CourseStatus>,
    {
        let mut summary = Self::default();
        for status in statuses {
            match status {
                CourseStatus::Completed => summary.completed += 1,
                CourseStatus::Available => summary.available += 1,
                CourseStatus::Locked => summary.locked += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.completed + self.available + self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_course_catalog() -> Catalog {
        Catalog::new(vec![
            Course::new("A"),
            Course::new("B").with_prerequisites(["A"]),
        ])
    }

    #[test]
    fn nothing_completed() {
        let catalog = two_course_catalog();
        let completed = CompletedSet::new();
        let statuses = classify_all(&catalog, &completed);
        assert_eq!(
            statuses,
            vec![("A", CourseStatus::Available), ("B", CourseStatus::Locked)]
        );
    }

    #[test]
    fn completing_prerequisite_unlocks_dependent() {
        let catalog = two_course_catalog();
        let completed: CompletedSet = ["A"].into_iter().collect();
        let statuses = classify_all(&catalog, &completed);
        assert_eq!(
            statuses,
            vec![("A", CourseStatus::Completed), ("B", CourseStatus::Available)]
        );
    }

    #[test]
    fn completed_wins_over_missing_prerequisites() {
        let course = Course::new("B").with_prerequisites(["A"]);
        let completed: CompletedSet = ["B"].into_iter().collect();
        assert_eq!(classify(&course, &completed), CourseStatus::Completed);
    }

    #[test]
    fn dangling_prerequisite_stays_locked() {
        let course = Course::new("Z").with_prerequisites(["NONEXISTENT"]);
        assert_eq!(classify(&course, &CompletedSet::new()), CourseStatus::Locked);

        let completed: CompletedSet = ["NONEXISTENT"].into_iter().collect();
        assert_eq!(classify(&course, &completed), CourseStatus::Available);
    }

    #[test]
    fn affected_includes_self_and_dependents() {
        let catalog = two_course_catalog();
        assert_eq!(affected_by(&catalog, "A"), vec!["A", "B"]);
        assert_eq!(affected_by(&catalog, "B"), vec!["B"]);
        assert!(affected_by(&catalog, "UNKNOWN").is_empty());

        let dangling = Catalog::new(vec![Course::new("Z").with_prerequisites(["GHOST"])]);
        assert_eq!(affected_by(&dangling, "GHOST"), vec!["Z"]);
    }

    #[test]
    fn summary_counts_each_status() {
        let summary = AvailabilitySummary::from_statuses([
            CourseStatus::Completed,
            CourseStatus::Locked,
            CourseStatus::Locked,
        ]);
        assert_eq!(summary.locked, 2);
        assert_eq!(summary.total(), 3);
    }
}
