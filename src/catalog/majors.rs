// src/catalog/majors.rs

use crate::catalog::course::Course;

/// Distinct subject (major) names, in first-seen order.
pub fn subjects(courses: &[Course]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for course in courses {
        if let Some(ref subject) = course.subject {
            if !names.iter().any(|n| n == subject) {
                names.push(subject.clone());
            }
        }
    }
    names
}

/// Keep only the courses of one subject. `None` keeps everything.
///
/// Courses without a subject never match a concrete filter.
pub fn filter_by_major(courses: Vec<Course>, major: Option<&str>) -> Vec<Course> {
    match major {
        None => courses,
        Some(major) => courses.into_iter().filter(|c| c.in_subject(major)).collect(),
    }
}
