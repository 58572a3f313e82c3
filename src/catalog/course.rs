// src/catalog/course.rs

use serde::{Deserialize, Serialize};

/// Canonical course identifier type (catalog code, e.g. `"BSCI201"`).
pub type CourseId = String;

/// A normalized course record.
///
/// Relations are plain id lists. Ids are not guaranteed to resolve to a
/// course in the working set; every consumer treats unknown ids fail-soft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Subject / major name this course belongs to, when the source knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Prerequisite ids in declaration order (duplicates tolerated).
    #[serde(default)]
    pub prerequisites: Vec<CourseId>,
    /// Corequisite ids in declaration order, as declared from this side only.
    #[serde(default)]
    pub corequisites: Vec<CourseId>,
}

impl Course {
    pub fn new(id: impl Into<CourseId>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            subject: None,
            prerequisites: Vec::new(),
            corequisites: Vec::new(),
        }
    }

    pub fn with_prerequisites<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CourseId>,
    {
        self.prerequisites.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_corequisites<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CourseId>,
    {
        self.corequisites.extend(ids.into_iter().map(Into::into));
        self
    }

    /// True if the course belongs to the given subject (exact match).
    pub fn in_subject(&self, subject: &str) -> bool {
        self.subject.as_deref() == Some(subject)
    }
}
