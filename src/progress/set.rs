// src/progress/set.rs

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::CourseId;

/// Ids of the courses a student has completed.
///
/// May contain ids unknown to the current catalog (e.g. courses from a
/// previously viewed major); classification simply never looks them up.
/// Serialized as a sorted JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletedSet {
    ids: BTreeSet<CourseId>,
}

impl CompletedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flip membership of `id`. Returns the new state (`true` = completed).
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(|s| s.as_str())
    }
}

impl<S: Into<CourseId>> FromIterator<S> for CompletedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Notification emitted exactly once per toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleEvent {
    pub id: CourseId,
    /// `true` if the course is now completed.
    pub new_state: bool,
}
