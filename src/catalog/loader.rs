// src/catalog/loader.rs

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::catalog::course::Course;
use crate::errors::{CoursedagError, Result};
use crate::fs::FileSystem;

/// A catalog document is either a bare array of records or an object with a
/// `courses` array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Records(Vec<RawCourseRecord>),
    Wrapped { courses: Vec<RawCourseRecord> },
}

/// One course record as found in catalog exports.
///
/// Two shapes are accepted:
///
/// ```json
/// { "__catalogCourseId": "BSCI201", "title": "Cellular Biology",
///   "subjectCode": { "name": "BSCI", "prerequisites": ["BSCI101"], "corequisites": [] } }
/// ```
///
/// and the flattened one:
///
/// ```json
/// { "id": "BSCI201", "name": "Cellular Biology", "prerequisites": ["BSCI101"] }
/// ```
///
/// Top-level relation lists take precedence over the ones nested under
/// `subjectCode`.
#[derive(Debug, Deserialize)]
struct RawCourseRecord {
    #[serde(rename = "__catalogCourseId", alias = "id")]
    id: String,
    #[serde(default, alias = "name")]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default, rename = "subjectCode")]
    subject_code: Option<RawSubjectCode>,
    #[serde(default)]
    prerequisites: Option<Vec<String>>,
    #[serde(default)]
    corequisites: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSubjectCode {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    prerequisites: Vec<String>,
    #[serde(default)]
    corequisites: Vec<String>,
}

impl From<RawCourseRecord> for Course {
    fn from(raw: RawCourseRecord) -> Self {
        let subject_code = raw.subject_code.unwrap_or_default();
        Course {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            subject: raw.subject.or(subject_code.name),
            prerequisites: raw.prerequisites.unwrap_or(subject_code.prerequisites),
            corequisites: raw.corequisites.unwrap_or(subject_code.corequisites),
        }
    }
}

/// Parse a catalog document.
///
/// Parsing is all-or-nothing: one malformed record fails the whole document,
/// so callers never see a partially parsed course list.
pub fn parse_catalog(contents: &str) -> Result<Vec<Course>> {
    let document: CatalogDocument = serde_json::from_str(contents).map_err(|e| {
        CoursedagError::CatalogError(format!("invalid catalog document: {e}"))
    })?;

    let records = match document {
        CatalogDocument::Records(records) => records,
        CatalogDocument::Wrapped { courses } => courses,
    };

    if let Some(pos) = records.iter().position(|r| r.id.trim().is_empty()) {
        return Err(CoursedagError::CatalogError(format!(
            "course record #{pos} has an empty id"
        )));
    }

    let courses: Vec<Course> = records.into_iter().map(Course::from).collect();
    debug!(count = courses.len(), "parsed catalog records");
    Ok(courses)
}

/// Read and parse a catalog file through the given filesystem.
pub fn load_catalog(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<Vec<Course>> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path)?;
    let courses = parse_catalog(&contents)?;
    info!(path = %path.display(), count = courses.len(), "loaded course catalog");
    Ok(courses)
}
