#![allow(dead_code)]

pub use coursedag_test_utils::builders;
pub use coursedag_test_utils::{init_tracing, with_timeout};

use std::path::{Path, PathBuf};

/// Small biology catalog in the raw export shape.
pub const BIO_CATALOG: &str = r#"[
  {
    "__catalogCourseId": "BSCI170",
    "title": "Principles of Molecular & Cellular Biology",
    "description": "Intro course.",
    "subjectCode": { "name": "BSCI", "prerequisites": [], "corequisites": ["BSCI171"] }
  },
  {
    "__catalogCourseId": "BSCI171",
    "title": "Principles of Molecular & Cellular Biology Laboratory",
    "subjectCode": { "name": "BSCI", "prerequisites": [], "corequisites": ["BSCI170"] }
  },
  {
    "__catalogCourseId": "BSCI330",
    "title": "Cell Biology and Physiology",
    "subjectCode": { "name": "BSCI", "prerequisites": ["BSCI170", "CHEM131"] }
  },
  {
    "__catalogCourseId": "CHEM131",
    "title": "Chemistry I",
    "subjectCode": { "name": "CHEM", "prerequisites": [] }
  }
]"#;

/// Write `contents` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
