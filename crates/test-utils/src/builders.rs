#![allow(dead_code)]

use std::path::PathBuf;

use coursedag::catalog::{Catalog, Course};
use coursedag::config::{ConfigFile, RawConfigFile};
use coursedag::types::StorageMode;

/// Builder for a single `Course`.
pub struct CourseBuilder {
    course: Course,
}

impl CourseBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            course: Course::new(id),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.course.title = title.to_string();
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.course.subject = Some(subject.to_string());
        self
    }

    pub fn requires(mut self, id: &str) -> Self {
        self.course.prerequisites.push(id.to_string());
        self
    }

    pub fn with_coreq(mut self, id: &str) -> Self {
        self.course.corequisites.push(id.to_string());
        self
    }

    pub fn build(self) -> Course {
        self.course
    }
}

/// Builder for a course list, kept in insertion order.
#[derive(Default)]
pub struct CatalogBuilder {
    courses: Vec<Course>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Add `id` with the given prerequisites.
    pub fn course(self, id: &str, prerequisites: &[&str]) -> Self {
        let course = Course::new(id).with_prerequisites(prerequisites.iter().copied());
        self.with_course(course)
    }

    /// Add a chain `ids[0] <- ids[1] <- ...`, each requiring the previous one.
    pub fn chain(mut self, ids: &[&str]) -> Self {
        let mut previous: Option<&str> = None;
        for &id in ids {
            let prereqs: Vec<&str> = previous.into_iter().collect();
            self = self.course(id, &prereqs);
            previous = Some(id);
        }
        self
    }

    pub fn courses(self) -> Vec<Course> {
        self.courses
    }

    pub fn build(self) -> Catalog {
        Catalog::new(self.courses)
    }
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn slots_per_row(mut self, slots: usize) -> Self {
        self.config.layout.slots_per_row = slots;
        self
    }

    pub fn spacing(mut self, horizontal: f64, level: f64) -> Self {
        self.config.layout.horizontal_spacing = horizontal;
        self.config.layout.level_spacing = level;
        self
    }

    pub fn level_pattern(mut self, pattern: &str) -> Self {
        self.config.layout.level_pattern = Some(pattern.to_string());
        self
    }

    pub fn catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.catalog.path = Some(path.into());
        self
    }

    pub fn major(mut self, major: &str) -> Self {
        self.config.catalog.major = Some(major.to_string());
        self
    }

    pub fn progress_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.progress.storage = StorageMode::File;
        self.config.progress.path = path.into();
        self
    }

    pub fn in_memory_progress(mut self) -> Self {
        self.config.progress.storage = StorageMode::Memory;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
