// src/graph/levels.rs

//! Level resolution: assigns every course a row in the layered diagram.
//!
//! The resolved level of a course is
//! `max(nominal(course), level(p) + 1 for every known prerequisite p)`,
//! so a known prerequisite always sits strictly above its dependents unless
//! both are in the same cycle.
//!
//! Cycles are tolerated: when a prerequisite is revisited while it is still
//! on the recursion path, that occurrence contributes nothing, and the course
//! that closed the loop loses its nominal floor. It drops to level 0 unless a
//! prerequisite outside the loop holds it lower. Prerequisite ids that are not
//! in the catalog contribute nothing either.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use tracing::{debug, warn};

use crate::catalog::{Catalog, CourseId};

/// Nominal level used when an id carries no catalog number.
pub const DEFAULT_NOMINAL_LEVEL: u32 = 1;

/// How a course id maps to its nominal catalog level.
///
/// By default the first decimal digit of the id is used (`BSCI301` -> 3).
/// A custom pattern may be configured; its first capture group (or the whole
/// match when it has none) must parse as an integer.
#[derive(Debug, Clone, Default)]
pub struct NominalLevelRule {
    pattern: Option<Regex>,
}

impl NominalLevelRule {
    /// First-digit rule.
    pub fn first_digit() -> Self {
        Self { pattern: None }
    }

    pub fn from_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Some(Regex::new(pattern)?),
        })
    }

    pub fn level_of(&self, id: &str) -> u32 {
        match &self.pattern {
            None => id
                .chars()
                .find_map(|c| c.to_digit(10))
                .unwrap_or(DEFAULT_NOMINAL_LEVEL),
            Some(re) => re
                .captures(id)
                .and_then(|caps| caps.get(1).or_else(|| caps.get(0)))
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(DEFAULT_NOMINAL_LEVEL),
        }
    }
}

/// Resolved level per known course id.
///
/// Derived and ephemeral: rebuilt whenever the course set changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelAssignment {
    levels: HashMap<CourseId, u32>,
    /// Courses that closed a prerequisite cycle and lost their nominal floor.
    cycle_breakers: Vec<CourseId>,
}

impl LevelAssignment {
    pub fn level_of(&self, id: &str) -> Option<u32> {
        self.levels.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn max_level(&self) -> Option<u32> {
        self.levels.values().copied().max()
    }

    /// Courses that closed a prerequisite cycle, in resolution order.
    pub fn cycle_breakers(&self) -> &[CourseId] {
        &self.cycle_breakers
    }
}

/// Resolve levels with the default first-digit rule.
pub fn resolve_levels(catalog: &Catalog) -> LevelAssignment {
    resolve_levels_with(catalog, &NominalLevelRule::first_digit())
}

/// Resolve levels for every course in the catalog.
///
/// Courses are visited in input order, which makes the cycle policy
/// deterministic: the member of a cycle reached second on the recursion path
/// is the one that closes it.
pub fn resolve_levels_with(catalog: &Catalog, rule: &NominalLevelRule) -> LevelAssignment {
    let mut resolver = Resolver {
        catalog,
        rule,
        memo: HashMap::with_capacity(catalog.len()),
        on_path: HashSet::new(),
        cycle_breakers: Vec::new(),
    };

    for course in catalog.courses() {
        resolver.resolve(course.id.as_str());
    }

    let levels = resolver
        .memo
        .into_iter()
        .map(|(id, level)| (id.to_string(), level))
        .collect();

    LevelAssignment {
        levels,
        cycle_breakers: resolver.cycle_breakers,
    }
}

/// Per-pass resolution state. Nothing here outlives one call.
struct Resolver<'a> {
    catalog: &'a Catalog,
    rule: &'a NominalLevelRule,
    memo: HashMap<&'a str, u32>,
    on_path: HashSet<&'a str>,
    cycle_breakers: Vec<CourseId>,
}

impl<'a> Resolver<'a> {
    /// Returns `None` when `id` is already on the recursion path.
    fn resolve(&mut self, id: &'a str) -> Option<u32> {
        if let Some(&level) = self.memo.get(id) {
            return Some(level);
        }
        if self.on_path.contains(id) {
            return None;
        }
        let course = self.catalog.get(id)?;

        self.on_path.insert(id);

        // Lowest level that keeps every resolved prerequisite strictly above.
        let mut below_prereqs: u32 = 0;
        let mut closes_cycle = false;

        for prereq in &course.prerequisites {
            if !self.catalog.contains(prereq) {
                debug!(course = id, prereq = %prereq, "dangling prerequisite ignored for leveling");
                continue;
            }
            match self.resolve(prereq.as_str()) {
                Some(prereq_level) => {
                    below_prereqs = below_prereqs.max(prereq_level.saturating_add(1))
                }
                None => closes_cycle = true,
            }
        }

        self.on_path.remove(id);

        // A cycle closer loses its nominal floor but still sits below the
        // prerequisites that resolved.
        let level = if closes_cycle {
            warn!(
                course = id,
                level = below_prereqs,
                "prerequisite cycle detected; dropping nominal level"
            );
            self.cycle_breakers.push(id.to_string());
            below_prereqs
        } else {
            self.rule.level_of(id).max(below_prereqs)
        };

        debug!(course = id, level, "resolved course level");
        self.memo.insert(id, level);
        Some(level)
    }
}
