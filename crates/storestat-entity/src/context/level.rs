//! Context levels.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Level of a context in the platform's scope hierarchy.
///
/// The numeric values are the ones stored in the `contextlevel` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextLevel {
    /// The whole site.
    System,
    /// A single user's private area.
    User,
    /// A course category.
    CourseCategory,
    /// A course.
    Course,
    /// An activity or resource inside a course.
    Module,
    /// A block instance.
    Block,
}

/// A `contextlevel` value that does not map to a known level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown context level {0}")]
pub struct UnknownContextLevel(pub i64);

impl ContextLevel {
    /// The value stored in the `contextlevel` column.
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::System => 10,
            Self::User => 30,
            Self::CourseCategory => 40,
            Self::Course => 50,
            Self::Module => 70,
            Self::Block => 80,
        }
    }
}

impl TryFrom<i64> for ContextLevel {
    type Error = UnknownContextLevel;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(Self::System),
            30 => Ok(Self::User),
            40 => Ok(Self::CourseCategory),
            50 => Ok(Self::Course),
            70 => Ok(Self::Module),
            80 => Ok(Self::Block),
            other => Err(UnknownContextLevel(other)),
        }
    }
}

impl fmt::Display for ContextLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::User => write!(f, "user"),
            Self::CourseCategory => write!(f, "coursecat"),
            Self::Course => write!(f, "course"),
            Self::Module => write!(f, "module"),
            Self::Block => write!(f, "block"),
        }
    }
}
