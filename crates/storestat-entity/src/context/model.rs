//! Context row model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use storestat_core::types::ContextId;

use super::level::ContextLevel;

/// A row of the `context` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContextRecord {
    /// Context id.
    pub id: ContextId,
    /// Scope level of the context.
    #[sqlx(try_from = "i64")]
    pub contextlevel: ContextLevel,
    /// Id of the course, course-module, user, ... the context belongs to.
    pub instanceid: i64,
}

impl ContextRecord {
    /// Create a context row.
    pub fn new(id: ContextId, contextlevel: ContextLevel, instanceid: i64) -> Self {
        Self {
            id,
            contextlevel,
            instanceid,
        }
    }
}
