//! Stream/Table Classification
//!
//! Decides whether an entity or derived object is a STREAM or a TABLE, and
//! whether the requested query mode is valid against it. Classification
//! drives both DDL generation strategy (CREATE STREAM vs. CREATE TABLE) and
//! query mode eligibility: pull queries are only valid against tables.
//!
//! Decision order for base entities:
//! 1. explicit STREAM marker on the descriptor
//! 2. explicit TABLE marker
//! 3. presence of one or more key fields → table
//! 4. otherwise → stream
//!
//! Join sides are classified independently; the classification of the final
//! (possibly derived) object decides push/pull eligibility at generation
//! time, never at execution time.

use crate::ksqlgen::sql::entity::EntityDescriptor;
use crate::ksqlgen::sql::error::SqlError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stream/table classification of a queryable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Stream,
    Table,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Stream => write!(f, "STREAM"),
            ObjectKind::Table => write!(f, "TABLE"),
        }
    }
}

/// Classifier for entities and derived objects.
pub struct StreamTableAnalyzer;

impl StreamTableAnalyzer {
    /// Classify a base entity: explicit marker first, key-presence
    /// heuristic second, stream as the default.
    pub fn classify(descriptor: &EntityDescriptor) -> ObjectKind {
        match descriptor.marker {
            Some(kind) => kind,
            None if !descriptor.key_fields.is_empty() => ObjectKind::Table,
            None => ObjectKind::Stream,
        }
    }

    /// Classify a derived object by the operations that produce it.
    /// Windowed or grouped aggregations materialize tables; a join alone
    /// yields a stream.
    pub fn classify_derivation(has_window: bool, has_group_by: bool) -> ObjectKind {
        if has_window || has_group_by {
            ObjectKind::Table
        } else {
            ObjectKind::Stream
        }
    }

    /// Validate the requested query mode against the resolved object.
    /// Pull mode against a stream is a classification error raised before
    /// any statement text is produced.
    pub fn check_pull_eligibility(
        object_name: &str,
        kind: ObjectKind,
        is_pull_query: bool,
    ) -> Result<(), SqlError> {
        if is_pull_query && kind == ObjectKind::Stream {
            return Err(SqlError::classification_error(
                object_name,
                "pull queries require a TABLE; object classifies as STREAM",
            ));
        }
        Ok(())
    }
}
