//! DML Generation
//!
//! Builds the terminal SELECT statement against a (possibly derived)
//! object. Push queries end with a trailing `EMIT CHANGES`; pull queries
//! omit it.

use crate::ksqlgen::sql::error::SqlError;
use crate::ksqlgen::sql::translate::{
    OrderByClauseBuilder, QueryParts, SelectClauseBuilder, WhereClauseBuilder,
};

/// Query mode for the terminal statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Continuous query streaming changes (`EMIT CHANGES`)
    Push,
    /// Point-in-time snapshot against a table
    Pull,
}

/// Generator for terminal SELECT statements.
pub struct DmlGenerator;

impl DmlGenerator {
    /// Build the terminal SELECT over `object_name`.
    pub fn select(
        object_name: &str,
        parts: &QueryParts,
        mode: QueryMode,
    ) -> Result<String, SqlError> {
        let mut stmt = format!(
            "{} FROM {}",
            SelectClauseBuilder::build(parts.select.as_ref())?,
            object_name
        );

        if let Some(where_clause) = WhereClauseBuilder::build_all(&parts.wheres)? {
            stmt.push(' ');
            stmt.push_str(&where_clause);
        }
        if let Some(order_by) = &parts.order_by {
            stmt.push(' ');
            stmt.push_str(&OrderByClauseBuilder::build(order_by)?);
        }
        if mode == QueryMode::Push {
            stmt.push_str(" EMIT CHANGES");
        }
        stmt.push(';');
        Ok(stmt)
    }
}
