//! GROUP BY Clause Builder
//!
//! Translates a grouping-key lambda into `GROUP BY <key1>[, <key2>...]`.
//! A single member access yields a one-column key; an object construction
//! yields a composite key in declaration order.

use crate::ksqlgen::sql::ast::Expr;
use crate::ksqlgen::sql::error::SqlError;
use crate::ksqlgen::sql::translate::ast_util;
use crate::ksqlgen::sql::translate::ExprRenderer;

/// Builder for GROUP BY clauses.
pub struct GroupByClauseBuilder;

impl GroupByClauseBuilder {
    /// Build `GROUP BY ...` from the grouping-key lambda.
    pub fn build(key_selector: &Expr) -> Result<String, SqlError> {
        let columns = Self::key_columns(key_selector)?;
        Ok(format!("GROUP BY {}", columns.join(", ")))
    }

    /// Key column names in declaration order, shared with the derivation
    /// key encoding.
    pub fn key_columns(key_selector: &Expr) -> Result<Vec<String>, SqlError> {
        match ast_util::lambda_body(key_selector) {
            Expr::NewObject(fields) => {
                if fields.is_empty() {
                    return Err(SqlError::structural_error(
                        "GroupBy",
                        "composite grouping key has no fields",
                    ));
                }
                let mut columns = Vec::with_capacity(fields.len());
                for (_, value) in fields {
                    columns.push(ExprRenderer::render(value, "GROUP BY key")?);
                }
                Ok(columns)
            }
            single => Ok(vec![ExprRenderer::render(single, "GROUP BY key")?]),
        }
    }
}
