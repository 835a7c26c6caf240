//! ORDER BY Clause Builder
//!
//! Translates an `OrderBy`/`OrderByDescending` method-call node into
//! `ORDER BY <field> ASC|DESC`.

use crate::ksqlgen::sql::ast::Expr;
use crate::ksqlgen::sql::error::SqlError;
use crate::ksqlgen::sql::translate::ast_util;
use crate::ksqlgen::sql::translate::ExprRenderer;

/// Builder for ORDER BY clauses.
pub struct OrderByClauseBuilder;

impl OrderByClauseBuilder {
    /// Build `ORDER BY ...` from an ordering method-call node.
    pub fn build(node: &Expr) -> Result<String, SqlError> {
        match ast_util::unwrap_conversions(node) {
            Expr::MethodCall { method, args, .. }
                if method == "OrderBy" || method == "OrderByDescending" =>
            {
                if args.len() != 1 {
                    return Err(SqlError::structural_error(
                        method.as_str(),
                        format!("expected one key selector, found {} arguments", args.len()),
                    ));
                }
                let key = ast_util::lambda_body(&args[0]);
                let column = ExprRenderer::render(key, "ORDER BY key")?;
                let direction = if method == "OrderByDescending" {
                    "DESC"
                } else {
                    "ASC"
                };
                Ok(format!("ORDER BY {} {}", column, direction))
            }
            other => Err(SqlError::structural_error(
                "OrderBy",
                format!(
                    "expected an ordering method call, found {}",
                    ast_util::node_kind(other)
                ),
            )),
        }
    }
}
