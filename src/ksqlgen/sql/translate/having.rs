//! HAVING Clause Builder
//!
//! Translates a post-aggregation predicate into `HAVING <predicate>`. Every
//! function referenced by the predicate must resolve to a name on the
//! aggregate allow-list (case-insensitive); any other function name is
//! rejected as non-aggregate before rendering starts.

use crate::ksqlgen::sql::ast::Expr;
use crate::ksqlgen::sql::error::SqlError;
use crate::ksqlgen::sql::translate::ast_util;
use crate::ksqlgen::sql::translate::functions;
use crate::ksqlgen::sql::translate::ExprRenderer;

/// Builder for HAVING clauses.
pub struct HavingClauseBuilder;

impl HavingClauseBuilder {
    /// Build `HAVING <predicate>` from a post-aggregation predicate lambda.
    pub fn build(predicate: &Expr) -> Result<String, SqlError> {
        let body = ast_util::lambda_body(predicate);
        Self::check_aggregates_only(body)?;
        let rendered = ExprRenderer::render(body, "HAVING predicate")?;
        Ok(format!("HAVING {}", rendered))
    }

    /// Reject any function call that does not resolve to an allow-listed
    /// aggregate name.
    fn check_aggregates_only(expr: &Expr) -> Result<(), SqlError> {
        match ast_util::unwrap_conversions(expr) {
            Expr::MethodCall { method, args, .. } => {
                let resolved = functions::aggregate_function(method)
                    .map(str::to_string)
                    .unwrap_or_else(|| method.to_uppercase());
                if !functions::is_aggregate_function(&resolved) {
                    return Err(SqlError::unsupported(
                        method.as_str(),
                        "HAVING predicate (not an aggregate function)",
                    ));
                }
                for arg in args {
                    Self::check_aggregates_only(arg)?;
                }
                Ok(())
            }
            Expr::BinaryOp { left, right, .. } => {
                Self::check_aggregates_only(left)?;
                Self::check_aggregates_only(right)
            }
            Expr::Lambda { body, .. } => Self::check_aggregates_only(body),
            // columns, literals, grouping key references are fine
            _ => Ok(()),
        }
    }
}
