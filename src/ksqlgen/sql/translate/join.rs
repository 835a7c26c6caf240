//! JOIN Clause Builder
//!
//! Translates a join method-call node into `JOIN <inner> ON <left> =
//! <right>`. The node must carry exactly five operands: the outer source
//! (call target), the inner source, the outer key selector, the inner key
//! selector, and the result selector. Any other arity or operand shape is
//! a structural error naming expected vs. actual shape, distinct from the
//! generic unsupported-construct path.

use crate::ksqlgen::sql::ast::{Expr, LiteralValue};
use crate::ksqlgen::sql::error::SqlError;
use crate::ksqlgen::sql::translate::ast_util;
use crate::ksqlgen::sql::translate::ExprRenderer;

const EXPECTED_SHAPE: &str =
    "expected outer source, inner source, outer key selector, inner key selector, result selector";

/// Builder for JOIN clauses.
pub struct JoinClauseBuilder;

impl JoinClauseBuilder {
    /// Check that `node` is a join call with the exact expected operand
    /// shape, without rendering anything.
    pub fn validate_shape(node: &Expr) -> Result<(), SqlError> {
        let (_, args) = Self::join_operands(node)?;
        Self::source_name(&args[0])?;
        Self::key_column(&args[1], "outer key selector")?;
        Self::key_column(&args[2], "inner key selector")?;
        if !matches!(
            ast_util::unwrap_conversions(&args[3]),
            Expr::Lambda { .. }
        ) {
            return Err(SqlError::structural_error(
                "Join",
                format!(
                    "{}; result selector is {}, not a lambda",
                    EXPECTED_SHAPE,
                    ast_util::node_kind(&args[3])
                ),
            ));
        }
        Ok(())
    }

    /// Build the `JOIN ... ON ...` clause from a validated join node.
    pub fn build(node: &Expr) -> Result<String, SqlError> {
        let (_, args) = Self::join_operands(node)?;
        let inner = Self::source_name(&args[0])?;
        let outer_key = Self::key_column(&args[1], "outer key selector")?;
        let inner_key = Self::key_column(&args[2], "inner key selector")?;
        Ok(format!("JOIN {} ON {} = {}", inner, outer_key, inner_key))
    }

    /// Inner source name, used for derived-object naming and registration.
    pub fn inner_source(node: &Expr) -> Result<String, SqlError> {
        let (_, args) = Self::join_operands(node)?;
        Self::source_name(&args[0])
    }

    /// The join's result selector, used as the projection when the chain
    /// carries no later `Select`.
    pub fn result_selector(node: &Expr) -> Result<&Expr, SqlError> {
        let (_, args) = Self::join_operands(node)?;
        Ok(&args[3])
    }

    fn join_operands(node: &Expr) -> Result<(&Expr, &[Expr]), SqlError> {
        match ast_util::unwrap_conversions(node) {
            Expr::MethodCall {
                target,
                method,
                args,
            } if method == "Join" => {
                if args.len() != 4 {
                    return Err(SqlError::structural_error(
                        "Join",
                        format!(
                            "{}; found {} argument(s) besides the outer source",
                            EXPECTED_SHAPE,
                            args.len()
                        ),
                    ));
                }
                Ok((target, args))
            }
            other => Err(SqlError::structural_error(
                "Join",
                format!(
                    "{}; found {}",
                    EXPECTED_SHAPE,
                    ast_util::node_kind(other)
                ),
            )),
        }
    }

    fn source_name(expr: &Expr) -> Result<String, SqlError> {
        match ast_util::unwrap_conversions(expr) {
            Expr::Parameter(name) => Ok(name.clone()),
            Expr::Literal(LiteralValue::String(name)) => Ok(name.clone()),
            other => Err(SqlError::structural_error(
                "Join",
                format!(
                    "{}; inner source is {}, not a source reference",
                    EXPECTED_SHAPE,
                    ast_util::node_kind(other)
                ),
            )),
        }
    }

    fn key_column(selector: &Expr, role: &str) -> Result<String, SqlError> {
        let body = match ast_util::unwrap_conversions(selector) {
            Expr::Lambda { body, .. } => ast_util::unwrap_conversions(body),
            other => {
                return Err(SqlError::structural_error(
                    "Join",
                    format!(
                        "{}; {} is {}, not a lambda",
                        EXPECTED_SHAPE,
                        role,
                        ast_util::node_kind(other)
                    ),
                ));
            }
        };
        // key selectors are almost always bare column references; anything
        // richer goes through the full renderer
        match ast_util::column_name(body) {
            Some(column) => Ok(column.to_string()),
            None => ExprRenderer::render(body, "JOIN key selector"),
        }
    }
}
