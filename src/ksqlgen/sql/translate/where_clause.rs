//! WHERE Clause Builder
//!
//! Translates a boolean predicate lambda into a `WHERE <predicate>`
//! fragment. Binary comparisons map directly through the operator table;
//! any node shape the scalar renderer cannot translate fails with an error
//! naming the unsupported construct.

use crate::ksqlgen::sql::ast::Expr;
use crate::ksqlgen::sql::error::SqlError;
use crate::ksqlgen::sql::translate::ast_util;
use crate::ksqlgen::sql::translate::ExprRenderer;

/// Builder for WHERE clauses.
pub struct WhereClauseBuilder;

impl WhereClauseBuilder {
    /// Build `WHERE <predicate>` from one predicate lambda.
    pub fn build(predicate: &Expr) -> Result<String, SqlError> {
        let body = ast_util::lambda_body(predicate);
        let rendered = ExprRenderer::render(body, "WHERE predicate")?;
        Ok(format!("WHERE {}", rendered))
    }

    /// Build `WHERE <p1> AND <p2> ...` from several accumulated predicates.
    /// Returns `None` when there are no predicates.
    pub fn build_all(predicates: &[Expr]) -> Result<Option<String>, SqlError> {
        if predicates.is_empty() {
            return Ok(None);
        }
        let mut rendered = Vec::with_capacity(predicates.len());
        for p in predicates {
            let body = ast_util::lambda_body(p);
            rendered.push(ExprRenderer::render(body, "WHERE predicate")?);
        }
        Ok(Some(format!("WHERE {}", rendered.join(" AND "))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ksqlgen::sql::ast::{BinaryOperator, LiteralValue};

    fn price_gt(n: i64) -> Expr {
        Expr::lambda(
            "t",
            Expr::binary(
                BinaryOperator::GreaterThan,
                Expr::member(Expr::Parameter("t".to_string()), "Price"),
                Expr::Literal(LiteralValue::Integer(n)),
            ),
        )
    }

    #[test]
    fn test_simple_comparison() {
        assert_eq!(
            WhereClauseBuilder::build(&price_gt(100)).unwrap(),
            "WHERE Price > 100"
        );
    }

    #[test]
    fn test_multiple_predicates_joined_with_and() {
        let volume = Expr::lambda(
            "t",
            Expr::binary(
                BinaryOperator::LessThanOrEqual,
                Expr::member(Expr::Parameter("t".to_string()), "Volume"),
                Expr::Literal(LiteralValue::Integer(5000)),
            ),
        );
        let clause = WhereClauseBuilder::build_all(&[price_gt(100), volume]).unwrap();
        assert_eq!(clause.as_deref(), Some("WHERE Price > 100 AND Volume <= 5000"));
    }

    #[test]
    fn test_no_predicates_yields_none() {
        assert_eq!(WhereClauseBuilder::build_all(&[]).unwrap(), None);
    }

    #[test]
    fn test_unsupported_node_is_named() {
        let bad = Expr::lambda("t", Expr::NewObject(vec![]));
        let err = WhereClauseBuilder::build(&bad).unwrap_err();
        assert!(matches!(err, SqlError::UnsupportedConstruct { .. }));
    }
}
