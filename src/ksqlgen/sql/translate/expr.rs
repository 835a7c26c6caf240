//! Scalar expression renderer shared by the WHERE, SELECT, and HAVING
//! builders.
//!
//! Renders one expression-tree fragment to SQL text. Member access becomes
//! a column name, method calls resolve through the mapping tables, binary
//! operations render with minimal parenthesization. Any node or method with
//! no rendering is an error naming the construct and the clause it appeared
//! in; nothing is skipped silently.

use crate::ksqlgen::sql::ast::{BinaryOperator, Expr, LiteralValue};
use crate::ksqlgen::sql::error::SqlError;
use crate::ksqlgen::sql::translate::ast_util;
use crate::ksqlgen::sql::translate::functions;

/// Stateless renderer for scalar expressions.
pub struct ExprRenderer;

impl ExprRenderer {
    /// Render `expr` to SQL text. `context` names the surrounding clause
    /// for error messages (e.g. "WHERE predicate").
    pub fn render(expr: &Expr, context: &str) -> Result<String, SqlError> {
        Self::render_node(ast_util::unwrap_conversions(expr), context, 0)
    }

    fn render_node(expr: &Expr, context: &str, parent_prec: u8) -> Result<String, SqlError> {
        match ast_util::unwrap_conversions(expr) {
            Expr::MemberAccess { target, field } => Self::render_member(target, field, context),
            Expr::MethodCall {
                target,
                method,
                args,
            } => Self::render_method(target, method, args, context),
            Expr::BinaryOp { op, left, right } => {
                Self::render_binary(*op, left, right, context, parent_prec)
            }
            Expr::Literal(value) => Self::render_literal(value, context),
            Expr::GroupingKey { member } => match member {
                Some(m) => Ok(m.clone()),
                None => Err(SqlError::structural_error(
                    "GroupingKey",
                    format!("grouping key member not resolved in {}", context),
                )),
            },
            Expr::Lambda { body, .. } => Self::render_node(body, context, parent_prec),
            other => Err(SqlError::unsupported(ast_util::node_kind(other), context)),
        }
    }

    fn render_member(target: &Expr, field: &str, context: &str) -> Result<String, SqlError> {
        // window boundary accessors render as bare pseudo-columns
        if let Some(bound) = functions::window_bound(field) {
            if matches!(
                ast_util::unwrap_conversions(target),
                Expr::GroupingKey { .. } | Expr::Parameter(_)
            ) {
                return Ok(bound.to_string());
            }
        }
        match ast_util::unwrap_conversions(target) {
            // t.Price, g.Key.Symbol, nested access all resolve to the
            // declared column name
            Expr::Parameter(_) | Expr::GroupingKey { .. } | Expr::MemberAccess { .. } => {
                Ok(field.to_string())
            }
            other => Err(SqlError::structural_error(
                "MemberAccess",
                format!(
                    "expected a parameter or grouping key target in {}, found {}",
                    context,
                    ast_util::node_kind(other)
                ),
            )),
        }
    }

    fn render_method(
        target: &Expr,
        method: &str,
        args: &[Expr],
        context: &str,
    ) -> Result<String, SqlError> {
        if let Some(bound) = functions::window_bound(method) {
            return Ok(bound.to_string());
        }

        if let Some(agg) = functions::aggregate_function(method) {
            return Self::render_aggregate(agg, args, context);
        }

        if let Some(func) = functions::scalar_function(method) {
            let mut rendered = vec![Self::render_node(target, context, 0)?];
            for arg in args {
                rendered.push(Self::render_node(arg, context, 0)?);
            }
            return Ok(format!("{}({})", func, rendered.join(", ")));
        }

        if method == "StartsWith" {
            return Self::render_starts_with(target, args, context);
        }

        Err(SqlError::unsupported(method, context))
    }

    fn render_aggregate(agg: &str, args: &[Expr], context: &str) -> Result<String, SqlError> {
        // COUNT() and COUNT(g) both mean count-all
        let is_count_all = agg == "COUNT"
            && (args.is_empty()
                || matches!(
                    ast_util::lambda_body(&args[0]),
                    Expr::Parameter(_) | Expr::GroupingKey { .. }
                ));
        if is_count_all {
            return Ok("COUNT(*)".to_string());
        }
        if args.is_empty() {
            return Err(SqlError::structural_error(
                agg,
                "expected a selector argument, found none",
            ));
        }
        let mut rendered = Vec::with_capacity(args.len());
        for arg in args {
            rendered.push(Self::render_node(ast_util::lambda_body(arg), context, 0)?);
        }
        Ok(format!("{}({})", agg, rendered.join(", ")))
    }

    fn render_starts_with(
        target: &Expr,
        args: &[Expr],
        context: &str,
    ) -> Result<String, SqlError> {
        let prefix = match args.first().map(ast_util::unwrap_conversions) {
            Some(Expr::Literal(LiteralValue::String(s))) => s,
            _ => {
                return Err(SqlError::structural_error(
                    "StartsWith",
                    "expected a single string literal argument",
                ));
            }
        };
        let column = Self::render_node(target, context, 0)?;
        Ok(format!("{} LIKE '{}%'", column, escape_string(prefix)))
    }

    fn render_binary(
        op: BinaryOperator,
        left: &Expr,
        right: &Expr,
        context: &str,
        parent_prec: u8,
    ) -> Result<String, SqlError> {
        let prec = precedence(op);
        // right operand of a non-associative op binds one level tighter
        let right_prec = match op {
            BinaryOperator::Subtract | BinaryOperator::Divide | BinaryOperator::Modulo => prec + 1,
            _ => prec,
        };
        let left_s = Self::render_node(left, context, prec)?;
        let right_s = Self::render_node(right, context, right_prec)?;
        let text = format!("{} {} {}", left_s, op.sql_symbol(), right_s);
        if prec < parent_prec {
            Ok(format!("({})", text))
        } else {
            Ok(text)
        }
    }

    fn render_literal(value: &LiteralValue, context: &str) -> Result<String, SqlError> {
        match value {
            LiteralValue::Integer(i) => Ok(i.to_string()),
            LiteralValue::Float(f) => Ok(f.to_string()),
            LiteralValue::Boolean(b) => Ok(b.to_string()),
            LiteralValue::String(s) => Ok(format!("'{}'", escape_string(s))),
            LiteralValue::Decimal(text) => Ok(text.clone()),
            LiteralValue::Null => Ok("NULL".to_string()),
            LiteralValue::Duration(_) => Err(SqlError::unsupported("Duration literal", context)),
            LiteralValue::Window(_) => Err(SqlError::unsupported("Window literal", context)),
        }
    }
}

fn precedence(op: BinaryOperator) -> u8 {
    match op {
        BinaryOperator::Or => 1,
        BinaryOperator::And => 2,
        BinaryOperator::Equal
        | BinaryOperator::NotEqual
        | BinaryOperator::LessThan
        | BinaryOperator::LessThanOrEqual
        | BinaryOperator::GreaterThan
        | BinaryOperator::GreaterThanOrEqual => 3,
        BinaryOperator::Add | BinaryOperator::Subtract => 4,
        BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => 5,
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param() -> Expr {
        Expr::Parameter("t".to_string())
    }

    #[test]
    fn test_member_renders_column_name() {
        let e = Expr::member(param(), "Price");
        assert_eq!(ExprRenderer::render(&e, "test").unwrap(), "Price");
    }

    #[test]
    fn test_string_function() {
        let e = Expr::call(Expr::member(param(), "Name"), "ToUpper", vec![]);
        assert_eq!(ExprRenderer::render(&e, "test").unwrap(), "UCASE(Name)");
    }

    #[test]
    fn test_comparison_and_logical_operators() {
        let e = Expr::binary(
            BinaryOperator::And,
            Expr::binary(
                BinaryOperator::GreaterThan,
                Expr::member(param(), "Price"),
                Expr::Literal(LiteralValue::Integer(100)),
            ),
            Expr::binary(
                BinaryOperator::NotEqual,
                Expr::member(param(), "Symbol"),
                Expr::Literal(LiteralValue::String("VXX".to_string())),
            ),
        );
        assert_eq!(
            ExprRenderer::render(&e, "test").unwrap(),
            "Price > 100 AND Symbol != 'VXX'"
        );
    }

    #[test]
    fn test_or_under_and_parenthesized() {
        let e = Expr::binary(
            BinaryOperator::And,
            Expr::binary(
                BinaryOperator::Or,
                Expr::member(param(), "A"),
                Expr::member(param(), "B"),
            ),
            Expr::member(param(), "C"),
        );
        assert_eq!(ExprRenderer::render(&e, "test").unwrap(), "(A OR B) AND C");
    }

    #[test]
    fn test_arithmetic_precedence() {
        // (a + b) * c keeps its parens, a + b * c does not gain any
        let sum = Expr::binary(
            BinaryOperator::Add,
            Expr::member(param(), "Price"),
            Expr::member(param(), "Fee"),
        );
        let e = Expr::binary(
            BinaryOperator::Multiply,
            sum.clone(),
            Expr::member(param(), "Volume"),
        );
        assert_eq!(
            ExprRenderer::render(&e, "test").unwrap(),
            "(Price + Fee) * Volume"
        );

        let e2 = Expr::binary(
            BinaryOperator::Add,
            Expr::member(param(), "Price"),
            Expr::binary(
                BinaryOperator::Multiply,
                Expr::member(param(), "Fee"),
                Expr::member(param(), "Volume"),
            ),
        );
        assert_eq!(
            ExprRenderer::render(&e2, "test").unwrap(),
            "Price + Fee * Volume"
        );
    }

    #[test]
    fn test_aggregate_count_star() {
        let g = Expr::GroupingKey { member: None };
        let e = Expr::call(g.clone(), "Count", vec![]);
        assert_eq!(ExprRenderer::render(&e, "test").unwrap(), "COUNT(*)");

        let e2 = Expr::call(g, "Count", vec![Expr::Parameter("g".to_string())]);
        assert_eq!(ExprRenderer::render(&e2, "test").unwrap(), "COUNT(*)");
    }

    #[test]
    fn test_aggregate_with_selector() {
        let e = Expr::call(
            Expr::GroupingKey { member: None },
            "Sum",
            vec![Expr::lambda(
                "x",
                Expr::member(Expr::Parameter("x".to_string()), "Amount"),
            )],
        );
        assert_eq!(ExprRenderer::render(&e, "test").unwrap(), "SUM(Amount)");
    }

    #[test]
    fn test_starts_with_renders_like() {
        let e = Expr::call(
            Expr::member(param(), "Symbol"),
            "StartsWith",
            vec![Expr::Literal(LiteralValue::String("BTC".to_string()))],
        );
        assert_eq!(
            ExprRenderer::render(&e, "test").unwrap(),
            "Symbol LIKE 'BTC%'"
        );
    }

    #[test]
    fn test_string_literal_escaping() {
        let e = Expr::Literal(LiteralValue::String("O'Hare".to_string()));
        assert_eq!(ExprRenderer::render(&e, "test").unwrap(), "'O''Hare'");
    }

    #[test]
    fn test_unknown_method_names_construct() {
        let e = Expr::call(Expr::member(param(), "Name"), "Reverse", vec![]);
        let err = ExprRenderer::render(&e, "SELECT projection").unwrap_err();
        match err {
            SqlError::UnsupportedConstruct { construct, context } => {
                assert_eq!(construct, "Reverse");
                assert_eq!(context, "SELECT projection");
            }
            other => panic!("Expected UnsupportedConstruct, got {:?}", other),
        }
    }
}
