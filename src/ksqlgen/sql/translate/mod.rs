/*!
# Clause Builders

Seven pure translation units, each mapping one expression-tree fragment to
one textual clause. Builders hold no state and perform no I/O; given the
same fragment they always produce identical text, which the derived-object
manager relies on for name stability.

The `QueryDecomposer` at the bottom of this module peels a method-call
chain into its per-clause fragments; the statement generators and the
pipeline both consume the resulting [`QueryParts`].
*/

pub mod ast_util;
pub mod expr;
pub mod functions;
pub mod group_by;
pub mod having;
pub mod join;
pub mod order_by;
pub mod select_clause;
pub mod where_clause;
pub mod window_clause;

pub use expr::ExprRenderer;
pub use group_by::GroupByClauseBuilder;
pub use having::HavingClauseBuilder;
pub use join::JoinClauseBuilder;
pub use order_by::OrderByClauseBuilder;
pub use select_clause::SelectClauseBuilder;
pub use where_clause::WhereClauseBuilder;
pub use window_clause::WindowClauseBuilder;

use crate::ksqlgen::sql::ast::{Expr, LiteralValue};
use crate::ksqlgen::sql::error::SqlError;
use crate::ksqlgen::sql::window::WindowSpec;

/// Decomposed form of a query method-call chain, one slot per clause.
#[derive(Debug, Clone, Default)]
pub struct QueryParts {
    /// Base object the innermost chain node names
    pub base: Option<String>,
    /// Result-shaping lambda from `Select` (or a join's result selector)
    pub select: Option<Expr>,
    /// Predicates from `Where` calls, combined with AND
    pub wheres: Vec<Expr>,
    /// Grouping key lambda from `GroupBy`
    pub group_by: Option<Expr>,
    /// Post-aggregation predicate from `Having`
    pub having: Option<Expr>,
    /// Window specification from `WindowedBy`
    pub window: Option<WindowSpec>,
    /// Full `Join` method-call node
    pub join: Option<Expr>,
    /// Full `OrderBy`/`OrderByDescending` method-call node
    pub order_by: Option<Expr>,
}

impl QueryParts {
    /// True when the query needs an intermediate CREATE-AS-SELECT object
    pub fn requires_derivation(&self) -> bool {
        self.window.is_some() || self.group_by.is_some() || self.join.is_some()
    }
}

/// Walks a method-call chain and captures each recognized clause fragment.
pub struct QueryDecomposer;

impl QueryDecomposer {
    /// Decompose `tree` into per-clause fragments.
    ///
    /// The chain is walked outside-in; fragments closer to the source take
    /// effect for clauses that appear more than once (`Where` accumulates,
    /// others keep the innermost occurrence). Unknown chain methods are
    /// unsupported-construct errors.
    pub fn decompose(tree: &Expr) -> Result<QueryParts, SqlError> {
        let mut parts = QueryParts::default();
        let mut node = ast_util::unwrap_conversions(tree);

        loop {
            match node {
                Expr::MethodCall {
                    target,
                    method,
                    args,
                } => match method.as_str() {
                    "Select" => {
                        let arg = Self::single_arg(method, args)?;
                        parts.select = Some(arg.clone());
                        node = ast_util::unwrap_conversions(target);
                    }
                    "Where" => {
                        let arg = Self::single_arg(method, args)?;
                        // chain order is outside-in; keep source order
                        parts.wheres.insert(0, arg.clone());
                        node = ast_util::unwrap_conversions(target);
                    }
                    "GroupBy" => {
                        let arg = Self::single_arg(method, args)?;
                        parts.group_by = Some(arg.clone());
                        node = ast_util::unwrap_conversions(target);
                    }
                    "Having" => {
                        let arg = Self::single_arg(method, args)?;
                        parts.having = Some(arg.clone());
                        node = ast_util::unwrap_conversions(target);
                    }
                    "WindowedBy" => {
                        let arg = Self::single_arg(method, args)?;
                        parts.window = Some(Self::window_argument(arg)?);
                        node = ast_util::unwrap_conversions(target);
                    }
                    "Join" => {
                        JoinClauseBuilder::validate_shape(node)?;
                        parts.join = Some(node.clone());
                        node = ast_util::unwrap_conversions(target);
                    }
                    "OrderBy" | "OrderByDescending" => {
                        Self::single_arg(method, args)?;
                        parts.order_by = Some(node.clone());
                        node = ast_util::unwrap_conversions(target);
                    }
                    other => {
                        return Err(SqlError::unsupported(other, "query method chain"));
                    }
                },
                Expr::Parameter(name) => {
                    parts.base = Some(name.clone());
                    break;
                }
                Expr::Literal(LiteralValue::String(name)) => {
                    parts.base = Some(name.clone());
                    break;
                }
                other => {
                    return Err(SqlError::structural_error(
                        "query chain",
                        format!(
                            "expected a method-call chain ending in a source reference, found {}",
                            ast_util::node_kind(other)
                        ),
                    ));
                }
            }
        }

        Ok(parts)
    }

    fn single_arg<'a>(method: &str, args: &'a [Expr]) -> Result<&'a Expr, SqlError> {
        if args.len() != 1 {
            return Err(SqlError::structural_error(
                method,
                format!("expected exactly one argument, found {}", args.len()),
            ));
        }
        Ok(&args[0])
    }

    fn window_argument(arg: &Expr) -> Result<WindowSpec, SqlError> {
        match ast_util::unwrap_conversions(arg) {
            Expr::Literal(LiteralValue::Window(spec)) => Ok(spec.clone()),
            other => Err(SqlError::structural_error(
                "WindowedBy",
                format!(
                    "expected a window specification constant, found {}",
                    ast_util::node_kind(other)
                ),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ksqlgen::sql::ast::BinaryOperator;
    use std::time::Duration;

    fn base() -> Expr {
        Expr::Parameter("trades".to_string())
    }

    #[test]
    fn test_decompose_simple_chain() {
        let tree = Expr::call(
            Expr::call(
                base(),
                "Where",
                vec![Expr::lambda(
                    "t",
                    Expr::binary(
                        BinaryOperator::GreaterThan,
                        Expr::member(Expr::Parameter("t".to_string()), "Price"),
                        Expr::Literal(LiteralValue::Integer(100)),
                    ),
                )],
            ),
            "Select",
            vec![Expr::lambda(
                "t",
                Expr::member(Expr::Parameter("t".to_string()), "Price"),
            )],
        );

        let parts = QueryDecomposer::decompose(&tree).unwrap();
        assert_eq!(parts.base.as_deref(), Some("trades"));
        assert_eq!(parts.wheres.len(), 1);
        assert!(parts.select.is_some());
        assert!(!parts.requires_derivation());
    }

    #[test]
    fn test_window_marks_derivation() {
        let tree = Expr::call(
            base(),
            "WindowedBy",
            vec![Expr::Literal(LiteralValue::Window(WindowSpec::tumbling(
                Duration::from_secs(60),
            )))],
        );
        let parts = QueryDecomposer::decompose(&tree).unwrap();
        assert!(parts.requires_derivation());
        assert!(parts.window.is_some());
    }

    #[test]
    fn test_unknown_chain_method_rejected() {
        let tree = Expr::call(base(), "Distinct", vec![]);
        let err = QueryDecomposer::decompose(&tree).unwrap_err();
        assert!(matches!(err, SqlError::UnsupportedConstruct { .. }));
    }
}
