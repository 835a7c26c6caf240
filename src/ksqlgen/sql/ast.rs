/*!
# Query Expression Tree AST

This module defines the expression tree consumed by the KSQL compiler. The
tree is produced by a host-language query-building surface (a typed,
chainable builder over declared entity types) and handed to this crate
read-only; the compiler walks it and emits statement text, never rewriting
or mutating nodes.

## Shape

A complete query arrives as a method-call chain whose innermost target names
the base object:

```text
MethodCall("Select", [MethodCall("Where", [Parameter("trades"), Lambda(..)]), Lambda(..)])
```

Chain methods recognized by the pipeline: `Select`, `Where`, `GroupBy`,
`Having`, `WindowedBy`, `Join`, `OrderBy`, `OrderByDescending`. Everything
below the chain level is scalar expression material for the clause builders.

## Design

- **Immutable**: nodes are plain values, cloned freely, never mutated here
- **Host-neutral**: no reflection, no host type handles; member and method
  names arrive as strings already resolved by the host adapter
- **Composable**: clause builders each consume one fragment of the tree
*/

use crate::ksqlgen::sql::window::WindowSpec;
use std::time::Duration;

/// A node in the query expression tree.
///
/// One variant per node kind the compiler understands. Unknown shapes are
/// rejected by the clause builders with a structural or
/// unsupported-construct error rather than silently skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Field access on an object: `t.Price`
    MemberAccess {
        target: Box<Expr>,
        field: String,
    },
    /// Method invocation: `t.Name.ToUpper()`, `g.Sum(x => x.Amount)`,
    /// or a query-chain operator like `Where`/`Select`
    MethodCall {
        target: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    /// Binary operation: `expr op expr`
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Implicit boxing/widening wrapper inserted by the host surface.
    /// Transparent to translation; builders unwrap it to reach the inner
    /// node.
    Convert(Box<Expr>),
    /// Literal constant
    Literal(LiteralValue),
    /// Anonymous function: `x => x.Amount > 100`
    Lambda {
        params: Vec<String>,
        body: Box<Expr>,
    },
    /// Result-shaping object construction; each entry is
    /// (projected field name, value expression), in declaration order
    NewObject(Vec<(String, Expr)>),
    /// Access to the grouping key inside a post-`GroupBy` lambda.
    /// `member` is the key field name, already resolved by the host
    /// adapter; `None` means the whole (single-column) key.
    GroupingKey {
        member: Option<String>,
    },
    /// Reference to a lambda parameter or the base query source
    Parameter(String),
}

impl Expr {
    /// Convenience constructor for member access
    pub fn member(target: Expr, field: impl Into<String>) -> Self {
        Expr::MemberAccess {
            target: Box::new(target),
            field: field.into(),
        }
    }

    /// Convenience constructor for method calls
    pub fn call(target: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::MethodCall {
            target: Box::new(target),
            method: method.into(),
            args,
        }
    }

    /// Convenience constructor for binary operations
    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Convenience constructor for single-parameter lambdas
    pub fn lambda(param: impl Into<String>, body: Expr) -> Self {
        Expr::Lambda {
            params: vec![param.into()],
            body: Box::new(body),
        }
    }
}

/// Literal values carried by `Expr::Literal`.
///
/// `Duration` and `Window` exist so the host chain can pass window
/// arguments through the tree as constants; they never render as SQL
/// literals.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    /// Exact decimal carried as its literal text (e.g. "42.5000")
    Decimal(String),
    Duration(Duration),
    Window(WindowSpec),
    Null,
}

/// Binary operators understood by the scalar renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,

    // Comparison
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    // Logical
    And,
    Or,
}

impl BinaryOperator {
    /// SQL symbol for this operator
    pub fn sql_symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Equal => "=",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
        }
    }

    /// True for AND/OR, which join predicate operands with spaces and
    /// parenthesize nested logical groups
    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }
}
