//! Shared expression-tree helpers.
//!
//! Hosts insert implicit boxing/widening wrappers (`Expr::Convert`) around
//! member and method nodes; every builder unwraps them before pattern
//! matching so the wrappers never influence translation.

use crate::ksqlgen::sql::ast::Expr;

/// Strip nested `Convert` wrappers to reach the underlying node.
pub fn unwrap_conversions(expr: &Expr) -> &Expr {
    let mut node = expr;
    while let Expr::Convert(inner) = node {
        node = inner;
    }
    node
}

/// Body of a lambda (conversion-stripped), or the node itself when the
/// fragment arrives without a lambda wrapper.
pub fn lambda_body(expr: &Expr) -> &Expr {
    match unwrap_conversions(expr) {
        Expr::Lambda { body, .. } => unwrap_conversions(body),
        other => other,
    }
}

/// Column name for a bare member-access node, if the node is one.
pub fn column_name(expr: &Expr) -> Option<&str> {
    match unwrap_conversions(expr) {
        Expr::MemberAccess { field, .. } => Some(field),
        _ => None,
    }
}

/// Short node-kind label for error messages.
pub fn node_kind(expr: &Expr) -> &'static str {
    match expr {
        Expr::MemberAccess { .. } => "MemberAccess",
        Expr::MethodCall { .. } => "MethodCall",
        Expr::BinaryOp { .. } => "BinaryOp",
        Expr::Convert(_) => "Convert",
        Expr::Literal(_) => "Literal",
        Expr::Lambda { .. } => "Lambda",
        Expr::NewObject(_) => "NewObject",
        Expr::GroupingKey { .. } => "GroupingKey",
        Expr::Parameter(_) => "Parameter",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ksqlgen::sql::ast::LiteralValue;

    #[test]
    fn test_unwrap_nested_conversions() {
        let inner = Expr::member(Expr::Parameter("t".to_string()), "Price");
        let wrapped = Expr::Convert(Box::new(Expr::Convert(Box::new(inner.clone()))));
        assert_eq!(unwrap_conversions(&wrapped), &inner);
    }

    #[test]
    fn test_lambda_body_unwraps_convert() {
        let body = Expr::Literal(LiteralValue::Integer(1));
        let lam = Expr::lambda("t", Expr::Convert(Box::new(body.clone())));
        assert_eq!(lambda_body(&lam), &body);
    }

    #[test]
    fn test_column_name() {
        let m = Expr::member(Expr::Parameter("t".to_string()), "Symbol");
        assert_eq!(column_name(&m), Some("Symbol"));
        assert_eq!(column_name(&Expr::Parameter("t".to_string())), None);
    }
}
