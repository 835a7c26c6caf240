// Clause builder output contracts. These assert exact statement text; the
// rendered keywords, casing, and spacing are part of the compiler's
// contract with downstream statement executors.

use ksqlgen::ksqlgen::sql::ast::{BinaryOperator, Expr, LiteralValue};
use ksqlgen::ksqlgen::sql::error::SqlError;
use ksqlgen::ksqlgen::sql::translate::{
    GroupByClauseBuilder, HavingClauseBuilder, JoinClauseBuilder, OrderByClauseBuilder,
    SelectClauseBuilder, WhereClauseBuilder, WindowClauseBuilder,
};
use ksqlgen::ksqlgen::sql::window::WindowSpec;
use std::time::Duration;

fn param(name: &str) -> Expr {
    Expr::Parameter(name.to_string())
}

fn member(target: Expr, field: &str) -> Expr {
    Expr::member(target, field)
}

#[test]
fn test_ucase_projection_exact_text() {
    let projection = Expr::lambda(
        "t",
        Expr::call(member(param("t"), "Name"), "ToUpper", vec![]),
    );
    assert_eq!(
        SelectClauseBuilder::build(Some(&projection)).unwrap(),
        "SELECT UCASE(Name)"
    );
}

#[test]
fn test_window_bounds_projection_exact_text() {
    let grouping = Expr::GroupingKey { member: None };
    let projection = Expr::lambda(
        "g",
        Expr::NewObject(vec![
            (
                "Start".to_string(),
                member(grouping.clone(), "WindowStart"),
            ),
            ("End".to_string(), member(grouping, "WindowEnd")),
        ]),
    );
    assert_eq!(
        SelectClauseBuilder::build(Some(&projection)).unwrap(),
        "SELECT WINDOWSTART AS Start, WINDOWEND AS End"
    );
}

#[test]
fn test_session_window_exact_text() {
    let spec = WindowSpec::session(Duration::from_secs(120));
    assert_eq!(
        WindowClauseBuilder::build(&spec),
        "WINDOW SESSION (GAP 2 MINUTES)"
    );
}

#[test]
fn test_hopping_window_exact_text() {
    let spec = WindowSpec::hopping(Duration::from_secs(120), Duration::from_secs(60));
    assert_eq!(
        WindowClauseBuilder::build(&spec),
        "WINDOW HOPPING (SIZE 2 MINUTES, ADVANCE BY 1 MINUTES)"
    );
}

#[test]
fn test_where_operator_mapping() {
    let predicate = Expr::lambda(
        "t",
        Expr::binary(
            BinaryOperator::And,
            Expr::binary(
                BinaryOperator::Equal,
                member(param("t"), "Symbol"),
                Expr::Literal(LiteralValue::String("BTCUSD".to_string())),
            ),
            Expr::binary(
                BinaryOperator::GreaterThanOrEqual,
                member(param("t"), "Price"),
                Expr::Literal(LiteralValue::Integer(100)),
            ),
        ),
    );
    assert_eq!(
        WhereClauseBuilder::build(&predicate).unwrap(),
        "WHERE Symbol = 'BTCUSD' AND Price >= 100"
    );
}

#[test]
fn test_group_by_composite_key() {
    let key = Expr::lambda(
        "t",
        Expr::NewObject(vec![
            ("Symbol".to_string(), member(param("t"), "Symbol")),
            ("Venue".to_string(), member(param("t"), "Venue")),
        ]),
    );
    assert_eq!(
        GroupByClauseBuilder::build(&key).unwrap(),
        "GROUP BY Symbol, Venue"
    );
}

#[test]
fn test_having_accepts_allow_listed_aggregates() {
    for method in ["Max", "max", "MAX", "Count", "avg", "collect_set"] {
        let predicate = Expr::lambda(
            "g",
            Expr::binary(
                BinaryOperator::GreaterThan,
                Expr::call(
                    Expr::GroupingKey { member: None },
                    method,
                    vec![Expr::lambda("x", member(param("x"), "Price"))],
                ),
                Expr::Literal(LiteralValue::Integer(1)),
            ),
        );
        assert!(
            HavingClauseBuilder::build(&predicate).is_ok(),
            "'{}' should be accepted as an aggregate",
            method
        );
    }
}

#[test]
fn test_having_rejects_non_aggregate_function() {
    let predicate = Expr::lambda(
        "g",
        Expr::binary(
            BinaryOperator::Equal,
            Expr::call(member(param("g"), "Name"), "ToUpper", vec![]),
            Expr::Literal(LiteralValue::String("X".to_string())),
        ),
    );
    let err = HavingClauseBuilder::build(&predicate).unwrap_err();
    assert!(matches!(err, SqlError::UnsupportedConstruct { .. }));
}

#[test]
fn test_join_clause_text() {
    let node = Expr::call(
        param("orders"),
        "Join",
        vec![
            param("payments"),
            Expr::lambda("o", member(param("o"), "OrderId")),
            Expr::lambda("p", member(param("p"), "Id")),
            Expr::lambda("o", param("o")),
        ],
    );
    assert_eq!(
        JoinClauseBuilder::build(&node).unwrap(),
        "JOIN payments ON OrderId = Id"
    );
}

#[test]
fn test_malformed_join_is_structural_not_unsupported() {
    let node = Expr::call(
        param("orders"),
        "Join",
        vec![param("payments"), Expr::lambda("o", param("o"))],
    );
    let err = JoinClauseBuilder::validate_shape(&node).unwrap_err();
    match err {
        SqlError::StructuralError { construct, message } => {
            assert_eq!(construct, "Join");
            assert!(message.contains("result selector"));
        }
        other => panic!("Expected StructuralError, got {:?}", other),
    }
}

#[test]
fn test_order_by_directions() {
    let asc = Expr::call(
        param("trades"),
        "OrderBy",
        vec![Expr::lambda("t", member(param("t"), "Ts"))],
    );
    let desc = Expr::call(
        param("trades"),
        "OrderByDescending",
        vec![Expr::lambda("t", member(param("t"), "Ts"))],
    );
    assert_eq!(OrderByClauseBuilder::build(&asc).unwrap(), "ORDER BY Ts ASC");
    assert_eq!(
        OrderByClauseBuilder::build(&desc).unwrap(),
        "ORDER BY Ts DESC"
    );
}

#[test]
fn test_clause_builders_are_deterministic() {
    let predicate = Expr::lambda(
        "t",
        Expr::binary(
            BinaryOperator::GreaterThan,
            member(param("t"), "Price"),
            Expr::Literal(LiteralValue::Float(42.5)),
        ),
    );
    let first = WhereClauseBuilder::build(&predicate).unwrap();
    let second = WhereClauseBuilder::build(&predicate).unwrap();
    assert_eq!(first, second);
}
