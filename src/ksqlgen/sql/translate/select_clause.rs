//! SELECT Clause Builder
//!
//! Translates a result-shaping lambda into `SELECT <expr> [AS <alias>],
//! ...`. Object-construction projections become comma-separated columns,
//! each aliased to its assignment name; the alias is dropped when it would
//! repeat the rendered column verbatim. An identity projection (or no
//! projection at all) renders as `SELECT *`.

use crate::ksqlgen::sql::ast::Expr;
use crate::ksqlgen::sql::error::SqlError;
use crate::ksqlgen::sql::translate::ast_util;
use crate::ksqlgen::sql::translate::ExprRenderer;

/// Builder for SELECT projections.
pub struct SelectClauseBuilder;

impl SelectClauseBuilder {
    /// Build a SELECT clause from an optional projection lambda.
    pub fn build(projection: Option<&Expr>) -> Result<String, SqlError> {
        let Some(projection) = projection else {
            return Ok("SELECT *".to_string());
        };

        match ast_util::lambda_body(projection) {
            // identity projection: Select(t => t)
            Expr::Parameter(_) => Ok("SELECT *".to_string()),
            Expr::NewObject(fields) => {
                let mut columns = Vec::with_capacity(fields.len());
                for (name, value) in fields {
                    let rendered = ExprRenderer::render(value, "SELECT projection")?;
                    if rendered == *name {
                        columns.push(rendered);
                    } else {
                        columns.push(format!("{} AS {}", rendered, name));
                    }
                }
                if columns.is_empty() {
                    return Err(SqlError::structural_error(
                        "Select",
                        "projection object has no fields",
                    ));
                }
                Ok(format!("SELECT {}", columns.join(", ")))
            }
            single => {
                let rendered = ExprRenderer::render(single, "SELECT projection")?;
                Ok(format!("SELECT {}", rendered))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param() -> Expr {
        Expr::Parameter("t".to_string())
    }

    #[test]
    fn test_missing_projection_is_star() {
        assert_eq!(SelectClauseBuilder::build(None).unwrap(), "SELECT *");
    }

    #[test]
    fn test_identity_projection_is_star() {
        let p = Expr::lambda("t", param());
        assert_eq!(SelectClauseBuilder::build(Some(&p)).unwrap(), "SELECT *");
    }

    #[test]
    fn test_single_function_projection() {
        let p = Expr::lambda(
            "t",
            Expr::call(Expr::member(param(), "Name"), "ToUpper", vec![]),
        );
        assert_eq!(
            SelectClauseBuilder::build(Some(&p)).unwrap(),
            "SELECT UCASE(Name)"
        );
    }

    #[test]
    fn test_object_projection_aliases() {
        let g = Expr::GroupingKey { member: None };
        let p = Expr::lambda(
            "g",
            Expr::NewObject(vec![
                (
                    "Start".to_string(),
                    Expr::member(g.clone(), "WindowStart"),
                ),
                ("End".to_string(), Expr::member(g, "WindowEnd")),
            ]),
        );
        assert_eq!(
            SelectClauseBuilder::build(Some(&p)).unwrap(),
            "SELECT WINDOWSTART AS Start, WINDOWEND AS End"
        );
    }

    #[test]
    fn test_alias_dropped_when_redundant() {
        let p = Expr::lambda(
            "t",
            Expr::NewObject(vec![
                ("Symbol".to_string(), Expr::member(param(), "Symbol")),
                ("Px".to_string(), Expr::member(param(), "Price")),
            ]),
        );
        assert_eq!(
            SelectClauseBuilder::build(Some(&p)).unwrap(),
            "SELECT Symbol, Price AS Px"
        );
    }

    #[test]
    fn test_empty_object_projection_rejected() {
        let p = Expr::lambda("t", Expr::NewObject(vec![]));
        let err = SelectClauseBuilder::build(Some(&p)).unwrap_err();
        assert!(matches!(err, SqlError::StructuralError { .. }));
    }
}
