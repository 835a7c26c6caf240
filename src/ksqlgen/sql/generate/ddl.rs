//! DDL Generation
//!
//! Two families of statements:
//!
//! - plain schema DDL for base objects (`CREATE STREAM`/`CREATE TABLE`
//!   with a column list derived from the entity descriptor)
//! - derivation DDL (`CREATE ... AS SELECT`) whose body is assembled from
//!   the decomposed query parts in the fixed clause order SELECT, FROM,
//!   JOIN, WINDOW, WHERE, GROUP BY, HAVING

use crate::ksqlgen::sql::entity::EntityDescriptor;
use crate::ksqlgen::sql::error::SqlError;
use crate::ksqlgen::sql::translate::{
    GroupByClauseBuilder, HavingClauseBuilder, JoinClauseBuilder, QueryParts,
    SelectClauseBuilder, WhereClauseBuilder, WindowClauseBuilder,
};

/// Generator for CREATE statements.
pub struct DdlGenerator;

impl DdlGenerator {
    /// Schema DDL for a base stream.
    pub fn create_stream(
        object_name: &str,
        topic: &str,
        descriptor: &EntityDescriptor,
    ) -> Result<String, SqlError> {
        Self::create_object("STREAM", "KEY", object_name, topic, descriptor)
    }

    /// Schema DDL for a base table.
    pub fn create_table(
        object_name: &str,
        topic: &str,
        descriptor: &EntityDescriptor,
    ) -> Result<String, SqlError> {
        Self::create_object("TABLE", "PRIMARY KEY", object_name, topic, descriptor)
    }

    fn create_object(
        kind: &str,
        key_marker: &str,
        object_name: &str,
        topic: &str,
        descriptor: &EntityDescriptor,
    ) -> Result<String, SqlError> {
        let mut columns = Vec::new();
        for field in descriptor.active_fields() {
            let sql_type = field.sql_type()?;
            if descriptor.is_key_field(&field.name) {
                columns.push(format!("{} {} {}", field.name, sql_type, key_marker));
            } else {
                columns.push(format!("{} {}", field.name, sql_type));
            }
        }
        if columns.is_empty() {
            return Err(SqlError::structural_error(
                "CREATE",
                format!("entity '{}' declares no active fields", descriptor.name),
            ));
        }

        let mut with = format!("KAFKA_TOPIC='{}', VALUE_FORMAT='JSON'", topic);
        if let Some(ts) = &descriptor.timestamp_field {
            with.push_str(&format!(", TIMESTAMP='{}'", ts));
        }

        Ok(format!(
            "CREATE {} {} ({}) WITH ({});",
            kind,
            object_name,
            columns.join(", "),
            with
        ))
    }

    /// Derivation DDL creating a stream from a query body.
    pub fn create_stream_as(
        object_name: &str,
        source: &str,
        parts: &QueryParts,
    ) -> Result<String, SqlError> {
        Self::create_as("STREAM", object_name, source, parts)
    }

    /// Derivation DDL creating a table from a query body.
    pub fn create_table_as(
        object_name: &str,
        source: &str,
        parts: &QueryParts,
    ) -> Result<String, SqlError> {
        Self::create_as("TABLE", object_name, source, parts)
    }

    fn create_as(
        kind: &str,
        object_name: &str,
        source: &str,
        parts: &QueryParts,
    ) -> Result<String, SqlError> {
        // a join without an explicit Select projects through its result
        // selector
        let projection = match (&parts.select, &parts.join) {
            (Some(select), _) => Some(select),
            (None, Some(join)) => Some(JoinClauseBuilder::result_selector(join)?),
            (None, None) => None,
        };

        let mut stmt = format!(
            "CREATE {} {} AS {} FROM {}",
            kind,
            object_name,
            SelectClauseBuilder::build(projection)?,
            source
        );

        if let Some(join) = &parts.join {
            stmt.push(' ');
            stmt.push_str(&JoinClauseBuilder::build(join)?);
        }
        if let Some(window) = &parts.window {
            stmt.push(' ');
            stmt.push_str(&WindowClauseBuilder::build(window));
        }
        if let Some(where_clause) = WhereClauseBuilder::build_all(&parts.wheres)? {
            stmt.push(' ');
            stmt.push_str(&where_clause);
        }
        if let Some(group_by) = &parts.group_by {
            stmt.push(' ');
            stmt.push_str(&GroupByClauseBuilder::build(group_by)?);
        }
        if let Some(having) = &parts.having {
            stmt.push(' ');
            stmt.push_str(&HavingClauseBuilder::build(having)?);
        }
        if parts.window.as_ref().is_some_and(|w| w.emit_final) {
            stmt.push_str(" EMIT FINAL");
        }
        stmt.push(';');
        Ok(stmt)
    }
}
