/*!
# Query Generation Pipeline

Top-level entry point for compiling one expression tree into executable
statement text. Given an entity descriptor and the host's method-call
chain, the pipeline:

1. decomposes the chain into per-clause fragments
2. decides whether the query needs an intermediate CREATE-AS-SELECT
   object (any window, group-by, or join does)
3. resolves the derived object through the registry, emitting its DDL as a
   side output only when this call created the registration
4. classifies the final object and validates the requested push/pull mode
5. generates the terminal SELECT against the (derived or base) object

Compilation is synchronous and in-memory. The returned statements are
plain text; dispatching them to the engine is the caller's concern.
*/

use crate::ksqlgen::sql::analyzer::{ObjectKind, StreamTableAnalyzer};
use crate::ksqlgen::sql::ast::Expr;
use crate::ksqlgen::sql::context::QueryGenerationContext;
use crate::ksqlgen::sql::entity::EntityDescriptor;
use crate::ksqlgen::sql::error::SqlError;
use crate::ksqlgen::sql::generate::dml::QueryMode;
use crate::ksqlgen::sql::generate::{DdlGenerator, DmlGenerator};
use crate::ksqlgen::sql::registry::{DerivationKey, DerivedObjectRegistry};
use crate::ksqlgen::sql::translate::{
    GroupByClauseBuilder, JoinClauseBuilder, QueryDecomposer, QueryParts,
};
use log::debug;
use std::sync::Arc;

/// Result of one compilation call.
#[derive(Debug, Clone)]
pub struct GeneratedQuery {
    /// Terminal SELECT statement
    pub statement: String,
    /// CREATE-AS-SELECT side output; `Some` only when this call created
    /// the derived-object registration
    pub ddl: Option<String>,
    /// Object the terminal statement reads from
    pub object_name: String,
    /// Classification of that object
    pub object_kind: ObjectKind,
    /// Generation context with recorded metadata
    pub context: QueryGenerationContext,
}

/// Orchestrator tying the clause builders, analyzer, generators, and
/// derived-object registry together.
pub struct QueryPipeline {
    registry: Arc<DerivedObjectRegistry>,
}

impl QueryPipeline {
    pub fn new(registry: Arc<DerivedObjectRegistry>) -> Self {
        QueryPipeline { registry }
    }

    /// Registry this pipeline resolves derived objects through.
    pub fn registry(&self) -> &Arc<DerivedObjectRegistry> {
        &self.registry
    }

    /// Compile `tree` into the terminal statement for `descriptor`,
    /// materializing a derived object first when the chain requires one.
    pub fn generate_ksql_query(
        &self,
        descriptor: &EntityDescriptor,
        tree: &Expr,
        is_pull_query: bool,
    ) -> Result<GeneratedQuery, SqlError> {
        let parts = QueryDecomposer::decompose(tree)?;
        let base = parts
            .base
            .clone()
            .unwrap_or_else(|| descriptor.name.clone());

        let mut context = QueryGenerationContext::new(&base, is_pull_query);
        context.topic_name = Some(descriptor.topic_name().to_string());

        if parts.requires_derivation() {
            self.generate_derived(descriptor, &base, parts, context)
        } else {
            self.generate_direct(descriptor, &base, parts, context)
        }
    }

    fn generate_direct(
        &self,
        descriptor: &EntityDescriptor,
        base: &str,
        parts: QueryParts,
        mut context: QueryGenerationContext,
    ) -> Result<GeneratedQuery, SqlError> {
        let kind = StreamTableAnalyzer::classify(descriptor);
        StreamTableAnalyzer::check_pull_eligibility(base, kind, context.is_pull_query)?;

        let mode = if context.is_pull_query {
            QueryMode::Pull
        } else {
            QueryMode::Push
        };
        let statement = DmlGenerator::select(base, &parts, mode)?;
        debug!("generated direct {:?} query against '{}'", mode, base);

        context.set_metadata("object", base);
        context.set_metadata("mode", mode_label(mode));
        Ok(GeneratedQuery {
            statement,
            ddl: None,
            object_name: base.to_string(),
            object_kind: kind,
            context,
        })
    }

    fn generate_derived(
        &self,
        _descriptor: &EntityDescriptor,
        base: &str,
        parts: QueryParts,
        mut context: QueryGenerationContext,
    ) -> Result<GeneratedQuery, SqlError> {
        let key = Self::derivation_key(base, &parts)?;
        let kind = StreamTableAnalyzer::classify_derivation(
            parts.window.is_some(),
            parts.group_by.is_some(),
        );

        // mode check comes first so no statement text exists on failure
        StreamTableAnalyzer::check_pull_eligibility(
            &key.object_name(),
            kind,
            context.is_pull_query,
        )?;

        // build the CSAS text before touching the registry; it is
        // deterministic, so a losing racer just discards its copy
        let csas = match kind {
            ObjectKind::Table => DdlGenerator::create_table_as(&key.object_name(), base, &parts)?,
            ObjectKind::Stream => {
                DdlGenerator::create_stream_as(&key.object_name(), base, &parts)?
            }
        };

        context.set_metadata("derivation_key", key.canonical());
        let (object_name, newly_created) = self.registry.get_or_create(key, kind);
        let ddl = if newly_created {
            debug!("materializing derived {} '{}'", kind, object_name);
            Some(csas)
        } else {
            debug!("reusing derived {} '{}'", kind, object_name);
            None
        };

        // the derived object carries the projection and filters; the
        // terminal query only reads it back, keeping any ordering request
        let mut terminal = QueryParts::default();
        terminal.order_by = parts.order_by;

        let mode = if context.is_pull_query {
            QueryMode::Pull
        } else {
            QueryMode::Push
        };
        let statement = DmlGenerator::select(&object_name, &terminal, mode)?;

        context.set_metadata("object", object_name.as_str());
        context.set_metadata("mode", mode_label(mode));
        Ok(GeneratedQuery {
            statement,
            ddl,
            object_name,
            object_kind: kind,
            context,
        })
    }

    fn derivation_key(base: &str, parts: &QueryParts) -> Result<DerivationKey, SqlError> {
        let mut key = DerivationKey::new(base);
        if let Some(window) = &parts.window {
            key = key.with_window(window.clone());
        }
        if let Some(group_by) = &parts.group_by {
            key = key.with_group_by(GroupByClauseBuilder::key_columns(group_by)?);
        }
        if let Some(join) = &parts.join {
            key = key.with_join(JoinClauseBuilder::inner_source(join)?);
        }
        Ok(key)
    }
}

fn mode_label(mode: QueryMode) -> &'static str {
    match mode {
        QueryMode::Push => "push",
        QueryMode::Pull => "pull",
    }
}
