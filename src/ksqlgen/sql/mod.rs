// Streaming SQL generation module for ksqlgen
// Compiles host-built query expression trees into KSQL DDL/DML text

pub mod analyzer;
pub mod ast;
pub mod context;
pub mod entity;
pub mod error;
pub mod generate;
pub mod pipeline;
pub mod registry;
pub mod translate;
pub mod window;

// Re-export main API
pub use analyzer::{ObjectKind, StreamTableAnalyzer};
pub use ast::{BinaryOperator, Expr, LiteralValue};
pub use context::QueryGenerationContext;
pub use entity::{EntityDescriptor, FieldDescriptor, FieldType};
pub use error::SqlError;
pub use generate::dml::QueryMode;
pub use generate::{DdlGenerator, DmlGenerator};
pub use pipeline::{GeneratedQuery, QueryPipeline};
pub use registry::{DerivationKey, DerivedObjectRegistry, RegisteredDerivationInfo};
pub use window::{WindowKind, WindowSpec};

// Version and feature info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const FEATURES: &[&str] = &[
    "where_translation",
    "projection_translation", // field access, string functions, arithmetic
    "group_by_having",        // GROUP BY keys plus aggregate-only HAVING
    "joins",                  // two-source joins with key selectors
    "windowing",              // WINDOW TUMBLING / HOPPING / SESSION
    "order_by",
    "stream_table_analysis", // push vs. pull eligibility
    "ddl_generation",        // CREATE STREAM/TABLE and CSAS/CTAS
    "dml_generation",        // terminal SELECT with EMIT CHANGES
    "derived_objects",       // deduplicated CREATE-AS-SELECT registration
];
