//! # ksqlgen
//!
//! Compiles typed query expression trees into textual KSQL statements
//! (CREATE STREAM/TABLE [AS SELECT], SELECT ... [EMIT CHANGES]) for
//! execution against a streaming SQL engine.
//!
//! The crate is a pure compiler: it reads an immutable expression tree and
//! an entity descriptor and produces statement text. It never executes
//! queries, opens connections, or validates against a live schema.

pub mod ksqlgen;

pub use crate::ksqlgen::sql;
