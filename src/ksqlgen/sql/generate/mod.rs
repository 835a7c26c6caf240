//! Statement generators.
//!
//! Compose clause-builder outputs into complete DDL and DML statements.
//! Clause order inside CREATE-AS-SELECT bodies is fixed (SELECT, FROM,
//! JOIN, WINDOW, WHERE, GROUP BY, HAVING) and part of the output contract.

pub mod ddl;
pub mod dml;

pub use ddl::DdlGenerator;
pub use dml::DmlGenerator;
