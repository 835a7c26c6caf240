// ksqlgen module root

pub mod sql;
