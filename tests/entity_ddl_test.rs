// Base-object DDL generation from entity descriptors.

use ksqlgen::ksqlgen::sql::entity::{EntityDescriptor, FieldDescriptor, FieldType};
use ksqlgen::ksqlgen::sql::error::SqlError;
use ksqlgen::ksqlgen::sql::generate::DdlGenerator;

#[test]
fn test_create_stream_from_descriptor() {
    let descriptor = EntityDescriptor::new("trades")
        .with_field("Symbol", FieldType::String)
        .with_field("Price", FieldType::Float64)
        .with_field("Lots", FieldType::Int16);

    let ddl = DdlGenerator::create_stream("trades", "market.trades", &descriptor).unwrap();
    assert_eq!(
        ddl,
        "CREATE STREAM trades (Symbol VARCHAR, Price DOUBLE, Lots INTEGER) \
         WITH (KAFKA_TOPIC='market.trades', VALUE_FORMAT='JSON');"
    );
}

#[test]
fn test_create_table_with_primary_key_and_timestamp() {
    let mut descriptor = EntityDescriptor::new("accounts")
        .with_field("Id", FieldType::Int32)
        .with_field("Balance", FieldType::Decimal {
            precision: 18,
            scale: 4,
        })
        .with_field("UpdatedAt", FieldType::Timestamp)
        .with_key("Id");
    descriptor.timestamp_field = Some("UpdatedAt".to_string());

    let ddl = DdlGenerator::create_table("accounts", "accounts", &descriptor).unwrap();
    assert_eq!(
        ddl,
        "CREATE TABLE accounts (Id INTEGER PRIMARY KEY, Balance DECIMAL(18, 4), \
         UpdatedAt TIMESTAMP) \
         WITH (KAFKA_TOPIC='accounts', VALUE_FORMAT='JSON', TIMESTAMP='UpdatedAt');"
    );
}

#[test]
fn test_ignored_fields_are_skipped() {
    let mut descriptor = EntityDescriptor::new("trades")
        .with_field("Symbol", FieldType::String)
        .with_field("Price", FieldType::Float64);
    descriptor.fields.push(FieldDescriptor {
        name: "Internal".to_string(),
        field_type: FieldType::String,
        ignored: true,
    });

    let ddl = DdlGenerator::create_stream("trades", "trades", &descriptor).unwrap();
    assert!(!ddl.contains("Internal"));
}

#[test]
fn test_unmapped_type_fails_naming_type_and_field() {
    let descriptor = EntityDescriptor::new("trades")
        .with_field("Symbol", FieldType::String)
        .with_field("Token", FieldType::Unmapped("Guid".to_string()));

    let err = DdlGenerator::create_stream("trades", "trades", &descriptor).unwrap_err();
    match err {
        SqlError::TypeError { type_name, field } => {
            assert_eq!(type_name, "Guid");
            assert_eq!(field, "Token");
        }
        other => panic!("Expected TypeError, got {:?}", other),
    }
}
