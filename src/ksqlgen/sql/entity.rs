/*!
# Entity Descriptors

Resolved entity metadata supplied by the caller. The compiler performs no
reflection or attribute discovery; whatever host-side model produced the
entity (annotations, conventions, hand-written registration) is flattened
into an [`EntityDescriptor`] before compilation starts.

Descriptors are immutable for the duration of a compilation call and carry
everything DDL generation and stream/table classification need: the ordered
field list, key fields, an optional explicit stream/table marker, and an
optional timestamp field for windowing.
*/

use crate::ksqlgen::sql::analyzer::ObjectKind;
use crate::ksqlgen::sql::error::SqlError;
use serde::{Deserialize, Serialize};

/// Entity-level metadata for one stream or table source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Logical object name (also the default topic name)
    pub name: String,
    /// Backing topic, when it differs from the object name
    pub topic: Option<String>,
    /// Declared fields in declaration order
    pub fields: Vec<FieldDescriptor>,
    /// Ordered key field names; empty for keyless entities
    pub key_fields: Vec<String>,
    /// Explicit stream/table marker; overrides the key-presence heuristic
    pub marker: Option<ObjectKind>,
    /// Field carrying event time for windowed derivations
    pub timestamp_field: Option<String>,
}

impl EntityDescriptor {
    /// Create a descriptor with only a name; fields added via `with_field`
    pub fn new(name: impl Into<String>) -> Self {
        EntityDescriptor {
            name: name.into(),
            topic: None,
            fields: Vec::new(),
            key_fields: Vec::new(),
            marker: None,
            timestamp_field: None,
        }
    }

    /// Append a field, builder-style
    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            field_type,
            ignored: false,
        });
        self
    }

    /// Mark a field as a key field
    pub fn with_key(mut self, name: impl Into<String>) -> Self {
        self.key_fields.push(name.into());
        self
    }

    /// Set an explicit stream/table marker
    pub fn with_marker(mut self, marker: ObjectKind) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Topic backing this entity (falls back to the object name)
    pub fn topic_name(&self) -> &str {
        self.topic.as_deref().unwrap_or(&self.name)
    }

    /// Fields that participate in DDL (ignored fields filtered out)
    pub fn active_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.ignored)
    }

    /// Whether the named field is part of the key
    pub fn is_key_field(&self, name: &str) -> bool {
        self.key_fields.iter().any(|k| k == name)
    }
}

/// One declared field of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    /// Excluded from generated DDL and projections
    pub ignored: bool,
}

impl FieldDescriptor {
    /// SQL column type for this field, or a type error naming field and type
    pub fn sql_type(&self) -> Result<String, SqlError> {
        self.field_type.sql_type(&self.name)
    }
}

/// Host value types the compiler can map to SQL column types.
///
/// The dialect has no integral type narrower than `INTEGER`, so the narrow
/// host integer types all widen to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal { precision: u8, scale: u8 },
    String,
    Bytes,
    Timestamp,
    Date,
    Time,
    Array(Box<FieldType>),
    Map(Box<FieldType>),
    /// Host type the static table does not cover; compilation fails with
    /// a descriptive error naming the type and field
    Unmapped(String),
}

impl FieldType {
    /// Map to the SQL column type, failing for `Unmapped` host types.
    ///
    /// `field` is only used to build the error message.
    pub fn sql_type(&self, field: &str) -> Result<String, SqlError> {
        let sql = match self {
            FieldType::Bool => "BOOLEAN".to_string(),
            FieldType::Int8 | FieldType::Int16 | FieldType::Int32 => "INTEGER".to_string(),
            FieldType::Int64 => "BIGINT".to_string(),
            FieldType::Float32 | FieldType::Float64 => "DOUBLE".to_string(),
            FieldType::Decimal { precision, scale } => {
                format!("DECIMAL({}, {})", precision, scale)
            }
            FieldType::String => "VARCHAR".to_string(),
            FieldType::Bytes => "BYTES".to_string(),
            FieldType::Timestamp => "TIMESTAMP".to_string(),
            FieldType::Date => "DATE".to_string(),
            FieldType::Time => "TIME".to_string(),
            FieldType::Array(inner) => format!("ARRAY<{}>", inner.sql_type(field)?),
            FieldType::Map(value) => format!("MAP<VARCHAR, {}>", value.sql_type(field)?),
            FieldType::Unmapped(type_name) => {
                return Err(SqlError::type_error(type_name.clone(), field));
            }
        };
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_integers_widen_to_integer() {
        assert_eq!(FieldType::Int8.sql_type("a").unwrap(), "INTEGER");
        assert_eq!(FieldType::Int16.sql_type("a").unwrap(), "INTEGER");
        assert_eq!(FieldType::Int32.sql_type("a").unwrap(), "INTEGER");
        assert_eq!(FieldType::Int64.sql_type("a").unwrap(), "BIGINT");
    }

    #[test]
    fn test_unmapped_type_names_type_and_field() {
        let err = FieldType::Unmapped("Guid".to_string())
            .sql_type("OrderId")
            .unwrap_err();
        match err {
            SqlError::TypeError { type_name, field } => {
                assert_eq!(type_name, "Guid");
                assert_eq!(field, "OrderId");
            }
            other => panic!("Expected TypeError, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_collection_types() {
        let arr = FieldType::Array(Box::new(FieldType::Int16));
        assert_eq!(arr.sql_type("xs").unwrap(), "ARRAY<INTEGER>");
        let map = FieldType::Map(Box::new(FieldType::Float64));
        assert_eq!(map.sql_type("m").unwrap(), "MAP<VARCHAR, DOUBLE>");
    }

    #[test]
    fn test_descriptor_topic_fallback() {
        let d = EntityDescriptor::new("trades");
        assert_eq!(d.topic_name(), "trades");
        let mut d2 = EntityDescriptor::new("trades");
        d2.topic = Some("market.trades.v1".to_string());
        assert_eq!(d2.topic_name(), "market.trades.v1");
    }
}
