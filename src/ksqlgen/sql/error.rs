/*!
# SQL Generation Error Handling

Error types for the expression-tree-to-KSQL compiler. All errors are
synchronous and terminal for the single compilation call: nothing is
retried internally and partial statement text is never returned.

## Error Categories

- **Structural errors**: the expression tree does not match the shape a
  builder expects (e.g. a join call with the wrong argument count)
- **Unsupported-construct errors**: a method, operator, or host type has no
  mapping table entry
- **Type errors**: a descriptor field's host type has no SQL column type
- **Classification errors**: pull mode requested against an object that
  resolves to a stream
- **Registry conflicts**: a derivation key already maps to a different
  object name (internal invariant violation)

Errors name the offending construct, type, or object so callers can report
them without re-walking the tree.
*/

use std::fmt;

/// Errors raised while compiling an expression tree to KSQL text.
///
/// Each variant carries the context a caller needs to identify the failing
/// construct. See the module docs for the category breakdown.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlError {
    /// Expression tree shape does not match the expected pattern.
    ///
    /// Raised when a builder recognizes the node kind but its arity or
    /// operand shapes are wrong, e.g. a `Join` call missing its key
    /// selectors. Names expected vs. actual shape.
    StructuralError {
        /// Description including the expected and actual shape
        message: String,
        /// The construct that failed to match (e.g. "Join")
        construct: String,
    },

    /// A method, operator, or node kind has no translation.
    ///
    /// Raised when a mapping table lookup fails or a node kind appears
    /// where the builder has no rendering for it.
    UnsupportedConstruct {
        /// The unsupported symbol or node kind
        construct: String,
        /// Where it appeared (e.g. "SELECT projection")
        context: String,
    },

    /// A descriptor field's host type has no SQL column type mapping.
    TypeError {
        /// Host type name with no mapping
        type_name: String,
        /// Field declaring the type
        field: String,
    },

    /// Pull-query generation requested against a stream-classified object.
    ClassificationError {
        /// The object whose classification forbids the request
        object_name: String,
        /// Description of the failed eligibility check
        message: String,
    },

    /// A derivation key already maps to a different object name.
    ///
    /// Should not occur under correct key derivation; surfaced as an
    /// invariant violation rather than silently overwritten.
    RegistryConflict {
        /// Canonical rendering of the derivation key
        key: String,
        /// Name already registered for the key
        existing: String,
        /// Name the caller attempted to register
        requested: String,
    },
}

impl fmt::Display for SqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlError::StructuralError { message, construct } => {
                write!(f, "Structural error in {}: {}", construct, message)
            }
            SqlError::UnsupportedConstruct { construct, context } => {
                write!(f, "Unsupported construct '{}' in {}", construct, context)
            }
            SqlError::TypeError { type_name, field } => {
                write!(
                    f,
                    "Type error: no SQL type mapping for host type '{}' on field '{}'",
                    type_name, field
                )
            }
            SqlError::ClassificationError {
                object_name,
                message,
            } => {
                write!(
                    f,
                    "Classification error for '{}': {}",
                    object_name, message
                )
            }
            SqlError::RegistryConflict {
                key,
                existing,
                requested,
            } => {
                write!(
                    f,
                    "Registry conflict for derivation key '{}': already registered as '{}', requested '{}'",
                    key, existing, requested
                )
            }
        }
    }
}

impl std::error::Error for SqlError {}

impl SqlError {
    /// Create a structural error
    pub fn structural_error(construct: impl Into<String>, message: impl Into<String>) -> Self {
        SqlError::StructuralError {
            message: message.into(),
            construct: construct.into(),
        }
    }

    /// Create an unsupported-construct error
    pub fn unsupported(construct: impl Into<String>, context: impl Into<String>) -> Self {
        SqlError::UnsupportedConstruct {
            construct: construct.into(),
            context: context.into(),
        }
    }

    /// Create a type mapping error
    pub fn type_error(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        SqlError::TypeError {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Create a classification error
    pub fn classification_error(
        object_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        SqlError::ClassificationError {
            object_name: object_name.into(),
            message: message.into(),
        }
    }

    /// Create a registry conflict error
    pub fn registry_conflict(
        key: impl Into<String>,
        existing: impl Into<String>,
        requested: impl Into<String>,
    ) -> Self {
        SqlError::RegistryConflict {
            key: key.into(),
            existing: existing.into(),
            requested: requested.into(),
        }
    }
}

/// Result type for SQL generation operations
pub type SqlResult<T> = Result<T, SqlError>;
