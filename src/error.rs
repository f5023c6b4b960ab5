// ─── Error ──────────────────────────────────────────────────────────────────
use thiserror::Error;

use crate::types::FieldName;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Read of a field (or accessor) that is not installed on the record.
    #[error("undefined field `{0}` for record")]
    UndefinedField(FieldName),
    /// A writer accessor was invoked with other than exactly one value.
    #[error("wrong number of arguments (given {actual}, expected {expected})")]
    InvalidArgumentCount { expected: usize, actual: usize },
    /// Delete of a field that is not present.
    #[error("field `{0}` not found")]
    FieldNotFound(FieldName),
    #[error("inspect failed: {0}")]
    Inspect(String),
    #[error("record refers to itself and cannot be serialized")]
    CyclicRecord,
    #[error("value cannot be serialized: {0}")]
    UnsupportedValue(String),
    #[error("top-level document is not an object")]
    SerializationNotObject,
    #[error("JSON error: {0}")]
    JsonError(String),
    #[error("CBOR error: {0}")]
    CborError(String),
}
