use crate::dyn_record::DynamicRecord;
use crate::error::RecordError;
use crate::spooky_value::SpookyValue;
use crate::types::FieldMap;

// ─── Decoders ───────────────────────────────────────────────────────────────

/// Top-level documents must be a mapping; anything else has no field names.
fn into_fields(value: SpookyValue) -> Result<FieldMap, RecordError> {
    match value {
        SpookyValue::Object(map) => Ok(map),
        _ => Err(RecordError::SerializationNotObject),
    }
}

impl DynamicRecord {
    /// Restore a record from a JSON object. Nested objects come back as plain
    /// [`SpookyValue::Object`] values, not records.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| RecordError::JsonError(e.to_string()))?;
        let fields = into_fields(SpookyValue::from(value))?;
        Ok(Self::from_fields(fields))
    }

    /// Restore a record from a CBOR map with text keys.
    pub fn from_cbor(data: &[u8]) -> Result<Self, RecordError> {
        let value: cbor4ii::core::Value =
            cbor4ii::serde::from_slice(data).map_err(|e| RecordError::CborError(e.to_string()))?;
        let fields = into_fields(SpookyValue::try_from(value)?)?;
        Ok(Self::from_fields(fields))
    }

    /// Merge a JSON object into this record, as [`load`](Self::load) does.
    pub fn load_json(&self, json: &str) -> Result<(), RecordError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| RecordError::JsonError(e.to_string()))?;
        self.load_fields(into_fields(SpookyValue::from(value))?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_round_trip() {
        let record = DynamicRecord::new();
        record.set("id", "user:123");
        record.set("age", 30i64);
        record.set("score", 99.5f64);
        record.set("active", true);
        record.set("nothing", SpookyValue::Null);
        record.set("tags", vec![SpookyValue::from("a"), SpookyValue::from(1i64)]);

        let restored = DynamicRecord::from_json(&record.to_json().unwrap()).unwrap();
        assert!(restored.equals(&record));
        assert_eq!(restored.keys(), record.keys());
    }

    #[test]
    fn test_cbor_round_trip() {
        let record = DynamicRecord::new();
        record.set("name", "Alice");
        record.set("count", 1000i64);
        record.set("big", u64::MAX);
        record.set("ratio", 0.25f64);

        let restored = DynamicRecord::from_cbor(&record.to_cbor().unwrap()).unwrap();
        assert_eq!(restored.dump(), record.dump());
    }

    #[test]
    fn test_nested_objects_stay_plain() {
        let record = DynamicRecord::from_json(r#"{"profile":{"bio":"Developer"}}"#).unwrap();
        let profile = record.get("profile").unwrap();
        assert!(profile.as_record().is_none());
        assert_eq!(
            profile.as_object().and_then(|m| m.get("bio")).and_then(SpookyValue::as_str),
            Some("Developer")
        );
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert_eq!(
            DynamicRecord::from_json("[1, 2]").unwrap_err(),
            RecordError::SerializationNotObject
        );
        assert!(matches!(
            DynamicRecord::from_json("{"),
            Err(RecordError::JsonError(_))
        ));
    }

    #[test]
    fn test_load_json_merges() {
        let record = DynamicRecord::new();
        record.set("a", 1i64);
        record.set("b", 2i64);
        record.load_json(r#"{"a": 10, "c": 3}"#).unwrap();
        assert_eq!(record.inspect().unwrap(), "<DynamicRecord a=10, b=2, c=3>");
    }

    #[test]
    fn test_cbor_non_map_is_rejected() {
        // [1, 2]
        let array = [0x82, 0x01, 0x02];
        assert_eq!(
            DynamicRecord::from_cbor(&array).unwrap_err(),
            RecordError::SerializationNotObject
        );
        assert!(matches!(
            DynamicRecord::from_cbor(&[0xa1]),
            Err(RecordError::CborError(_))
        ));
    }

    #[test]
    fn test_cbor_byte_string_is_unsupported() {
        // {"b": h'0102'}
        let doc = [0xa1, 0x61, b'b', 0x42, 0x01, 0x02];
        assert!(matches!(
            DynamicRecord::from_cbor(&doc),
            Err(RecordError::UnsupportedValue(_))
        ));
    }
}
