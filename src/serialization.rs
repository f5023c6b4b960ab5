use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};
use std::cell::RefCell;

use crate::dyn_record::DynamicRecord;
use crate::error::RecordError;
use crate::spooky_value::{SpookyNumber, SpookyValue};
use crate::types::{FastHashSet, FieldMap, RecordId};

// ─── Serializability check ──────────────────────────────────────────────────

/// Target format of an encode. JSON has no form for NaN or infinities; CBOR
/// carries them as floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Json,
    Cbor,
}

/// Walk `value` and report the first thing `encoding` cannot represent: a
/// record reached again through its own fields, an opaque host value, or a
/// non-finite float bound for JSON.
fn ensure_serializable(
    value: &SpookyValue,
    active: &mut Vec<RecordId>,
    encoding: Encoding,
) -> Result<(), RecordError> {
    match value {
        SpookyValue::Number(SpookyNumber::F64(f))
            if encoding == Encoding::Json && !f.is_finite() =>
        {
            Err(RecordError::UnsupportedValue(format!("{:?} has no JSON form", f)))
        }
        SpookyValue::Array(arr) => arr
            .iter()
            .try_for_each(|v| ensure_serializable(v, active, encoding)),
        SpookyValue::Object(map) => map
            .values()
            .try_for_each(|v| ensure_serializable(v, active, encoding)),
        SpookyValue::Record(record) => ensure_record_serializable(record, active, encoding),
        SpookyValue::Opaque(_) => Err(RecordError::UnsupportedValue("opaque host value".into())),
        _ => Ok(()),
    }
}

fn ensure_record_serializable(
    record: &DynamicRecord,
    active: &mut Vec<RecordId>,
    encoding: Encoding,
) -> Result<(), RecordError> {
    let id = record.id();
    if active.contains(&id) {
        return Err(RecordError::CyclicRecord);
    }
    active.push(id);
    let result = record
        .fields()
        .values()
        .try_for_each(|v| ensure_serializable(v, active, encoding));
    active.pop();
    result
}

// ─── Serialize ──────────────────────────────────────────────────────────────

/// A value plus the records enclosing it, so a cycle fails instead of
/// recursing forever.
struct Guarded<'a> {
    value: &'a SpookyValue,
    active: &'a RefCell<FastHashSet<RecordId>>,
}

struct GuardedRecord<'a> {
    record: &'a DynamicRecord,
    active: &'a RefCell<FastHashSet<RecordId>>,
}

fn serialize_fields<S: Serializer>(
    map: &FieldMap,
    active: &RefCell<FastHashSet<RecordId>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut m = serializer.serialize_map(Some(map.len()))?;
    for (k, v) in map {
        m.serialize_entry(k.as_str(), &Guarded { value: v, active })?;
    }
    m.end()
}

impl Serialize for Guarded<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            SpookyValue::Null => serializer.serialize_none(),
            SpookyValue::Bool(b) => serializer.serialize_bool(*b),
            SpookyValue::Number(n) => match n {
                SpookyNumber::I64(i) => serializer.serialize_i64(*i),
                SpookyNumber::U64(u) => serializer.serialize_u64(*u),
                SpookyNumber::F64(f) => serializer.serialize_f64(*f),
            },
            SpookyValue::Str(s) => serializer.serialize_str(s.as_str()),
            SpookyValue::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for v in arr {
                    seq.serialize_element(&Guarded {
                        value: v,
                        active: self.active,
                    })?;
                }
                seq.end()
            }
            SpookyValue::Object(map) => serialize_fields(map, self.active, serializer),
            SpookyValue::Record(record) => GuardedRecord {
                record,
                active: self.active,
            }
            .serialize(serializer),
            SpookyValue::Opaque(_) => Err(S::Error::custom("opaque host value cannot be serialized")),
        }
    }
}

impl Serialize for GuardedRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let id = self.record.id();
        if !self.active.borrow_mut().insert(id) {
            return Err(S::Error::custom("record refers to itself"));
        }
        let result = serialize_fields(&self.record.fields(), self.active, serializer);
        self.active.borrow_mut().remove(&id);
        result
    }
}

impl Serialize for SpookyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let active = RefCell::new(FastHashSet::default());
        Guarded {
            value: self,
            active: &active,
        }
        .serialize(serializer)
    }
}

/// A record serializes as its field mapping.
impl Serialize for DynamicRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let active = RefCell::new(FastHashSet::default());
        GuardedRecord {
            record: self,
            active: &active,
        }
        .serialize(serializer)
    }
}

// ─── Encoders ───────────────────────────────────────────────────────────────

impl DynamicRecord {
    /// Check that the record can be encoded: no cycles, no opaque values.
    ///
    /// JSON is stricter: [`to_json`](Self::to_json) also rejects NaN and
    /// infinite floats.
    pub fn ensure_serializable(&self) -> Result<(), RecordError> {
        ensure_record_serializable(self, &mut Vec::new(), Encoding::Cbor)
    }

    /// Encode the dumped field mapping as a JSON object.
    pub fn to_json(&self) -> Result<String, RecordError> {
        ensure_record_serializable(self, &mut Vec::new(), Encoding::Json)?;
        serde_json::to_string(self).map_err(|e| RecordError::JsonError(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, RecordError> {
        ensure_record_serializable(self, &mut Vec::new(), Encoding::Json)?;
        serde_json::to_string_pretty(self).map_err(|e| RecordError::JsonError(e.to_string()))
    }

    /// Encode the dumped field mapping as a CBOR map.
    pub fn to_cbor(&self) -> Result<Vec<u8>, RecordError> {
        self.ensure_serializable()?;
        let mut buf = Vec::new();
        cbor4ii::serde::to_writer(&mut buf, self)
            .map_err(|e| RecordError::CborError(e.to_string()))?;
        Ok(buf)
    }
}
