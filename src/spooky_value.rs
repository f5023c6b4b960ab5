use smol_str::SmolStr;
use std::fmt;
use std::rc::Rc;

use crate::dyn_record::DynamicRecord;
use crate::error::RecordError;
use crate::inspect::{Inspect, InspectGuard};
use crate::types::{FieldMap, FieldName};

// ─── SpookyNumber ───────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
pub enum SpookyNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl fmt::Debug for SpookyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpookyNumber::I64(i) => write!(f, "I64({})", i),
            SpookyNumber::U64(u) => write!(f, "U64({})", u),
            SpookyNumber::F64(v) => write!(f, "F64({})", v),
        }
    }
}

impl fmt::Display for SpookyNumber {
    /// Floats always carry a fractional part (`1.0`), integers never do.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpookyNumber::I64(i) => write!(f, "{}", i),
            SpookyNumber::U64(u) => write!(f, "{}", u),
            SpookyNumber::F64(v) => write!(f, "{:?}", v),
        }
    }
}

/// Integers compare by value regardless of signedness; floats only equal
/// floats, so `1` and `1.0` stay distinct field values.
impl PartialEq for SpookyNumber {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (SpookyNumber::F64(a), SpookyNumber::F64(b)) => a == b,
            (SpookyNumber::F64(_), _) | (_, SpookyNumber::F64(_)) => false,
            (a, b) => a.as_i128() == b.as_i128(),
        }
    }
}

impl SpookyNumber {
    #[inline]
    fn as_i128(self) -> Option<i128> {
        match self {
            SpookyNumber::I64(i) => Some(i as i128),
            SpookyNumber::U64(u) => Some(u as i128),
            SpookyNumber::F64(_) => None,
        }
    }
}

// ─── SpookyValue ────────────────────────────────────────────────────────────

/// Anything a record field can hold.
///
/// `Null` is the absence marker: a field set to `Null` still exists. Nested
/// records are shared handles, so a record may (directly or indirectly) hold
/// itself. `Opaque` carries host values that know how to render themselves.
#[derive(Clone)]
pub enum SpookyValue {
    Null,
    Bool(bool),
    Number(SpookyNumber),
    Str(SmolStr),
    Array(Vec<SpookyValue>),
    Object(FieldMap),
    Record(DynamicRecord),
    Opaque(Rc<dyn Inspect>),
}

impl Default for SpookyValue {
    fn default() -> Self {
        SpookyValue::Null
    }
}

impl SpookyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SpookyValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&FieldMap> {
        match self {
            SpookyValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&DynamicRecord> {
        match self {
            SpookyValue::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Short kind name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SpookyValue::Null => "null",
            SpookyValue::Bool(_) => "bool",
            SpookyValue::Number(_) => "number",
            SpookyValue::Str(_) => "string",
            SpookyValue::Array(_) => "array",
            SpookyValue::Object(_) => "object",
            SpookyValue::Record(_) => "record",
            SpookyValue::Opaque(_) => "opaque",
        }
    }
}

/// Debug goes through the cycle-safe renderer; a derived impl would recurse
/// forever on self-referential records.
impl fmt::Debug for SpookyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut guard = InspectGuard::new();
        self.inspect_fmt(f, &mut guard)
    }
}

// ─── From impls ─────────────────────────────────────────────────────────────

impl From<f64> for SpookyValue {
    fn from(n: f64) -> Self {
        SpookyValue::Number(SpookyNumber::F64(n))
    }
}

impl From<i64> for SpookyValue {
    fn from(n: i64) -> Self {
        SpookyValue::Number(SpookyNumber::I64(n))
    }
}

impl From<i32> for SpookyValue {
    fn from(n: i32) -> Self {
        SpookyValue::Number(SpookyNumber::I64(n as i64))
    }
}

impl From<u64> for SpookyValue {
    fn from(n: u64) -> Self {
        SpookyValue::Number(SpookyNumber::U64(n))
    }
}

impl From<bool> for SpookyValue {
    fn from(b: bool) -> Self {
        SpookyValue::Bool(b)
    }
}

impl From<&str> for SpookyValue {
    fn from(s: &str) -> Self {
        SpookyValue::Str(SmolStr::from(s))
    }
}

impl From<String> for SpookyValue {
    fn from(s: String) -> Self {
        SpookyValue::Str(SmolStr::from(s))
    }
}

impl From<SmolStr> for SpookyValue {
    fn from(s: SmolStr) -> Self {
        SpookyValue::Str(s)
    }
}

impl From<Vec<SpookyValue>> for SpookyValue {
    fn from(arr: Vec<SpookyValue>) -> Self {
        SpookyValue::Array(arr)
    }
}

impl From<FieldMap> for SpookyValue {
    fn from(map: FieldMap) -> Self {
        SpookyValue::Object(map)
    }
}

impl From<DynamicRecord> for SpookyValue {
    fn from(record: DynamicRecord) -> Self {
        SpookyValue::Record(record)
    }
}

impl From<&DynamicRecord> for SpookyValue {
    fn from(record: &DynamicRecord) -> Self {
        SpookyValue::Record(record.clone())
    }
}

impl<T: Into<SpookyValue>> From<Option<T>> for SpookyValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(SpookyValue::Null, Into::into)
    }
}

// ─── TryFrom<cbor4ii::core::Value> ─────────────────────────────────────────

fn cbor_key(key: cbor4ii::core::Value) -> Result<FieldName, RecordError> {
    match key {
        cbor4ii::core::Value::Text(s) => Ok(FieldName::from(s)),
        cbor4ii::core::Value::Integer(i) => Ok(FieldName::from(i.to_string())),
        other => Err(RecordError::UnsupportedValue(format!("CBOR map key {:?}", other))),
    }
}

/// Byte strings, simple values and non-text, non-integer map keys have no
/// field value form and are rejected rather than read as `Null`.
impl TryFrom<cbor4ii::core::Value> for SpookyValue {
    type Error = RecordError;

    fn try_from(v: cbor4ii::core::Value) -> Result<Self, RecordError> {
        Ok(match v {
            cbor4ii::core::Value::Null => SpookyValue::Null,
            cbor4ii::core::Value::Bool(b) => SpookyValue::Bool(b),
            cbor4ii::core::Value::Integer(i) => {
                if let Ok(val) = i64::try_from(i) {
                    SpookyValue::Number(SpookyNumber::I64(val))
                } else if let Ok(val) = u64::try_from(i) {
                    SpookyValue::Number(SpookyNumber::U64(val))
                } else {
                    SpookyValue::Number(SpookyNumber::F64(i as f64))
                }
            }
            cbor4ii::core::Value::Float(f) => SpookyValue::Number(SpookyNumber::F64(f)),
            cbor4ii::core::Value::Text(s) => SpookyValue::Str(SmolStr::from(s)),
            cbor4ii::core::Value::Array(arr) => SpookyValue::Array(
                arr.into_iter()
                    .map(SpookyValue::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            cbor4ii::core::Value::Map(map) => SpookyValue::Object(
                map.into_iter()
                    .map(|(k, v)| Ok((cbor_key(k)?, SpookyValue::try_from(v)?)))
                    .collect::<Result<_, RecordError>>()?,
            ),
            cbor4ii::core::Value::Tag(_, inner) => SpookyValue::try_from(*inner)?,
            other => {
                return Err(RecordError::UnsupportedValue(format!("CBOR value {:?}", other)));
            }
        })
    }
}

// ─── From serde_json::Value ─────────────────────────────────────────────────

impl From<serde_json::Value> for SpookyValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => SpookyValue::Null,
            serde_json::Value::Bool(b) => SpookyValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    SpookyValue::Number(SpookyNumber::I64(i))
                } else if let Some(u) = n.as_u64() {
                    SpookyValue::Number(SpookyNumber::U64(u))
                } else {
                    SpookyValue::Number(SpookyNumber::F64(n.as_f64().unwrap_or(0.0)))
                }
            }
            serde_json::Value::String(s) => SpookyValue::Str(SmolStr::from(s)),
            serde_json::Value::Array(arr) => {
                SpookyValue::Array(arr.into_iter().map(SpookyValue::from).collect())
            }
            serde_json::Value::Object(obj) => SpookyValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (FieldName::from(k), SpookyValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Build a [`DynamicRecord`] from `key => value` pairs. Values nest with
/// braces; anything longer than a single token goes in parentheses.
///
/// ```
/// use spooky_dyn_record::record;
///
/// let person = record!({
///     "name" => "Alice",
///     "age" => (30i64),
///     "address" => { "city" => "Berlin" },
/// });
/// assert_eq!(person.len(), 3);
/// ```
#[macro_export]
macro_rules! record {
    ({ $($key:expr => $val:tt),* $(,)? }) => {{
        let record = $crate::DynamicRecord::new();
        $(
            record.set($key, $crate::record!(@value $val));
        )*
        record
    }};

    (@value { $($inner:tt)* }) => {
        $crate::SpookyValue::Record($crate::record!({ $($inner)* }))
    };

    (@value $val:expr) => {
        $crate::SpookyValue::from($val)
    };
}
