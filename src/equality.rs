use std::rc::Rc;

use crate::dyn_record::DynamicRecord;
use crate::spooky_value::SpookyValue;
use crate::types::{FieldMap, RecordId};

// ─── FieldView ──────────────────────────────────────────────────────────────

/// Capability of exposing a record-style field mapping.
///
/// [`DynamicRecord::equals`] accepts any `FieldView`; values that expose no
/// mapping (the default) are simply unequal to every record.
pub trait FieldView {
    fn field_view(&self) -> Option<FieldMap> {
        None
    }
}

impl FieldView for DynamicRecord {
    fn field_view(&self) -> Option<FieldMap> {
        Some(self.dump())
    }
}

/// Only a nested record exposes fields; a plain `Object` is a mapping, not a
/// record.
impl FieldView for SpookyValue {
    fn field_view(&self) -> Option<FieldMap> {
        match self {
            SpookyValue::Record(record) => Some(record.dump()),
            _ => None,
        }
    }
}

impl FieldView for FieldMap {}
impl FieldView for String {}
impl FieldView for i64 {}
impl FieldView for u64 {}
impl FieldView for f64 {}
impl FieldView for bool {}

// ─── Structural equality ────────────────────────────────────────────────────

/// Record pairs currently being compared. Meeting a pair again means the walk
/// went around a cycle; that branch is taken as equal and the rest of the
/// graph decides.
#[derive(Debug, Default)]
pub(crate) struct EqGuard {
    active: Vec<(RecordId, RecordId)>,
}

impl EqGuard {
    fn contains(&self, a: RecordId, b: RecordId) -> bool {
        self.active
            .iter()
            .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
    }
}

pub(crate) fn values_eq(a: &SpookyValue, b: &SpookyValue, guard: &mut EqGuard) -> bool {
    match (a, b) {
        (SpookyValue::Null, SpookyValue::Null) => true,
        (SpookyValue::Bool(x), SpookyValue::Bool(y)) => x == y,
        (SpookyValue::Number(x), SpookyValue::Number(y)) => x == y,
        (SpookyValue::Str(x), SpookyValue::Str(y)) => x == y,
        (SpookyValue::Array(x), SpookyValue::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(v, w)| values_eq(v, w, guard))
        }
        (SpookyValue::Object(x), SpookyValue::Object(y)) => maps_eq(x, y, guard),
        (SpookyValue::Record(x), SpookyValue::Record(y)) => records_eq(x, y, guard),
        (SpookyValue::Opaque(x), SpookyValue::Opaque(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

/// Same keys, equal value per key. Order is ignored.
pub(crate) fn maps_eq(x: &FieldMap, y: &FieldMap, guard: &mut EqGuard) -> bool {
    x.len() == y.len()
        && x
            .iter()
            .all(|(key, v)| y.get(key).is_some_and(|w| values_eq(v, w, guard)))
}

pub(crate) fn records_eq(x: &DynamicRecord, y: &DynamicRecord, guard: &mut EqGuard) -> bool {
    if x.ptr_eq(y) {
        return true;
    }
    let (a, b) = (x.id(), y.id());
    if guard.contains(a, b) {
        return true;
    }
    guard.active.push((a, b));
    let equal = maps_eq(&x.fields(), &y.fields(), guard);
    guard.active.pop();
    equal
}

impl PartialEq for SpookyValue {
    fn eq(&self, other: &Self) -> bool {
        values_eq(self, other, &mut EqGuard::default())
    }
}

impl PartialEq for DynamicRecord {
    fn eq(&self, other: &Self) -> bool {
        records_eq(self, other, &mut EqGuard::default())
    }
}

impl DynamicRecord {
    /// True iff `other` exposes a field mapping equal to this record's.
    /// Never fails; anything without a mapping is unequal.
    pub fn equals(&self, other: &dyn FieldView) -> bool {
        match other.field_view() {
            Some(theirs) => maps_eq(&self.fields(), &theirs, &mut EqGuard::default()),
            None => false,
        }
    }
}
