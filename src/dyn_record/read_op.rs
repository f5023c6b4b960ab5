use super::record::DynamicRecord;
use crate::error::RecordError;
use crate::spooky_value::SpookyValue;
use crate::types::{FieldMap, FieldName};

impl DynamicRecord {
    // ════════════════════════════════════════════════════════════════════════
    // Read accessors
    // ════════════════════════════════════════════════════════════════════════

    /// Read a field.
    ///
    /// A field holding `Null` reads as `Null`; a field that does not exist
    /// is `UndefinedField`.
    pub fn get(&self, name: impl AsRef<str>) -> Result<SpookyValue, RecordError> {
        let name = name.as_ref();
        self.inner
            .borrow()
            .fields
            .get(name)
            .cloned()
            .ok_or_else(|| RecordError::UndefinedField(FieldName::from(name)))
    }

    /// Lenient read: `Null` for a missing field as well.
    pub fn get_or_null(&self, name: impl AsRef<str>) -> SpookyValue {
        self.inner
            .borrow()
            .fields
            .get(name.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    #[inline]
    pub fn has_field(&self, name: impl AsRef<str>) -> bool {
        self.inner.borrow().fields.contains_key(name.as_ref())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.borrow().fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().fields.is_empty()
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> Vec<FieldName> {
        self.inner.borrow().fields.keys().cloned().collect()
    }

    /// Visit every field in insertion order.
    ///
    /// Iterates a snapshot, so `visit` may mutate the record; changes are not
    /// seen by the ongoing walk.
    pub fn each_pair(&self, mut visit: impl FnMut(&FieldName, &SpookyValue)) {
        for (key, value) in &self.dump() {
            visit(key, value);
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Dump
    // ════════════════════════════════════════════════════════════════════════

    /// Snapshot of the full field mapping, in insertion order.
    ///
    /// The result is detached: mutating the record afterwards does not change
    /// it, and mutating it does not touch the record. Nested records inside
    /// are still shared handles.
    pub fn dump(&self) -> FieldMap {
        self.inner.borrow().fields.clone()
    }
}
