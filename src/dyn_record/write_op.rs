use tracing::{debug, trace};

use super::record::DynamicRecord;
use crate::error::RecordError;
use crate::spooky_value::SpookyValue;
use crate::types::{FastHashSet, FieldMap, FieldName};

impl DynamicRecord {
    // ════════════════════════════════════════════════════════════════════════
    // Field installation
    // ════════════════════════════════════════════════════════════════════════

    /// Upsert one field. A new name is appended; an existing one keeps its
    /// position. Returns the stored value.
    pub fn set(&self, name: impl Into<FieldName>, value: impl Into<SpookyValue>) -> SpookyValue {
        let value = value.into();
        self.install_field(name.into(), value.clone());
        value
    }

    fn install_field(&self, name: FieldName, value: SpookyValue) {
        trace!(record = ?self.id(), field = %name, "install field");
        let previous = self.inner.borrow_mut().fields.insert(name, value);
        // Released outside the borrow: dropping a host value may run arbitrary code.
        drop(previous);
    }

    /// Install every pair, overwriting existing names in place and appending
    /// new ones. Fields not named in `pairs` are left alone.
    pub fn load<I, K, V>(&self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<FieldName>,
        V: Into<SpookyValue>,
    {
        let mut installed = 0usize;
        for (name, value) in pairs {
            self.install_field(name.into(), value.into());
            installed += 1;
        }
        debug!(record = ?self.id(), installed, "load");
    }

    /// Alias of [`load`](Self::load).
    #[inline]
    pub fn merge<I, K, V>(&self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<FieldName>,
        V: Into<SpookyValue>,
    {
        self.load(pairs)
    }

    /// [`load`](Self::load) for a whole mapping; an empty mapping is a no-op.
    pub fn load_fields(&self, fields: FieldMap) {
        if fields.is_empty() {
            return;
        }
        self.load(fields);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Structural removals
    // ════════════════════════════════════════════════════════════════════════

    /// Remove a field and its accessors, returning the value it held.
    ///
    /// Later reads of the name are `UndefinedField`. Removing a name that is
    /// not present is `FieldNotFound`.
    pub fn delete_field(&self, name: impl AsRef<str>) -> Result<SpookyValue, RecordError> {
        let name = name.as_ref();
        let removed = self.inner.borrow_mut().fields.shift_remove(name);
        match removed {
            Some(value) => {
                trace!(record = ?self.id(), field = name, "delete field");
                Ok(value)
            }
            None => Err(RecordError::FieldNotFound(FieldName::from(name))),
        }
    }

    /// Filtered dump: returns the fields named in `keys`, in record order.
    ///
    /// **Destructive.** Every field not named in `keys` is removed from the
    /// record itself, so afterwards `dump()` equals the returned mapping.
    /// Names in `keys` that are not fields are ignored. Use `dump()` and
    /// filter the copy for a side-effect-free projection.
    pub fn dump_keys<I, K>(&self, keys: I) -> FieldMap
    where
        I: IntoIterator<Item = K>,
        K: Into<FieldName>,
    {
        let keep: FastHashSet<FieldName> = keys.into_iter().map(Into::into).collect();
        let mut inner = self.inner.borrow_mut();
        let before = inner.fields.len();
        let mut removed = Vec::new();
        inner.fields.retain(|name, value| {
            let kept = keep.contains(name);
            if !kept {
                removed.push(std::mem::take(value));
            }
            kept
        });
        let kept = inner.fields.clone();
        drop(inner);
        debug!(
            record = ?self.id(),
            dropped = before - kept.len(),
            "filtered dump removed fields"
        );
        kept
    }
}
