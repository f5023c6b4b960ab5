use smol_str::SmolStr;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::spooky_value::SpookyValue;
use crate::types::{FieldMap, FieldName, RecordConfig, RecordId};

// ─── Record ─────────────────────────────────────────────────────────────────

pub(crate) struct RecordInner {
    pub(crate) fields: FieldMap,
    pub(crate) config: RecordConfig,
}

/// An ordered, runtime-extensible set of named fields.
///
/// `DynamicRecord` is a handle: cloning it aliases the same record, which is
/// what lets a record hold itself (directly or through other records). A deep
/// copy is `DynamicRecord::from_fields(record.dump())`.
///
/// Every present field carries a read and a write accessor, reached through
/// [`get`](Self::get) / [`set`](Self::set), the by-name
/// [`invoke`](Self::invoke), or property-style methods generated with
/// [`record_accessors!`](crate::record_accessors).
///
/// Not thread-safe: the handle is `!Send`. Reference cycles are not reclaimed
/// on their own; break them with [`delete_field`](Self::delete_field).
#[derive(Clone)]
pub struct DynamicRecord {
    pub(crate) inner: Rc<RefCell<RecordInner>>,
}

impl Default for DynamicRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicRecord {
    /// Create an empty record.
    #[inline]
    pub fn new() -> Self {
        Self::with_config(RecordConfig::default())
    }

    pub fn with_config(config: RecordConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(RecordInner {
                fields: FieldMap::default(),
                config,
            })),
        }
    }

    /// Create an empty record rendered as `<type_name ...>`.
    pub fn named(type_name: impl Into<SmolStr>) -> Self {
        Self::with_config(RecordConfig {
            type_name: type_name.into(),
            ..RecordConfig::default()
        })
    }

    /// Create a record seeded from `fields`, in their order.
    pub fn from_fields(fields: FieldMap) -> Self {
        let record = Self::new();
        record.load_fields(fields);
        record
    }

    /// Runtime identity. Two handles share an id iff they alias one record.
    #[inline]
    pub fn id(&self) -> RecordId {
        RecordId(Rc::as_ptr(&self.inner) as usize)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn config(&self) -> RecordConfig {
        self.inner.borrow().config.clone()
    }

    pub fn type_name(&self) -> SmolStr {
        self.inner.borrow().config.type_name.clone()
    }

    /// Borrow the live field mapping.
    ///
    /// Panics if the record is mutated while the borrow is held; use
    /// [`dump`](Self::dump) for a detached copy.
    #[inline]
    pub fn fields(&self) -> Ref<'_, FieldMap> {
        Ref::map(self.inner.borrow(), |inner| &inner.fields)
    }
}

impl<K, V> FromIterator<(K, V)> for DynamicRecord
where
    K: Into<FieldName>,
    V: Into<SpookyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let record = Self::new();
        record.load(pairs);
        record
    }
}
