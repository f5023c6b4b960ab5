use indexmap::IndexMap;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::BuildHasherDefault;
use std::num::NonZeroUsize;

use crate::spooky_value::SpookyValue;

pub type FastBuildHasher = BuildHasherDefault<FxHasher>;
pub type FastHashSet<T> = HashSet<T, FastBuildHasher>;

/// Ordered field mapping. Iteration follows insertion order; overwriting an
/// existing key keeps its position.
pub type FieldMap = IndexMap<FieldName, SpookyValue, FastBuildHasher>;

pub const DEFAULT_TYPE_NAME: &str = "DynamicRecord";

// ─── FieldName ──────────────────────────────────────────────────────────────

/// Canonical identifier form of a field name.
///
/// Every call site spelling (`&str`, `String`, `SmolStr`) normalizes to the
/// same `FieldName`, so `"name"` and `String::from("name")` address one field.
/// Hashes like its `str`, which lets the field map be queried with a plain
/// `&str`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(SmolStr);

impl FieldName {
    #[inline]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(SmolStr::new(name.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the name is a plain identifier. Only such names can be spelled
    /// as `record_accessors!` methods; the rest stay reachable via
    /// `get`/`set`/`invoke`. `Debug` quotes names that are not identifiers.
    pub fn is_identifier(&self) -> bool {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(c) if c == '_' || c.is_alphabetic() => {}
            _ => return false,
        }
        chars.all(|c| c == '_' || c.is_alphanumeric())
    }
}

impl Borrow<str> for FieldName {
    #[inline]
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for FieldName {
    #[inline]
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// `:name`, or `:"first name"` when the name is not an identifier.
impl fmt::Debug for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identifier() {
            write!(f, ":{}", self.0)
        } else {
            write!(f, ":{:?}", self.0.as_str())
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldName {
    fn from(s: &str) -> Self {
        Self(SmolStr::from(s))
    }
}

impl From<String> for FieldName {
    fn from(s: String) -> Self {
        Self(SmolStr::from(s))
    }
}

impl From<&String> for FieldName {
    fn from(s: &String) -> Self {
        Self(SmolStr::from(s.as_str()))
    }
}

impl From<SmolStr> for FieldName {
    fn from(s: SmolStr) -> Self {
        Self(s)
    }
}

impl From<&FieldName> for FieldName {
    fn from(name: &FieldName) -> Self {
        name.clone()
    }
}

// ─── RecordId ───────────────────────────────────────────────────────────────

/// Runtime identity of a record: the address of its shared allocation.
/// Only meaningful while the record is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub(crate) usize);

// ─── RecordConfig ───────────────────────────────────────────────────────────

/// Construction-time options for a [`DynamicRecord`](crate::DynamicRecord).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordConfig {
    /// Name shown by `inspect`, e.g. `<Person name="Alice">`.
    ///
    /// Default: `"DynamicRecord"`.
    pub type_name: SmolStr,
    /// Nesting depth past which `inspect` stops descending and renders a
    /// record as `<TypeName ...>`, as it does for a cycle.
    ///
    /// Default: unlimited.
    pub inspect_depth_limit: Option<NonZeroUsize>,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            type_name: SmolStr::new_static(DEFAULT_TYPE_NAME),
            inspect_depth_limit: None,
        }
    }
}
