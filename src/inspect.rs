use std::fmt::{self, Write};
use std::num::NonZeroUsize;
use std::ops::{Deref, DerefMut};
use tracing::trace;

use crate::dyn_record::DynamicRecord;
use crate::error::RecordError;
use crate::spooky_value::SpookyValue;
use crate::types::RecordId;

// ─── Inspect ────────────────────────────────────────────────────────────────

/// Rendering hook for host values stored as [`SpookyValue::Opaque`].
///
/// Implementations that hold records must render them through the given
/// guard so cycles running through the host value are still caught.
///
/// Every record enclosing the value stays borrowed while `inspect_fmt` runs.
/// Writing to one of them from here (`set`, `load`, `delete_field`, ...)
/// panics with a `BorrowMutError`; reads are fine.
pub trait Inspect {
    fn inspect_fmt(&self, f: &mut dyn Write, guard: &mut InspectGuard) -> fmt::Result;
}

// ─── InspectGuard ───────────────────────────────────────────────────────────

/// Records currently being rendered, innermost last.
///
/// One guard belongs to one top-level rendering call and is threaded through
/// every nested call by `&mut`, so renderings running on different threads
/// or interleaved on one thread never share state. Entries are popped by
/// [`GuardScope`] on drop, which covers early returns, errors and unwinding.
#[derive(Debug, Default)]
pub struct InspectGuard {
    active: Vec<RecordId>,
    depth_limit: Option<NonZeroUsize>,
}

/// Outcome of [`InspectGuard::enter`].
pub enum Enter<'g> {
    /// The record was pushed; it is popped when the scope drops.
    Entered(GuardScope<'g>),
    /// The record is already being rendered further up the stack.
    Cycle,
    /// The configured depth limit is reached.
    TooDeep,
}

impl InspectGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_depth_limit(depth_limit: Option<NonZeroUsize>) -> Self {
        Self {
            active: Vec::new(),
            depth_limit,
        }
    }

    #[inline]
    pub fn is_active(&self, id: RecordId) -> bool {
        self.active.contains(&id)
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn enter(&mut self, id: RecordId) -> Enter<'_> {
        if self.is_active(id) {
            return Enter::Cycle;
        }
        if let Some(limit) = self.depth_limit {
            if self.active.len() >= limit.get() {
                return Enter::TooDeep;
            }
        }
        self.active.push(id);
        Enter::Entered(GuardScope { guard: self, id })
    }
}

/// Keeps one record on the guard for as long as it lives.
pub struct GuardScope<'g> {
    guard: &'g mut InspectGuard,
    id: RecordId,
}

impl Deref for GuardScope<'_> {
    type Target = InspectGuard;

    fn deref(&self) -> &InspectGuard {
        self.guard
    }
}

impl DerefMut for GuardScope<'_> {
    fn deref_mut(&mut self) -> &mut InspectGuard {
        self.guard
    }
}

impl Drop for GuardScope<'_> {
    fn drop(&mut self) {
        let popped = self.guard.active.pop();
        debug_assert_eq!(popped, Some(self.id), "inspect guard unwound out of order");
    }
}

// ─── Record rendering ───────────────────────────────────────────────────────

impl DynamicRecord {
    /// Render as `<TypeName a=1, b="x">`.
    ///
    /// A record already being rendered further up renders as
    /// `<TypeName ...>`; a record without fields as `<TypeName>`.
    pub fn inspect(&self) -> Result<String, RecordError> {
        let mut guard = InspectGuard::with_depth_limit(self.config().inspect_depth_limit);
        self.inspect_with(&mut guard)
    }

    /// Render with a caller-owned guard, e.g. from inside a host value's
    /// [`Inspect`] impl.
    pub fn inspect_with(&self, guard: &mut InspectGuard) -> Result<String, RecordError> {
        let mut out = String::new();
        self.inspect_fmt(&mut out, guard).map_err(|_| {
            RecordError::Inspect(format!("a field of <{}> failed to render", self.type_name()))
        })?;
        Ok(out)
    }

    pub fn inspect_fmt(&self, f: &mut dyn Write, guard: &mut InspectGuard) -> fmt::Result {
        let inner = self.inner.borrow();
        let type_name = &inner.config.type_name;

        let mut scope = match guard.enter(self.id()) {
            Enter::Entered(scope) => scope,
            Enter::Cycle => {
                trace!(record = ?self.id(), type_name = %type_name, "cycle while inspecting");
                return write!(f, "<{} ...>", type_name);
            }
            Enter::TooDeep => return write!(f, "<{} ...>", type_name),
        };

        if inner.fields.is_empty() {
            return write!(f, "<{}>", type_name);
        }

        write!(f, "<{}", type_name)?;
        let mut first = true;
        for (key, value) in &inner.fields {
            f.write_str(if first { " " } else { ", " })?;
            first = false;
            write!(f, "{}=", key)?;
            value.inspect_fmt(f, &mut scope)?;
        }
        f.write_char('>')
    }
}

impl fmt::Display for DynamicRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut guard = InspectGuard::with_depth_limit(self.config().inspect_depth_limit);
        self.inspect_fmt(f, &mut guard)
    }
}

impl fmt::Debug for DynamicRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

// ─── Value rendering ────────────────────────────────────────────────────────

impl SpookyValue {
    pub fn inspect(&self) -> Result<String, RecordError> {
        let mut out = String::new();
        self.inspect_fmt(&mut out, &mut InspectGuard::new())
            .map_err(|_| RecordError::Inspect(format!("{} value failed to render", self.kind())))?;
        Ok(out)
    }

    pub fn inspect_fmt(&self, f: &mut dyn Write, guard: &mut InspectGuard) -> fmt::Result {
        match self {
            SpookyValue::Null => f.write_str("nil"),
            SpookyValue::Bool(b) => write!(f, "{}", b),
            SpookyValue::Number(n) => write!(f, "{}", n),
            SpookyValue::Str(s) => write!(f, "{:?}", s.as_str()),
            SpookyValue::Array(arr) => {
                f.write_char('[')?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.inspect_fmt(f, guard)?;
                }
                f.write_char(']')
            }
            SpookyValue::Object(map) => {
                if map.is_empty() {
                    return f.write_str("{}");
                }
                f.write_char('{')?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?} => ", key.as_str())?;
                    value.inspect_fmt(f, guard)?;
                }
                f.write_char('}')
            }
            SpookyValue::Record(record) => record.inspect_fmt(f, guard),
            SpookyValue::Opaque(host) => host.inspect_fmt(f, guard),
        }
    }
}
