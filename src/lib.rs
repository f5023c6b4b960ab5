//! Dynamically extensible key/value records.
//!
//! A [`DynamicRecord`] is an ordered mapping from field names to
//! [`SpookyValue`]s whose fields can be added, read, written and removed at
//! runtime. Records compare by field contents, dump to and load from plain
//! mappings (and JSON/CBOR), and render themselves safely even when they
//! contain themselves.
//!
//! ```
//! use spooky_dyn_record::{DynamicRecord, RecordError, SpookyValue};
//!
//! let person = DynamicRecord::new();
//! person.set("name", "Alice");
//! person.set("age", 30i64);
//! person.set("friend", &person);
//!
//! assert_eq!(
//!     person.inspect().unwrap(),
//!     r#"<DynamicRecord name="Alice", age=30, friend=<DynamicRecord ...>>"#
//! );
//! assert_eq!(
//!     person.get("email"),
//!     Err(RecordError::UndefinedField("email".into()))
//! );
//! # person.delete_field("friend").unwrap();
//! ```

pub mod accessors;
pub mod deserialization;
pub mod dyn_record;
pub mod equality;
pub mod error;
pub mod inspect;
pub mod serialization;
pub mod spooky_value;
pub mod types;

pub use dyn_record::DynamicRecord;
pub use equality::FieldView;
pub use error::RecordError;
pub use inspect::{Enter, GuardScope, Inspect, InspectGuard};
pub use spooky_value::{SpookyNumber, SpookyValue};
pub use types::{FieldMap, FieldName, RecordConfig, RecordId};
