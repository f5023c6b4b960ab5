/// Property-style accessors over [`DynamicRecord::get`](crate::DynamicRecord::get)
/// and [`DynamicRecord::set`](crate::DynamicRecord::set).
///
/// Declares an extension trait for `DynamicRecord` with one reader/writer
/// pair per listed field. Readers fail with `UndefinedField` until the field
/// exists; writers upsert. Field names are the reader identifiers, so only
/// identifier-safe names can be declared here; everything else goes through
/// `get`/`set`/`invoke`. Inherent `DynamicRecord` methods (`len`, `get`, ...)
/// shadow readers of the same name.
///
/// ```
/// use spooky_dyn_record::{record_accessors, DynamicRecord};
///
/// record_accessors! {
///     pub trait PersonFields {
///         name / set_name,
///         age / set_age,
///     }
/// }
///
/// let person = DynamicRecord::new();
/// person.set_name("Alice");
/// assert_eq!(person.name().unwrap().as_str(), Some("Alice"));
/// assert!(person.age().is_err());
/// ```
#[macro_export]
macro_rules! record_accessors {
    (
        $(#[$meta:meta])*
        $vis:vis trait $trait_name:ident {
            $($getter:ident / $setter:ident),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis trait $trait_name {
            $(
                fn $getter(&self) -> ::core::result::Result<$crate::SpookyValue, $crate::RecordError>;
                fn $setter(&self, value: impl ::core::convert::Into<$crate::SpookyValue>) -> $crate::SpookyValue;
            )*
        }

        impl $trait_name for $crate::DynamicRecord {
            $(
                fn $getter(&self) -> ::core::result::Result<$crate::SpookyValue, $crate::RecordError> {
                    self.get(stringify!($getter))
                }

                fn $setter(&self, value: impl ::core::convert::Into<$crate::SpookyValue>) -> $crate::SpookyValue {
                    self.set(stringify!($getter), value)
                }
            )*
        }
    };
}
