use super::record::DynamicRecord;
use crate::error::RecordError;
use crate::spooky_value::SpookyValue;
use crate::types::FieldName;

impl DynamicRecord {
    // ════════════════════════════════════════════════════════════════════════
    // By-name dispatch
    // ════════════════════════════════════════════════════════════════════════

    /// Invoke an accessor by name: `"x"` reads field `x`, `"x="` writes it.
    ///
    /// - A writer takes exactly one argument, otherwise
    ///   `InvalidArgumentCount`. It upserts, so it works before the field
    ///   exists, and returns the stored value.
    /// - A reader of an absent field is `UndefinedField`, with or without
    ///   arguments. A reader of a present field takes none, otherwise
    ///   `InvalidArgumentCount`.
    ///
    /// This is the path for names that are not identifiers (`"first name"`,
    /// `"e-mail="`), which property-style sugar cannot spell.
    pub fn invoke(&self, accessor: &str, args: &[SpookyValue]) -> Result<SpookyValue, RecordError> {
        if let Some(name) = accessor.strip_suffix('=') {
            return match args {
                [value] => Ok(self.set(name, value.clone())),
                _ => Err(RecordError::InvalidArgumentCount {
                    expected: 1,
                    actual: args.len(),
                }),
            };
        }

        if args.is_empty() {
            return self.get(accessor);
        }
        if self.has_field(accessor) {
            Err(RecordError::InvalidArgumentCount {
                expected: 0,
                actual: args.len(),
            })
        } else {
            Err(RecordError::UndefinedField(FieldName::from(accessor)))
        }
    }

    /// Whether the accessor `"x"` / `"x="` is installed, i.e. field `x` is
    /// present. An empty record responds to nothing.
    pub fn responds_to(&self, accessor: &str) -> bool {
        let name = accessor.strip_suffix('=').unwrap_or(accessor);
        self.has_field(name)
    }
}
