//! Value adapter: human-readable renderings of engine values and type tags

use sheetglue_core::{Value, ValueType};
use std::fmt;

/// Render a value the way a cell would display it
///
/// Delegates to [`Value::stringify`], so the value's number format applies.
/// Never fails: if the format cannot be applied the plain string is used.
pub fn render_value(value: &Value) -> String {
    match value.stringify() {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(
                "stringify failed for {} value: {e}; using plain form",
                render_type_tag(value.type_of())
            );
            value.peek_string()
        }
    }
}

/// Render a value for diagnostics as `<TYPE>:<plain string>`
///
/// ```
/// use sheetglue::render_value_debug;
/// use sheetglue_core::Value;
///
/// assert_eq!(render_value_debug(&Value::int(42)), "INTEGER:42");
/// assert_eq!(render_value_debug(&Value::empty()), "EMPTY:");
/// ```
pub fn render_value_debug(value: &Value) -> String {
    format!(
        "{}:{}",
        render_type_tag(value.type_of()),
        value.peek_string()
    )
}

/// Short name of a type tag (`VALUE_INTEGER` -> `INTEGER`)
pub fn render_type_tag(tag: ValueType) -> &'static str {
    strip_type_prefix(tag.value_name(), ValueType::PREFIX)
}

/// Strip one leading `prefix` from a full tag identifier
///
/// Identifiers without the prefix are returned unchanged.
pub fn strip_type_prefix<'a>(name: &'a str, prefix: &str) -> &'a str {
    name.strip_prefix(prefix).unwrap_or(name)
}

/// [`fmt::Display`] adapter for [`render_value`]
#[derive(Debug, Clone, Copy)]
pub struct DisplayValue<'a>(pub &'a Value);

impl fmt::Display for DisplayValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_value(self.0))
    }
}

/// [`fmt::Display`] adapter for [`render_value_debug`]
#[derive(Debug, Clone, Copy)]
pub struct DebugValue<'a>(pub &'a Value);

impl fmt::Display for DebugValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_value_debug(self.0))
    }
}

/// [`fmt::Display`] adapter for [`render_type_tag`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag(pub ValueType);

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(render_type_tag(self.0))
    }
}

/// Extension trait adding the renderings to [`Value`]
pub trait ValueExt {
    /// Display rendering, see [`render_value`]
    fn display(&self) -> DisplayValue<'_>;

    /// Diagnostic rendering, see [`render_value_debug`]
    fn debug_tagged(&self) -> DebugValue<'_>;

    /// Short type tag, see [`render_type_tag`]
    fn type_tag(&self) -> TypeTag;
}

impl ValueExt for Value {
    fn display(&self) -> DisplayValue<'_> {
        DisplayValue(self)
    }

    fn debug_tagged(&self) -> DebugValue<'_> {
        DebugValue(self)
    }

    fn type_tag(&self) -> TypeTag {
        TypeTag(self.type_of())
    }
}
