//! Default values for missing or masked keys.

use std::fmt;

use lcdata_model::{Presence, Schema, SchemaError, Value};

use crate::error::DefaultValueError;

/// A resolved default: one value, or one value per requested slot.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// A single value, broadcast by the caller where needed.
    Scalar(Value),
    /// Independently generated values, one per slot.
    Sequence(Vec<Value>),
}

impl DefaultValue {
    /// Number of values carried; a scalar counts as one.
    pub fn len(&self) -> usize {
        match self {
            DefaultValue::Scalar(_) => 1,
            DefaultValue::Sequence(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Scalar(value) => write!(f, "{value}"),
            DefaultValue::Sequence(values) => match values.first() {
                Some(first) if values.len() > 1 => {
                    write!(f, "[{first}, ... ({} values)]", values.len())
                }
                Some(first) => write!(f, "[{first}]"),
                None => f.write_str("[]"),
            },
        }
    }
}

/// Get the default value for `key`.
///
/// - Required keys always fail with [`DefaultValueError::MissingRequiredKey`].
/// - Fixed defaults are returned as a [`DefaultValue::Scalar`]; `count` is
///   ignored.
/// - Generated defaults call the generator once when `count` is `None`, and
///   `count` times (in order) otherwise.
pub fn get_default_value(
    schema: &Schema,
    key: &str,
    count: Option<usize>,
) -> Result<DefaultValue, DefaultValueError> {
    let spec = schema.get(key).ok_or_else(|| SchemaError::UnknownKey {
        key: key.to_string(),
    })?;

    match spec.presence() {
        Some(Presence::Required) => Err(DefaultValueError::MissingRequiredKey {
            key: key.to_string(),
        }),
        Some(Presence::Fixed(value)) => Ok(DefaultValue::Scalar(value.clone())),
        Some(Presence::Generated(generator)) => Ok(match count {
            None => DefaultValue::Scalar(generator.call()),
            Some(count) => DefaultValue::Sequence((0..count).map(|_| generator.call()).collect()),
        }),
        None => Err(SchemaError::NoDefault {
            key: key.to_string(),
        }
        .into()),
    }
}
