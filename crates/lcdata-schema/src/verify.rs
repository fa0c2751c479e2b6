//! Schema consistency checks.

use lcdata_model::{Schema, SchemaError};

use crate::alias::{find_alias, normalize_name};

/// Entries every well-formed key spec declares: dtype, aliases, and one
/// presence policy.
const KEY_SPEC_ENTRIES: usize = 3;

/// Verify a schema, returning the first problem found.
///
/// Keys are checked in order. For each key the dtype and aliases must be
/// declared, the key itself must resolve through its aliases, every alias must
/// already be normalized, and exactly one of `required`, `default`, or
/// `default_function` must be set.
pub fn verify_schema(schema: &Schema) -> Result<(), SchemaError> {
    for key in schema.iter() {
        let name = key.name.as_str();
        let spec = &key.spec;

        if spec.dtype.is_none() {
            return Err(SchemaError::MissingDtype {
                key: name.to_string(),
            });
        }

        let Some(aliases) = spec.aliases.as_deref() else {
            return Err(SchemaError::MissingAliases {
                key: name.to_string(),
            });
        };

        if find_alias(&[name], aliases).is_none() {
            return Err(SchemaError::SelfAliasMismatch {
                key: name.to_string(),
                aliases: aliases.to_vec(),
            });
        }

        for alias in aliases {
            let expected = normalize_name(alias);
            if &expected != alias {
                return Err(SchemaError::UnnormalizedAlias {
                    key: name.to_string(),
                    alias: alias.clone(),
                    expected,
                });
            }
        }

        if !spec.has_presence() {
            return Err(SchemaError::MissingPresence {
                key: name.to_string(),
            });
        }

        if spec.entry_count() != KEY_SPEC_ENTRIES {
            return Err(SchemaError::ExtraEntries {
                key: name.to_string(),
            });
        }
    }

    Ok(())
}
