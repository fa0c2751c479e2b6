use thiserror::Error;

/// A schema definition that is internally inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("invalid schema: key '{key}' missing dtype")]
    MissingDtype { key: String },

    #[error("invalid schema: key '{key}' missing aliases")]
    MissingAliases { key: String },

    #[error("invalid schema: key '{key}' doesn't match aliases {aliases:?}")]
    SelfAliasMismatch { key: String, aliases: Vec<String> },

    #[error("invalid schema: alias '{alias}' for key '{key}' should be '{expected}'")]
    UnnormalizedAlias {
        key: String,
        alias: String,
        expected: String,
    },

    #[error(
        "invalid schema: must specify one of [required, default, default_function] for key '{key}'"
    )]
    MissingPresence { key: String },

    #[error("invalid schema: extra entries found for key '{key}'")]
    ExtraEntries { key: String },

    #[error("invalid schema: key '{key}' not required and no default value")]
    NoDefault { key: String },

    #[error("key '{key}' is not part of the schema")]
    UnknownKey { key: String },
}
