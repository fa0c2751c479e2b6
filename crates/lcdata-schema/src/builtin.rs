//! Built-in schemas for light curve observations and per-object metadata.
//!
//! Both schemas are built once on first access and shared for the life of the
//! process. [`verify_builtin_schemas`] checks them and is meant to run as a
//! startup self-check.

use std::sync::OnceLock;

use lcdata_model::{DType, KeySpec, Schema, SchemaError};

use crate::object_id::generate_object_id;
use crate::verify::verify_schema;

static LIGHT_CURVE_SCHEMA: OnceLock<Schema> = OnceLock::new();
static METADATA_SCHEMA: OnceLock<Schema> = OnceLock::new();

/// Schema of a single light curve: one row per observation.
pub fn light_curve_schema() -> &'static Schema {
    LIGHT_CURVE_SCHEMA.get_or_init(build_light_curve_schema)
}

/// Schema of the metadata table: one row per object.
pub fn metadata_schema() -> &'static Schema {
    METADATA_SCHEMA.get_or_init(build_metadata_schema)
}

/// Verify both built-in schemas.
pub fn verify_builtin_schemas() -> Result<(), SchemaError> {
    verify_schema(light_curve_schema())?;
    verify_schema(metadata_schema())
}

fn build_light_curve_schema() -> Schema {
    Schema::new()
        .with_key(
            "time",
            KeySpec::required(DType::Float64, ["time", "date", "jd", "mjd", "mjdobs"]),
        )
        .with_key(
            "flux",
            KeySpec::required(DType::Float32, ["flux", "f", "fluxcal"]),
        )
        .with_key(
            "fluxerr",
            KeySpec::required(
                DType::Float32,
                ["fluxerr", "fluxerror", "fe", "fluxcalerr", "fluxcalerror"],
            ),
        )
        .with_key(
            "band",
            KeySpec::required(
                DType::Bytes,
                ["band", "bandpass", "passband", "filter", "flt"],
            ),
        )
}

fn build_metadata_schema() -> Schema {
    Schema::new()
        .with_key(
            "object_id",
            KeySpec::generated(DType::Str, ["objectid", "id"], generate_object_id),
        )
        .with_key(
            "ra",
            KeySpec::with_default(
                DType::Float64,
                [
                    "ra",
                    "rightascension",
                    "hostra",
                    "hostrightascension",
                    "hostgalra",
                    "hostgalrightascension",
                ],
                f64::NAN,
            ),
        )
        .with_key(
            "dec",
            KeySpec::with_default(
                DType::Float64,
                [
                    "dec",
                    "decl",
                    "declination",
                    "hostdec",
                    "hostdecl",
                    "hostdeclination",
                    "hostgaldec",
                    "hostgaldecl",
                    "hostgaldeclination",
                ],
                f64::NAN,
            ),
        )
        .with_key(
            "type",
            KeySpec::with_default(
                DType::Str,
                [
                    "type",
                    "label",
                    "class",
                    "classification",
                    "truetarget",
                    "target",
                ],
                "Unknown",
            ),
        )
        .with_key(
            "redshift",
            KeySpec::with_default(
                DType::Float64,
                [
                    "redshift",
                    "z",
                    "truez",
                    "hostz",
                    "hostspecz",
                    "hostgalz",
                    "hostgalspecz",
                ],
                f64::NAN,
            ),
        )
}
