//! Schema definitions.
//!
//! A [`Schema`] is an ordered list of keys. Each key carries a [`KeySpec`]
//! describing the target dtype, the accepted column-name aliases, and a
//! presence policy: required, a fixed default, or a default generator.
//!
//! `KeySpec` keeps every entry optional so that a malformed definition can
//! still be expressed and rejected by the validator. Well-formed specs are
//! built with [`KeySpec::required`], [`KeySpec::with_default`], or
//! [`KeySpec::generated`].

use std::fmt;
use std::sync::Arc;

use crate::dtype::DType;
use crate::value::Value;

/// Zero-argument generator producing a fresh default value per call.
///
/// Generators may keep internal state (a counter, a random source) and are
/// responsible for their own synchronization.
#[derive(Clone)]
pub struct DefaultFn(Arc<dyn Fn() -> Value + Send + Sync>);

impl DefaultFn {
    pub fn new(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invoke the generator once.
    pub fn call(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for DefaultFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultFn(..)")
    }
}

/// Typed view of how a key obtains its value when it is absent.
#[derive(Debug, Clone, Copy)]
pub enum Presence<'a> {
    /// No default, the key must come from the input.
    Required,
    /// A fixed scalar reused for every missing cell.
    Fixed(&'a Value),
    /// A generator invoked once per missing cell.
    Generated(&'a DefaultFn),
}

/// Specification of a single schema key.
#[derive(Debug, Clone, Default)]
pub struct KeySpec {
    pub dtype: Option<DType>,
    /// Normalized column-name aliases in priority order.
    pub aliases: Option<Vec<String>>,
    pub required: Option<bool>,
    pub default: Option<Value>,
    pub default_function: Option<DefaultFn>,
}

fn collect_aliases<I, S>(aliases: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    aliases.into_iter().map(Into::into).collect()
}

impl KeySpec {
    /// A key that must be present in the input.
    pub fn required<I, S>(dtype: DType, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dtype: Some(dtype),
            aliases: Some(collect_aliases(aliases)),
            required: Some(true),
            ..Self::default()
        }
    }

    /// A key filled with a fixed value when absent.
    pub fn with_default<I, S>(dtype: DType, aliases: I, default: impl Into<Value>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dtype: Some(dtype),
            aliases: Some(collect_aliases(aliases)),
            default: Some(default.into()),
            ..Self::default()
        }
    }

    /// A key filled by calling `generator` once per missing cell.
    pub fn generated<I, S>(
        dtype: DType,
        aliases: I,
        generator: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dtype: Some(dtype),
            aliases: Some(collect_aliases(aliases)),
            default_function: Some(DefaultFn::new(generator)),
            ..Self::default()
        }
    }

    pub fn with_dtype(mut self, dtype: DType) -> Self {
        self.dtype = Some(dtype);
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = Some(collect_aliases(aliases));
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_default_function(
        mut self,
        generator: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        self.default_function = Some(DefaultFn::new(generator));
        self
    }

    /// Aliases as a slice; empty when none are declared.
    pub fn alias_list(&self) -> &[String] {
        self.aliases.as_deref().unwrap_or(&[])
    }

    /// Number of declared entries.
    pub fn entry_count(&self) -> usize {
        usize::from(self.dtype.is_some())
            + usize::from(self.aliases.is_some())
            + usize::from(self.required.is_some())
            + usize::from(self.default.is_some())
            + usize::from(self.default_function.is_some())
    }

    /// Returns true when any presence entry is declared, including
    /// `required: false`.
    pub fn has_presence(&self) -> bool {
        self.required.is_some() || self.default.is_some() || self.default_function.is_some()
    }

    /// Resolves the presence policy. `required: true` wins over any default;
    /// `None` means the spec declares neither a requirement nor a default.
    pub fn presence(&self) -> Option<Presence<'_>> {
        if self.required == Some(true) {
            return Some(Presence::Required);
        }
        if let Some(value) = &self.default {
            return Some(Presence::Fixed(value));
        }
        self.default_function.as_ref().map(Presence::Generated)
    }
}

/// A named key and its specification.
#[derive(Debug, Clone)]
pub struct SchemaKey {
    pub name: String,
    pub spec: KeySpec,
}

/// Ordered mapping from canonical column name to [`KeySpec`].
#[derive(Debug, Clone, Default)]
pub struct Schema {
    keys: Vec<SchemaKey>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Schema::insert`].
    pub fn with_key(mut self, name: impl Into<String>, spec: KeySpec) -> Self {
        self.insert(name, spec);
        self
    }

    /// Append a key, or replace the spec of an existing key in place.
    pub fn insert(&mut self, name: impl Into<String>, spec: KeySpec) {
        let name = name.into();
        match self.keys.iter_mut().find(|k| k.name == name) {
            Some(existing) => existing.spec = spec,
            None => self.keys.push(SchemaKey { name, spec }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&KeySpec> {
        self.keys.iter().find(|k| k.name == key).map(|k| &k.spec)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(|k| k.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaKey> + '_ {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
