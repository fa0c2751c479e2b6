//! Generated object identifiers.
//!
//! Identifiers look like `lcdata_<session>_<count>`: `<session>` is six random
//! lowercase letters fixed for the lifetime of a generator and `<count>` is a
//! zero-padded, seven digit counter starting at zero. Separate runs get
//! different sessions, so identifiers from different runs do not collide.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use lcdata_model::Value;
use rand::Rng;

const PREFIX: &str = "lcdata";
const SESSION_LENGTH: usize = 6;

/// Produces unique, readable object identifiers.
#[derive(Debug)]
pub struct ObjectIdGenerator {
    session: String,
    count: AtomicU64,
}

impl ObjectIdGenerator {
    /// Create a generator with a fresh random session.
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let session = (0..SESSION_LENGTH)
            .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
            .collect::<String>();
        Self::with_session(session)
    }

    /// Create a generator with a fixed session string.
    pub fn with_session(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            count: AtomicU64::new(0),
        }
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    /// Return the next identifier.
    pub fn next_id(&self) -> String {
        let count = self.count.fetch_add(1, Ordering::Relaxed);
        format!("{PREFIX}_{}_{count:07}", self.session)
    }
}

impl Default for ObjectIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

static SESSION_GENERATOR: OnceLock<ObjectIdGenerator> = OnceLock::new();

/// Generate an object identifier from the process-wide session generator.
pub fn generate_object_id() -> Value {
    Value::Str(
        SESSION_GENERATOR
            .get_or_init(ObjectIdGenerator::new)
            .next_id(),
    )
}
