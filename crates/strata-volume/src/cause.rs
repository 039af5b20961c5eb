//! Provenance token threaded through every mutation.

use std::borrow::Cow;
use std::fmt;

/// Opaque record of who or what initiated a mutation.
///
/// Volumes never inspect it; they hand it to the host unchanged so that the
/// ordering and origin of writes stay under the caller's control.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cause {
    name: Cow<'static, str>,
}

impl Cause {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }

    /// Cause attached to writes the storage layer performs on its own
    /// behalf, such as filling an archetype backing buffer.
    pub fn implementation() -> Self {
        Self::new("strata")
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
