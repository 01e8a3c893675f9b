//! Tracks which source supplied each resolved value.

use std::collections::BTreeMap;
use std::fmt;

/// Origin of a resolved value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[non_exhaustive]
pub enum Source {
    /// Declared default from the schema table.
    Default,
    /// The configuration file.
    File,
    /// An environment variable.
    Environment,
    /// Installed by the resolver itself, such as the fallback layer.
    Synthetic,
}

impl Source {
    /// Returns `true` when the value came from a user-controlled source.
    #[must_use]
    pub const fn is_explicit(self) -> bool {
        matches!(self, Self::File | Self::Environment)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::File => "file",
            Self::Environment => "environment",
            Self::Synthetic => "synthetic",
        })
    }
}

/// Per-field and per-layer record of value origins.
///
/// Fields are keyed by their dotted schema key (`http.port`). Layers are
/// tracked as a whole since an environment entry replaces a file entry at
/// the same index wholesale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Provenance {
    fields: BTreeMap<&'static str, Source>,
    layers: Vec<Source>,
}

impl Provenance {
    /// Source of the field at `key`, if the field has been resolved.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<Source> {
        self.fields.get(key).copied()
    }

    /// Source of the layer at `index`.
    #[must_use]
    pub fn layer(&self, index: usize) -> Option<Source> {
        self.layers.get(index).copied()
    }

    /// Iterate over every recorded field in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Source)> + '_ {
        self.fields.iter().map(|(key, source)| (*key, *source))
    }

    /// Returns `true` when `key` was supplied by the file or environment.
    #[must_use]
    pub fn is_explicit(&self, key: &str) -> bool {
        self.field(key).is_some_and(Source::is_explicit)
    }

    pub(crate) fn record_field(&mut self, key: &'static str, source: Source) {
        self.fields.insert(key, source);
    }

    /// Record the source of layer `index`, replacing an earlier entry at the
    /// same position or appending a new one.
    pub(crate) fn record_layer(&mut self, index: usize, source: Source) {
        match self.layers.get_mut(index) {
            Some(slot) => *slot = source,
            None => self.layers.push(source),
        }
    }
}
