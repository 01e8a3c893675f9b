//! Storage tier descriptors.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

use super::redacted;

/// One storage tier.
///
/// ```text
/// s3://key:secret@localhost:8181/bucket/prefix   object-store layer
/// file:///data/folder/path                       filesystem layer
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Layer {
    /// Name of the layer.
    pub name: String,
    /// Backing store of the layer.
    #[serde(rename = "type")]
    pub kind: LayerKind,
    /// `true` when the layer is shared by every writer rather than local to
    /// one.
    pub global: bool,
    /// Scheme-qualified location of the layer.
    pub url: String,
    /// How long data stays before moving to the next layer. Zero means no
    /// limit.
    #[serde(serialize_with = "crate::duration::serialize")]
    pub ttl: Duration,
    /// Credentials for object-store layers.
    pub auth: LayerAuth,
}

impl Layer {
    /// Name given to the layer installed when no layers are configured.
    pub const FALLBACK_NAME: &'static str = "default";

    /// The single global filesystem layer rooted at `root`.
    #[must_use]
    pub fn fallback(root: &str) -> Self {
        Self {
            name: Self::FALLBACK_NAME.to_owned(),
            kind: LayerKind::Filesystem,
            global: true,
            url: root.to_owned(),
            ..Self::default()
        }
    }

    /// Retention limit of the layer, or `None` when data is kept forever.
    #[must_use]
    pub const fn ttl_limit(&self) -> Option<Duration> {
        if self.ttl.is_zero() {
            None
        } else {
            Some(self.ttl)
        }
    }
}

/// Backing store of a [`Layer`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum LayerKind {
    /// No type was given.
    #[default]
    Unspecified,
    /// Local or mounted filesystem (`fs`).
    Filesystem,
    /// S3-compatible object store (`s3`).
    ObjectStore,
    /// Any other type name, kept verbatim for the consumer to interpret.
    Other(String),
}

impl LayerKind {
    /// Classify a type name as written in a file or environment variable.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" => Self::Unspecified,
            "fs" | "file" | "filesystem" => Self::Filesystem,
            "s3" | "object-store" => Self::ObjectStore,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Canonical text form of the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unspecified => "",
            Self::Filesystem => "fs",
            Self::ObjectStore => "s3",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LayerKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Credentials for an object-store layer.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayerAuth {
    /// Access key.
    pub key: String,
    /// Secret key. Excluded from `Debug` output and serialized dumps.
    #[serde(skip_serializing)]
    pub secret: String,
}

impl fmt::Debug for LayerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerAuth")
            .field("key", &self.key)
            .field("secret", &redacted(&self.secret))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Layer, LayerAuth, LayerKind};
    use rstest::rstest;
    use std::time::Duration;

    #[rstest]
    #[case("fs", LayerKind::Filesystem)]
    #[case("filesystem", LayerKind::Filesystem)]
    #[case("s3", LayerKind::ObjectStore)]
    #[case("", LayerKind::Unspecified)]
    #[case("gcs", LayerKind::Other("gcs".to_owned()))]
    fn classifies_layer_types(#[case] raw: &str, #[case] expected: LayerKind) {
        assert_eq!(LayerKind::parse(raw), expected);
    }

    #[rstest]
    fn fallback_layer_is_global_filesystem() {
        let layer = Layer::fallback("/var/lib/gigapi");
        assert_eq!(layer.name, "default");
        assert_eq!(layer.kind, LayerKind::Filesystem);
        assert!(layer.global);
        assert_eq!(layer.url, "/var/lib/gigapi");
        assert_eq!(layer.ttl_limit(), None);
    }

    #[rstest]
    fn ttl_limit_reports_nonzero_ttl() {
        let layer = Layer {
            ttl: Duration::from_secs(600),
            ..Layer::default()
        };
        assert_eq!(layer.ttl_limit(), Some(Duration::from_secs(600)));
    }

    #[rstest]
    fn debug_hides_secret() {
        let auth = LayerAuth {
            key: "AKIA".to_owned(),
            secret: "hunter2".to_owned(),
        };
        let rendered = format!("{auth:?}");
        assert!(rendered.contains("AKIA"));
        assert!(!rendered.contains("hunter2"));
    }
}
