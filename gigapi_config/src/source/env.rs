//! Snapshot of the process environment.

use std::collections::BTreeMap;
use std::fmt;

use figment::providers::Env;

/// Environment variables captured once at the start of resolution.
///
/// Names are kept exactly as the process provides them and looked up
/// case-sensitively. Empty values are dropped on capture, so a variable set
/// to the empty string reads as unset.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    #[must_use]
    pub fn capture() -> Self {
        Env::raw()
            .lowercase(false)
            .iter()
            .map(|(name, value)| (name.as_str().to_owned(), value))
            .collect()
    }

    /// Value of the variable `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Number of captured variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` when no variables were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .filter(|(_, value): &(String, String)| !value.is_empty())
            .collect();
        Self { vars }
    }
}

// Values are withheld: the environment routinely carries credentials.
impl fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvSnapshot")
            .field("vars", &self.vars.len())
            .finish()
    }
}
