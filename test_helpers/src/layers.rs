//! Builders for indexed layer environment variables.
//!
//! ```
//! use gigapi_config_test_helpers::{LayerVars, layer_var};
//!
//! let vars = LayerVars::new(0, "hot").kind("fs").url("file:///data").into_vars();
//! assert!(vars.contains(&(layer_var(0, "URL"), "file:///data".to_owned())));
//! ```

/// Name of the variable holding `field` of layer `index`.
#[must_use]
pub fn layer_var(index: usize, field: &str) -> String {
    format!("GIGAPI_LAYERS_{index}_{field}")
}

/// Variable group describing one layer.
#[derive(Clone, Debug)]
pub struct LayerVars {
    index: usize,
    vars: Vec<(String, String)>,
}

impl LayerVars {
    /// A group for layer `index` carrying only its name.
    #[must_use]
    pub fn new(index: usize, name: &str) -> Self {
        Self {
            index,
            vars: vec![(layer_var(index, "NAME"), name.to_owned())],
        }
    }

    /// Add an arbitrary field such as `AUTH_KEY`.
    #[must_use]
    pub fn field(mut self, field: &str, value: &str) -> Self {
        self.vars.push((layer_var(self.index, field), value.to_owned()));
        self
    }

    /// Set `TYPE`.
    #[must_use]
    pub fn kind(self, value: &str) -> Self {
        self.field("TYPE", value)
    }

    /// Set `URL`.
    #[must_use]
    pub fn url(self, value: &str) -> Self {
        self.field("URL", value)
    }

    /// Set `GLOBAL`.
    #[must_use]
    pub fn global(self, value: bool) -> Self {
        self.field("GLOBAL", if value { "true" } else { "false" })
    }

    /// Set `TTL`.
    #[must_use]
    pub fn ttl(self, value: &str) -> Self {
        self.field("TTL", value)
    }

    /// The `(name, value)` pairs, ready to collect into a snapshot.
    #[must_use]
    pub fn into_vars(self) -> Vec<(String, String)> {
        self.vars
    }

    /// Export the group into `jail`'s environment.
    pub fn apply(&self, jail: &mut figment::Jail) {
        for (name, value) in &self.vars {
            jail.set_env(name, value);
        }
    }
}
