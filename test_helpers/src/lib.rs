//! Test helpers shared across the workspace.
//!
//! [`jail`] wraps [`figment::Jail`] for tests that write configuration files
//! or set process environment variables. [`layers`] writes the indexed
//! `GIGAPI_LAYERS_<index>_<FIELD>` variable groups.

pub mod jail;
pub mod layers;

pub use jail::{figment_error, with_jail};
pub use layers::{LayerVars, layer_var};
