//! Configuration resolution for the GigAPI service.
//!
//! A single typed [`Config`] tree is resolved from an optional structured
//! file and the process environment. Environment values win over file
//! values, declared defaults fill whatever neither source supplied, and the
//! storage [`Layer`] list is rebuilt from contiguous
//! `GIGAPI_LAYERS_<index>_<FIELD>` variable groups.
//!
//! ```rust,no_run
//! # fn main() -> gigapi_config::ConfigResult<()> {
//! let store = gigapi_config::init_config("")?;
//! let root = &store.gigapi.root;
//! # let _ = root;
//! # Ok(())
//! # }
//! ```
//!
//! The pipeline stages are exposed individually so hosts and tests can run
//! them in isolation: [`source`] loads raw values, [`bind`] coerces them onto
//! the [`schema`] table, [`defaults`] fills the gaps, [`layers`] rebuilds
//! the layer list and [`ConfigStore`] freezes the result.

pub mod bind;
pub mod defaults;
mod diagnostics;
pub mod duration;
mod error;
pub mod layers;
mod model;
mod provenance;
mod resolve;
pub mod schema;
pub mod source;
mod store;

pub use diagnostics::ResolutionWarning;
pub use error::{ConfigError, ConfigResult};
pub use model::{
    BasicAuth, Config, FlightSqlConfig, GigapiConfig, HttpConfig, Layer, LayerAuth, LayerKind,
    MetadataConfig,
};
pub use provenance::{Provenance, Source};
pub use resolve::{Resolver, init_config, resolve};
pub use store::ConfigStore;

/// Namespace token shared by the service's own environment variables.
pub const ENV_NAMESPACE: &str = "GIGAPI";
