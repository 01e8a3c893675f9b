//! Shared helpers for working with `figment::Jail` in tests.
//!
//! A jail runs its closure in a fresh temporary working directory and
//! restores every environment variable it touched afterwards. Jails are
//! serialised process-wide, so tests using them never observe each other's
//! files or variables.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The closure may fail with any error convertible to [`anyhow::Error`]; the
/// jail is torn down either way.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> Result<T>,
{
    let mut result = None;
    figment::Jail::try_with(|jail| {
        result = Some(f(jail).map_err(figment_error)?);
        Ok(())
    })
    .map_err(|err| anyhow!("jailed test failed: {err}"))?;
    result.ok_or_else(|| anyhow!("jail closure produced no value"))
}

/// Wrap an arbitrary error's message as a [`figment::Error`] so it can
/// leave a jail closure through `?`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used as a map_err adapter, which passes errors by value"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
