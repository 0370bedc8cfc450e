use std::str::FromStr;

use error_stack::{Context, Report, ResultExt};

use crate::error::DriverError;

pub mod database;
pub mod error;

pub(crate) fn env(key: &str) -> Result<String, Report<DriverError>> {
    dotenvy::var(key)
        .change_context_lazy(|| DriverError::Env)
        .attach_printable_lazy(|| format!("Env {} not specified", key))
}

/// Reads and parses `key`, falling back to `default` when it is not set.
pub(crate) fn env_or<T>(key: &str, default: T) -> Result<T, Report<DriverError>>
where
    T: FromStr,
    T::Err: Context,
{
    match dotenvy::var(key) {
        Ok(value) => value
            .parse::<T>()
            .change_context_lazy(|| DriverError::Env)
            .attach_printable_lazy(|| format!("Env {} has invalid value {:?}", key, value)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(default),
        Err(error) => Err(Report::new(error)
            .change_context(DriverError::Env)
            .attach_printable(format!("Env {} could not be read", key))),
    }
}
