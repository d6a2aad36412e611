//! Environment variable expansion for configuration strings.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` is the dotted config path, used in the error message.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(Cow::into_owned)
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.var_name),
        })
}
