//! Error types, exit codes, and environment helpers for the CLI.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use anyhow::anyhow;
use cupsadmin_config::ConfigError;

/// File name of the preference store inside the per-user config directory.
pub(crate) const PREFERENCES_FILE: &str = "preferences.json";
/// Directory created under the per-user config directory.
pub(crate) const APP_DIR: &str = "cupsadmin";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        if err.is_input_error() {
            Self::Validation(err.to_string())
        } else {
            Self::Failure(anyhow::Error::new(err))
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Resolve the preference file: explicit path first, then the per-user config directory.
pub(crate) fn resolve_preferences_path(explicit: Option<PathBuf>) -> CliResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(PREFERENCES_FILE))
        .ok_or_else(|| {
            CliError::failure(anyhow!(
                "could not determine the user configuration directory; pass --prefs or set CUPSADMIN_PREFS"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn exit_codes_distinguish_validation_from_failure() {
        let validation = CliError::validation("bad key");
        assert_eq!(validation.exit_code(), 2);
        assert_eq!(validation.display_message(), "bad key");

        let failure = CliError::failure(anyhow!("disk full"));
        assert_eq!(failure.exit_code(), 3);
        assert_eq!(failure.display_message(), "disk full");
    }

    #[test]
    fn config_errors_map_by_origin() {
        let input: CliError = ConfigError::UnknownField {
            key: "nope".to_string(),
        }
        .into();
        assert_eq!(input.exit_code(), 2);
        assert!(input.display_message().contains("nope"));

        let io_error: CliError = ConfigError::Io {
            operation: "export.write",
            path: PathBuf::from("/read-only/cupsd.conf"),
            source: io::Error::other("read-only file system"),
        }
        .into();
        assert_eq!(io_error.exit_code(), 3);
        assert!(io_error.display_message().contains("read-only file system"));
    }

    #[test]
    fn explicit_preferences_path_wins() -> anyhow::Result<()> {
        let explicit = PathBuf::from("/tmp/custom-prefs.json");
        let resolved = resolve_preferences_path(Some(explicit.clone()))
            .map_err(|err| anyhow!(err.display_message()))?;
        assert_eq!(resolved, explicit);
        Ok(())
    }
}
