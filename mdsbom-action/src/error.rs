//! CLI-specific error types and exit code mapping

use mdsbom_core::error::MdsbomError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Invalid operator configuration (flags, logging setup).
    #[error("configuration error: {0}")]
    Config(String),

    /// The action failed and the job has been marked failed.
    #[error("{0}")]
    Failed(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from mdsbom-core.
    #[error("{0}")]
    Core(#[from] MdsbomError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                |
    /// |------|----------------------------------------|
    /// | 0    | Success (including unclassified exits) |
    /// | 1    | Action failed / job marked failed      |
    /// | 2    | Configuration error                    |
    /// | 10   | IO error                               |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) => 10,
            Self::Failed(_) | Self::JsonSerialize(_) | Self::Core(_) => 1,
        }
    }
}

impl From<mdsbom_provisioner::ProvisionError> for CliError {
    fn from(e: mdsbom_provisioner::ProvisionError) -> Self {
        Self::Core(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("bad log level".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_failed() {
        let err = CliError::Failed("found defects".to_owned());
        assert_eq!(err.exit_code(), 1, "action failure should return exit code 1");
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_json_serialize_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json")
            .expect_err("should fail parsing");
        let err = CliError::JsonSerialize(json_err);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_error_display_failed_is_message_only() {
        let err = CliError::Failed("The Mayhem for Dynamic SBOM scan found defects.".to_owned());
        assert_eq!(
            err.to_string(),
            "The Mayhem for Dynamic SBOM scan found defects."
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = CliError::Config("unknown format".to_owned());
        let display_str = err.to_string();
        assert!(display_str.contains("configuration error"));
        assert!(display_str.contains("unknown format"));
    }

    #[test]
    fn test_from_provision_error() {
        let err: CliError = mdsbom_provisioner::ProvisionError::Compose("bad toml".to_owned()).into();
        assert!(matches!(err, CliError::Core(MdsbomError::Provision(_))));
        assert_eq!(err.exit_code(), 1);
    }
}
