use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("renderer error: {0}")]
    Renderer(String),

    #[error("export error: {0}")]
    Export(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("clock.time_scale = 9 is out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: clock.time_scale = 9 is out of range"
        );
    }

    #[test]
    fn folio_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: FolioError = config_err.into();
        assert!(matches!(err, FolioError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn folio_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: FolioError = io_err.into();
        assert!(matches!(err, FolioError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn folio_error_other_variants() {
        let err = FolioError::Renderer("no surface".into());
        assert_eq!(err.to_string(), "renderer error: no surface");

        let err = FolioError::Export("disk full".into());
        assert_eq!(err.to_string(), "export error: disk full");
    }
}
