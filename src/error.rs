//! Error types for each stage of a digest run.
//!
//! Only [`FetchError`] is recoverable: the pipeline logs it and moves on to
//! the next feed. Everything wrapped by [`AppError`] aborts the run before
//! the output file is touched.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or parse the YAML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Failure to retrieve or parse a single feed source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status}")]
    Status { status: reqwest::StatusCode },

    #[error("failed to read feed file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("feed parse error: {0}")]
    Parse(#[from] feed_rs::parser::ParseFeedError),
}

/// The template file is missing or does not have the header/body/footer shape.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid template format: expected two `---` delimiters, found {found}")]
    MissingDelimiters { found: usize },
}

/// The rendered document could not be written.
#[derive(Debug, Error)]
#[error("failed to write output file {}: {source}", .path.display())]
pub struct OutputWriteError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

/// Fatal errors that end a run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    OutputWrite(#[from] OutputWriteError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_error_message_reports_delimiter_count() {
        let err = TemplateError::MissingDelimiters { found: 1 };
        assert_eq!(
            err.to_string(),
            "invalid template format: expected two `---` delimiters, found 1"
        );
    }

    #[test]
    fn test_app_error_is_transparent() {
        let err: AppError = OutputWriteError {
            path: PathBuf::from("out/digest.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "failed to write output file out/digest.md: denied"
        );
    }
}
