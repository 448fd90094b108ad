use std::path::PathBuf;

use thiserror::Error;

/// Convenient result type for `radioprog-lib`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serial(#[from] serialport::Error),

    #[error("No USB devices found.")]
    NoDeviceFound,

    #[error("File {} does not exist.", path.display())]
    MissingInputFile { path: PathBuf },

    #[error("no image files found in {}", dir.display())]
    NoImagesFound { dir: PathBuf },

    #[error("failed to launch '{}': {source}", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", exit_message(*code))]
    TransferFailure { code: Option<i32> },

    /// The sequential upload stopped on a failed transfer. `completed`
    /// radios were flashed before it.
    #[error("Error uploading image.")]
    SequenceAborted {
        completed: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("interactive prompt unavailable: {0}")]
    PromptUnavailable(String),

    #[error("operation canceled by user")]
    Canceled,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

fn exit_message(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("Script exited with code {}", code),
        None => "Script was terminated by a signal".to_string(),
    }
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn prompt_unavailable(msg: impl Into<String>) -> Self {
        Self::PromptUnavailable(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_failure_reports_exit_code() {
        let err = Error::TransferFailure { code: Some(2) };
        assert_eq!(err.to_string(), "Script exited with code 2");

        let err = Error::TransferFailure { code: None };
        assert_eq!(err.to_string(), "Script was terminated by a signal");
    }

    #[test]
    fn missing_input_file_names_path() {
        let err = Error::MissingInputFile {
            path: PathBuf::from("images/uv5r.img"),
        };
        assert_eq!(err.to_string(), "File images/uv5r.img does not exist.");
    }

    #[test]
    fn aborted_sequence_keeps_cause() {
        let err = Error::SequenceAborted {
            completed: 3,
            source: Box::new(Error::TransferFailure { code: Some(2) }),
        };
        assert_eq!(err.to_string(), "Error uploading image.");
        let cause = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(cause.as_deref(), Some("Script exited with code 2"));
    }
}
