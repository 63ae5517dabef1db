use std::{io, path::PathBuf};

use scores::remote::RemoteError;
use thiserror::Error;

/// Shown when a failure carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Please choose an image")]
    NoImage,

    #[error("Empty response")]
    EmptyResponse,

    /// Body parsed to JSON `null`, there is no `scores` to read.
    #[error("Cannot read properties of null (reading 'scores')")]
    NullResponse,

    #[error("{0}")]
    Remote(#[from] RemoteError),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl AnalyzeError {
    /// Text for the user facing alert.
    pub fn alert_message(&self) -> String {
        let message = self.to_string();
        if message.is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
