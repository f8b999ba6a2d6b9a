/*!
 * Error types for the plexsub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the Plex server API
#[derive(Error, Debug)]
pub enum PlexError {
    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error with the access token
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Error returned by the API itself
    #[error("Plex API responded with error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error when parsing an API response fails
    #[error("Failed to parse Plex API response: {0}")]
    Parse(String),

    /// The configured library section does not exist on the server
    #[error("Library section not found: {0}")]
    SectionNotFound(String),
}

/// Errors that can occur when running the external transcoder
#[derive(Error, Debug)]
pub enum TranscoderError {
    /// The transcoder binary could not be started
    #[error("Failed to spawn transcoder: {0}")]
    Spawn(String),

    /// The transcoder ran past its configured timeout
    #[error("Transcoder timed out after {0}s")]
    Timeout(u64),

    /// The transcoder exited with a non-zero status
    #[error("Transcoder failed: {stderr}")]
    Failed {
        /// Filtered stderr from the transcoder process
        stderr: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the Plex API
    #[error("Plex error: {0}")]
    Plex(#[from] PlexError),

    /// Error from the transcoder
    #[error("Transcoder error: {0}")]
    Transcoder(#[from] TranscoderError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
