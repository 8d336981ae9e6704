//! Errors raised while reading posts from storage

use std::path::PathBuf;
use thiserror::Error;

/// Failure modes of the post store and the listing built on it
#[derive(Error, Debug)]
pub enum PostError {
    /// A post lacks `title`/`date`, or its metadata block is malformed
    #[error("Invalid metadata in {name}: {reason}")]
    MetadataParse { name: String, reason: String },

    /// The storage root cannot be enumerated
    #[error("Post storage unavailable at {path:?}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single post file cannot be read
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No post with this id exists
    #[error("Post not found: {0}")]
    NotFound(String),
}

impl PostError {
    pub(crate) fn metadata(name: impl Into<String>, reason: impl Into<String>) -> Self {
        PostError::MetadataParse {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
