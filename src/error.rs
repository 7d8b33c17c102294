use std::{fmt, path::PathBuf, time::Duration};

use reqwest::StatusCode;
use thiserror::Error;

/// The service operation a request belongs to.
///
/// Carried by every error so messages name what was being attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    UploadFile,
    UploadUrl,
    UploadLitterbox,
    UploadAlbum,
    DeleteFiles,
    CreateAlbum,
    EditAlbum,
    DeleteAlbum,
}

impl Operation {
    /// Human-readable name, as used in error messages and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::UploadFile => "upload file",
            Operation::UploadUrl => "upload URL",
            Operation::UploadLitterbox => "upload to Litterbox",
            Operation::UploadAlbum => "upload album",
            Operation::DeleteFiles => "delete files",
            Operation::CreateAlbum => "create album",
            Operation::EditAlbum => "edit album",
            Operation::DeleteAlbum => "delete album",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of a [`CatboxError`].
///
/// Every error maps to exactly one kind. Use this when the specific variant payload is not needed,
/// for example to decide whether to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unclassified request or local failure.
    Generic,
    /// A local upload target does not exist or could not be read.
    FileMissing,
    /// The request exceeded the configured timeout.
    TimedOut,
    /// The connection could not be established or was lost.
    ConnectionFailed,
    /// The service answered with a failure status or an unusable body.
    RemoteRejected,
    /// The operation needs a userhash and none was configured.
    AuthRequired,
}

/// Errors returned by this crate.
///
/// `CatboxError` is the single failure type of every operation, so callers who do not care about
/// the cause can propagate it as-is. Use [`CatboxError::kind`] to tell retryable conditions
/// ([`ErrorKind::TimedOut`], [`ErrorKind::ConnectionFailed`]) from terminal ones.
///
/// Notes:
/// - Local preconditions (missing files, missing userhash, invalid URLs) are checked before any
///   network call is made.
/// - A batch album upload that fails part way returns [`CatboxError::AlbumUploadAborted`], which
///   keeps the URLs of files already uploaded.
#[derive(Debug, Error)]
pub enum CatboxError {
    /// The request failed for a reason not covered by a more specific variant.
    #[error("{operation} failed: {source}")]
    Request {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
    /// A local upload target does not exist or could not be opened.
    #[error("file {} could not be opened: {source}", .path.display())]
    FileMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The request did not complete within the configured timeout.
    #[error("{operation} timed out after {} seconds", .timeout.as_secs_f64())]
    TimedOut {
        operation: Operation,
        timeout: Duration,
    },
    /// The service could not be reached.
    #[error("{operation} failed to connect to the service: {source}")]
    ConnectionFailed {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
    /// The service returned a non-success status, or an empty body where a value was expected.
    #[error("{operation} was rejected by the service: {reason}")]
    RemoteRejected {
        operation: Operation,
        status: Option<StatusCode>,
        reason: String,
    },
    /// An operation requiring a userhash was called on a client without one.
    #[error("a userhash is required to {operation}")]
    AuthRequired { operation: Operation },
    /// A batch album upload stopped at its first failure.
    ///
    /// `uploaded` holds the URLs of the files uploaded before the failure, in input order. They
    /// are not rolled back on the service.
    #[error("album upload stopped after {} of {total} files: {source}", .uploaded.len())]
    AlbumUploadAborted {
        uploaded: Vec<String>,
        total: usize,
        #[source]
        source: Box<CatboxError>,
    },
    /// An invalid URL was provided.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The provided path did not yield a valid UTF-8 file name.
    #[error("invalid file name: {}", .0.display())]
    InvalidFileName(PathBuf),
    /// A zero timeout was configured.
    #[error("timeout must be greater than zero")]
    InvalidTimeout,
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl CatboxError {
    /// Classify this error.
    ///
    /// [`CatboxError::AlbumUploadAborted`] reports the kind of the failure that stopped the batch.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatboxError::FileMissing { .. } => ErrorKind::FileMissing,
            CatboxError::TimedOut { .. } => ErrorKind::TimedOut,
            CatboxError::ConnectionFailed { .. } => ErrorKind::ConnectionFailed,
            CatboxError::RemoteRejected { .. } => ErrorKind::RemoteRejected,
            CatboxError::AuthRequired { .. } => ErrorKind::AuthRequired,
            CatboxError::AlbumUploadAborted { source, .. } => source.kind(),
            CatboxError::Request { .. }
            | CatboxError::InvalidUrl(_)
            | CatboxError::InvalidFileName(_)
            | CatboxError::InvalidTimeout
            | CatboxError::ClientBuild(_) => ErrorKind::Generic,
        }
    }

    /// Whether repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::TimedOut | ErrorKind::ConnectionFailed)
    }

    /// URLs uploaded before a batch album upload failed.
    ///
    /// Returns `None` for every other error.
    pub fn partial_uploads(&self) -> Option<&[String]> {
        match self {
            CatboxError::AlbumUploadAborted { uploaded, .. } => Some(uploaded),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected() -> CatboxError {
        CatboxError::RemoteRejected {
            operation: Operation::UploadFile,
            status: Some(StatusCode::PRECONDITION_FAILED),
            reason: "No files given.".into(),
        }
    }

    #[test]
    fn timeout_message_names_operation_and_duration() {
        let err = CatboxError::TimedOut {
            operation: Operation::UploadFile,
            timeout: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "upload file timed out after 30 seconds");
        assert_eq!(err.kind(), ErrorKind::TimedOut);
        assert!(err.is_retryable());
    }

    #[test]
    fn auth_required_message_names_operation() {
        let err = CatboxError::AuthRequired {
            operation: Operation::DeleteAlbum,
        };
        assert_eq!(err.to_string(), "a userhash is required to delete album");
        assert_eq!(err.kind(), ErrorKind::AuthRequired);
        assert!(!err.is_retryable());
    }

    #[test]
    fn file_missing_is_terminal() {
        let err = CatboxError::FileMissing {
            path: PathBuf::from("nope.png"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.kind(), ErrorKind::FileMissing);
        assert!(err.to_string().contains("nope.png"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn rejected_is_terminal() {
        let err = rejected();
        assert_eq!(err.kind(), ErrorKind::RemoteRejected);
        assert!(err.to_string().contains("No files given."));
        assert!(!err.is_retryable());
    }

    #[test]
    fn aborted_album_reports_cause_kind_and_partial_list() {
        let err = CatboxError::AlbumUploadAborted {
            uploaded: vec!["https://files.catbox.moe/a.png".into()],
            total: 3,
            source: Box::new(CatboxError::TimedOut {
                operation: Operation::UploadAlbum,
                timeout: Duration::from_millis(1500),
            }),
        };

        assert_eq!(err.kind(), ErrorKind::TimedOut);
        assert!(err.is_retryable());
        assert_eq!(
            err.partial_uploads(),
            Some(&["https://files.catbox.moe/a.png".to_string()][..])
        );
        let msg = err.to_string();
        assert!(msg.contains("1 of 3"), "{msg}");
        assert!(msg.contains("1.5 seconds"), "{msg}");
    }

    #[test]
    fn local_preconditions_are_generic() {
        assert_eq!(CatboxError::InvalidTimeout.kind(), ErrorKind::Generic);
        assert_eq!(
            CatboxError::InvalidFileName(PathBuf::from("/")).kind(),
            ErrorKind::Generic
        );
        assert!(rejected().partial_uploads().is_none());
    }
}
