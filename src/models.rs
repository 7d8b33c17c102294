use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{CatboxError, transport::FilePart};

/// Account userhash used to authenticate uploads and album management.
///
/// The value is opaque to this crate. Its `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub(crate) token: String,
}

impl AuthToken {
    /// Construct a new token wrapper.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Borrow the underlying token string.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Consume this value and return the underlying token string.
    pub fn into_string(self) -> String {
        self.token
    }

    /// Whether the token carries any non-whitespace content.
    ///
    /// Blank tokens are treated as absent by every operation.
    pub fn is_blank(&self) -> bool {
        self.token.trim().is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// A file to upload: either a local path or an in-memory buffer with a file name.
///
/// Paths are read when the operation runs; the handle is closed before the request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadTarget {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// Bytes already in memory, uploaded under `file_name`.
    Bytes { file_name: String, data: Vec<u8> },
}

impl UploadTarget {
    /// Target a local file.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        UploadTarget::Path(path.into())
    }

    /// Target an in-memory buffer uploaded under `file_name`.
    pub fn bytes(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        UploadTarget::Bytes {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// Check that a path target is a readable regular file with a usable name, without reading it.
    pub(crate) fn ensure_exists(&self) -> Result<(), CatboxError> {
        let UploadTarget::Path(path) = self else {
            return Ok(());
        };

        file_name_of(path)?;
        let metadata = std::fs::metadata(path).map_err(|source| CatboxError::FileMissing {
            path: path.clone(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(CatboxError::FileMissing {
                path: path.clone(),
                source: std::io::Error::other("not a regular file"),
            });
        }
        std::fs::File::open(path)
            .map(drop)
            .map_err(|source| CatboxError::FileMissing {
                path: path.clone(),
                source,
            })
    }

    /// Resolve the target into the multipart file part sent to the service.
    pub(crate) fn into_file_part(self) -> Result<FilePart, CatboxError> {
        match self {
            UploadTarget::Path(path) => {
                let file_name = file_name_of(&path)?;
                let data = std::fs::read(&path)
                    .map_err(|source| CatboxError::FileMissing { path, source })?;
                Ok(FilePart::new(file_name, data))
            }
            UploadTarget::Bytes { file_name, data } => Ok(FilePart::new(file_name, data)),
        }
    }

    /// Name used in logs for this target.
    pub(crate) fn display_name(&self) -> String {
        match self {
            UploadTarget::Path(path) => path.display().to_string(),
            UploadTarget::Bytes { file_name, .. } => file_name.clone(),
        }
    }
}

fn file_name_of(path: &Path) -> Result<String, CatboxError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| CatboxError::InvalidFileName(path.to_path_buf()))
}

impl From<PathBuf> for UploadTarget {
    fn from(path: PathBuf) -> Self {
        UploadTarget::Path(path)
    }
}

impl From<&Path> for UploadTarget {
    fn from(path: &Path) -> Self {
        UploadTarget::Path(path.to_path_buf())
    }
}

impl From<&str> for UploadTarget {
    fn from(path: &str) -> Self {
        UploadTarget::Path(PathBuf::from(path))
    }
}

impl From<String> for UploadTarget {
    fn from(path: String) -> Self {
        UploadTarget::Path(PathBuf::from(path))
    }
}

/// How long a Litterbox upload stays available.
///
/// Values outside the known set are kept in [`RetentionPeriod::Other`] and sent to the service
/// verbatim; the service decides whether it accepts them.
///
/// Serializes as the wire string (`"1h"`, `"12h"`, ...), so it can be read from config files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RetentionPeriod {
    #[default]
    OneHour,
    TwelveHours,
    OneDay,
    ThreeDays,
    OneWeek,
    Other(String),
}

impl RetentionPeriod {
    /// Value sent in the `time` form field.
    pub fn as_str(&self) -> &str {
        match self {
            RetentionPeriod::OneHour => "1h",
            RetentionPeriod::TwelveHours => "12h",
            RetentionPeriod::OneDay => "24h",
            RetentionPeriod::ThreeDays => "72h",
            RetentionPeriod::OneWeek => "1w",
            RetentionPeriod::Other(value) => value,
        }
    }
}

impl fmt::Display for RetentionPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RetentionPeriod {
    fn from(value: &str) -> Self {
        match value {
            "1h" => RetentionPeriod::OneHour,
            "12h" => RetentionPeriod::TwelveHours,
            "24h" => RetentionPeriod::OneDay,
            "72h" => RetentionPeriod::ThreeDays,
            "1w" => RetentionPeriod::OneWeek,
            other => RetentionPeriod::Other(other.to_string()),
        }
    }
}

impl From<String> for RetentionPeriod {
    fn from(value: String) -> Self {
        RetentionPeriod::from(value.as_str())
    }
}

impl From<RetentionPeriod> for String {
    fn from(value: RetentionPeriod) -> Self {
        match value {
            RetentionPeriod::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn token_debug_is_redacted() {
        let token = AuthToken::new("secret-hash");
        assert_eq!(format!("{token:?}"), "AuthToken(..)");
        assert_eq!(token.as_str(), "secret-hash");
    }

    #[test]
    fn blank_tokens_are_detected() {
        assert!(AuthToken::new("").is_blank());
        assert!(AuthToken::new("  ").is_blank());
        assert!(!AuthToken::new("abc").is_blank());
    }

    #[test]
    fn retention_round_trips_known_values() {
        for value in ["1h", "12h", "24h", "72h", "1w"] {
            let period = RetentionPeriod::from(value);
            assert!(!matches!(period, RetentionPeriod::Other(_)), "{value}");
            assert_eq!(period.as_str(), value);
        }
    }

    #[test]
    fn retention_passes_unknown_values_through() {
        let period = RetentionPeriod::from("3d");
        assert_eq!(period, RetentionPeriod::Other("3d".into()));
        assert_eq!(period.to_string(), "3d");
    }

    #[test]
    fn retention_serde_uses_wire_strings() {
        let json = serde_json::to_string(&RetentionPeriod::ThreeDays).unwrap();
        assert_eq!(json, "\"72h\"");

        let parsed: Vec<RetentionPeriod> = serde_json::from_str(r#"["12h", "2h"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                RetentionPeriod::TwelveHours,
                RetentionPeriod::Other("2h".into())
            ]
        );
    }

    #[test]
    fn path_target_reads_file_and_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"png bytes")
            .unwrap();

        let part = UploadTarget::from(path.as_path()).into_file_part().unwrap();
        assert_eq!(part.file_name, "photo.png");
        assert_eq!(part.mime_type, "image/png");
        assert_eq!(part.data, b"png bytes");
    }

    #[test]
    fn bytes_target_keeps_logical_name() {
        let part = UploadTarget::bytes("notes.unknownext", b"hi".to_vec())
            .into_file_part()
            .unwrap();
        assert_eq!(part.file_name, "notes.unknownext");
        assert_eq!(part.mime_type, "application/octet-stream");
    }

    #[test]
    fn missing_path_maps_to_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let target = UploadTarget::path(dir.path().join("absent.png"));

        let err = target.ensure_exists().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileMissing);

        let err = target.into_file_part().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileMissing);
    }

    #[test]
    fn path_without_file_name_is_rejected() {
        let err = UploadTarget::path("/").into_file_part().unwrap_err();
        assert!(matches!(err, CatboxError::InvalidFileName(_)));

        for path in ["/", ".."] {
            let err = UploadTarget::path(path).ensure_exists().unwrap_err();
            assert!(matches!(err, CatboxError::InvalidFileName(_)), "{path}: {err:?}");
        }
    }

    #[test]
    fn directory_target_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = UploadTarget::path(dir.path()).ensure_exists().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileMissing);
    }
}
