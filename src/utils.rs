use tracing::warn;

use crate::{AuthToken, CatboxError, Operation};

pub(crate) fn default_user_agent() -> String {
    format!("catbox-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Join remote file names with the single-space delimiter the service splits on.
///
/// Names containing a space cannot be represented unambiguously; they are sent as-is.
pub(crate) fn join_files<S: AsRef<str>>(files: &[S]) -> String {
    let names: Vec<&str> = files.iter().map(AsRef::as_ref).collect();
    if let Some(name) = names.iter().find(|name| name.contains(' ')) {
        warn!(file = %name, "file name contains a space and will be split by the service");
    }
    names.join(" ")
}

/// Token to send with an optional-auth request, ignoring blank values.
pub(crate) fn usable_token(token: Option<&AuthToken>) -> Option<&AuthToken> {
    token.filter(|token| !token.is_blank())
}

pub(crate) fn require_token(
    operation: Operation,
    token: Option<&AuthToken>,
) -> Result<&AuthToken, CatboxError> {
    usable_token(token).ok_or(CatboxError::AuthRequired { operation })
}

/// Trim a response that must carry a value (URL or shortcode).
pub(crate) fn expect_value(operation: Operation, body: &str) -> Result<String, CatboxError> {
    match body.trim() {
        "" => Err(CatboxError::RemoteRejected {
            operation,
            status: None,
            reason: "empty response body".into(),
        }),
        value => Ok(value.to_string()),
    }
}
