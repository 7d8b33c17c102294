//! Request builders for each service operation.
//!
//! Every function checks its local preconditions first (userhash, file presence, URL syntax),
//! then builds one [`FormRequest`] per network call and hands it to a [`Transport`]. Nothing is
//! retried. [`crate::CatboxClient`] wraps these with its configured token and timeout.

use std::time::Duration;

use reqwest::Url;
use tracing::{info, warn};

use crate::{
    AuthToken, CatboxError, Operation, RetentionPeriod, UploadTarget,
    transport::{Endpoint, FormRequest, Transport},
    utils::{expect_value, join_files, require_token, usable_token},
};

fn with_optional_token(request: FormRequest, token: Option<&AuthToken>) -> FormRequest {
    match usable_token(token) {
        Some(token) => request.text("userhash", token.as_str()),
        None => request,
    }
}

fn upload_one<T: Transport + ?Sized>(
    transport: &T,
    operation: Operation,
    target: UploadTarget,
    token: Option<&AuthToken>,
    timeout: Duration,
) -> Result<String, CatboxError> {
    let part = target.into_file_part()?;
    let request = FormRequest::new(Endpoint::Api, operation, "fileupload", timeout);
    let request = with_optional_token(request, token).file(part);

    let body = transport.send(request)?;
    expect_value(operation, &body)
}

/// Upload a file to permanent storage and return its URL.
///
/// With a token the file is attached to that account.
///
/// # Errors
///
/// - [`CatboxError::FileMissing`] if a path target cannot be read (no request is sent)
/// - [`CatboxError::RemoteRejected`] for failure statuses or an empty response
/// - [`CatboxError::TimedOut`] / [`CatboxError::ConnectionFailed`] / [`CatboxError::Request`]
///   for transport failures
pub fn upload_file<T: Transport + ?Sized>(
    transport: &T,
    target: UploadTarget,
    token: Option<&AuthToken>,
    timeout: Duration,
) -> Result<String, CatboxError> {
    upload_one(transport, Operation::UploadFile, target, token, timeout)
}

/// Ask the service to fetch `url` and store it; returns the hosted URL.
///
/// `url` is only checked locally; the service receives it exactly as given.
///
/// # Errors
///
/// [`CatboxError::InvalidUrl`] if `url` does not parse (no request is sent), otherwise as
/// [`upload_file`].
pub fn upload_url<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    token: Option<&AuthToken>,
    timeout: Duration,
) -> Result<String, CatboxError> {
    Url::parse(url)?;

    let request = FormRequest::new(Endpoint::Api, Operation::UploadUrl, "urlupload", timeout);
    let request = with_optional_token(request, token).text("url", url);

    let body = transport.send(request)?;
    expect_value(Operation::UploadUrl, &body)
}

/// Upload a file to temporary storage for `retention`; returns its URL.
///
/// Temporary uploads are anonymous. The retention value is sent verbatim.
pub fn upload_to_litterbox<T: Transport + ?Sized>(
    transport: &T,
    target: UploadTarget,
    retention: &RetentionPeriod,
    timeout: Duration,
) -> Result<String, CatboxError> {
    let part = target.into_file_part()?;
    let request = FormRequest::new(
        Endpoint::Litterbox,
        Operation::UploadLitterbox,
        "fileupload",
        timeout,
    )
    .text("time", retention.as_str())
    .file(part);

    let body = transport.send(request)?;
    expect_value(Operation::UploadLitterbox, &body)
}

/// Upload several files one after another; returns their URLs in input order.
///
/// Every path target is checked before the first request, so a missing file fails with
/// [`CatboxError::FileMissing`] and nothing is uploaded.
///
/// The batch is not atomic. The first failure after that point stops the batch and is returned
/// as [`CatboxError::AlbumUploadAborted`], carrying the URLs already uploaded (possibly none).
/// Those uploads remain on the service.
pub fn upload_album<T: Transport + ?Sized>(
    transport: &T,
    targets: Vec<UploadTarget>,
    token: Option<&AuthToken>,
    timeout: Duration,
) -> Result<Vec<String>, CatboxError> {
    for target in &targets {
        target.ensure_exists()?;
    }

    let total = targets.len();
    let mut uploaded = Vec::with_capacity(total);

    for target in targets {
        let name = target.display_name();
        match upload_one(transport, Operation::UploadAlbum, target, token, timeout) {
            Ok(url) => uploaded.push(url),
            Err(source) => {
                warn!(
                    file = %name,
                    uploaded = uploaded.len(),
                    total,
                    error = %source,
                    "album upload stopped"
                );
                return Err(CatboxError::AlbumUploadAborted {
                    uploaded,
                    total,
                    source: Box::new(source),
                });
            }
        }
    }

    Ok(uploaded)
}

/// Delete files owned by the token's account.
///
/// `files` are service-assigned names such as `abc123.png`.
///
/// # Errors
///
/// [`CatboxError::AuthRequired`] without a usable token (no request is sent), otherwise transport
/// and status failures as for [`upload_file`].
pub fn delete_files<T: Transport + ?Sized, S: AsRef<str>>(
    transport: &T,
    files: &[S],
    token: Option<&AuthToken>,
    timeout: Duration,
) -> Result<(), CatboxError> {
    let token = require_token(Operation::DeleteFiles, token)?;
    let files = join_files(files);

    let request = FormRequest::new(Endpoint::Api, Operation::DeleteFiles, "deletefiles", timeout)
        .text("userhash", token.as_str())
        .text("files", files.as_str());

    transport.send(request)?;
    info!(files = %files, "deleted files");
    Ok(())
}

/// Create an album from already-uploaded files; returns the album shortcode.
pub fn create_album<T: Transport + ?Sized, S: AsRef<str>>(
    transport: &T,
    files: &[S],
    title: &str,
    description: &str,
    token: Option<&AuthToken>,
    timeout: Duration,
) -> Result<String, CatboxError> {
    let token = require_token(Operation::CreateAlbum, token)?;

    let request = FormRequest::new(Endpoint::Api, Operation::CreateAlbum, "createalbum", timeout)
        .text("userhash", token.as_str())
        .text("title", title)
        .text("desc", description)
        .text("files", join_files(files));

    let body = transport.send(request)?;
    let shortcode = expect_value(Operation::CreateAlbum, &body)?;
    info!(%shortcode, "created album");
    Ok(shortcode)
}

/// Replace the title, description and file list of the album `shortcode`.
///
/// The service treats this as a full replacement: files left out are removed from the album.
pub fn edit_album<T: Transport + ?Sized, S: AsRef<str>>(
    transport: &T,
    shortcode: &str,
    files: &[S],
    title: &str,
    description: &str,
    token: Option<&AuthToken>,
    timeout: Duration,
) -> Result<(), CatboxError> {
    let token = require_token(Operation::EditAlbum, token)?;

    let request = FormRequest::new(Endpoint::Api, Operation::EditAlbum, "editalbum", timeout)
        .text("userhash", token.as_str())
        .text("short", shortcode)
        .text("title", title)
        .text("desc", description)
        .text("files", join_files(files));

    transport.send(request)?;
    info!(%shortcode, "edited album");
    Ok(())
}

/// Delete the album `shortcode`. Its files are kept.
pub fn delete_album<T: Transport + ?Sized>(
    transport: &T,
    shortcode: &str,
    token: Option<&AuthToken>,
    timeout: Duration,
) -> Result<(), CatboxError> {
    let token = require_token(Operation::DeleteAlbum, token)?;

    let request = FormRequest::new(Endpoint::Api, Operation::DeleteAlbum, "deletealbum", timeout)
        .text("userhash", token.as_str())
        .text("short", shortcode);

    transport.send(request)?;
    info!(%shortcode, "deleted album");
    Ok(())
}
