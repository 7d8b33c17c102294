use std::time::Duration;

use reqwest::{
    StatusCode, Url,
    blocking::{
        Client,
        multipart::{Form, Part},
    },
};
use tracing::debug;

use crate::{CatboxError, ErrorKind, Operation};

pub(crate) const DEFAULT_API_URL: &str = "https://catbox.moe/user/api.php";
pub(crate) const DEFAULT_LITTERBOX_URL: &str =
    "https://litterbox.catbox.moe/resources/internals/api.php";

/// Multipart field name the service reads uploaded files from.
pub const FILE_FIELD: &str = "fileToUpload";

/// The two service endpoints a request can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Permanent storage and album management.
    Api,
    /// Temporary storage.
    Litterbox,
}

/// A file attached to a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl FilePart {
    /// Build a part, guessing the MIME type from `file_name`.
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();

        Self {
            file_name,
            mime_type,
            data,
        }
    }
}

/// One form POST against a service endpoint.
///
/// Requests with a [`FilePart`] are sent as `multipart/form-data`, all others as
/// `application/x-www-form-urlencoded`. Field order is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRequest {
    pub endpoint: Endpoint,
    pub operation: Operation,
    pub fields: Vec<(&'static str, String)>,
    pub file: Option<FilePart>,
    pub timeout: Duration,
}

impl FormRequest {
    /// Start a request with its `reqtype` field.
    pub fn new(
        endpoint: Endpoint,
        operation: Operation,
        reqtype: &'static str,
        timeout: Duration,
    ) -> Self {
        Self {
            endpoint,
            operation,
            fields: vec![("reqtype", reqtype.to_string())],
            file: None,
            timeout,
        }
    }

    /// Append a text field.
    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    /// Attach the file to upload.
    pub fn file(mut self, part: FilePart) -> Self {
        self.file = Some(part);
        self
    }

    /// First value of a text field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Sends a [`FormRequest`] and returns the raw response body.
///
/// Implementations must classify failures into [`CatboxError`] kinds and must not trim the body.
/// [`HttpTransport`] is the production implementation; tests substitute their own.
pub trait Transport {
    fn send(&self, request: FormRequest) -> Result<String, CatboxError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: FormRequest) -> Result<String, CatboxError> {
        (**self).send(request)
    }
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    api_url: Url,
    litterbox_url: Url,
}

impl HttpTransport {
    pub(crate) fn new(client: Client, api_url: Url, litterbox_url: Url) -> Self {
        Self {
            client,
            api_url,
            litterbox_url,
        }
    }

    /// URL a given endpoint resolves to.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> &Url {
        match endpoint {
            Endpoint::Api => &self.api_url,
            Endpoint::Litterbox => &self.litterbox_url,
        }
    }

    fn build_form(
        operation: Operation,
        fields: Vec<(&'static str, String)>,
        file: FilePart,
    ) -> Result<Form, CatboxError> {
        let part = Part::bytes(file.data)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(|source| CatboxError::Request { operation, source })?;

        let form = fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));
        Ok(form.part(FILE_FIELD, part))
    }

    fn map_status(operation: Operation, status: StatusCode, body: &str) -> Result<(), CatboxError> {
        if status.is_success() {
            return Ok(());
        }

        let reason = match body.trim() {
            "" => status.to_string(),
            text => format!("{status}: {text}"),
        };
        Err(CatboxError::RemoteRejected {
            operation,
            status: Some(status),
            reason,
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: FormRequest) -> Result<String, CatboxError> {
        let FormRequest {
            endpoint,
            operation,
            fields,
            file,
            timeout,
        } = request;

        let url = self.endpoint_url(endpoint).clone();
        debug!(%operation, %url, multipart = file.is_some(), "sending request");

        let builder = self.client.post(url).timeout(timeout);
        let builder = match file {
            Some(part) => builder.multipart(Self::build_form(operation, fields, part)?),
            None => builder.form(&fields),
        };

        let response = builder
            .send()
            .map_err(|err| classify(operation, timeout, err))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|err| classify(operation, timeout, err))?;

        debug!(%operation, %status, bytes = body.len(), "received response");
        Self::map_status(operation, status, &body)?;
        Ok(body)
    }
}

/// Map a `reqwest` failure onto the error taxonomy.
///
/// Checked in order: timeout, connection, undecodable body, status, anything else.
pub(crate) fn classify(operation: Operation, timeout: Duration, err: reqwest::Error) -> CatboxError {
    match failure_kind(err.is_timeout(), err.is_connect(), err.is_decode(), err.status()) {
        ErrorKind::TimedOut => CatboxError::TimedOut { operation, timeout },
        ErrorKind::ConnectionFailed => CatboxError::ConnectionFailed {
            operation,
            source: err,
        },
        ErrorKind::RemoteRejected => CatboxError::RemoteRejected {
            operation,
            status: err.status(),
            reason: err.to_string(),
        },
        _ => CatboxError::Request {
            operation,
            source: err,
        },
    }
}

fn failure_kind(
    timed_out: bool,
    connect: bool,
    decode: bool,
    status: Option<StatusCode>,
) -> ErrorKind {
    if timed_out {
        ErrorKind::TimedOut
    } else if connect {
        ErrorKind::ConnectionFailed
    } else if decode || status.is_some() {
        ErrorKind::RemoteRejected
    } else {
        ErrorKind::Generic
    }
}
