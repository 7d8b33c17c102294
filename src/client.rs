use std::time::Duration;

use reqwest::{Url, blocking::Client};

use crate::operations;
use crate::transport::{DEFAULT_API_URL, DEFAULT_LITTERBOX_URL, HttpTransport, Transport};
use crate::utils::default_user_agent;
use crate::{AuthToken, CatboxError, RetentionPeriod, UploadTarget};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the Catbox and Litterbox APIs.
///
/// The client holds an optional userhash and a per-request timeout, both fixed at construction.
/// Uploads work anonymously; deleting files and managing albums require a userhash and fail with
/// [`CatboxError::AuthRequired`] before any request is made when none is configured.
///
/// The client has no mutable state, so calls are independent of each other.
#[derive(Debug, Clone)]
pub struct CatboxClient<T = HttpTransport> {
    transport: T,
    auth_token: Option<AuthToken>,
    timeout: Duration,
}

/// Builder for [`CatboxClient`].
#[derive(Debug)]
pub struct CatboxClientBuilder {
    api_url: Option<Url>,
    litterbox_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Duration,
    auth_token: Option<AuthToken>,
}

impl CatboxClient {
    /// Build an anonymous client with the crate's defaults.
    pub fn new() -> Result<Self, CatboxError> {
        CatboxClientBuilder::new().build()
    }

    /// Start configuring a client with the crate's defaults.
    ///
    /// Defaults:
    /// - API endpoint: `https://catbox.moe/user/api.php`
    /// - Litterbox endpoint: `https://litterbox.catbox.moe/resources/internals/api.php`
    /// - Timeout: 30 seconds
    /// - User agent: `catbox-client/<version>`
    pub fn builder() -> CatboxClientBuilder {
        CatboxClientBuilder::new()
    }
}

impl<T: Transport> CatboxClient<T> {
    /// Current userhash if configured.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_ref().map(AuthToken::as_str)
    }

    /// Timeout applied to every request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Borrow the transport requests are sent through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Return this client with `token` as its userhash.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(AuthToken::new(token));
        self
    }

    /// Upload a file and return its permanent URL.
    ///
    /// `target` may be a path (`&str`, `&Path`, `PathBuf`) or an [`UploadTarget::Bytes`] buffer.
    /// With a userhash the file is attached to the account.
    ///
    /// # Errors
    ///
    /// - [`CatboxError::FileMissing`] if a path target cannot be read
    /// - [`CatboxError::RemoteRejected`] for failure statuses or an empty response
    /// - [`CatboxError::TimedOut`] / [`CatboxError::ConnectionFailed`] / [`CatboxError::Request`]
    ///   for transport failures
    pub fn upload_file(&self, target: impl Into<UploadTarget>) -> Result<String, CatboxError> {
        operations::upload_file(
            &self.transport,
            target.into(),
            self.auth_token.as_ref(),
            self.timeout,
        )
    }

    /// Have the service fetch `url` and host a copy; returns the hosted URL.
    pub fn upload_url(&self, url: impl AsRef<str>) -> Result<String, CatboxError> {
        operations::upload_url(
            &self.transport,
            url.as_ref(),
            self.auth_token.as_ref(),
            self.timeout,
        )
    }

    /// Upload a file to Litterbox, where it expires after `retention`.
    ///
    /// Litterbox uploads are never tied to the userhash.
    pub fn upload_to_litterbox(
        &self,
        target: impl Into<UploadTarget>,
        retention: impl Into<RetentionPeriod>,
    ) -> Result<String, CatboxError> {
        operations::upload_to_litterbox(
            &self.transport,
            target.into(),
            &retention.into(),
            self.timeout,
        )
    }

    /// Upload files one by one and return their URLs in input order.
    ///
    /// See [`operations::upload_album`] for the partial-failure behaviour.
    pub fn upload_album<I>(&self, targets: I) -> Result<Vec<String>, CatboxError>
    where
        I: IntoIterator,
        I::Item: Into<UploadTarget>,
    {
        operations::upload_album(
            &self.transport,
            targets.into_iter().map(Into::into).collect(),
            self.auth_token.as_ref(),
            self.timeout,
        )
    }

    /// Delete files owned by the configured userhash.
    pub fn delete_files<S: AsRef<str>>(&self, files: &[S]) -> Result<(), CatboxError> {
        operations::delete_files(
            &self.transport,
            files,
            self.auth_token.as_ref(),
            self.timeout,
        )
    }

    /// Create an album from uploaded files and return its shortcode.
    pub fn create_album<S: AsRef<str>>(
        &self,
        files: &[S],
        title: impl AsRef<str>,
        description: impl AsRef<str>,
    ) -> Result<String, CatboxError> {
        operations::create_album(
            &self.transport,
            files,
            title.as_ref(),
            description.as_ref(),
            self.auth_token.as_ref(),
            self.timeout,
        )
    }

    /// Replace an album's title, description and files.
    pub fn edit_album<S: AsRef<str>>(
        &self,
        shortcode: impl AsRef<str>,
        files: &[S],
        title: impl AsRef<str>,
        description: impl AsRef<str>,
    ) -> Result<(), CatboxError> {
        operations::edit_album(
            &self.transport,
            shortcode.as_ref(),
            files,
            title.as_ref(),
            description.as_ref(),
            self.auth_token.as_ref(),
            self.timeout,
        )
    }

    /// Delete an album. The files it contained are kept.
    pub fn delete_album(&self, shortcode: impl AsRef<str>) -> Result<(), CatboxError> {
        operations::delete_album(
            &self.transport,
            shortcode.as_ref(),
            self.auth_token.as_ref(),
            self.timeout,
        )
    }
}

impl CatboxClientBuilder {
    /// Create a new builder using the crate defaults.
    ///
    /// This is equivalent to [`CatboxClient::builder`].
    pub fn new() -> Self {
        Self {
            api_url: None,
            litterbox_url: None,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            auth_token: None,
        }
    }

    /// Override the permanent-storage endpoint, for mirrors or tests.
    pub fn api_url(mut self, url: impl AsRef<str>) -> Result<Self, CatboxError> {
        self.api_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Override the Litterbox endpoint, for mirrors or tests.
    pub fn litterbox_url(mut self, url: impl AsRef<str>) -> Result<Self, CatboxError> {
        self.litterbox_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Set a custom user agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Provide the account userhash.
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(AuthToken::new(token));
        self
    }

    /// Configure the per-request timeout. Must be greater than zero.
    ///
    /// Requests exceeding it fail with [`CatboxError::TimedOut`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a client over the `reqwest` blocking transport.
    ///
    /// # Errors
    ///
    /// - [`CatboxError::InvalidTimeout`] for a zero timeout
    /// - [`CatboxError::ClientBuild`] if the HTTP client cannot be initialised
    pub fn build(mut self) -> Result<CatboxClient<HttpTransport>, CatboxError> {
        if self.timeout.is_zero() {
            return Err(CatboxError::InvalidTimeout);
        }

        let api_url = match self.api_url.take() {
            Some(url) => url,
            None => Url::parse(DEFAULT_API_URL)?,
        };
        let litterbox_url = match self.litterbox_url.take() {
            Some(url) => url,
            None => Url::parse(DEFAULT_LITTERBOX_URL)?,
        };

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.take().unwrap_or_else(default_user_agent))
            .build()
            .map_err(CatboxError::ClientBuild)?;

        self.build_with_transport(HttpTransport::new(client, api_url, litterbox_url))
    }

    /// Build a client that sends requests through `transport`.
    ///
    /// Endpoint and user-agent settings are ignored; the transport owns them.
    pub fn build_with_transport<T: Transport>(
        self,
        transport: T,
    ) -> Result<CatboxClient<T>, CatboxError> {
        if self.timeout.is_zero() {
            return Err(CatboxError::InvalidTimeout);
        }

        Ok(CatboxClient {
            transport,
            auth_token: self.auth_token,
            timeout: self.timeout,
        })
    }
}

impl Default for CatboxClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
