//! Blocking client for the [Catbox](https://catbox.moe) file host and its temporary-storage
//! sibling, Litterbox.
//!
//! Every call is a single form POST. The response is either a plain-text URL or shortcode, or
//! a [`CatboxError`]. Nothing is retried or cached.
//!
//! ```no_run
//! use catbox_client::{CatboxClient, RetentionPeriod};
//!
//! # fn main() -> Result<(), catbox_client::CatboxError> {
//! let client = CatboxClient::builder().auth_token("my-userhash").build()?;
//!
//! let url = client.upload_file("photo.png")?;
//! let name = url.rsplit('/').next().unwrap_or_default();
//! let shortcode = client.create_album(&[name], "Holiday", "Beach photos")?;
//!
//! let temporary = client.upload_to_litterbox("dump.log", RetentionPeriod::OneDay)?;
//! println!("{url} in album {shortcode}, log at {temporary}");
//! # Ok(())
//! # }
//! ```
//!
//! Requests are logged through [`tracing`]; install a subscriber to see them.

mod client;
mod error;
mod models;
pub mod operations;
pub mod transport;
mod utils;

#[cfg(test)]
mod testing;

pub use client::{CatboxClient, CatboxClientBuilder};
pub use error::{CatboxError, ErrorKind, Operation};
pub use models::{AuthToken, RetentionPeriod, UploadTarget};
pub use transport::{Endpoint, FilePart, FormRequest, HttpTransport, Transport};
