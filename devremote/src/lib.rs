//! # FV1 DevRemote client
//!
//! Pushes compiled FV-1 programs to a DevRemote board over HTTP:
//!
//! - `POST /uploadhex?f=` with the image as multipart field `file1`
//! - `GET /enable?file=/<name>` to load it into the DSP
//! - `GET /trigrefresh` so connected browsers pick up the change
//!
//! Response bodies are never parsed.

pub mod client;
pub mod error;
pub mod sanitize;

pub use client::DevRemoteClient;
pub use error::{DevRemoteError, Result};
pub use sanitize::sanitize;
