//! Remote fetch adapter: turns a tool request into an authenticated GET
//! against the upstream API and returns the JSON body untouched.

pub mod client;
pub mod error;
pub mod request;

pub use client::RemoteFetchClient;
pub use error::{AdapterError, UpstreamError};
pub use request::{DEFAULT_DOMAIN, DEFAULT_NUM_RESULTS, ToolName, ToolRequest};
