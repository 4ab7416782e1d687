//! Sending model state to the server.
//!
//! Models never talk to the network directly: they hand a [`SyncRequest`]
//! to a [`Transport`]. [`HttpTransport`] goes over HTTP with reqwest,
//! [`RecordingTransport`] captures requests in memory for tests.

pub mod error;
pub mod http;
pub mod recording;
pub mod transport;

pub use error::{SyncError, SyncResult};
pub use http::HttpTransport;
pub use recording::RecordingTransport;
pub use transport::{SyncMethod, SyncRequest, SyncResponse, Transport, TransportFuture};
