//! Transport abstraction used by models to reach the server.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::sync::error::SyncResult;

/// Boxed future type for transport operations.
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// HTTP methods a model may save with.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SyncMethod {
    /// Create a resource.
    Post,
    /// Replace an existing resource.
    #[default]
    Put,
}

impl SyncMethod {
    /// Get the method name as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for SyncMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outbound request.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncRequest {
    /// HTTP method.
    pub method: SyncMethod,
    /// Absolute path, resolved against the transport's base URL.
    pub path: String,
    /// JSON body.
    pub body: serde_json::Value,
}

/// What the server answered.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded JSON body, when the server sent one.
    pub body: Option<serde_json::Value>,
}

impl SyncResponse {
    /// Build a response with the given status and no body.
    #[must_use]
    pub const fn new(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Check for a 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends requests on behalf of a model.
///
/// Implementations must resolve the returned future only once a response
/// or a failure is known.
pub trait Transport: Send + Sync {
    /// Send one request.
    ///
    /// # Errors
    /// Returns an error if the request cannot be delivered or decoded.
    fn send(&self, request: SyncRequest) -> TransportFuture<'_, SyncResult<SyncResponse>>;
}
