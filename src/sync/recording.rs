//! In-memory transport that records requests instead of sending them.
//!
//! Stands in for the network in tests: every request is captured and
//! answered with a canned response (or a canned failure).

use tokio::sync::Mutex;

use crate::sync::error::{SyncError, SyncResult};
use crate::sync::transport::{SyncRequest, SyncResponse, Transport, TransportFuture};

#[derive(Clone, Debug)]
enum Reply {
    Respond(SyncResponse),
    Fail(String),
}

/// Transport that captures outbound requests.
#[derive(Debug)]
pub struct RecordingTransport {
    reply: Reply,
    requests: Mutex<Vec<SyncRequest>>,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingTransport {
    /// Create a transport answering every request with `200` and no body.
    #[must_use]
    pub fn new() -> Self {
        Self::with_response(SyncResponse::new(200))
    }

    /// Create a transport answering every request with `response`.
    #[must_use]
    pub fn with_response(response: SyncResponse) -> Self {
        Self {
            reply: Reply::Respond(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a transport failing every request with a transport error.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Reply::Fail(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// All requests seen so far, oldest first.
    pub async fn requests(&self) -> Vec<SyncRequest> {
        self.requests.lock().await.clone()
    }

    /// The most recent request, if any.
    pub async fn last_request(&self) -> Option<SyncRequest> {
        self.requests.lock().await.last().cloned()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: SyncRequest) -> TransportFuture<'_, SyncResult<SyncResponse>> {
        Box::pin(async move {
            self.requests.lock().await.push(request);
            match &self.reply {
                Reply::Respond(response) => Ok(response.clone()),
                Reply::Fail(message) => Err(SyncError::Transport(message.clone())),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::transport::SyncMethod;

    fn request(path: &str) -> SyncRequest {
        SyncRequest {
            method: SyncMethod::Put,
            path: path.to_string(),
            body: serde_json::json!({"key": "c"}),
        }
    }

    #[tokio::test]
    async fn test_records_in_order() {
        let transport = RecordingTransport::new();
        let _ = transport.send(request("/a/")).await;
        let _ = transport.send(request("/b/")).await;

        let paths: Vec<String> = transport
            .requests()
            .await
            .into_iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(paths, vec!["/a/", "/b/"]);
    }

    #[tokio::test]
    async fn test_failing_still_records() {
        let transport = RecordingTransport::failing("offline");
        let result = transport.send(request("/a/")).await;

        assert!(matches!(result, Err(SyncError::Transport(ref m)) if m == "offline"));
        assert_eq!(transport.requests().await.len(), 1);
    }
}
