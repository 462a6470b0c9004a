//! In-memory transport for tests and offline demos.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::error::{RealtorError, Result};
use super::transport::{ApiRequest, Endpoint, HttpReply, Transport};

enum Canned {
    Reply(HttpReply),
    Unreachable(String),
}

/// Replays a fixed reply per endpoint and records every request it sees.
///
/// Endpoints without a configured reply answer `404` with an empty body.
#[derive(Default)]
pub struct CannedTransport {
    replies: Mutex<HashMap<Endpoint, Canned>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl CannedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `endpoint` with `status` and the serialized `body`.
    pub fn reply(self, endpoint: Endpoint, status: u16, body: Value) -> Self {
        self.reply_raw(endpoint, status, body.to_string())
    }

    pub fn reply_raw<S: Into<String>>(self, endpoint: Endpoint, status: u16, body: S) -> Self {
        self.lock_replies().insert(endpoint, Canned::Reply(HttpReply::new(status, body)));
        self
    }

    /// Fail `endpoint` before any status arrives.
    pub fn unreachable<S: Into<String>>(self, endpoint: Endpoint, message: S) -> Self {
        self.lock_replies().insert(endpoint, Canned::Unreachable(message.into()));
        self
    }

    /// Snapshot of requests sent so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        match self.requests.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests().pop()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, HashMap<Endpoint, Canned>> {
        self.replies.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Transport for CannedTransport {
    fn send(&self, request: &ApiRequest) -> Result<HttpReply> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());
        match self.lock_replies().get(&request.endpoint) {
            Some(Canned::Reply(reply)) => Ok(reply.clone()),
            Some(Canned::Unreachable(message)) => Err(RealtorError::Transport {
                endpoint: request.endpoint.path(),
                message: message.clone(),
            }),
            None => Ok(HttpReply::new(404, "")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_requests_and_defaults_to_404() {
        let t = CannedTransport::new().reply(Endpoint::Detail, 200, json!({"ok": true}));
        let r1 = t.send(&ApiRequest::get(Endpoint::Detail)).unwrap();
        assert_eq!(r1.status, 200);
        let r2 = t.send(&ApiRequest::get(Endpoint::Photos)).unwrap();
        assert_eq!(r2.status, 404);
        assert_eq!(t.requests().len(), 2);
        assert_eq!(t.last_request().unwrap().endpoint, Endpoint::Photos);
    }

    #[test]
    fn unreachable_endpoint_errors() {
        let t = CannedTransport::new().unreachable(Endpoint::List, "connection refused");
        let err = t.send(&ApiRequest::get(Endpoint::List)).unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
