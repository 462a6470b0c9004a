use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::error::{RealtorError, Result};
use super::transport::{ApiRequest, ReqwestTransport, Transport};
use crate::config::RealtorConfig;

/// Stateless client for the realtor listings API.
///
/// Operations are spread over `identity`, `search` and `detail`. Each issues one
/// request; a non-2xx status yields the empty value of the operation's result
/// shape, never an error. Cheap to share across threads behind an `Arc`.
#[derive(Clone)]
pub struct RealtorClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for RealtorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtorClient").finish_non_exhaustive()
    }
}

impl RealtorClient {
    /// Client over the real API using the blocking reqwest transport.
    pub fn new(config: &RealtorConfig) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send `request` and parse the body. `Ok(None)` means a non-2xx status.
    pub(crate) fn fetch(&self, request: ApiRequest) -> Result<Option<Value>> {
        let endpoint = request.endpoint.path();
        debug!(target: "realtor", endpoint, params = request.query.len(), "realtor_request");
        let reply = self.transport.send(&request)?;
        if !reply.is_success() {
            warn!(target: "realtor", endpoint, status = reply.status, "realtor_non_success_status");
            return Ok(None);
        }
        let parsed = serde_json::from_str(&reply.body)
            .map_err(|source| RealtorError::Json { endpoint, source })?;
        Ok(Some(parsed))
    }
}
