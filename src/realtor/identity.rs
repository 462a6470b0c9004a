use serde_json::Value;
use tracing::instrument;

use super::client::RealtorClient;
use super::error::{RealtorError, Result};
use super::flatten::{flatten_records, lookup};
use super::transport::{ApiRequest, Endpoint};

/// Number of autocomplete suggestions requested per lookup.
pub const AUTOCOMPLETE_LIMIT: u32 = 10;

impl RealtorClient {
    /// Resolve a free-text address to a property id (`mpr_id`).
    ///
    /// Returns an empty string when the autocomplete call is rejected, and
    /// [`RealtorError::NoAddressMatch`] when no suggestion is address-typed.
    #[instrument(name = "resolve_property_id", skip(self), target = "realtor")]
    pub fn resolve_property_id(&self, address: &str) -> Result<String> {
        let request = ApiRequest::get(Endpoint::AutoComplete)
            .query("input", address)
            .query("limit", AUTOCOMPLETE_LIMIT.to_string());
        let Some(body) = self.fetch(request)? else {
            return Ok(String::new());
        };

        let suggestions = flatten_records(lookup(&body, &["autocomplete"])?, "autocomplete")?;
        let matched = suggestions
            .iter()
            .find(|s| s.get("area_type").and_then(Value::as_str) == Some("address"))
            .ok_or_else(|| RealtorError::NoAddressMatch { address: address.to_string() })?;

        match matched.get("mpr_id") {
            Some(Value::String(id)) => Ok(id.clone()),
            Some(v @ Value::Number(_)) => Ok(v.to_string()),
            _ => Err(RealtorError::shape("autocomplete[].mpr_id")),
        }
    }
}
