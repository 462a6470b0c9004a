use serde_json::json;
use tracing::{debug, instrument};

use super::client::RealtorClient;
use super::error::Result;
use super::flatten::{flatten_records, lookup, ListingRecord};
use super::transport::{ApiRequest, Endpoint};

pub const SEARCH_PAGE_SIZE: u32 = 200;
pub const SIMILAR_HOMES_LIMIT: u32 = 10;

impl RealtorClient {
    /// For-sale and ready-to-build listings in a postal code, newest first.
    /// Only the first page of [`SEARCH_PAGE_SIZE`] results is fetched.
    #[instrument(name = "search_by_postal_code", skip(self), target = "realtor")]
    pub fn search_by_postal_code(&self, postal_code: &str) -> Result<Vec<ListingRecord>> {
        let body = json!({
            "limit": SEARCH_PAGE_SIZE,
            "offset": 0,
            "postal_code": postal_code,
            "status": ["for_sale", "ready_to_build"],
            "sort": { "direction": "desc", "field": "list_date" }
        });
        let Some(resp) = self.fetch(ApiRequest::post(Endpoint::List, body))? else {
            return Ok(Vec::new());
        };
        const PATH: [&str; 3] = ["data", "home_search", "results"];
        let records = flatten_records(lookup(&resp, &PATH)?, &PATH.join("."))?;
        debug!(target: "realtor", count = records.len(), "search_results");
        Ok(records)
    }

    /// Up to [`SIMILAR_HOMES_LIMIT`] for-sale homes similar to `property_id`.
    #[instrument(name = "find_similar", skip(self), target = "realtor")]
    pub fn find_similar(&self, property_id: &str) -> Result<Vec<ListingRecord>> {
        let request = ApiRequest::get(Endpoint::SimilarHomes)
            .query("property_id", property_id)
            .query("limit", SIMILAR_HOMES_LIMIT.to_string())
            .query("status", "for_sale");
        let Some(resp) = self.fetch(request)? else {
            return Ok(Vec::new());
        };
        const PATH: [&str; 4] = ["data", "home", "related_homes", "results"];
        flatten_records(lookup(&resp, &PATH)?, &PATH.join("."))
    }
}
