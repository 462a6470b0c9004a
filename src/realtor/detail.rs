//! Per-property lookups: the shared detail endpoint plus the photo,
//! surroundings and commute endpoints.

use serde_json::{Map, Value};
use tracing::instrument;

use super::client::RealtorClient;
use super::error::{RealtorError, Result};
use super::flatten::{flatten, flatten_records, is_truthy, lookup, lookup_object, ListingRecord};
use super::transport::{ApiRequest, Endpoint};

/// Returned by [`RealtorClient::get_commute_time`] when the API rejects the call.
pub const COMMUTE_TIME_UNKNOWN: &str = "commute time unknown";

/// Only driving commutes are requested.
pub const TRANSPORTATION_TYPE: &str = "driving";

const HOME: [&str; 2] = ["data", "home"];

fn home_path<'a>(rest: &[&'a str]) -> Vec<&'a str> {
    let mut path: Vec<&'a str> = HOME.to_vec();
    path.extend_from_slice(rest);
    path
}

fn records_at(body: &Value, rest: &[&str]) -> Result<Vec<ListingRecord>> {
    let path = home_path(rest);
    flatten_records(lookup(body, &path)?, &path.join("."))
}

impl RealtorClient {
    fn fetch_detail(&self, property_id: &str) -> Result<Option<Value>> {
        self.fetch(ApiRequest::get(Endpoint::Detail).query("property_id", property_id))
    }

    /// The whole home object as a single flattened record.
    #[instrument(name = "get_details", skip(self), target = "realtor")]
    pub fn get_details(&self, property_id: &str) -> Result<Vec<ListingRecord>> {
        match self.fetch_detail(property_id)? {
            Some(body) => Ok(vec![flatten(lookup_object(&body, &HOME)?)]),
            None => Ok(Vec::new()),
        }
    }

    #[instrument(name = "get_nearby_schools", skip(self), target = "realtor")]
    pub fn get_nearby_schools(&self, property_id: &str) -> Result<Vec<ListingRecord>> {
        match self.fetch_detail(property_id)? {
            Some(body) => records_at(&body, &["nearby_schools", "schools"]),
            None => Ok(Vec::new()),
        }
    }

    /// Categorised home details: heating and cooling, exterior and lot
    /// features, land info, HOA, multi-unit and rental info, building and
    /// construction, utilities.
    #[instrument(name = "get_home_feature_categories", skip(self), target = "realtor")]
    pub fn get_home_feature_categories(&self, property_id: &str) -> Result<Vec<ListingRecord>> {
        match self.fetch_detail(property_id)? {
            Some(body) => records_at(&body, &["details"]),
            None => Ok(Vec::new()),
        }
    }

    /// Address sub-object as returned, keys untouched.
    #[instrument(name = "get_address", skip(self), target = "realtor")]
    pub fn get_address(&self, property_id: &str) -> Result<Map<String, Value>> {
        match self.fetch_detail(property_id)? {
            Some(body) => Ok(lookup_object(&body, &home_path(&["location", "address"]))?.clone()),
            None => Ok(Map::new()),
        }
    }

    /// Most recent property history event without its nested `listing`.
    #[instrument(name = "get_transaction_history", skip(self), target = "realtor")]
    pub fn get_transaction_history(&self, property_id: &str) -> Result<Map<String, Value>> {
        let Some(body) = self.fetch_detail(property_id)? else {
            return Ok(Map::new());
        };
        let path = home_path(&["property_history"]);
        let first = lookup(&body, &path)?
            .get(0)
            .and_then(Value::as_object)
            .ok_or_else(|| RealtorError::shape(format!("{}[0]", path.join("."))))?;
        Ok(first
            .iter()
            .filter(|(k, _)| k.as_str() != "listing")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    /// Listing description with every falsy field removed.
    #[instrument(name = "get_listing_description", skip(self), target = "realtor")]
    pub fn get_listing_description(&self, property_id: &str) -> Result<Map<String, Value>> {
        let Some(body) = self.fetch_detail(property_id)? else {
            return Ok(Map::new());
        };
        let description = lookup_object(&body, &home_path(&["description"]))?;
        Ok(description
            .iter()
            .filter(|(_, v)| is_truthy(v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    /// Photo URLs of the first search result.
    #[instrument(name = "get_photos", skip(self), target = "realtor")]
    pub fn get_photos(&self, property_id: &str) -> Result<Vec<String>> {
        let request = ApiRequest::get(Endpoint::Photos).query("property_id", property_id);
        let Some(body) = self.fetch(request)? else {
            return Ok(Vec::new());
        };
        let photos = lookup(&body, &["data", "home_search", "results"])?
            .get(0)
            .and_then(|first| first.get("photos"))
            .and_then(Value::as_array)
            .ok_or_else(|| RealtorError::shape("data.home_search.results[0].photos"))?;
        photos
            .iter()
            .enumerate()
            .map(|(i, photo)| {
                photo
                    .get("href")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| RealtorError::shape(format!("data.home_search.results[0].photos[{i}].href")))
            })
            .collect()
    }

    /// Noise categories around the property.
    #[instrument(name = "get_surroundings", skip(self), target = "realtor")]
    pub fn get_surroundings(&self, property_id: &str) -> Result<Vec<ListingRecord>> {
        let request = ApiRequest::get(Endpoint::Surroundings).query("property_id", property_id);
        match self.fetch(request)? {
            Some(body) => records_at(&body, &["local", "noise", "noise_categories"]),
            None => Ok(Vec::new()),
        }
    }

    /// Driving time from the property to `destination_address`, verbatim
    /// (for example `"18 mins"`).
    #[instrument(name = "get_commute_time", skip(self), target = "realtor")]
    pub fn get_commute_time(&self, property_id: &str, destination_address: &str) -> Result<String> {
        let request = ApiRequest::get(Endpoint::CommuteTime)
            .query("destination_address", destination_address)
            .query("property_id", property_id)
            .query("transportation_type", TRANSPORTATION_TYPE);
        let Some(body) = self.fetch(request)? else {
            return Ok(COMMUTE_TIME_UNKNOWN.to_string());
        };
        let path = home_path(&["commute_time", "duration", "text"]);
        lookup(&body, &path)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| RealtorError::shape(path.join(".")))
    }
}
