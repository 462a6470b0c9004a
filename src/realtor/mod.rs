//! Client for the realtor listings API on RapidAPI.

mod client;
mod credential;
mod detail;
mod error;
mod flatten;
mod identity;
pub mod mock;
mod search;
mod transport;

pub use client::RealtorClient;
pub use credential::Credential;
pub use detail::{COMMUTE_TIME_UNKNOWN, TRANSPORTATION_TYPE};
pub use error::{RealtorError, Result};
pub use flatten::{flatten, flatten_records, is_truthy, ListingRecord, KEY_SEPARATOR};
pub use identity::AUTOCOMPLETE_LIMIT;
pub use mock::CannedTransport;
pub use search::{SEARCH_PAGE_SIZE, SIMILAR_HOMES_LIMIT};
pub use transport::{ApiRequest, Endpoint, HttpReply, Method, ReqwestTransport, Transport};
