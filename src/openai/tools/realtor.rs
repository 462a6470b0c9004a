//! Realtor API operations exposed as agent tools.
//!
//! Every tool takes string arguments and returns JSON:
//! * record sets (search, details, schools, features, surroundings) as an array of flat objects
//! * address / history / description as an object
//! * photos as an array of URL strings
//! * property id and commute time as a plain string
//!
//! A rejected upstream call gives the empty value of that shape. Unexpected
//! response shapes and transport failures surface as handler errors.

use std::sync::Arc;

use color_eyre::{eyre::eyre, Result};
use serde_json::Value;

use crate::openai::tools::{ToolDefinition, ToolParametersBuilder};
use crate::realtor::RealtorClient;

fn string_arg<'a>(args: &'a Value, name: &str) -> Result<&'a str> {
    match args.get(name).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(s.trim()),
        _ => Err(eyre!("'{name}' is required and must be a non-empty string")),
    }
}

fn single_arg_tool<F>(
    name: &'static str,
    description: &'static str,
    arg: &'static str,
    arg_description: &'static str,
    client: &Arc<RealtorClient>,
    call: F,
) -> ToolDefinition
where
    F: Fn(&RealtorClient, &str) -> Result<Value> + Send + Sync + 'static,
{
    let parameters = ToolParametersBuilder::new_object()
        .add_string(arg, Some(arg_description))
        .required(arg)
        .additional_properties(false)
        .build();
    let client = Arc::clone(client);
    ToolDefinition::new(
        name,
        description,
        parameters,
        Arc::new(move |args: &Value| call(client.as_ref(), string_arg(args, arg)?)),
    )
}

const ADDRESS: &str = "Free-text property address, e.g. '123 Main St, Austin, TX 78701'";
const PROPERTY_ID: &str = "Property id returned by get_property_id or a listing search";

/// Tool set over one [`RealtorClient`]; the client carries the credential.
#[derive(Debug, Clone)]
pub struct RealtorToolSpec {
    client: Arc<RealtorClient>,
}

impl RealtorToolSpec {
    pub const TOOL_NAMES: [&'static str; 12] = [
        "get_property_id",
        "get_listings_by_postal_code",
        "get_similar_listings_by_property_id",
        "get_listing_details_by_property_id",
        "get_nearby_school_info_by_property_id",
        "get_home_details_by_property_id",
        "get_property_address_by_property_id",
        "get_property_history_by_property_id",
        "get_listing_description_by_property_id",
        "get_listing_photos_by_property_id",
        "get_listing_surroundings_detail_by_property_id",
        "get_drive_commute_time_from_listing",
    ];

    pub fn new(client: RealtorClient) -> Self {
        Self { client: Arc::new(client) }
    }

    /// All tools, in [`Self::TOOL_NAMES`] order.
    pub fn tools(&self) -> Vec<ToolDefinition> {
        let c = &self.client;
        vec![
            single_arg_tool(
                "get_property_id",
                "Given a property address, returns the property id.",
                "address",
                ADDRESS,
                c,
                |c, address| Ok(Value::String(c.resolve_property_id(address)?)),
            ),
            single_arg_tool(
                "get_listings_by_postal_code",
                "Given a postal code, returns a table of properties for sale and their characteristics.",
                "postal_code",
                "US postal (ZIP) code",
                c,
                |c, code| Ok(serde_json::to_value(c.search_by_postal_code(code)?)?),
            ),
            single_arg_tool(
                "get_similar_listings_by_property_id",
                "Given a property id, returns a table of similar properties and their characteristics.",
                "property_id",
                PROPERTY_ID,
                c,
                |c, id| Ok(serde_json::to_value(c.find_similar(id)?)?),
            ),
            single_arg_tool(
                "get_listing_details_by_property_id",
                "Given a property id, returns a table of the property's characteristics.",
                "property_id",
                PROPERTY_ID,
                c,
                |c, id| Ok(serde_json::to_value(c.get_details(id)?)?),
            ),
            single_arg_tool(
                "get_nearby_school_info_by_property_id",
                "Given a property id, returns a table of schools near the property.",
                "property_id",
                PROPERTY_ID,
                c,
                |c, id| Ok(serde_json::to_value(c.get_nearby_schools(id)?)?),
            ),
            single_arg_tool(
                "get_home_details_by_property_id",
                "Given a property id, returns home detail categories: heating and cooling, exterior and lot features, land info, homeowners association, multi-unit info, rental info, other property info, building and construction, utilities.",
                "property_id",
                PROPERTY_ID,
                c,
                |c, id| Ok(serde_json::to_value(c.get_home_feature_categories(id)?)?),
            ),
            single_arg_tool(
                "get_property_address_by_property_id",
                "Given a property id, returns the property's street, city, state and postal code.",
                "property_id",
                PROPERTY_ID,
                c,
                |c, id| Ok(Value::Object(c.get_address(id)?)),
            ),
            single_arg_tool(
                "get_property_history_by_property_id",
                "Given a property id, returns the latest buy/sell history event, including 'date', 'event_name' and 'price'.",
                "property_id",
                PROPERTY_ID,
                c,
                |c, id| Ok(Value::Object(c.get_transaction_history(id)?)),
            ),
            single_arg_tool(
                "get_listing_description_by_property_id",
                "Given a property id, returns the listing description: baths, beds, garage, pool, sqft, lot size, stories, type, year built, listing text and similar fields that are set.",
                "property_id",
                PROPERTY_ID,
                c,
                |c, id| Ok(Value::Object(c.get_listing_description(id)?)),
            ),
            single_arg_tool(
                "get_listing_photos_by_property_id",
                "Given a property id, returns a list of photo links for the property.",
                "property_id",
                PROPERTY_ID,
                c,
                |c, id| Ok(serde_json::to_value(c.get_photos(id)?)?),
            ),
            single_arg_tool(
                "get_listing_surroundings_detail_by_property_id",
                "Given a property id, returns a table of details on the area surrounding the property (noise categories).",
                "property_id",
                PROPERTY_ID,
                c,
                |c, id| Ok(serde_json::to_value(c.get_surroundings(id)?)?),
            ),
            self.commute_tool(),
        ]
    }

    fn commute_tool(&self) -> ToolDefinition {
        let parameters = ToolParametersBuilder::new_object()
            .add_string("property_id", Some(PROPERTY_ID))
            .add_string("destination_address", Some("Address to drive to from the property"))
            .required("property_id")
            .required("destination_address")
            .additional_properties(false)
            .build();
        let client = Arc::clone(&self.client);
        ToolDefinition::new(
            "get_drive_commute_time_from_listing",
            "Given a property id and destination address, returns a string describing the driving commute time.",
            parameters,
            Arc::new(move |args: &Value| {
                let id = string_arg(args, "property_id")?;
                let destination = string_arg(args, "destination_address")?;
                Ok(Value::String(client.get_commute_time(id, destination)?))
            }),
        )
    }
}
