//! Tools module aggregator.

mod core; // ToolDefinition, ToolParameters, builders
mod realtor; // realtor API tools

pub use self::core::{
    ToolDefinition,
    ToolHandler,
    ToolParameters,
    ToolParametersBuilder,
};
pub use realtor::RealtorToolSpec;
