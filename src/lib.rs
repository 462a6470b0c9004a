pub mod config;
pub mod openai;
pub mod realtor;

pub use config::{Config, RealtorConfig};
pub use openai::{RealtorToolSpec, ToolDefinition};
pub use realtor::{RealtorClient, RealtorError};
