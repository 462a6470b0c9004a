use realtor_agent::config::{Config, RealtorConfig, REALTOR_API_HOST};
mod common;

#[ctor::ctor]
fn _init() { common::init(); }

#[test]
fn agent_config_defaults() {
    let c = Config::new();
    assert_eq!(c.model, "gpt-4o-mini");
    assert_eq!(c.max_tokens, 2000);
    assert_eq!(c.max_loops, 5);
}

#[test]
fn realtor_config_defaults_to_rapidapi_host() {
    let c = RealtorConfig::new("key-123");
    assert_eq!(c.host, REALTOR_API_HOST);
    assert_eq!(c.base_url, "https://realtor.p.rapidapi.com");
    assert!(c.user_agent.starts_with("realtor_agent/"));
    assert_eq!(c.api_key.expose(), "key-123");
}

#[test]
fn realtor_config_debug_hides_key() {
    let c = RealtorConfig::new("key-123");
    let debug = format!("{c:?}");
    assert!(!debug.contains("key-123"), "credential leaked: {debug}");
}

#[test]
fn base_url_override_trims_trailing_slash() {
    let c = RealtorConfig::new("k").with_base_url("http://localhost:8080/");
    assert_eq!(c.base_url, "http://localhost:8080");
}
