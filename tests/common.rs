#![allow(dead_code)]

use once_cell::sync::Lazy;
use std::sync::{Arc, Once};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use realtor_agent::realtor::{CannedTransport, RealtorClient};

static START: Once = Once::new();
static GUARD: Lazy<std::sync::Mutex<Option<tracing_appender::non_blocking::WorkerGuard>>> =
    Lazy::new(|| std::sync::Mutex::new(None));

/// Initialize test environment: dotenv and tracing (test writer + rolling file).
/// Idempotent: safe to call multiple times.
pub fn init() {
    START.call_once(|| {
        let _ = dotenvy::dotenv();
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("debug"))
            .expect("env filter");

        let file_appender = rolling::daily("logs", "tests.log");
        let (file_nb, guard) = tracing_appender::non_blocking(file_appender);
        *GUARD.lock().unwrap() = Some(guard);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_test_writer())
            .with(fmt::layer().with_ansi(false).with_target(true).with_writer(file_nb))
            .init();

        tracing::info!(target: "test_init", "test tracing initialized");
    });
}

/// Client over `transport`, keeping a handle for request assertions.
pub fn client(transport: CannedTransport) -> (RealtorClient, Arc<CannedTransport>) {
    let transport = Arc::new(transport);
    (RealtorClient::with_transport(transport.clone()), transport)
}
