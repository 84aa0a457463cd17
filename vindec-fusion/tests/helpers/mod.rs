//! Shared helpers for vindec-fusion integration tests
#![allow(dead_code)] // not every test binary uses every helper

use std::sync::Once;

use vindec_common::vehicle::RawProviderRecord;
use vindec_fusion::providers::{ProviderFuture, ProviderRecordSource};

static INIT: Once = Once::new();

/// Initialize test logging once. Honors RUST_LOG; quiet by default.
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// In-memory provider that returns a fixed record.
pub struct FakeProvider {
    pub name: &'static str,
    pub record: RawProviderRecord,
}

impl ProviderRecordSource for FakeProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn fetch<'a>(&'a self, _vin: &'a str) -> ProviderFuture<'a> {
        let record = self.record.clone();
        Box::pin(async move { Ok(record) })
    }
}

/// In-memory provider that always fails, like an upstream outage.
pub struct BrokenProvider;

impl ProviderRecordSource for BrokenProvider {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn fetch<'a>(&'a self, _vin: &'a str) -> ProviderFuture<'a> {
        Box::pin(async { Err(anyhow::anyhow!("connection refused")) })
    }
}
