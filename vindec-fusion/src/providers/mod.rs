//! Provider record seam
//!
//! The HTTP clients that talk to the upstream decode providers live outside
//! this crate; the pipeline only sees this trait. `fetch_both` issues the
//! two upstream calls concurrently, each under its own timeout, and maps any
//! failure or timeout to an absent record; the reconciler treats absence as
//! "no values", so a dead provider degrades the decode instead of aborting
//! it. Retrying a failed call is the fetch layer's job, not ours.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{debug, warn};
use vindec_common::vehicle::RawProviderRecord;

/// Boxed future returned by provider fetches.
pub type ProviderFuture<'a> =
    Pin<Box<dyn Future<Output = anyhow::Result<RawProviderRecord>> + Send + 'a>>;

/// One upstream decode provider. Implementations are owned by the fetch
/// layer; their errors are opaque to the core.
pub trait ProviderRecordSource: Send + Sync {
    /// Short provider name for logging ("vpic", "dataone", ...).
    fn name(&self) -> &'static str;

    /// Fetch the raw record for a VIN.
    fn fetch<'a>(&'a self, vin: &'a str) -> ProviderFuture<'a>;
}

/// Fetch both provider records concurrently, each under its own timeout.
pub async fn fetch_both(
    provider_a: &dyn ProviderRecordSource,
    provider_b: &dyn ProviderRecordSource,
    vin: &str,
    timeout: Duration,
) -> (Option<RawProviderRecord>, Option<RawProviderRecord>) {
    tokio::join!(
        fetch_one(provider_a, vin, timeout),
        fetch_one(provider_b, vin, timeout),
    )
}

async fn fetch_one(
    source: &dyn ProviderRecordSource,
    vin: &str,
    timeout: Duration,
) -> Option<RawProviderRecord> {
    match tokio::time::timeout(timeout, source.fetch(vin)).await {
        Ok(Ok(record)) => {
            debug!(provider = source.name(), vin = %vin, "provider record fetched");
            Some(record)
        }
        Ok(Err(err)) => {
            warn!(provider = source.name(), vin = %vin, error = %err, "provider fetch failed");
            None
        }
        Err(_) => {
            warn!(
                provider = source.name(),
                vin = %vin,
                timeout_ms = timeout.as_millis() as u64,
                "provider fetch timed out"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticProvider {
        name: &'static str,
        make: &'static str,
    }

    impl ProviderRecordSource for StaticProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn fetch<'a>(&'a self, _vin: &'a str) -> ProviderFuture<'a> {
            Box::pin(async move {
                Ok(RawProviderRecord {
                    make: Some(self.make.to_string()),
                    ..Default::default()
                })
            })
        }
    }

    struct FailingProvider;

    impl ProviderRecordSource for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn fetch<'a>(&'a self, _vin: &'a str) -> ProviderFuture<'a> {
            Box::pin(async { Err(anyhow::anyhow!("upstream 503")) })
        }
    }

    struct HangingProvider;

    impl ProviderRecordSource for HangingProvider {
        fn name(&self) -> &'static str {
            "hanging"
        }

        fn fetch<'a>(&'a self, _vin: &'a str) -> ProviderFuture<'a> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(RawProviderRecord::default())
            })
        }
    }

    #[tokio::test]
    async fn both_providers_fetched() {
        let a = StaticProvider { name: "a", make: "Porsche" };
        let b = StaticProvider { name: "b", make: "PORSCHE" };

        let (ra, rb) = fetch_both(&a, &b, "WP0BB2Y11SSA73075", Duration::from_secs(1)).await;
        assert_eq!(ra.unwrap().make.as_deref(), Some("Porsche"));
        assert_eq!(rb.unwrap().make.as_deref(), Some("PORSCHE"));
    }

    #[tokio::test]
    async fn failed_provider_becomes_absent() {
        let a = FailingProvider;
        let b = StaticProvider { name: "b", make: "Bentley" };

        let (ra, rb) = fetch_both(&a, &b, "SJAAM2ZV2NC011382", Duration::from_secs(1)).await;
        assert!(ra.is_none());
        assert!(rb.is_some());
    }

    #[tokio::test]
    async fn hung_provider_times_out_to_absent() {
        let a = HangingProvider;
        let b = StaticProvider { name: "b", make: "BMW" };

        let (ra, rb) = fetch_both(&a, &b, "WBA3A5C58DF356731", Duration::from_millis(50)).await;
        assert!(ra.is_none());
        assert!(rb.is_some());
    }
}
