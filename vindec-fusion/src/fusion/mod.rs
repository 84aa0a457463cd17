//! Decode fusion pipeline
//!
//! Reconciles the two provider records for a VIN into one canonical vehicle,
//! stage by stage: source reconciliation → brand overrides → trim dedup →
//! synthetic-trim injection → body-style classification → canonical
//! synthesis. Every stage is a pure function over request-scoped values; the
//! pipeline holds no cross-request state and is safe to run concurrently for
//! unrelated requests.

pub mod body_style;
pub mod brand_overrides;
pub mod canonical;
pub mod field_priority;
pub mod injectors;
pub mod reconciler;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use vindec_common::config::{TieBreakProvider, TomlConfig};
use vindec_common::vehicle::{CanonicalVehicle, RawProviderRecord, TrimResolution};

pub use reconciler::{FieldComparison, FieldWinner};

/// Diagnostics produced alongside the canonical vehicle: which tier supplied
/// the trim, and how each field compared across providers. A pure reporting
/// side-channel for offline provider-quality auditing.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeReport {
    pub request_id: Uuid,
    pub vin: String,
    pub decoded_at: DateTime<Utc>,
    pub trim_resolution: TrimResolution,
    pub comparisons: Vec<FieldComparison>,
}

/// Canonical vehicle plus the diagnostics report for one decode request.
#[derive(Debug, Clone)]
pub struct DecodeOutcome {
    pub vehicle: CanonicalVehicle,
    pub report: DecodeReport,
}

/// The decode pipeline with its (small) configuration.
#[derive(Debug, Clone)]
pub struct DecodePipeline {
    tie_break: TieBreakProvider,
}

impl Default for DecodePipeline {
    fn default() -> Self {
        Self {
            tie_break: TieBreakProvider::A,
        }
    }
}

impl DecodePipeline {
    pub fn new(tie_break: TieBreakProvider) -> Self {
        Self { tie_break }
    }

    pub fn from_config(config: &TomlConfig) -> Self {
        Self::new(config.tie_break_provider)
    }

    /// Run the full pipeline for one request.
    ///
    /// Either provider record may be absent; `best_match` is the optional
    /// externally-computed trim candidate. This never fails: malformed or
    /// missing data degrades to empty/"Unknown" fields.
    pub fn decode(
        &self,
        vin: &str,
        provider_a: Option<&RawProviderRecord>,
        provider_b: Option<&RawProviderRecord>,
        best_match: Option<&str>,
    ) -> DecodeOutcome {
        let (descriptor, comparisons, trim_resolution) =
            reconciler::reconcile(provider_a, provider_b, best_match, self.tie_break);

        let descriptor = brand_overrides::apply_brand_overrides(descriptor);

        let trims = injectors::dedup_trims(descriptor.trims.clone());
        let trims = injectors::inject_amg_trim(&descriptor, trims);
        let trims = injectors::inject_gt3_rs_trim(&descriptor, trims);

        let body_style = body_style::classify(descriptor.specs.body_class.as_deref());

        let vehicle = canonical::synthesize(&descriptor, trims, body_style);

        let report = DecodeReport {
            request_id: Uuid::new_v4(),
            vin: vin.to_string(),
            decoded_at: Utc::now(),
            trim_resolution,
            comparisons,
        };

        info!(
            vin = %report.vin,
            request_id = %report.request_id,
            make = %vehicle.make,
            model = %vehicle.model,
            trim = %vehicle.trim,
            body_style = vehicle.body_style_label(),
            trim_source = ?report.trim_resolution.source,
            "decode complete"
        );

        DecodeOutcome { vehicle, report }
    }
}

/// Decode with default pipeline settings (tie-break provider A).
pub fn decode(
    vin: &str,
    provider_a: Option<&RawProviderRecord>,
    provider_b: Option<&RawProviderRecord>,
    best_match: Option<&str>,
) -> DecodeOutcome {
    DecodePipeline::default().decode(vin, provider_a, provider_b, best_match)
}
