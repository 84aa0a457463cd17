// Brand-specific overrides
//
// Concept: a closed, manufacturer-keyed dispatch that corrects known
// provider gaps after reconciliation. Each handler is a small builder stage
// taking the descriptor by value and returning the corrected value; makes
// without a handler pass through untouched. Keeping the dispatch a closed
// enum keeps the full exception set reviewable in one place.

use tracing::debug;
use vindec_common::vehicle::{TrimCandidate, VehicleDescriptor};

/// Manufacturers with dedicated override handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Brand {
    Tesla,
    Bmw,
    Porsche,
    MercedesBenz,
}

impl Brand {
    /// Dispatch key: uppercased, trimmed make string.
    pub(crate) fn from_make(make: &str) -> Option<Self> {
        match make.trim().to_uppercase().as_str() {
            "TESLA" => Some(Self::Tesla),
            "BMW" => Some(Self::Bmw),
            "PORSCHE" => Some(Self::Porsche),
            "MERCEDES-BENZ" | "MERCEDES BENZ" | "MERCEDES" => Some(Self::MercedesBenz),
            _ => None,
        }
    }
}

/// Apply the manufacturer-specific overrides for the descriptor's make.
/// Unknown makes are a no-op passthrough.
pub fn apply_brand_overrides(descriptor: VehicleDescriptor) -> VehicleDescriptor {
    let brand = descriptor.make.as_deref().and_then(Brand::from_make);
    match brand {
        Some(Brand::Tesla) => apply_tesla(descriptor),
        Some(Brand::Bmw) => apply_bmw(descriptor),
        Some(Brand::Porsche) => apply_porsche(descriptor),
        Some(Brand::MercedesBenz) => apply_mercedes(descriptor),
        None => descriptor,
    }
}

/// Force battery-electric specs onto the descriptor, discarding whatever
/// the providers reported for fuel and engine fields.
fn force_electric_specs(mut descriptor: VehicleDescriptor) -> VehicleDescriptor {
    descriptor.specs.fuel_type_primary = Some("Electric".into());
    descriptor.specs.electrification_level = Some("BEV".into());
    descriptor.specs.transmission_speeds = Some("1".into());
    descriptor.specs.transmission_style = Some("Single-Speed".into());
    descriptor.specs.engine_cylinders = None;
    descriptor.specs.displacement_l = None;
    descriptor
}

/// Tesla: providers are known to mis-tag Tesla records, so electric specs
/// are forced unconditionally. An empty trim list is filled with the fixed
/// per-model lineup.
fn apply_tesla(descriptor: VehicleDescriptor) -> VehicleDescriptor {
    let mut descriptor = force_electric_specs(descriptor);

    if descriptor.trims.is_empty() {
        let model = descriptor
            .model
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();
        let lineup: &[&str] = if model.contains("model 3") {
            &["Standard Range Plus", "Long Range", "Performance"]
        } else if model.contains("model s") || model.contains("model x") {
            &["Long Range", "Plaid"]
        } else if model.contains("model y") {
            &["Long Range", "Performance"]
        } else {
            &["Base"]
        };
        descriptor.trims = lineup.iter().map(|n| TrimCandidate::named(*n)).collect();
        debug!(model = %model, count = descriptor.trims.len(), "tesla trim lineup synthesized");
    }

    descriptor
}

/// BMW: trim usually lives in the series field; when no trim list arrived,
/// synthesize a single entry from it.
fn apply_bmw(mut descriptor: VehicleDescriptor) -> VehicleDescriptor {
    if descriptor.trims.is_empty() {
        let name = non_empty(descriptor.specs.trim.as_deref())
            .or_else(|| non_empty(descriptor.specs.series.as_deref()))
            .unwrap_or("Base")
            .to_string();
        debug!(trim = %name, "bmw trim synthesized");
        descriptor.trims = vec![TrimCandidate::named(name)];
    }
    descriptor
}

/// Porsche: the Taycan is the only battery-electric line; everything else
/// keeps the provider-reported fuel type.
fn apply_porsche(descriptor: VehicleDescriptor) -> VehicleDescriptor {
    let is_taycan = descriptor
        .model
        .as_deref()
        .is_some_and(|m| m.to_lowercase().contains("taycan"));
    if is_taycan {
        force_electric_specs(descriptor)
    } else {
        descriptor
    }
}

/// Mercedes-Benz: the ML line has chronically incomplete provider data.
/// Documented manufacturer defaults fill what the providers left unset.
fn apply_mercedes(mut descriptor: VehicleDescriptor) -> VehicleDescriptor {
    if !is_ml_line(descriptor.model.as_deref()) {
        return descriptor;
    }

    if descriptor.trims.is_empty() {
        debug!("mercedes ml trim synthesized");
        descriptor.trims = vec![TrimCandidate::named("ML350")];
    }
    if non_empty(descriptor.specs.transmission_speeds.as_deref()).is_none() {
        descriptor.specs.transmission_speeds = Some("7".into());
    }
    if non_empty(descriptor.specs.transmission_style.as_deref()).is_none() {
        descriptor.specs.transmission_style = Some("Automatic".into());
    }
    if non_empty(descriptor.specs.drive_type.as_deref()).is_none() {
        descriptor.specs.drive_type = Some("AWD".into());
    }
    descriptor
}

/// ML detection: any whitespace-separated model token starting with "ML"
/// ("ML350", "ML 350", "ML-Class"), avoiding bare-substring false positives.
fn is_ml_line(model: Option<&str>) -> bool {
    model
        .unwrap_or_default()
        .split_whitespace()
        .any(|token| token.to_ascii_uppercase().starts_with("ML"))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
