// Post-processing trim injectors
//
// Concept: narrow, composable passes that run after trim-list deduplication
// and may prepend a single synthetic trim entry to correct a known provider
// gap. Injectors never remove entries and are idempotent: the
// "already contains" guard blocks duplicate injection on a second run.

use std::collections::HashSet;

use tracing::debug;
use vindec_common::vehicle::{TrimCandidate, VehicleDescriptor};

use crate::fusion::brand_overrides::Brand;

/// Case-insensitive, order-preserving deduplication of a trim list.
/// The first occurrence of a name wins.
pub fn dedup_trims(trims: Vec<TrimCandidate>) -> Vec<TrimCandidate> {
    let mut seen: HashSet<String> = HashSet::new();
    trims
        .into_iter()
        .filter(|t| seen.insert(t.name.trim().to_lowercase()))
        .collect()
}

/// Mercedes-Benz AMG injection: when the series designation carries "AMG"
/// but no trim in the list does, prepend a synthetic trim built from the
/// series string.
pub fn inject_amg_trim(
    descriptor: &VehicleDescriptor,
    trims: Vec<TrimCandidate>,
) -> Vec<TrimCandidate> {
    if brand_of(descriptor) != Some(Brand::MercedesBenz) {
        return trims;
    }
    let Some(series) = descriptor
        .specs
        .series
        .as_deref()
        .map(str::trim)
        .filter(|s| s.to_lowercase().contains("amg"))
    else {
        return trims;
    };
    if trims.iter().any(|t| t.name.to_lowercase().contains("amg")) {
        return trims;
    }

    debug!(series = %series, "amg trim injected");
    prepend(TrimCandidate::named(series), trims)
}

/// Porsche GT3 RS injection: 911s whose trim or series mentions GT3 but
/// whose trim list has no GT3 RS entry get a synthetic "GT3 RS" prepended.
pub fn inject_gt3_rs_trim(
    descriptor: &VehicleDescriptor,
    trims: Vec<TrimCandidate>,
) -> Vec<TrimCandidate> {
    if brand_of(descriptor) != Some(Brand::Porsche) {
        return trims;
    }
    let is_911 = descriptor
        .model
        .as_deref()
        .is_some_and(|m| m.contains("911"));
    if !is_911 {
        return trims;
    }

    let mentions_gt3 = [&descriptor.specs.trim, &descriptor.specs.series]
        .iter()
        .any(|field| {
            field
                .as_deref()
                .is_some_and(|v| v.to_lowercase().contains("gt3"))
        });
    if !mentions_gt3 {
        return trims;
    }

    let already_present = trims.iter().any(|t| {
        let name = t.name.to_lowercase();
        name.contains("gt3") && name.contains("rs")
    });
    if already_present {
        return trims;
    }

    debug!("gt3 rs trim injected");
    prepend(TrimCandidate::named("GT3 RS"), trims)
}

fn prepend(entry: TrimCandidate, trims: Vec<TrimCandidate>) -> Vec<TrimCandidate> {
    let mut result = Vec::with_capacity(trims.len() + 1);
    result.push(entry);
    result.extend(trims);
    result
}

fn brand_of(descriptor: &VehicleDescriptor) -> Option<Brand> {
    descriptor.make.as_deref().and_then(Brand::from_make)
}
