// Source reconciliation
//
// Concept: field-wise fusion of the two provider records into one working
// descriptor. For each tracked field: a single non-empty value is taken as
// is; two disagreeing values go to the longer (more descriptive) string; an
// equal-length disagreement goes to the configured tie-break provider and is
// marked Equal in the diagnostics. Trim and model are special-cased through
// the priority resolver instead of the length heuristic. Either record may
// be entirely absent (failed provider call); absence contributes no values
// and never aborts reconciliation.
//
// Every comparison is recorded in a per-field diagnostics list, annotated
// with a normalized string similarity when both sides are present. The list
// is a reporting side-channel for offline provider-quality auditing; nothing
// in the pipeline branches on it.

use serde::Serialize;
use tracing::{debug, warn};
use vindec_common::config::TieBreakProvider;
use vindec_common::vehicle::{RawProviderRecord, TrimResolution, VehicleDescriptor};

use crate::fusion::field_priority;

/// Which source supplied the reconciled value for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldWinner {
    ProviderA,
    ProviderB,
    /// Both sides present with equal-length values; the tie-break provider's
    /// value was used.
    Equal,
    /// Neither side had a value.
    Neither,
}

/// One per-field comparison entry for the diagnostics report.
#[derive(Debug, Clone, Serialize)]
pub struct FieldComparison {
    pub field: &'static str,
    pub provider_a: Option<String>,
    pub provider_b: Option<String>,
    pub winner: FieldWinner,
    /// Normalized Levenshtein similarity of the two values when both are
    /// present. Reporting metadata only.
    pub similarity: Option<f64>,
}

/// Reconcile the two provider records into a working descriptor.
///
/// Returns the descriptor, the per-field comparison list, and the trim
/// resolution metadata (which tier supplied the scalar trim).
pub fn reconcile(
    a: Option<&RawProviderRecord>,
    b: Option<&RawProviderRecord>,
    best_match: Option<&str>,
    tie_break: TieBreakProvider,
) -> (VehicleDescriptor, Vec<FieldComparison>, TrimResolution) {
    if a.is_none() && b.is_none() {
        warn!("both provider records absent; reconciling to an empty descriptor");
    } else if a.is_none() || b.is_none() {
        debug!(absent = if a.is_none() { "a" } else { "b" }, "one provider record absent");
    }

    let mut comparisons = Vec::new();
    let mut descriptor = VehicleDescriptor::default();

    descriptor.year = pick(
        "year",
        a.and_then(|r| r.year.as_deref()),
        b.and_then(|r| r.year.as_deref()),
        tie_break,
        &mut comparisons,
    );
    descriptor.make = pick(
        "make",
        a.and_then(|r| r.make.as_deref()),
        b.and_then(|r| r.make.as_deref()),
        tie_break,
        &mut comparisons,
    );

    let specs_a = a.map(|r| &r.specs);
    let specs_b = b.map(|r| &r.specs);

    descriptor.specs.trim = pick(
        "trim",
        specs_a.and_then(|s| s.trim.as_deref()),
        specs_b.and_then(|s| s.trim.as_deref()),
        tie_break,
        &mut comparisons,
    );
    descriptor.specs.series = pick(
        "series",
        specs_a.and_then(|s| s.series.as_deref()),
        specs_b.and_then(|s| s.series.as_deref()),
        tie_break,
        &mut comparisons,
    );
    descriptor.specs.body_class = pick(
        "body_class",
        specs_a.and_then(|s| s.body_class.as_deref()),
        specs_b.and_then(|s| s.body_class.as_deref()),
        tie_break,
        &mut comparisons,
    );
    descriptor.specs.engine_cylinders = pick(
        "engine_cylinders",
        specs_a.and_then(|s| s.engine_cylinders.as_deref()),
        specs_b.and_then(|s| s.engine_cylinders.as_deref()),
        tie_break,
        &mut comparisons,
    );
    descriptor.specs.displacement_l = pick(
        "displacement_l",
        specs_a.and_then(|s| s.displacement_l.as_deref()),
        specs_b.and_then(|s| s.displacement_l.as_deref()),
        tie_break,
        &mut comparisons,
    );
    descriptor.specs.transmission_speeds = pick(
        "transmission_speeds",
        specs_a.and_then(|s| s.transmission_speeds.as_deref()),
        specs_b.and_then(|s| s.transmission_speeds.as_deref()),
        tie_break,
        &mut comparisons,
    );
    descriptor.specs.transmission_style = pick(
        "transmission_style",
        specs_a.and_then(|s| s.transmission_style.as_deref()),
        specs_b.and_then(|s| s.transmission_style.as_deref()),
        tie_break,
        &mut comparisons,
    );
    descriptor.specs.drive_type = pick(
        "drive_type",
        specs_a.and_then(|s| s.drive_type.as_deref()),
        specs_b.and_then(|s| s.drive_type.as_deref()),
        tie_break,
        &mut comparisons,
    );
    descriptor.specs.electrification_level = pick(
        "electrification_level",
        specs_a.and_then(|s| s.electrification_level.as_deref()),
        specs_b.and_then(|s| s.electrification_level.as_deref()),
        tie_break,
        &mut comparisons,
    );
    descriptor.specs.fuel_type_primary = pick(
        "fuel_type_primary",
        specs_a.and_then(|s| s.fuel_type_primary.as_deref()),
        specs_b.and_then(|s| s.fuel_type_primary.as_deref()),
        tie_break,
        &mut comparisons,
    );

    descriptor.trims = pick_trim_list(a, b, tie_break);

    // Model and trim are special-cased: the raw model comparison still picks
    // a winner (a more descriptive model string may carry an embedded trim),
    // but the resolved values route through the priority resolver.
    let raw_model = pick(
        "model",
        a.and_then(|r| r.model.as_deref()),
        b.and_then(|r| r.model.as_deref()),
        tie_break,
        &mut comparisons,
    );
    descriptor.model = raw_model
        .as_deref()
        .map(field_priority::resolve_model)
        .filter(|m| !m.is_empty());

    let trim_resolution = field_priority::resolve_trim(&descriptor, best_match);
    descriptor.trim = if trim_resolution.value.is_empty() {
        None
    } else {
        Some(trim_resolution.value.clone())
    };

    (descriptor, comparisons, trim_resolution)
}

/// Pick one field value from the two providers, recording the comparison.
fn pick(
    field: &'static str,
    a: Option<&str>,
    b: Option<&str>,
    tie_break: TieBreakProvider,
    comparisons: &mut Vec<FieldComparison>,
) -> Option<String> {
    let a = a.map(str::trim).filter(|v| !v.is_empty());
    let b = b.map(str::trim).filter(|v| !v.is_empty());

    let (winner, value) = match (a, b) {
        (None, None) => (FieldWinner::Neither, None),
        (Some(a_val), None) => (FieldWinner::ProviderA, Some(a_val)),
        (None, Some(b_val)) => (FieldWinner::ProviderB, Some(b_val)),
        (Some(a_val), Some(b_val)) => {
            if a_val.len() > b_val.len() {
                (FieldWinner::ProviderA, Some(a_val))
            } else if b_val.len() > a_val.len() {
                (FieldWinner::ProviderB, Some(b_val))
            } else {
                let chosen = match tie_break {
                    TieBreakProvider::A => a_val,
                    TieBreakProvider::B => b_val,
                };
                (FieldWinner::Equal, Some(chosen))
            }
        }
    };

    let similarity = match (a, b) {
        (Some(a_val), Some(b_val)) => Some(strsim::normalized_levenshtein(a_val, b_val)),
        _ => None,
    };

    comparisons.push(FieldComparison {
        field,
        provider_a: a.map(String::from),
        provider_b: b.map(String::from),
        winner,
        similarity,
    });

    value.map(String::from)
}

/// The trim list follows the same descriptiveness heuristic as scalar
/// fields: the longer list wins, ties go to the tie-break provider.
fn pick_trim_list(
    a: Option<&RawProviderRecord>,
    b: Option<&RawProviderRecord>,
    tie_break: TieBreakProvider,
) -> Vec<vindec_common::vehicle::TrimCandidate> {
    let trims_a = a.map(|r| r.trims.as_slice()).unwrap_or_default();
    let trims_b = b.map(|r| r.trims.as_slice()).unwrap_or_default();

    let chosen = if trims_a.len() > trims_b.len() {
        trims_a
    } else if trims_b.len() > trims_a.len() {
        trims_b
    } else {
        match tie_break {
            TieBreakProvider::A => trims_a,
            TieBreakProvider::B => trims_b,
        }
    };
    chosen.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vindec_common::vehicle::{TrimCandidate, TrimSource};

    fn record(make: &str, model: &str) -> RawProviderRecord {
        RawProviderRecord {
            make: Some(make.into()),
            model: Some(model.into()),
            ..Default::default()
        }
    }

    #[test]
    fn single_source_populates_descriptor() {
        let mut b = record("Bentley", "Bentayga");
        b.year = Some("2022".into());
        b.specs.drive_type = Some("AWD".into());

        let (descriptor, comparisons, _) =
            reconcile(None, Some(&b), None, TieBreakProvider::A);

        assert_eq!(descriptor.make.as_deref(), Some("Bentley"));
        assert_eq!(descriptor.model.as_deref(), Some("Bentayga"));
        assert_eq!(descriptor.year.as_deref(), Some("2022"));
        assert_eq!(descriptor.specs.drive_type.as_deref(), Some("AWD"));

        let make_cmp = comparisons.iter().find(|c| c.field == "make").unwrap();
        assert_eq!(make_cmp.winner, FieldWinner::ProviderB);
        assert!(make_cmp.similarity.is_none());
    }

    #[test]
    fn both_absent_yields_empty_descriptor() {
        let (descriptor, comparisons, resolution) =
            reconcile(None, None, None, TieBreakProvider::A);
        assert!(descriptor.make.is_none());
        assert!(descriptor.model.is_none());
        assert!(descriptor.trims.is_empty());
        assert_eq!(resolution.source, TrimSource::None);
        assert!(comparisons.iter().all(|c| c.winner == FieldWinner::Neither));
    }

    #[test]
    fn longer_value_wins() {
        let mut a = record("Porsche", "Taycan");
        a.specs.body_class = Some("Sedan".into());
        let mut b = record("Porsche", "Taycan");
        b.specs.body_class = Some("Sedan/Saloon".into());

        let (descriptor, comparisons, _) =
            reconcile(Some(&a), Some(&b), None, TieBreakProvider::A);

        assert_eq!(descriptor.specs.body_class.as_deref(), Some("Sedan/Saloon"));
        let cmp = comparisons.iter().find(|c| c.field == "body_class").unwrap();
        assert_eq!(cmp.winner, FieldWinner::ProviderB);
        assert!(cmp.similarity.unwrap() > 0.3);
    }

    #[test]
    fn equal_length_goes_to_tie_break_provider() {
        let a = record("BMW", "330i");
        let b = record("BMW", "335i");

        let (descriptor, comparisons, _) =
            reconcile(Some(&a), Some(&b), None, TieBreakProvider::A);
        assert_eq!(descriptor.model.as_deref(), Some("330i"));
        let cmp = comparisons.iter().find(|c| c.field == "model").unwrap();
        assert_eq!(cmp.winner, FieldWinner::Equal);

        let (descriptor, _, _) = reconcile(Some(&a), Some(&b), None, TieBreakProvider::B);
        assert_eq!(descriptor.model.as_deref(), Some("335i"));
    }

    #[test]
    fn model_routes_through_suffix_stripping() {
        let a = record("Bentley", "Bentayga V8");
        let b = record("Bentley", "Bentayga");

        let (descriptor, comparisons, _) =
            reconcile(Some(&a), Some(&b), None, TieBreakProvider::A);

        // The more descriptive raw string wins the comparison, then the
        // embedded suffix is stripped from the resolved model.
        assert_eq!(descriptor.model.as_deref(), Some("Bentayga"));
        let cmp = comparisons.iter().find(|c| c.field == "model").unwrap();
        assert_eq!(cmp.provider_a.as_deref(), Some("Bentayga V8"));
        assert_eq!(cmp.winner, FieldWinner::ProviderA);
    }

    #[test]
    fn trim_resolution_metadata_is_returned() {
        let mut a = record("BMW", "440i");
        a.specs.series = Some("440i".into());

        let (descriptor, _, resolution) =
            reconcile(Some(&a), None, None, TieBreakProvider::A);
        assert_eq!(descriptor.trim.as_deref(), Some("440i"));
        assert_eq!(resolution.source, TrimSource::SpecsSeries);
        assert_eq!(resolution.value, "440i");
    }

    #[test]
    fn best_match_feeds_trim_resolution() {
        let a = record("Toyota", "Camry");

        let (descriptor, _, resolution) =
            reconcile(Some(&a), None, Some("XLE"), TieBreakProvider::A);
        assert_eq!(descriptor.trim.as_deref(), Some("XLE"));
        assert_eq!(resolution.source, TrimSource::BestMatch);
    }

    #[test]
    fn longer_trim_list_wins() {
        let mut a = record("Audi", "A4");
        a.trims = vec![TrimCandidate::named("Premium")];
        let mut b = record("Audi", "A4");
        b.trims = vec![
            TrimCandidate::named("Premium"),
            TrimCandidate::named("Premium Plus"),
            TrimCandidate::named("Prestige"),
        ];

        let (descriptor, _, _) = reconcile(Some(&a), Some(&b), None, TieBreakProvider::A);
        assert_eq!(descriptor.trims.len(), 3);
    }
}
