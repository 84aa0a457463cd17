//! Decode validation harness
//!
//! A fixed corpus of known identifiers with expected canonical output,
//! spanning the manufacturers with distinct override behavior. The validator
//! checks field by field and accumulates every mismatch, so a single run
//! reports all discrepancies, not just the first. Mismatches are a test-time
//! signal only; the pipeline itself never raises them.

pub mod fixtures;

use vindec_common::vehicle::{BodyStyle, CanonicalVehicle, RawProviderRecord};

/// Expected canonical fields for one corpus entry.
#[derive(Debug, Clone)]
pub struct ExpectedVehicle {
    pub year: Option<i32>,
    pub make: &'static str,
    pub model: &'static str,
    pub trim: &'static str,
    pub body_style: Option<BodyStyle>,
    pub engine: &'static str,
    pub transmission: &'static str,
    pub drivetrain: &'static str,
    /// Expected trim-list names in order; `None` skips the list check.
    pub trims: Option<&'static [&'static str]>,
}

/// One corpus entry: the identifier, the records the fetch layer would have
/// supplied, and the expected canonical output.
#[derive(Debug, Clone)]
pub struct DecodeFixture {
    pub vin: &'static str,
    pub manufacturer: &'static str,
    pub provider_a: Option<RawProviderRecord>,
    pub provider_b: Option<RawProviderRecord>,
    pub best_match: Option<&'static str>,
    pub expected: ExpectedVehicle,
}

/// Result of validating one decode against its expectation.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub passed: bool,
    pub failures: Vec<String>,
}

/// Field-by-field comparison of an actual decode against the expectation.
/// Every mismatch is accumulated.
pub fn validate_decode_result(
    actual: &CanonicalVehicle,
    expected: &ExpectedVehicle,
) -> ValidationOutcome {
    let mut failures = Vec::new();

    if actual.year != expected.year {
        failures.push(format!(
            "year: expected {:?}, got {:?}",
            expected.year, actual.year
        ));
    }
    if actual.make != expected.make {
        failures.push(format!(
            "make: expected {:?}, got {:?}",
            expected.make, actual.make
        ));
    }
    if actual.model != expected.model {
        failures.push(format!(
            "model: expected {:?}, got {:?}",
            expected.model, actual.model
        ));
    }
    if actual.trim != expected.trim {
        failures.push(format!(
            "trim: expected {:?}, got {:?}",
            expected.trim, actual.trim
        ));
    }
    if actual.body_style != expected.body_style {
        failures.push(format!(
            "body_style: expected {:?}, got {:?}",
            expected.body_style, actual.body_style
        ));
    }
    if actual.engine != expected.engine {
        failures.push(format!(
            "engine: expected {:?}, got {:?}",
            expected.engine, actual.engine
        ));
    }
    if actual.transmission != expected.transmission {
        failures.push(format!(
            "transmission: expected {:?}, got {:?}",
            expected.transmission, actual.transmission
        ));
    }
    if actual.drivetrain != expected.drivetrain {
        failures.push(format!(
            "drivetrain: expected {:?}, got {:?}",
            expected.drivetrain, actual.drivetrain
        ));
    }
    if let Some(expected_trims) = expected.trims {
        let actual_names: Vec<&str> = actual.trims.iter().map(|t| t.name.as_str()).collect();
        if actual_names != expected_trims {
            failures.push(format!(
                "trims: expected {:?}, got {:?}",
                expected_trims, actual_names
            ));
        }
    }

    ValidationOutcome {
        passed: failures.is_empty(),
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actual() -> CanonicalVehicle {
        CanonicalVehicle {
            year: Some(2022),
            make: "BENTLEY".into(),
            model: "Bentayga".into(),
            trim: "V8".into(),
            body_style: Some(BodyStyle::Suv),
            engine: "8-Cylinder 4.0L".into(),
            transmission: "8-Speed Automatic".into(),
            drivetrain: "AWD".into(),
            trims: vec![vindec_common::vehicle::TrimCandidate::named("V8")],
        }
    }

    fn expected() -> ExpectedVehicle {
        ExpectedVehicle {
            year: Some(2022),
            make: "BENTLEY",
            model: "Bentayga",
            trim: "V8",
            body_style: Some(BodyStyle::Suv),
            engine: "8-Cylinder 4.0L",
            transmission: "8-Speed Automatic",
            drivetrain: "AWD",
            trims: Some(&["V8"]),
        }
    }

    #[test]
    fn matching_decode_passes() {
        let outcome = validate_decode_result(&actual(), &expected());
        assert!(outcome.passed);
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn every_mismatch_is_accumulated() {
        let mut wrong = actual();
        wrong.model = "Bentayga V8".into();
        wrong.trim = String::new();
        wrong.drivetrain = "RWD".into();

        let outcome = validate_decode_result(&wrong, &expected());
        assert!(!outcome.passed);
        assert_eq!(outcome.failures.len(), 3);
        assert!(outcome.failures.iter().any(|f| f.starts_with("model:")));
        assert!(outcome.failures.iter().any(|f| f.starts_with("trim:")));
        assert!(outcome.failures.iter().any(|f| f.starts_with("drivetrain:")));
    }

    #[test]
    fn trim_list_check_is_optional() {
        let mut wrong = actual();
        wrong.trims.clear();

        let mut skip_list = expected();
        skip_list.trims = None;
        assert!(validate_decode_result(&wrong, &skip_list).passed);

        let check_list = expected();
        assert!(!validate_decode_result(&wrong, &check_list).passed);
    }
}
