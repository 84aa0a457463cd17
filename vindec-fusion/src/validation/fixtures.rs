//! Fixed decode corpus
//!
//! Known identifiers with hand-checked expected output, one per distinct
//! override behavior: an electric-only brand (Tesla), a trim-in-series brand
//! (BMW), an SUV-default brand (Mercedes-Benz ML), an electric line inside a
//! combustion brand (Porsche Taycan), and a luxury SUV whose providers embed
//! the trim in the model string (Bentley Bentayga). The provider records are
//! what the fetch layer returned for these VINs, frozen here as fixtures.

use once_cell::sync::Lazy;
use vindec_common::vehicle::{BodyStyle, ProviderSpecs, RawProviderRecord, TrimCandidate};

use super::{DecodeFixture, ExpectedVehicle};

pub static FIXTURES: Lazy<Vec<DecodeFixture>> = Lazy::new(|| {
    vec![
        tesla_model_3(),
        bmw_335i(),
        porsche_taycan(),
        bentley_bentayga(),
        mercedes_ml350(),
    ]
});

fn tesla_model_3() -> DecodeFixture {
    // Provider A mis-tags the fuel type; the Tesla override must discard it.
    let provider_a = RawProviderRecord {
        year: Some("2019".into()),
        make: Some("TESLA".into()),
        model: Some("Model 3".into()),
        specs: ProviderSpecs {
            body_class: Some("Sedan".into()),
            fuel_type_primary: Some("Gasoline".into()),
            drive_type: Some("RWD".into()),
            ..Default::default()
        },
        trims: vec![],
    };
    let provider_b = RawProviderRecord {
        year: Some("2019".into()),
        make: Some("Tesla".into()),
        model: Some("Model 3".into()),
        specs: ProviderSpecs {
            body_class: Some("4-Door Sedan".into()),
            drive_type: Some("Rear-Wheel Drive".into()),
            ..Default::default()
        },
        trims: vec![],
    };

    DecodeFixture {
        vin: "5YJ3E1EA7KF317023",
        manufacturer: "Tesla",
        provider_a: Some(provider_a),
        provider_b: Some(provider_b),
        best_match: None,
        expected: ExpectedVehicle {
            year: Some(2019),
            make: "TESLA",
            model: "Model 3",
            trim: "",
            body_style: Some(BodyStyle::Sedan),
            engine: "Electric Motor",
            transmission: "Single-Speed",
            drivetrain: "RWD",
            trims: Some(&["Standard Range Plus", "Long Range", "Performance"]),
        },
    }
}

fn bmw_335i() -> DecodeFixture {
    // Provider B was down for this decode; everything comes from A, with
    // the trim encoded in the series field.
    let provider_a = RawProviderRecord {
        year: Some("2013".into()),
        make: Some("BMW".into()),
        model: Some("335i".into()),
        specs: ProviderSpecs {
            series: Some("335i".into()),
            body_class: Some("Sedan".into()),
            engine_cylinders: Some("6".into()),
            displacement_l: Some("3.0".into()),
            transmission_speeds: Some("8".into()),
            transmission_style: Some("Automatic".into()),
            drive_type: Some("RWD".into()),
            fuel_type_primary: Some("Gasoline".into()),
            ..Default::default()
        },
        trims: vec![],
    };

    DecodeFixture {
        vin: "WBA3A9C52DF476345",
        manufacturer: "BMW",
        provider_a: Some(provider_a),
        provider_b: None,
        best_match: None,
        expected: ExpectedVehicle {
            year: Some(2013),
            make: "BMW",
            model: "335i",
            trim: "335i",
            body_style: Some(BodyStyle::Sedan),
            engine: "6-Cylinder 3.0L",
            transmission: "8-Speed Automatic",
            drivetrain: "RWD",
            trims: Some(&["335i"]),
        },
    }
}

fn porsche_taycan() -> DecodeFixture {
    // Provider B reports the Taycan's real two-speed gearbox; the Porsche
    // override normalizes the electric line to single-speed anyway.
    let provider_a = RawProviderRecord {
        year: Some("2025".into()),
        make: Some("PORSCHE".into()),
        model: Some("Taycan".into()),
        specs: ProviderSpecs {
            trim: Some("4S Cross Turismo".into()),
            body_class: Some("Sedan/Saloon".into()),
            fuel_type_primary: Some("Electric".into()),
            electrification_level: Some("BEV (Battery Electric Vehicle)".into()),
            drive_type: Some("AWD".into()),
            ..Default::default()
        },
        trims: vec![],
    };
    let provider_b = RawProviderRecord {
        year: Some("2025".into()),
        make: Some("Porsche".into()),
        model: Some("Taycan".into()),
        specs: ProviderSpecs {
            body_class: Some("Sedan".into()),
            transmission_speeds: Some("2".into()),
            drive_type: Some("All-Wheel Drive".into()),
            ..Default::default()
        },
        trims: vec![],
    };

    DecodeFixture {
        vin: "WP0BB2Y11SSA73075",
        manufacturer: "Porsche",
        provider_a: Some(provider_a),
        provider_b: Some(provider_b),
        best_match: None,
        expected: ExpectedVehicle {
            year: Some(2025),
            make: "PORSCHE",
            model: "Taycan",
            trim: "4S Cross Turismo",
            body_style: Some(BodyStyle::Sedan),
            engine: "Electric Motor",
            transmission: "Single-Speed",
            drivetrain: "AWD",
            trims: Some(&[]),
        },
    }
}

fn bentley_bentayga() -> DecodeFixture {
    // Provider A bakes the trim into the model string; provider B carries it
    // properly in the trim list.
    let provider_a = RawProviderRecord {
        year: Some("2022".into()),
        make: Some("BENTLEY".into()),
        model: Some("Bentayga V8".into()),
        specs: ProviderSpecs {
            body_class: Some("Sport Utility Vehicle (SUV)/Multi-Purpose Vehicle (MPV)".into()),
            engine_cylinders: Some("8".into()),
            displacement_l: Some("4.0".into()),
            transmission_speeds: Some("8".into()),
            transmission_style: Some("Automatic".into()),
            drive_type: Some("AWD/All-Wheel Drive".into()),
            fuel_type_primary: Some("Gasoline".into()),
            ..Default::default()
        },
        trims: vec![],
    };
    let provider_b = RawProviderRecord {
        year: Some("2022".into()),
        make: Some("Bentley".into()),
        model: Some("Bentayga".into()),
        specs: ProviderSpecs::default(),
        trims: vec![TrimCandidate {
            name: "V8".into(),
            description: Some("4.0L twin-turbocharged V8".into()),
            year: Some("2022".into()),
        }],
    };

    DecodeFixture {
        vin: "SJAAM2ZV2NC011382",
        manufacturer: "Bentley",
        provider_a: Some(provider_a),
        provider_b: Some(provider_b),
        best_match: None,
        expected: ExpectedVehicle {
            year: Some(2022),
            make: "BENTLEY",
            model: "Bentayga",
            trim: "V8",
            body_style: Some(BodyStyle::Suv),
            engine: "8-Cylinder 4.0L",
            transmission: "8-Speed Automatic",
            drivetrain: "AWD",
            trims: Some(&["V8"]),
        },
    }
}

fn mercedes_ml350() -> DecodeFixture {
    // Both providers return no trim list and no transmission/drive data;
    // the ML-line manufacturer defaults fill the gaps.
    let provider_a = RawProviderRecord {
        year: Some("2015".into()),
        make: Some("MERCEDES-BENZ".into()),
        model: Some("ML 350".into()),
        specs: ProviderSpecs {
            body_class: Some("Sport Utility Vehicle (SUV)".into()),
            engine_cylinders: Some("6".into()),
            displacement_l: Some("3.5".into()),
            fuel_type_primary: Some("Gasoline".into()),
            ..Default::default()
        },
        trims: vec![],
    };
    let provider_b = RawProviderRecord {
        year: Some("2015".into()),
        make: Some("Mercedes-Benz".into()),
        model: Some("ML350".into()),
        specs: ProviderSpecs::default(),
        trims: vec![],
    };

    DecodeFixture {
        vin: "4JGDA5HB4FA567519",
        manufacturer: "Mercedes-Benz",
        provider_a: Some(provider_a),
        provider_b: Some(provider_b),
        best_match: None,
        expected: ExpectedVehicle {
            year: Some(2015),
            make: "MERCEDES-BENZ",
            model: "ML 350",
            trim: "",
            body_style: Some(BodyStyle::Suv),
            engine: "6-Cylinder 3.5L",
            transmission: "7-Speed Automatic",
            drivetrain: "AWD",
            trims: Some(&["ML350"]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_spans_the_override_behaviors() {
        let manufacturers: Vec<&str> = FIXTURES.iter().map(|f| f.manufacturer).collect();
        assert!(manufacturers.len() >= 4);
        for expected in ["Tesla", "BMW", "Porsche", "Mercedes-Benz"] {
            assert!(manufacturers.contains(&expected), "{expected} missing");
        }
    }

    #[test]
    fn corpus_exercises_provider_absence() {
        assert!(FIXTURES
            .iter()
            .any(|f| f.provider_a.is_none() || f.provider_b.is_none()));
    }
}
