// Canonical output synthesis
//
// Concept: render the reconciled, overridden descriptor into the canonical
// record handed back to the caller. Descriptor strings degrade gracefully:
// partial spec data produces a partial descriptor, nothing known produces
// "Unknown". The pipeline never guesses here.

use vindec_common::vehicle::{
    BodyStyle, CanonicalVehicle, ProviderSpecs, TrimCandidate, VehicleDescriptor,
};

/// Build the canonical vehicle from the final descriptor, the processed trim
/// list, and the body-style classification.
pub fn synthesize(
    descriptor: &VehicleDescriptor,
    trims: Vec<TrimCandidate>,
    body_style: Option<BodyStyle>,
) -> CanonicalVehicle {
    CanonicalVehicle {
        year: descriptor.year.as_deref().and_then(parse_year),
        make: descriptor
            .make
            .as_deref()
            .map(|m| m.trim().to_uppercase())
            .unwrap_or_default(),
        model: descriptor.model.clone().unwrap_or_default(),
        trim: descriptor.trim.clone().unwrap_or_default(),
        body_style,
        engine: format_engine(&descriptor.specs),
        transmission: format_transmission(&descriptor.specs),
        drivetrain: format_drivetrain(descriptor.specs.drive_type.as_deref()),
        trims,
    }
}

fn parse_year(raw: &str) -> Option<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|y| (1900..=2100).contains(y))
}

fn is_electric(specs: &ProviderSpecs) -> bool {
    specs
        .fuel_type_primary
        .as_deref()
        .is_some_and(|f| f.trim().eq_ignore_ascii_case("electric"))
        || specs
            .electrification_level
            .as_deref()
            .is_some_and(|e| e.to_lowercase().contains("bev"))
}

fn format_engine(specs: &ProviderSpecs) -> String {
    if is_electric(specs) {
        return "Electric Motor".into();
    }

    let cylinders = non_empty(specs.engine_cylinders.as_deref());
    let displacement = non_empty(specs.displacement_l.as_deref()).map(|d| {
        if d.to_uppercase().ends_with('L') {
            d.to_string()
        } else {
            format!("{d}L")
        }
    });

    match (cylinders, displacement) {
        (Some(c), disp) => {
            // Providers report either a bare count ("8") or a configuration
            // designation ("V8"); only the bare count needs a unit word.
            let base = if c.chars().all(|ch| ch.is_ascii_digit()) {
                format!("{c}-Cylinder")
            } else {
                c.to_string()
            };
            match disp {
                Some(d) => format!("{base} {d}"),
                None => base,
            }
        }
        (None, Some(d)) => d,
        (None, None) => non_empty(specs.fuel_type_primary.as_deref())
            .map(String::from)
            .unwrap_or_else(|| "Unknown".into()),
    }
}

fn format_transmission(specs: &ProviderSpecs) -> String {
    let speeds = non_empty(specs.transmission_speeds.as_deref());
    let style = non_empty(specs.transmission_style.as_deref());

    match (speeds, style) {
        (Some("1"), _) => "Single-Speed".into(),
        (Some(n), Some(style)) => format!("{n}-Speed {style}"),
        (Some(n), None) => format!("{n}-Speed"),
        (None, Some(style)) => style.into(),
        (None, None) => "Unknown".into(),
    }
}

fn format_drivetrain(drive_type: Option<&str>) -> String {
    let Some(raw) = non_empty(drive_type) else {
        return "Unknown".into();
    };
    let lower = raw.to_lowercase();

    if lower.contains("all-wheel") || lower.contains("all wheel") || has_word(&lower, "awd") {
        "AWD".into()
    } else if lower.contains("4x4")
        || lower.contains("four-wheel")
        || lower.contains("four wheel")
        || has_word(&lower, "4wd")
    {
        "4WD".into()
    } else if lower.contains("front") || has_word(&lower, "fwd") {
        "FWD".into()
    } else if lower.contains("rear") || has_word(&lower, "rwd") {
        "RWD".into()
    } else {
        // Unrecognized vocabulary passes through untouched rather than
        // being guessed into a bucket.
        raw.to_string()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn has_word(s: &str, word: &str) -> bool {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .any(|w| w == word)
}
