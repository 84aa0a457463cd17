//! Shared vehicle domain types
//!
//! These are the data contracts between the fetch layer (which produces
//! provider records), the fusion pipeline (which reconciles them), and the
//! caller that persists the canonical result. Provider records are immutable
//! once decoded; the pipeline builds its own working descriptor and hands a
//! fresh `CanonicalVehicle` back per request.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Provider Inputs
// ============================================================================

/// Raw vehicle-attribute record from a single upstream decode provider.
///
/// Contract: produced by the fetch layer, already JSON-decoded and
/// checksum-validated. Never mutated by the pipeline. Either provider's
/// record may be absent for a request (fetch failure or timeout).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProviderRecord {
    /// Model year. Providers disagree on representation (string vs number),
    /// so both are accepted and carried as a string until canonicalization.
    #[serde(default, deserialize_with = "year_from_string_or_number")]
    pub year: Option<String>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub specs: ProviderSpecs,
    /// Ordered candidate trims, most relevant first. Often empty.
    #[serde(default)]
    pub trims: Vec<TrimCandidate>,
}

/// Free-text spec bag reported by a provider. Every field is optional and
/// arrives in whatever vocabulary the provider uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSpecs {
    #[serde(default)]
    pub trim: Option<String>,
    /// Manufacturer series designation. Some brands encode the trim here
    /// (e.g. "335i").
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub body_class: Option<String>,
    #[serde(default)]
    pub engine_cylinders: Option<String>,
    #[serde(default)]
    pub displacement_l: Option<String>,
    #[serde(default)]
    pub transmission_speeds: Option<String>,
    #[serde(default)]
    pub transmission_style: Option<String>,
    #[serde(default)]
    pub drive_type: Option<String>,
    #[serde(default)]
    pub electrification_level: Option<String>,
    #[serde(default)]
    pub fuel_type_primary: Option<String>,
}

/// A single candidate trim entry from a provider's trim list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrimCandidate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

impl TrimCandidate {
    /// A bare trim entry with only a name, as used for synthesized trims.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            year: None,
        }
    }
}

fn year_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YearRepr {
        Num(i64),
        Text(String),
    }

    Ok(Option::<YearRepr>::deserialize(deserializer)?.map(|y| match y {
        YearRepr::Num(n) => n.to_string(),
        YearRepr::Text(s) => s,
    }))
}

// ============================================================================
// Working Descriptor
// ============================================================================

/// The working record the fusion pipeline builds while reconciling the two
/// provider records. Stage functions take it by value and return a new value;
/// a field set by a higher-priority source is never overwritten by a
/// lower-priority one within a resolution pass.
#[derive(Debug, Clone, Default)]
pub struct VehicleDescriptor {
    pub year: Option<String>,
    pub make: Option<String>,
    /// Resolved model, embedded-trim suffixes stripped.
    pub model: Option<String>,
    /// Resolved scalar trim (empty-string semantics live in the canonical
    /// output; here absence is `None`).
    pub trim: Option<String>,
    pub specs: ProviderSpecs,
    pub trims: Vec<TrimCandidate>,
}

// ============================================================================
// Trim Resolution
// ============================================================================

/// Which fallback tier supplied a resolved trim value (for provenance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrimSource {
    /// Explicit trim field in the provider specs
    SpecsTrim,
    /// Externally-computed best-match candidate
    BestMatch,
    /// First entry of the candidate trim list
    FirstTrimEntry,
    /// Manufacturer series field (trim-in-series brands)
    SpecsSeries,
    /// Nothing resolved
    None,
}

impl TrimSource {
    /// Informational confidence for this tier. Logged and reported, never
    /// compared to make a decision; the ordered fallback decides.
    pub fn default_confidence(self) -> f64 {
        match self {
            Self::SpecsTrim => 0.9,
            Self::BestMatch => 0.8,
            Self::FirstTrimEntry => 0.6,
            Self::SpecsSeries => 0.5,
            Self::None => 0.0,
        }
    }
}

/// Output of trim priority resolution.
#[derive(Debug, Clone, Serialize)]
pub struct TrimResolution {
    pub value: String,
    pub source: TrimSource,
    /// Informational metadata only, in [0, 1].
    pub confidence: f64,
}

impl TrimResolution {
    pub fn from_tier(value: impl Into<String>, source: TrimSource) -> Self {
        Self {
            value: value.into(),
            source,
            confidence: source.default_confidence(),
        }
    }

    pub fn none() -> Self {
        Self {
            value: String::new(),
            source: TrimSource::None,
            confidence: 0.0,
        }
    }
}

// ============================================================================
// Body Style
// ============================================================================

/// The closed set of approved body styles.
///
/// Classification returns `Option<BodyStyle>`: `None` means explicitly
/// unmapped (powersports/commercial/trailer inputs, or a vocabulary gap
/// logged for review), never a best guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyStyle {
    Sedan,
    Coupe,
    Hatchback,
    Convertible,
    StationWagon,
    Minivan,
    Van,
    PickupTruck,
    Crossover,
    Suv,
}

impl BodyStyle {
    /// Human-readable label.
    pub fn display_name(self) -> &'static str {
        match self {
            BodyStyle::Sedan => "Sedan",
            BodyStyle::Coupe => "Coupe",
            BodyStyle::Hatchback => "Hatchback",
            BodyStyle::Convertible => "Convertible",
            BodyStyle::StationWagon => "Station Wagon",
            BodyStyle::Minivan => "Minivan",
            BodyStyle::Van => "Van",
            BodyStyle::PickupTruck => "Pickup Truck",
            BodyStyle::Crossover => "Crossover",
            BodyStyle::Suv => "SUV",
        }
    }
}

// ============================================================================
// Canonical Output
// ============================================================================

/// The single reconciled, normalized vehicle descriptor returned to the
/// caller after every pipeline stage has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalVehicle {
    pub year: Option<i32>,
    /// Provider-normalized (uppercased) make, e.g. "PORSCHE".
    pub make: String,
    /// Model with embedded-trim suffixes stripped.
    pub model: String,
    /// Resolved trim; empty when nothing resolved.
    pub trim: String,
    /// Approved style, or `None` when classification explicitly declined
    /// (serializes as JSON null so callers can tell "actively excluded"
    /// apart from the "Unknown" display label).
    pub body_style: Option<BodyStyle>,
    pub engine: String,
    pub transmission: String,
    pub drivetrain: String,
    /// Ordered, deduplicated trim list for UI selection, including any
    /// brand-specific synthetic entries.
    pub trims: Vec<TrimCandidate>,
}

impl CanonicalVehicle {
    /// Display label for the body style ("Unknown" when unmapped).
    pub fn body_style_label(&self) -> &'static str {
        self.body_style.map(BodyStyle::display_name).unwrap_or("Unknown")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_accepts_string_and_number() {
        let from_str: RawProviderRecord =
            serde_json::from_str(r#"{"year": "2022", "make": "Porsche"}"#).unwrap();
        assert_eq!(from_str.year.as_deref(), Some("2022"));

        let from_num: RawProviderRecord =
            serde_json::from_str(r#"{"year": 2022, "make": "Porsche"}"#).unwrap();
        assert_eq!(from_num.year.as_deref(), Some("2022"));
    }

    #[test]
    fn record_tolerates_missing_fields() {
        let record: RawProviderRecord = serde_json::from_str("{}").unwrap();
        assert!(record.year.is_none());
        assert!(record.specs.trim.is_none());
        assert!(record.trims.is_empty());
    }

    #[test]
    fn trim_source_confidence_is_ordered_by_tier() {
        assert!(
            TrimSource::SpecsTrim.default_confidence()
                > TrimSource::BestMatch.default_confidence()
        );
        assert!(
            TrimSource::BestMatch.default_confidence()
                > TrimSource::FirstTrimEntry.default_confidence()
        );
        assert!(
            TrimSource::FirstTrimEntry.default_confidence()
                > TrimSource::SpecsSeries.default_confidence()
        );
        assert_eq!(TrimSource::None.default_confidence(), 0.0);
    }

    #[test]
    fn body_style_label_falls_back_to_unknown() {
        let vehicle = CanonicalVehicle {
            year: None,
            make: String::new(),
            model: String::new(),
            trim: String::new(),
            body_style: None,
            engine: "Unknown".into(),
            transmission: "Unknown".into(),
            drivetrain: "Unknown".into(),
            trims: vec![],
        };
        assert_eq!(vehicle.body_style_label(), "Unknown");

        let vehicle = CanonicalVehicle {
            body_style: Some(BodyStyle::StationWagon),
            ..vehicle
        };
        assert_eq!(vehicle.body_style_label(), "Station Wagon");
    }

    #[test]
    fn body_style_none_serializes_as_null() {
        let vehicle = CanonicalVehicle {
            year: Some(2015),
            make: "YAMAHA".into(),
            model: "YZF-R1".into(),
            trim: String::new(),
            body_style: None,
            engine: "Unknown".into(),
            transmission: "Unknown".into(),
            drivetrain: "Unknown".into(),
            trims: vec![],
        };
        let json = serde_json::to_value(&vehicle).unwrap();
        assert!(json["body_style"].is_null());
    }
}
