// Body style classification
//
// Concept: map a freeform provider body-class string onto the closed set of
// approved body styles. Ordered rule evaluation, first match wins; each rule
// is a named predicate over the lower-cased, trimmed input. Inputs that match
// an excluded vehicle category (powersports, buses, RVs, trailers,
// commercial trucks) resolve to None rather than a best-guess style, and any
// remaining unmatched input also resolves to None with a warning so the
// vocabulary gap shows up in the logs.

use tracing::{debug, warn};
use vindec_common::vehicle::BodyStyle;

/// One entry of the ordered classification table. Rules are evaluated top to
/// bottom and the first matching predicate decides the style.
struct StyleRule {
    style: BodyStyle,
    matches: fn(&str) -> bool,
}

static STYLE_RULES: &[StyleRule] = &[
    StyleRule { style: BodyStyle::Sedan, matches: is_sedan },
    StyleRule { style: BodyStyle::Coupe, matches: is_coupe },
    StyleRule { style: BodyStyle::Hatchback, matches: is_hatchback },
    StyleRule { style: BodyStyle::Convertible, matches: is_convertible },
    StyleRule { style: BodyStyle::StationWagon, matches: is_station_wagon },
    StyleRule { style: BodyStyle::Minivan, matches: is_minivan },
    StyleRule { style: BodyStyle::Van, matches: is_van },
    StyleRule { style: BodyStyle::PickupTruck, matches: is_pickup_truck },
    // Crossover must be evaluated before SUV: compact/subcompact-qualified
    // SUV terms belong to Crossover.
    StyleRule { style: BodyStyle::Crossover, matches: is_crossover },
    StyleRule { style: BodyStyle::Suv, matches: is_suv },
];

/// Classify a provider body-class string into an approved style.
///
/// Returns None for empty input, for excluded vehicle categories, and for
/// unmapped vocabulary (logged for corpus review). The caller renders None
/// as "Unknown" at the display boundary.
pub fn classify(raw: Option<&str>) -> Option<BodyStyle> {
    let normalized = raw.map(|s| s.trim().to_lowercase()).unwrap_or_default();
    if normalized.is_empty() {
        return None;
    }

    for rule in STYLE_RULES {
        if (rule.matches)(&normalized) {
            debug!(
                body_class = %normalized,
                style = rule.style.display_name(),
                "body class mapped"
            );
            return Some(rule.style);
        }
    }

    if is_excluded_category(&normalized) {
        debug!(body_class = %normalized, "body class intentionally out of scope");
        return None;
    }

    warn!(body_class = %normalized, "unmapped body class");
    None
}

// ============================================================================
// Style predicates (ordered table entries)
// ============================================================================

fn is_sedan(s: &str) -> bool {
    // Door count elevates "4-door coupe" variants to Sedan.
    s.contains("sedan") || s.contains("saloon") || is_four_door_coupe(s)
}

fn is_four_door_coupe(s: &str) -> bool {
    (s.contains("coupe") || s.contains("coupé"))
        && (s.contains("4-door")
            || s.contains("4 door")
            || s.contains("4dr")
            || s.contains("four-door")
            || s.contains("four door"))
}

fn is_coupe(s: &str) -> bool {
    // 4-door variants never reach this rule; the Sedan rule claims them.
    s.contains("coupe") || s.contains("coupé")
}

fn is_hatchback(s: &str) -> bool {
    s.contains("hatchback") || s.contains("liftback") || s.contains("hatch")
}

fn is_convertible(s: &str) -> bool {
    s.contains("convertible")
        || s.contains("cabriolet")
        || s.contains("cabrio")
        || s.contains("roadster")
        || s.contains("spyder")
}

fn is_station_wagon(s: &str) -> bool {
    s.contains("wagon") || s.contains("estate") || s.contains("shooting brake")
}

fn is_minivan(s: &str) -> bool {
    s.contains("minivan")
        || s.contains("mini-van")
        || (s.contains("passenger van") && (s.contains("compact") || s.contains("family")))
}

fn is_van(s: &str) -> bool {
    // Mutually exclusive with Minivan by construction: the qualified
    // passenger-van forms are claimed by the rule above.
    s == "van"
        || s.contains("cargo van")
        || s.contains("full-size van")
        || s.contains("full size van")
        || (s.contains("passenger van") && !s.contains("compact") && !s.contains("family"))
}

fn is_pickup_truck(s: &str) -> bool {
    s.contains("pickup")
        || s.contains("pick-up")
        || s.contains("crew cab")
        || s.contains("extended cab")
        || s.contains("regular cab")
        || s.contains("double cab")
        || (s.contains("truck") && !is_commercial_truck(s))
}

fn is_commercial_truck(s: &str) -> bool {
    s.contains("tractor")
        || s.contains("semi")
        || s.contains("commercial")
        || s.contains("box truck")
        || s.contains("dump")
        || s.contains("garbage")
        || s.contains("flatbed")
        || s.contains("tow truck")
        || s.contains("fire truck")
        || s.contains("chassis")
}

fn is_crossover(s: &str) -> bool {
    s.contains("crossover")
        || has_word(s, "cuv")
        || ((has_word(s, "suv") || s.contains("sport utility"))
            && (s.contains("compact") || s.contains("subcompact") || s.contains("small")))
}

fn is_suv(s: &str) -> bool {
    has_word(s, "suv")
        || s.contains("sport utility")
        || has_word(s, "4x4")
        || s.contains("off-road")
        || s.contains("offroad")
        || has_word(s, "mpv")
        || s.contains("multi-purpose")
        || s.contains("multipurpose")
}

// ============================================================================
// Exclusion gate
// ============================================================================

/// Substring exclusion terms. Short acronyms that would false-positive as
/// substrings ("rv", "atv", ...) are matched as whole words instead.
const EXCLUDED_SUBSTRINGS: &[&str] = &[
    "motorcycle",
    "motorbike",
    "scooter",
    "moped",
    "side-by-side",
    "side by side",
    "golf cart",
    "snowmobile",
    "low speed vehicle",
    "motorhome",
    "motor home",
    "recreational vehicle",
    "trailer",
    "tractor",
    "semi",
    "commercial",
    "incomplete",
    "chassis cab",
    "bus",
];

const EXCLUDED_WORDS: &[&str] = &["atv", "utv", "rv", "coach"];

fn is_excluded_category(s: &str) -> bool {
    EXCLUDED_SUBSTRINGS.iter().any(|term| s.contains(term))
        || EXCLUDED_WORDS.iter().any(|word| has_word(s, word))
}

fn has_word(s: &str, word: &str) -> bool {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .any(|w| w == word)
}

// ============================================================================
// Tests
// ============================================================================
