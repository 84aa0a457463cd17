// Field priority resolution
//
// Concept: resolve the scalar `trim` and `model` values for a working
// descriptor. Trim resolution is a strict ordered fallback over four source
// tiers, first non-empty wins; each tier carries a fixed informational
// confidence for the diagnostics report. Model resolution strips embedded
// trim suffixes that providers concatenate onto the model name.

use tracing::debug;
use vindec_common::vehicle::{TrimResolution, TrimSource, VehicleDescriptor};

/// Resolve the scalar trim via the 4-tier fallback:
/// 1. explicit `specs.trim`
/// 2. externally-computed best-match candidate (opaque input)
/// 3. first entry of the candidate trim list
/// 4. manufacturer `specs.series` (brands that encode trim in series,
///    e.g. "335i")
///
/// The confidence attached to the result identifies the tier that supplied
/// the value; it is never compared to make the decision.
pub fn resolve_trim(
    descriptor: &VehicleDescriptor,
    best_match: Option<&str>,
) -> TrimResolution {
    let tiers: [(TrimSource, Option<&str>); 4] = [
        (TrimSource::SpecsTrim, descriptor.specs.trim.as_deref()),
        (TrimSource::BestMatch, best_match),
        (
            TrimSource::FirstTrimEntry,
            descriptor.trims.first().map(|t| t.name.as_str()),
        ),
        (TrimSource::SpecsSeries, descriptor.specs.series.as_deref()),
    ];

    for (source, value) in tiers {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            debug!(trim = v, source = ?source, "trim resolved");
            return TrimResolution::from_tier(v, source);
        }
    }

    TrimResolution::none()
}

/// Suffix tokens that indicate a trim was concatenated onto the model name.
/// Only a trailing match is stripped; mid-string occurrences are part of the
/// legitimate model name.
const CYLINDER_SUFFIX_TOKENS: &[&str] = &["V6", "V8", "V10", "V12", "W12", "W16"];
const PERFORMANCE_SUFFIX_TOKENS: &[&str] = &["TURBO", "GTS", "RS"];

/// Strip trailing embedded-trim suffixes from a model name.
///
/// "Bentayga V8" → "Bentayga"; "911 GT3 RS" → "911" (multi-token suffixes
/// strip greedily from the right). A model that is nothing but suffix
/// tokens keeps its final token rather than collapsing to empty.
pub fn resolve_model(model: &str) -> String {
    let mut tokens: Vec<&str> = model.split_whitespace().collect();
    while tokens.len() > 1 && is_trim_suffix_token(tokens[tokens.len() - 1]) {
        let stripped = tokens.pop();
        debug!(model = %model, token = stripped.unwrap_or_default(), "embedded trim suffix stripped");
    }
    tokens.join(" ")
}

fn is_trim_suffix_token(token: &str) -> bool {
    let upper = token.to_ascii_uppercase();
    CYLINDER_SUFFIX_TOKENS.contains(&upper.as_str())
        || PERFORMANCE_SUFFIX_TOKENS.contains(&upper.as_str())
        || is_gt_number(&upper)
}

/// "GT" followed by digits (GT2, GT3, GT4). Bare "GT" and letter forms like
/// "GT-R" or "GTI" are legitimate model names and stay.
fn is_gt_number(upper: &str) -> bool {
    upper
        .strip_prefix("GT")
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vindec_common::vehicle::TrimCandidate;

    fn descriptor_with(
        trim: Option<&str>,
        series: Option<&str>,
        trims: &[&str],
    ) -> VehicleDescriptor {
        let mut descriptor = VehicleDescriptor::default();
        descriptor.specs.trim = trim.map(String::from);
        descriptor.specs.series = series.map(String::from);
        descriptor.trims = trims.iter().map(|t| TrimCandidate::named(*t)).collect();
        descriptor
    }

    #[test]
    fn explicit_trim_wins() {
        let descriptor = descriptor_with(Some("4S Cross Turismo"), Some("Y1A"), &["Turbo S"]);
        let resolution = resolve_trim(&descriptor, Some("4S"));
        assert_eq!(resolution.value, "4S Cross Turismo");
        assert_eq!(resolution.source, TrimSource::SpecsTrim);
        assert_eq!(resolution.confidence, 0.9);
    }

    #[test]
    fn best_match_beats_trim_list() {
        let descriptor = descriptor_with(None, None, &["Base", "Premium"]);
        let resolution = resolve_trim(&descriptor, Some("Premium"));
        assert_eq!(resolution.value, "Premium");
        assert_eq!(resolution.source, TrimSource::BestMatch);
    }

    #[test]
    fn first_trim_entry_beats_series() {
        let descriptor = descriptor_with(None, Some("G20"), &["M Sport", "Luxury Line"]);
        let resolution = resolve_trim(&descriptor, None);
        assert_eq!(resolution.value, "M Sport");
        assert_eq!(resolution.source, TrimSource::FirstTrimEntry);
    }

    #[test]
    fn series_is_the_last_resort() {
        let descriptor = descriptor_with(None, Some("440i"), &[]);
        let resolution = resolve_trim(&descriptor, None);
        assert_eq!(resolution.value, "440i");
        assert_eq!(resolution.source, TrimSource::SpecsSeries);
        assert_eq!(resolution.confidence, 0.5);
    }

    #[test]
    fn whitespace_only_values_are_empty() {
        let descriptor = descriptor_with(Some("   "), Some("335i"), &[]);
        let resolution = resolve_trim(&descriptor, None);
        assert_eq!(resolution.value, "335i");
        assert_eq!(resolution.source, TrimSource::SpecsSeries);
    }

    #[test]
    fn nothing_resolves_to_none() {
        let descriptor = descriptor_with(None, None, &[]);
        let resolution = resolve_trim(&descriptor, None);
        assert_eq!(resolution.value, "");
        assert_eq!(resolution.source, TrimSource::None);
        assert_eq!(resolution.confidence, 0.0);
    }

    #[test]
    fn cylinder_suffix_stripped_at_end() {
        assert_eq!(resolve_model("Bentayga V8"), "Bentayga");
        assert_eq!(resolve_model("Continental GT W12"), "Continental GT");
        assert_eq!(resolve_model("Flying Spur V8"), "Flying Spur");
    }

    #[test]
    fn performance_suffixes_strip_greedily() {
        assert_eq!(resolve_model("911 GT3 RS"), "911");
        assert_eq!(resolve_model("911 GT3"), "911");
        assert_eq!(resolve_model("911 Turbo"), "911");
        assert_eq!(resolve_model("Cayenne GTS"), "Cayenne");
    }

    #[test]
    fn mid_string_tokens_stay() {
        assert_eq!(resolve_model("Turbo Sprinter"), "Turbo Sprinter");
        assert_eq!(resolve_model("GT3 Touring"), "GT3 Touring");
    }

    #[test]
    fn legitimate_gt_models_stay() {
        assert_eq!(resolve_model("GT-R"), "GT-R");
        assert_eq!(resolve_model("Mustang GT"), "Mustang GT");
        assert_eq!(resolve_model("Golf GTI"), "Golf GTI");
    }

    #[test]
    fn model_never_collapses_to_empty() {
        assert_eq!(resolve_model("GTS"), "GTS");
        assert_eq!(resolve_model("V8"), "V8");
    }
}
