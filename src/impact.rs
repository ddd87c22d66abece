//! Impact classification from calendar style markers.

use crate::models::Impact;

/// Ordered `(marker substring, impact)` pairs. First match wins.
const IMPACT_PATTERNS: &[(&str, Impact)] = &[
    ("icon--ff-impact-red", Impact::High),
    ("icon--ff-impact-ora", Impact::Medium),
    ("icon--ff-impact-yel", Impact::Low),
    ("icon--ff-impact-gra", Impact::NonEconomic),
];

/// Map a style marker (e.g. a `class` attribute) to an [`Impact`].
///
/// The marker may hold several class tokens; it is matched by substring.
/// A marker matching no pattern is [`Impact::Unknown`], which is a valid
/// outcome and not an error.
pub fn classify_impact(marker: &str) -> Impact {
    IMPACT_PATTERNS
        .iter()
        .find(|(pattern, _)| marker.contains(pattern))
        .map(|(_, impact)| *impact)
        .unwrap_or(Impact::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_marker_anywhere_is_high() {
        assert_eq!(classify_impact("icon icon--ff-impact-red"), Impact::High);
        assert_eq!(classify_impact("icon--ff-impact-red"), Impact::High);
        assert_eq!(
            classify_impact("calendar__impact icon--ff-impact-red extra"),
            Impact::High
        );
    }

    #[test]
    fn test_each_level() {
        assert_eq!(classify_impact("icon icon--ff-impact-ora"), Impact::Medium);
        assert_eq!(classify_impact("icon icon--ff-impact-yel"), Impact::Low);
        assert_eq!(classify_impact("icon icon--ff-impact-gra"), Impact::NonEconomic);
    }

    #[test]
    fn test_unmatched_is_unknown() {
        assert_eq!(classify_impact(""), Impact::Unknown);
        assert_eq!(classify_impact("icon icon--ff-impact-blue"), Impact::Unknown);
    }

    #[test]
    fn test_first_pattern_wins() {
        assert_eq!(
            classify_impact("icon--ff-impact-yel icon--ff-impact-red"),
            Impact::High
        );
    }
}
