/// Coarse proximity tier between two free-text locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Proximity {
    Same,
    Nearby,
    Distant,
}

impl Proximity {
    /// Same or nearby locations count as the near tier.
    pub fn is_near(&self) -> bool {
        matches!(self, Proximity::Same | Proximity::Nearby)
    }
}

/// Classify two location strings into a proximity tier.
///
/// This is a string-containment heuristic, not geodistance: both inputs are
/// trimmed and case-folded, equality means [`Proximity::Same`], one being a
/// substring of the other means [`Proximity::Nearby`] (captures "Mumbai" vs
/// "Mumbai Central"), anything else is [`Proximity::Distant`]. A geocoding
/// backend could replace this without changing the contract.
pub fn classify(location_a: &str, location_b: &str) -> Proximity {
    let a = location_a.trim().to_lowercase();
    let b = location_b.trim().to_lowercase();

    if a == b {
        return Proximity::Same;
    }

    if a.contains(&b) || b.contains(&a) {
        return Proximity::Nearby;
    }

    Proximity::Distant
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_locations_are_same() {
        assert_eq!(classify("Mumbai", "Mumbai"), Proximity::Same);
    }

    #[test]
    fn test_containment_is_nearby() {
        assert_eq!(classify("Mumbai", "Mumbai Central"), Proximity::Nearby);
        assert_eq!(classify("Mumbai Central", "Mumbai"), Proximity::Nearby);
    }

    #[test]
    fn test_unrelated_locations_are_distant() {
        assert_eq!(classify("Mumbai", "Delhi"), Proximity::Distant);
    }

    #[test]
    fn test_normalization_ignores_case_and_whitespace() {
        assert_eq!(classify("  mumbai ", "MUMBAI"), Proximity::Same);
        assert_eq!(classify("mumbai", "Mumbai Central "), Proximity::Nearby);
    }

    #[test]
    fn test_classification_is_symmetric() {
        let pairs = [
            ("Mumbai", "Mumbai"),
            ("Mumbai", "Mumbai Central"),
            ("Mumbai", "Delhi"),
            ("", "Delhi"),
            ("", ""),
        ];
        for (a, b) in pairs {
            assert_eq!(classify(a, b), classify(b, a), "asymmetric for {a:?}/{b:?}");
        }
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Proximity::Same < Proximity::Nearby);
        assert!(Proximity::Nearby < Proximity::Distant);
        assert!(Proximity::Same.is_near());
        assert!(Proximity::Nearby.is_near());
        assert!(!Proximity::Distant.is_near());
    }
}
