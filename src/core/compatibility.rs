use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// ABO/Rh blood type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "O-")]
    ONeg,
    #[serde(rename = "O+")]
    OPos,
    #[serde(rename = "A-")]
    ANeg,
    #[serde(rename = "A+")]
    APos,
    #[serde(rename = "B-")]
    BNeg,
    #[serde(rename = "B+")]
    BPos,
    #[serde(rename = "AB-")]
    ABNeg,
    #[serde(rename = "AB+")]
    ABPos,
}

/// All eight defined blood types.
pub const ALL_BLOOD_TYPES: [BloodType; 8] = [
    BloodType::ONeg,
    BloodType::OPos,
    BloodType::ANeg,
    BloodType::APos,
    BloodType::BNeg,
    BloodType::BPos,
    BloodType::ABNeg,
    BloodType::ABPos,
];

/// Returned when a string is not one of the eight defined blood types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown blood type: {0}")]
pub struct ParseBloodTypeError(pub String);

impl BloodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::ONeg => "O-",
            BloodType::OPos => "O+",
            BloodType::ANeg => "A-",
            BloodType::APos => "A+",
            BloodType::BNeg => "B-",
            BloodType::BPos => "B+",
            BloodType::ABNeg => "AB-",
            BloodType::ABPos => "AB+",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = ParseBloodTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "O-" => Ok(BloodType::ONeg),
            "O+" => Ok(BloodType::OPos),
            "A-" => Ok(BloodType::ANeg),
            "A+" => Ok(BloodType::APos),
            "B-" => Ok(BloodType::BNeg),
            "B+" => Ok(BloodType::BPos),
            "AB-" => Ok(BloodType::ABNeg),
            "AB+" => Ok(BloodType::ABPos),
            other => Err(ParseBloodTypeError(other.to_string())),
        }
    }
}

/// Blood types whose donors are safe for a recipient of the given type.
///
/// Fixed ABO/Rh matrix: O- donates to everyone, AB+ receives from everyone.
/// The relation is not symmetric.
pub fn compatible_donor_types(requested: BloodType) -> &'static [BloodType] {
    use BloodType::*;
    match requested {
        APos => &[APos, ANeg, OPos, ONeg],
        ANeg => &[ANeg, ONeg],
        BPos => &[BPos, BNeg, OPos, ONeg],
        BNeg => &[BNeg, ONeg],
        ABPos => &[APos, ANeg, BPos, BNeg, ABPos, ABNeg, OPos, ONeg],
        ABNeg => &[ANeg, BNeg, ABNeg, ONeg],
        OPos => &[OPos, ONeg],
        ONeg => &[ONeg],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_is_self_compatible() {
        for bt in ALL_BLOOD_TYPES {
            let donors = compatible_donor_types(bt);
            assert!(!donors.is_empty(), "{} has no donors", bt);
            assert!(donors.contains(&bt), "{} is not self-compatible", bt);
        }
    }

    #[test]
    fn test_o_negative_only_receives_o_negative() {
        assert_eq!(compatible_donor_types(BloodType::ONeg), &[BloodType::ONeg]);
    }

    #[test]
    fn test_ab_positive_receives_all_eight() {
        let donors = compatible_donor_types(BloodType::ABPos);
        assert_eq!(donors.len(), 8);
        for bt in ALL_BLOOD_TYPES {
            assert!(donors.contains(&bt));
        }
    }

    #[test]
    fn test_universal_donor_reaches_everyone() {
        for bt in ALL_BLOOD_TYPES {
            assert!(compatible_donor_types(bt).contains(&BloodType::ONeg));
        }
    }

    #[test]
    fn test_matrix_is_not_symmetric() {
        // O- appears as a donor for A+, but A+ does not donate to O-.
        assert!(compatible_donor_types(BloodType::APos).contains(&BloodType::ONeg));
        assert!(!compatible_donor_types(BloodType::ONeg).contains(&BloodType::APos));
    }

    #[test]
    fn test_negative_recipients_only_accept_negative_donors() {
        for bt in [BloodType::ANeg, BloodType::BNeg, BloodType::ABNeg, BloodType::ONeg] {
            for donor in compatible_donor_types(bt) {
                assert!(
                    donor.as_str().ends_with('-'),
                    "{} listed Rh+ donor {}",
                    bt,
                    donor
                );
            }
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for bt in ALL_BLOOD_TYPES {
            assert_eq!(bt.as_str().parse::<BloodType>().unwrap(), bt);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ab+".parse::<BloodType>().unwrap(), BloodType::ABPos);
        assert_eq!(" o- ".parse::<BloodType>().unwrap(), BloodType::ONeg);
    }

    #[test]
    fn test_parse_rejects_unknown_types() {
        assert!("C+".parse::<BloodType>().is_err());
        assert!("".parse::<BloodType>().is_err());
        assert!("AB".parse::<BloodType>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_labels() {
        let json = serde_json::to_string(&BloodType::ABNeg).unwrap();
        assert_eq!(json, "\"AB-\"");
        let parsed: BloodType = serde_json::from_str("\"O+\"").unwrap();
        assert_eq!(parsed, BloodType::OPos);
    }
}
