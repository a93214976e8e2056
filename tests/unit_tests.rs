// Unit tests exercising the public library surface.

use bloodlink::{
    classify, compatible_donor_types, partition_by_proximity, BloodType, Donor, Proximity,
    ALL_BLOOD_TYPES,
};

fn donor(id: i64, location: &str) -> Donor {
    Donor {
        id,
        name: format!("Donor {id}"),
        blood_type: BloodType::ONeg,
        email: format!("donor{id}@example.com"),
        phone: format!("+91900000000{id}"),
        location: location.to_string(),
        created_at: chrono::Utc::now(),
    }
}

#[test]
fn test_compatibility_matrix_spot_checks() {
    assert_eq!(compatible_donor_types(BloodType::ONeg), &[BloodType::ONeg]);
    assert_eq!(compatible_donor_types(BloodType::ABPos).len(), 8);
    assert_eq!(
        compatible_donor_types(BloodType::APos),
        &[BloodType::APos, BloodType::ANeg, BloodType::OPos, BloodType::ONeg]
    );
    assert_eq!(
        compatible_donor_types(BloodType::ABNeg),
        &[BloodType::ANeg, BloodType::BNeg, BloodType::ABNeg, BloodType::ONeg]
    );
}

#[test]
fn test_all_types_are_self_compatible() {
    for bt in ALL_BLOOD_TYPES {
        assert!(compatible_donor_types(bt).contains(&bt));
    }
}

#[test]
fn test_classify_same_nearby_distant() {
    assert_eq!(classify("Mumbai", "Mumbai"), Proximity::Same);
    assert_eq!(classify("Mumbai", "Mumbai Central"), Proximity::Nearby);
    assert_eq!(classify("Mumbai", "Delhi"), Proximity::Distant);
}

#[test]
fn test_classify_symmetry() {
    for (a, b) in [
        ("Mumbai", "Mumbai Central"),
        ("Pune", "Delhi"),
        ("chennai", "CHENNAI"),
    ] {
        assert_eq!(classify(a, b), classify(b, a));
    }
}

#[test]
fn test_partition_six_near_four_far() {
    let mut donors = Vec::new();
    for id in 1..=4 {
        donors.push(donor(id, "Mumbai"));
    }
    for id in 5..=6 {
        donors.push(donor(id, "Mumbai Central"));
    }
    for id in 7..=10 {
        donors.push(donor(id, "Delhi"));
    }

    // The far-tier notify cap is applied at notification time, not here.
    let tiers = partition_by_proximity(donors, "Mumbai");
    assert_eq!(tiers.near.len(), 6);
    assert_eq!(tiers.far.len(), 4);
}

#[test]
fn test_blood_type_labels_round_trip() {
    for bt in ALL_BLOOD_TYPES {
        let label = bt.to_string();
        assert_eq!(label.parse::<BloodType>().unwrap(), bt);
    }
    assert!("X+".parse::<BloodType>().is_err());
}
