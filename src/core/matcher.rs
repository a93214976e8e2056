use crate::core::compatibility::{compatible_donor_types, BloodType};
use crate::core::proximity::classify;
use crate::models::Donor;
use crate::services::store::{Store, StoreError};
use std::sync::Arc;

/// Candidate donors partitioned by proximity to the hospital.
///
/// Both lists preserve the store's fetch order (ascending donor id).
#[derive(Debug, Default)]
pub struct CandidateTiers {
    pub near: Vec<Donor>,
    pub far: Vec<Donor>,
}

/// Finds eligible donors for a request and splits them into near/far tiers.
pub struct DonorMatcher {
    store: Arc<dyn Store>,
}

impl DonorMatcher {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Fetch all donors compatible with `required` and partition them by
    /// proximity to `hospital_location`.
    ///
    /// A store failure surfaces as [`StoreError`]; the caller decides how to
    /// degrade (the pipeline treats it as zero candidates, logged apart from
    /// a genuinely empty result).
    pub async fn find_candidates(
        &self,
        required: BloodType,
        hospital_location: &str,
    ) -> Result<CandidateTiers, StoreError> {
        let donor_types = compatible_donor_types(required);
        if donor_types.is_empty() {
            return Ok(CandidateTiers::default());
        }

        let donors = self.store.donors_by_blood_types(donor_types).await?;
        let tiers = partition_by_proximity(donors, hospital_location);

        tracing::debug!(
            required = %required,
            near = tiers.near.len(),
            far = tiers.far.len(),
            "Partitioned candidate donors"
        );

        Ok(tiers)
    }
}

/// Split donors into near/far tiers by location, preserving input order.
pub fn partition_by_proximity(donors: Vec<Donor>, hospital_location: &str) -> CandidateTiers {
    let mut tiers = CandidateTiers::default();
    for donor in donors {
        if classify(&donor.location, hospital_location).is_near() {
            tiers.near.push(donor);
        } else {
            tiers.far.push(donor);
        }
    }
    tiers
}
