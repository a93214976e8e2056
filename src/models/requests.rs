use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of POST /api/v1/donors/register
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterDonorRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Canonical label, e.g. "O-" or "AB+". Rejected with a 400 if it is
    /// not one of the eight defined types.
    #[validate(length(min = 1))]
    pub blood_type: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 5, max = 20))]
    pub phone: String,
    #[validate(length(min = 1, max = 100))]
    pub location: String,
}

/// Body of POST /api/v1/requests/submit
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitRequestRequest {
    #[validate(length(min = 1, max = 200))]
    pub hospital_name: String,
    #[validate(email)]
    pub hospital_email: String,
    #[validate(length(min = 5, max = 20))]
    pub hospital_phone: String,
    #[validate(length(min = 1, max = 100))]
    pub hospital_location: String,
    #[validate(length(min = 1))]
    pub required_blood_type: String,
    #[serde(default)]
    pub patient_details: Option<String>,
    #[serde(default)]
    pub urgency_level: Option<crate::models::Urgency>,
}
