use crate::core::compatibility::BloodType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A registered donor. Created on registration and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donor {
    pub id: i64,
    pub name: String,
    pub blood_type: BloodType,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Donor registration fields, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewDonor {
    pub name: String,
    pub blood_type: BloodType,
    pub email: String,
    pub phone: String,
    pub location: String,
}

/// Urgency of a blood request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Normal,
    Urgent,
    Critical,
}

/// Returned when a stored label is not a known urgency level.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown urgency level: {0}")]
pub struct ParseUrgencyError(pub String);

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::Urgent => "urgent",
            Urgency::Critical => "critical",
        }
    }
}

impl FromStr for Urgency {
    type Err = ParseUrgencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Urgency::Normal),
            "urgent" => Ok(Urgency::Urgent),
            "critical" => Ok(Urgency::Critical),
            other => Err(ParseUrgencyError(other.to_string())),
        }
    }
}

/// Lifecycle status of a stored request. New requests start as `pending`;
/// transitions happen through external admin action, not in this service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Fulfilled,
    Closed,
}

/// Returned when a stored label is not a known request status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown request status: {0}")]
pub struct ParseRequestStatusError(pub String);

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Fulfilled => "fulfilled",
            RequestStatus::Closed => "closed",
        }
    }
}

impl FromStr for RequestStatus {
    type Err = ParseRequestStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "fulfilled" => Ok(RequestStatus::Fulfilled),
            "closed" => Ok(RequestStatus::Closed),
            other => Err(ParseRequestStatusError(other.to_string())),
        }
    }
}

/// A stored hospital blood request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: i64,
    pub hospital_name: String,
    pub hospital_email: String,
    pub hospital_phone: String,
    pub hospital_location: String,
    pub required_blood_type: BloodType,
    pub patient_details: Option<String>,
    pub urgency_level: Urgency,
    pub status: RequestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Request submission fields, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewBloodRequest {
    pub hospital_name: String,
    pub hospital_email: String,
    pub hospital_phone: String,
    pub hospital_location: String,
    pub required_blood_type: BloodType,
    pub patient_details: Option<String>,
    pub urgency_level: Urgency,
}

/// The request fields a donor needs to see in a notification.
#[derive(Debug, Clone)]
pub struct RequestSummary {
    pub hospital_name: String,
    pub hospital_email: String,
    pub hospital_phone: String,
    pub hospital_location: String,
    pub blood_type: BloodType,
    pub patient_details: Option<String>,
}

impl From<&NewBloodRequest> for RequestSummary {
    fn from(request: &NewBloodRequest) -> Self {
        Self {
            hospital_name: request.hospital_name.clone(),
            hospital_email: request.hospital_email.clone(),
            hospital_phone: request.hospital_phone.clone(),
            hospital_location: request.hospital_location.clone(),
            blood_type: request.required_blood_type,
            patient_details: request.patient_details.clone(),
        }
    }
}

/// A recorded donor notification for a request. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: i64,
    pub request_id: i64,
    pub donor_id: i64,
    pub notified_at: chrono::DateTime<chrono::Utc>,
}

/// Per-group donor count, used by the stats endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCount {
    pub label: String,
    pub count: i64,
}

/// Aggregate donor statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DonorStats {
    pub total_donors: i64,
    pub by_blood_type: Vec<GroupCount>,
    pub by_location: Vec<GroupCount>,
}
