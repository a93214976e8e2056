use crate::models::domain::GroupCount;
use serde::{Deserialize, Serialize};

/// Response for donor registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDonorResponse {
    pub success: bool,
    pub message: String,
    pub donor_id: i64,
}

/// Response for request submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequestResponse {
    pub success: bool,
    pub message: String,
    pub request_id: i64,
    pub near_count: usize,
    pub far_count: usize,
    pub notified_count: usize,
}

/// Response for the match summary of a stored request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummaryResponse {
    pub request_id: i64,
    pub required_blood_type: String,
    pub hospital_location: String,
    pub near_count: usize,
    pub far_count: usize,
}

/// Response for the stats endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_donors: i64,
    pub by_blood_type: Vec<GroupCount>,
    pub by_location: Vec<GroupCount>,
    pub connections_made: i64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
