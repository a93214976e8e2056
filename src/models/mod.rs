// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BloodRequest, Donor, DonorStats, GroupCount, MatchRecord, NewBloodRequest, NewDonor,
    ParseRequestStatusError, ParseUrgencyError, RequestStatus, RequestSummary, Urgency,
};
pub use requests::{RegisterDonorRequest, SubmitRequestRequest};
pub use responses::{
    ErrorResponse, HealthResponse, MatchSummaryResponse, RegisterDonorResponse, StatsResponse,
    SubmitRequestResponse,
};
