use crate::core::compatibility::BloodType;
use crate::models::{BloodRequest, Donor, DonorStats, MatchRecord, NewBloodRequest, NewDonor};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by the persistent store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached. Matching degrades to zero candidates;
    /// only fatal while persisting the request itself.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A concurrent writer holds the database; the caller may retry the
    /// whole submission.
    #[error("store busy: {0}")]
    Busy(String),

    /// Donor email or phone already registered.
    #[error("email or phone already registered")]
    DuplicateContact,

    #[error("not found: {0}")]
    NotFound(String),

    /// Any other backend failure (bad SQL, corrupt row, ...).
    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound(err.to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            sqlx::Error::Database(db) => {
                if db.is_unique_violation() {
                    StoreError::DuplicateContact
                } else if db.message().contains("database is locked")
                    || db.code().as_deref() == Some("5")
                    || db.code().as_deref() == Some("6")
                {
                    StoreError::Busy(db.message().to_string())
                } else {
                    StoreError::Backend(db.message().to_string())
                }
            }
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

/// Persistent storage for donors, requests and matches.
///
/// The pipeline depends only on this trait; swapping the backing database
/// means adding another implementation, never branching in callers. The
/// implementation is expected to serialize concurrent writers itself (row
/// locks or a busy timeout) and surface contention as [`StoreError::Busy`].
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a donor, failing with [`StoreError::DuplicateContact`] if the
    /// email or phone is already registered. Returns the new donor id.
    async fn register_donor(&self, donor: &NewDonor) -> Result<i64, StoreError>;

    /// All donors whose blood type is in `types`, ordered by ascending id.
    async fn donors_by_blood_types(&self, types: &[BloodType]) -> Result<Vec<Donor>, StoreError>;

    /// Persist a new request with `pending` status. Returns the request id.
    async fn create_request(&self, request: &NewBloodRequest) -> Result<i64, StoreError>;

    async fn get_request(&self, request_id: i64) -> Result<BloodRequest, StoreError>;

    /// Record that a donor was notified for a request. Not idempotent:
    /// duplicate calls create duplicate rows, so the pipeline calls this at
    /// most once per donor per request. Returns the match id.
    async fn insert_match(&self, request_id: i64, donor_id: i64) -> Result<i64, StoreError>;

    /// Matches recorded for one request, ordered by ascending match id.
    async fn matches_for_request(&self, request_id: i64) -> Result<Vec<MatchRecord>, StoreError>;

    /// Total number of recorded matches.
    async fn match_count(&self) -> Result<i64, StoreError>;

    /// Donor totals, grouped by blood type and by location.
    async fn donor_stats(&self) -> Result<DonorStats, StoreError>;

    /// Cheap connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
