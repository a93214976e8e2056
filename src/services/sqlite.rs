use crate::core::compatibility::BloodType;
use crate::models::{
    BloodRequest, Donor, DonorStats, GroupCount, MatchRecord, NewBloodRequest, NewDonor,
    ParseRequestStatusError, ParseUrgencyError,
};
use crate::services::store::{Store, StoreError};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

/// SQLite-backed [`Store`].
///
/// Runs in WAL mode with a busy timeout so concurrent pipeline runs are
/// serialized by the database rather than by in-process locking.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `database_url`, apply pragmas and run migrations.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        busy_timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        // Pragmas go through connect options so every pooled connection
        // gets them, not just the first one handed out.
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(busy_timeout_secs));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Self { pool })
    }

    fn donor_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Donor, StoreError> {
        let blood_type: String = row.get("blood_type");
        Ok(Donor {
            id: row.get("id"),
            name: row.get("name"),
            blood_type: blood_type
                .parse::<BloodType>()
                .map_err(|e| StoreError::Backend(e.to_string()))?,
            email: row.get("email"),
            phone: row.get("phone"),
            location: row.get("location"),
            created_at: row.get("created_at"),
        })
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn register_donor(&self, donor: &NewDonor) -> Result<i64, StoreError> {
        let row = sqlx::query(
            "INSERT INTO donors (name, blood_type, email, phone, location, created_at)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&donor.name)
        .bind(donor.blood_type.as_str())
        .bind(&donor.email)
        .bind(&donor.phone)
        .bind(&donor.location)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.get("id");
        tracing::debug!(donor_id = id, blood_type = %donor.blood_type, "Registered donor");
        Ok(id)
    }

    async fn donors_by_blood_types(&self, types: &[BloodType]) -> Result<Vec<Donor>, StoreError> {
        if types.is_empty() {
            return Ok(vec![]);
        }

        let placeholders = vec!["?"; types.len()].join(",");
        let sql = format!(
            "SELECT id, name, blood_type, email, phone, location, created_at
             FROM donors WHERE blood_type IN ({placeholders}) ORDER BY id ASC"
        );

        let mut query = sqlx::query(&sql);
        for bt in types {
            query = query.bind(bt.as_str());
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(Self::donor_from_row).collect()
    }

    async fn create_request(&self, request: &NewBloodRequest) -> Result<i64, StoreError> {
        let row = sqlx::query(
            "INSERT INTO blood_requests
             (hospital_name, hospital_email, hospital_phone, hospital_location,
              required_blood_type, patient_details, urgency_level, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, 'pending', ?) RETURNING id",
        )
        .bind(&request.hospital_name)
        .bind(&request.hospital_email)
        .bind(&request.hospital_phone)
        .bind(&request.hospital_location)
        .bind(request.required_blood_type.as_str())
        .bind(&request.patient_details)
        .bind(request.urgency_level.as_str())
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    async fn get_request(&self, request_id: i64) -> Result<BloodRequest, StoreError> {
        let row = sqlx::query(
            "SELECT id, hospital_name, hospital_email, hospital_phone, hospital_location,
                    required_blood_type, patient_details, urgency_level, status, created_at
             FROM blood_requests WHERE id = ?",
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("request {request_id}")))?;

        let required: String = row.get("required_blood_type");
        let urgency: String = row.get("urgency_level");
        let status: String = row.get("status");

        Ok(BloodRequest {
            id: row.get("id"),
            hospital_name: row.get("hospital_name"),
            hospital_email: row.get("hospital_email"),
            hospital_phone: row.get("hospital_phone"),
            hospital_location: row.get("hospital_location"),
            required_blood_type: required
                .parse()
                .map_err(|e: crate::core::compatibility::ParseBloodTypeError| {
                    StoreError::Backend(e.to_string())
                })?,
            patient_details: row.get("patient_details"),
            urgency_level: urgency
                .parse()
                .map_err(|e: ParseUrgencyError| StoreError::Backend(e.to_string()))?,
            status: status
                .parse()
                .map_err(|e: ParseRequestStatusError| StoreError::Backend(e.to_string()))?,
            created_at: row.get("created_at"),
        })
    }

    async fn insert_match(&self, request_id: i64, donor_id: i64) -> Result<i64, StoreError> {
        let row = sqlx::query(
            "INSERT INTO matches (request_id, donor_id, notified_at)
             VALUES (?, ?, ?) RETURNING id",
        )
        .bind(request_id)
        .bind(donor_id)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(request_id, donor_id, "Recorded match");
        Ok(row.get("id"))
    }

    async fn matches_for_request(&self, request_id: i64) -> Result<Vec<MatchRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, request_id, donor_id, notified_at
             FROM matches WHERE request_id = ? ORDER BY id ASC",
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| MatchRecord {
                id: row.get("id"),
                request_id: row.get("request_id"),
                donor_id: row.get("donor_id"),
                notified_at: row.get("notified_at"),
            })
            .collect())
    }

    async fn match_count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM matches")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn donor_stats(&self) -> Result<DonorStats, StoreError> {
        let total_donors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM donors")
            .fetch_one(&self.pool)
            .await?;

        let by_blood_type = sqlx::query(
            "SELECT blood_type, COUNT(*) AS count FROM donors
             GROUP BY blood_type ORDER BY blood_type",
        )
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(|row| GroupCount {
            label: row.get("blood_type"),
            count: row.get("count"),
        })
        .collect();

        let by_location = sqlx::query(
            "SELECT location, COUNT(*) AS count FROM donors
             GROUP BY location ORDER BY count DESC",
        )
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(|row| GroupCount {
            label: row.get("location"),
            count: row.get("count"),
        })
        .collect();

        Ok(DonorStats {
            total_donors,
            by_blood_type,
            by_location,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
