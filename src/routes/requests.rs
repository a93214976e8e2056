use crate::core::compatibility::BloodType;
use crate::error::ApiError;
use crate::models::{
    HealthResponse, MatchSummaryResponse, NewBloodRequest, StatsResponse, SubmitRequestRequest,
    SubmitRequestResponse,
};
use crate::routes::AppState;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/requests/submit", web::post().to(submit_request))
        .route("/requests/{id}/matches", web::get().to(match_summary))
        .route("/stats", web::get().to(stats))
        .route("/health", web::get().to(health_check));
}

/// Submit a blood request and notify matched donors
///
/// POST /api/v1/requests/submit
///
/// Always succeeds once the request record is persisted; the counts reflect
/// best-effort notification outcomes.
async fn submit_request(
    state: web::Data<AppState>,
    req: web::Json<SubmitRequestRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let required_blood_type: BloodType = req
        .required_blood_type
        .parse()
        .map_err(|_| ApiError::UnknownBloodType(req.required_blood_type.clone()))?;

    let request = NewBloodRequest {
        hospital_name: req.hospital_name.clone(),
        hospital_email: req.hospital_email.clone(),
        hospital_phone: req.hospital_phone.clone(),
        hospital_location: req.hospital_location.clone(),
        required_blood_type,
        patient_details: req.patient_details.clone().filter(|d| !d.trim().is_empty()),
        urgency_level: req.urgency_level.unwrap_or_default(),
    };

    let summary = state.pipeline.submit(request).await?;

    Ok(HttpResponse::Created().json(SubmitRequestResponse {
        success: true,
        message: format!(
            "Request submitted successfully. {} nearby donors notified.",
            summary.notified_count
        ),
        request_id: summary.request_id,
        near_count: summary.near_count,
        far_count: summary.far_count,
        notified_count: summary.notified_count,
    }))
}

/// Candidate tier sizes for a stored request
///
/// GET /api/v1/requests/{id}/matches
async fn match_summary(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let request_id = path.into_inner();
    let (request, tiers) = state.pipeline.match_summary(request_id).await?;

    Ok(HttpResponse::Ok().json(MatchSummaryResponse {
        request_id: request.id,
        required_blood_type: request.required_blood_type.to_string(),
        hospital_location: request.hospital_location,
        near_count: tiers.near.len(),
        far_count: tiers.far.len(),
    }))
}

/// Donor statistics and total connections made
///
/// GET /api/v1/stats
async fn stats(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let donor_stats = state.store.donor_stats().await?;
    let connections_made = state.store.match_count().await?;

    Ok(HttpResponse::Ok().json(StatsResponse {
        total_donors: donor_stats.total_donors,
        by_blood_type: donor_stats.by_blood_type,
        by_location: donor_stats.by_location,
        connections_made,
    }))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.ping().await.is_ok();
    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
