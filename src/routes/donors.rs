use crate::core::compatibility::BloodType;
use crate::error::ApiError;
use crate::models::{NewDonor, RegisterDonorRequest, RegisterDonorResponse};
use crate::routes::AppState;
use actix_web::{web, HttpResponse};
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/donors/register", web::post().to(register_donor));
}

/// Register a new donor
///
/// POST /api/v1/donors/register
async fn register_donor(
    state: web::Data<AppState>,
    req: web::Json<RegisterDonorRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let blood_type: BloodType = req
        .blood_type
        .parse()
        .map_err(|_| ApiError::UnknownBloodType(req.blood_type.clone()))?;

    let donor = NewDonor {
        name: req.name.clone(),
        blood_type,
        email: req.email.clone(),
        phone: req.phone.clone(),
        location: req.location.clone(),
    };

    let donor_id = state.store.register_donor(&donor).await?;

    tracing::info!(donor_id, blood_type = %blood_type, "Donor registered");

    Ok(HttpResponse::Created().json(RegisterDonorResponse {
        success: true,
        message: "Donor registered successfully".to_string(),
        donor_id,
    }))
}
