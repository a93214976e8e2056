// Route exports
pub mod donors;
pub mod requests;

use crate::core::RequestPipeline;
use crate::services::Store;
use actix_web::web;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub pipeline: Arc<RequestPipeline>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(donors::configure)
            .configure(requests::configure),
    );
}
