//! src/routes/invitation/preflight.rs

use crate::error::ErrorBody;
use actix_web::http::header::ALLOW;
use actix_web::HttpResponse;

/// CORS preflight. The CORS headers themselves are added to every response by the app.
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((ALLOW, "POST, OPTIONS"))
        .json(ErrorBody {
            error: "Method not allowed".into(),
            details: None,
        })
}
