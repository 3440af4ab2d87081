//! src/routes/invitation/post.rs

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use anyhow::Context;
use chrono::Utc;
use tracing::field::display;
use tracing::Span;

use crate::domain::{InvitationFormData, InvitationRequest, Notification};
use crate::error::{Error, IntakeResult};
use crate::startup::DeliveryTimeout;
use crate::transport::{deliver, DeliveryReceipt, NotificationTransport};

pub const INVITATION_SENT: &str = "Invitation request sent successfully";

#[derive(serde::Serialize, Debug)]
pub struct InvitationResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DeliveryReceipt>,
}

#[tracing::instrument(
    name = "Relaying an invitation request",
    skip(body, transport, timeout),
    fields(
        applicant_email = tracing::field::Empty,
        applicant_name = tracing::field::Empty
    )
)]
pub async fn send_invitation(
    body: Result<web::Bytes, actix_web::Error>,
    transport: web::Data<dyn NotificationTransport>,
    timeout: web::Data<DeliveryTimeout>,
) -> IntakeResult<HttpResponse> {
    let body = body.map_err(|e| {
        if e.as_response_error().status_code() == StatusCode::PAYLOAD_TOO_LARGE {
            Error::PayloadTooLarge
        } else {
            Error::UnexpectedError(anyhow::anyhow!("Failed to read the request body: {}", e))
        }
    })?;
    // the body is read as JSON whatever the content type says
    let payload: serde_json::Value = serde_json::from_slice(&body)
        .context("Failed to parse the invitation request body as JSON.")?;
    let form = InvitationFormData::from_payload(payload)
        .context("Failed to read the invitation request from the body.")?;
    let request: InvitationRequest = form.try_into()?;
    Span::current()
        .record("applicant_email", display(&request.email))
        .record("applicant_name", display(&request.full_name));

    transport.ensure_configured()?;
    let notification = Notification::compose(&request, Utc::now());
    let receipt = deliver(transport.get_ref(), &notification, timeout.0)
        .await
        .map_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to relay the invitation request"
            );
            e
        })?;

    Ok(HttpResponse::Ok().json(InvitationResponse {
        success: true,
        message: INVITATION_SENT,
        data: (!receipt.is_empty()).then_some(receipt),
    }))
}
