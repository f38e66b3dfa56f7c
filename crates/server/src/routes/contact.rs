use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::{error, info, warn};

use service::contact::ContactSubmission;
use service::contact_info::{ContactInfo, ContactInfoInput};

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

#[derive(Serialize)]
pub struct ContactOutput { pub success: bool, pub message: &'static str }

#[utoipa::path(
    post, path = "/api/contact", tag = "public",
    request_body = crate::openapi::ContactRequest,
    responses((status = 200, description = "Sent"), (status = 400, description = "Missing required fields"), (status = 500, description = "Message not sent"))
)]
pub async fn submit(State(state): State<ServerState>, Json(input): Json<ContactSubmission>) -> Result<Json<ContactOutput>, JsonApiError> {
    input.validate()?;
    if let Err(e) = state.relay.send(&input).await {
        error!(code = e.code(), error = %e, "contact relay failed");
        return Err(JsonApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Message Not Sent",
            Some("Failed to send message. Please try again later.".into()),
        ));
    }
    info!(service = %input.service, "contact submission relayed");
    Ok(Json(ContactOutput { success: true, message: "Email sent successfully" }))
}

#[utoipa::path(get, path = "/api/contact-info", tag = "public", responses((status = 200, description = "Contact details or null")))]
pub async fn public_info(State(state): State<ServerState>) -> Json<Option<ContactInfo>> {
    match state.contact_info.get().await {
        Ok(info) => Json(info),
        Err(e) => {
            warn!(error = %e, "contact info unavailable, rendering null");
            Json(None)
        }
    }
}

#[utoipa::path(get, path = "/admin/contact-info", tag = "admin", responses((status = 200, description = "Contact details or null")))]
pub async fn get_info(State(state): State<ServerState>) -> Result<Json<Option<ContactInfo>>, JsonApiError> {
    Ok(Json(state.contact_info.get().await?))
}

#[utoipa::path(
    put, path = "/admin/contact-info", tag = "admin",
    request_body = crate::openapi::ContactInfoRequest,
    responses((status = 200, description = "Saved"), (status = 400, description = "Validation Error"))
)]
pub async fn put_info(State(state): State<ServerState>, Json(input): Json<ContactInfoInput>) -> Result<Json<ContactInfo>, JsonApiError> {
    Ok(Json(state.contact_info.save(input).await?))
}
