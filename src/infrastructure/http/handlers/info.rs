//! Info HTTP Handlers - 公告与联系我们

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{
    AnnouncementResponse, ContactMessageResponse, GetLatestAnnouncement, SubmitContactMessage,
};
use crate::infrastructure::http::dto::{ApiResponse, ContactUsRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::ApiJson;
use crate::infrastructure::http::state::AppState;

pub async fn get_announcement(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<AnnouncementResponse>>, ApiError> {
    let announcement = state
        .get_announcement_handler
        .handle(GetLatestAnnouncement)
        .await?;

    Ok(Json(ApiResponse::success(
        "last announcement fetched successfully",
        announcement,
    )))
}

pub async fn contact_us(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ContactUsRequest>,
) -> Result<Json<ApiResponse<ContactMessageResponse>>, ApiError> {
    let response = state
        .submit_contact_message_handler
        .handle(SubmitContactMessage {
            email: req.email,
            message: req.message,
        })
        .await?;

    Ok(Json(ApiResponse::success(
        "Message received successfully",
        response,
    )))
}
