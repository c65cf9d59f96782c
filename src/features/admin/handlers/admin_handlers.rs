use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::admin::dtos::{StatsResponseDto, UpdateDesignStatusDto};
use crate::features::admin::services::AdminService;
use crate::features::designs::dtos::DesignResponseDto;
use crate::shared::types::ApiResponse;

/// Set a design's moderation status
#[utoipa::path(
    put,
    path = "/api/designs/{id}/status",
    params(
        ("id" = i64, Path, description = "Design id")
    ),
    request_body = UpdateDesignStatusDto,
    responses(
        (status = 200, description = "Updated design", body = ApiResponse<DesignResponseDto>),
        (status = 400, description = "Invalid status value"),
        (status = 404, description = "Design not found")
    ),
    tag = "admin"
)]
pub async fn update_design_status(
    State(service): State<Arc<AdminService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateDesignStatusDto>,
) -> Result<Json<ApiResponse<DesignResponseDto>>> {
    let design = service.set_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(Some(design), None, None)))
}

/// Aggregate design counters for the admin view
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Design and vote counters", body = ApiResponse<StatsResponseDto>),
    ),
    tag = "admin"
)]
pub async fn get_stats(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<StatsResponseDto>>> {
    let stats = service.stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}
