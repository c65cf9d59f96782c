use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::designs::dtos::{
    DesignResponseDto, ListDesignsQuery, SubmitDesignFields, SubmitDesignForm, TopDesignsQuery,
    UploadedImage,
};
use crate::features::designs::services::DesignService;
use crate::shared::types::ApiResponse;

/// List designs
///
/// Optional equality filters on category and status; `limit` truncates the
/// result. Ordered newest first.
#[utoipa::path(
    get,
    path = "/api/designs",
    params(ListDesignsQuery),
    responses(
        (status = 200, description = "Designs joined with category names", body = ApiResponse<Vec<DesignResponseDto>>),
    ),
    tag = "designs"
)]
pub async fn list_designs(
    State(service): State<Arc<DesignService>>,
    Query(query): Query<ListDesignsQuery>,
) -> Result<Json<ApiResponse<Vec<DesignResponseDto>>>> {
    let designs = service.list(query).await?;
    Ok(Json(ApiResponse::success(Some(designs), None, None)))
}

/// Top designs by votes
///
/// Approved designs only, ranked by vote count.
#[utoipa::path(
    get,
    path = "/api/designs/top",
    params(TopDesignsQuery),
    responses(
        (status = 200, description = "Highest voted approved designs", body = ApiResponse<Vec<DesignResponseDto>>),
    ),
    tag = "designs"
)]
pub async fn top_designs(
    State(service): State<Arc<DesignService>>,
    Query(query): Query<TopDesignsQuery>,
) -> Result<Json<ApiResponse<Vec<DesignResponseDto>>>> {
    let designs = service.top(query.limit).await?;
    Ok(Json(ApiResponse::success(Some(designs), None, None)))
}

/// Submit a design
///
/// Accepts multipart/form-data with:
/// - `title`: design title (required)
/// - `description`: optional free text
/// - `category_id`: id of an existing category (required)
/// - `username`: display name, defaults to "Anonymous"
/// - `image`: the image file (required)
#[utoipa::path(
    post,
    path = "/api/designs",
    request_body(
        content = SubmitDesignForm,
        content_type = "multipart/form-data",
        description = "Design submission form with image upload",
    ),
    responses(
        (status = 201, description = "Design submitted", body = ApiResponse<DesignResponseDto>),
        (status = 400, description = "Missing field, non-image upload, or image over 10 MiB"),
    ),
    tag = "designs"
)]
pub async fn submit_design(
    State(service): State<Arc<DesignService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<DesignResponseDto>>)> {
    let mut fields = SubmitDesignFields::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read image bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;

                fields.image = Some(UploadedImage {
                    data: data.to_vec(),
                    filename,
                    content_type,
                });
            }
            "title" => fields.title = Some(read_text(field, "title").await?),
            "description" => {
                let text = read_text(field, "description").await?;
                if !text.is_empty() {
                    fields.description = Some(text);
                }
            }
            "category_id" => fields.category_id = Some(read_text(field, "category_id").await?),
            "username" => fields.username = Some(read_text(field, "username").await?),
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let design = service.submit(fields).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(design), None, None)),
    ))
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}

/// Vote for a design
///
/// Anonymous and unbounded: no dedup, no rate limiting, repeatable
/// indefinitely from the same caller.
#[utoipa::path(
    post,
    path = "/api/designs/{id}/vote",
    params(
        ("id" = i64, Path, description = "Design id")
    ),
    responses(
        (status = 200, description = "Vote recorded"),
        (status = 404, description = "Design not found")
    ),
    tag = "designs"
)]
pub async fn vote_design(
    State(service): State<Arc<DesignService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.vote(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Vote recorded successfully".to_string()),
        None,
    )))
}
