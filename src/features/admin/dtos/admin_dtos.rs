use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::designs::models::DesignStatus;

/// Request DTO for the moderation status update
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateDesignStatusDto {
    pub status: DesignStatus,
}

/// Aggregate counters for the admin view
///
/// Recomputed on demand from the design collection; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatsResponseDto {
    pub total_designs: i64,
    pub pending_designs: i64,
    pub approved_designs: i64,
    pub total_votes: i64,
}
