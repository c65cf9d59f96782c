use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::designs::{
    dtos as designs_dtos, handlers as designs_handlers, models as designs_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::create_category,
        // Designs
        designs_handlers::list_designs,
        designs_handlers::top_designs,
        designs_handlers::submit_design,
        designs_handlers::vote_design,
        // Admin
        admin_handlers::update_design_status,
        admin_handlers::get_stats,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreateCategoryDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Designs
            designs_models::DesignStatus,
            designs_dtos::DesignResponseDto,
            designs_dtos::SubmitDesignForm,
            ApiResponse<Vec<designs_dtos::DesignResponseDto>>,
            ApiResponse<designs_dtos::DesignResponseDto>,
            // Admin
            admin_dtos::UpdateDesignStatusDto,
            admin_dtos::StatsResponseDto,
            ApiResponse<admin_dtos::StatsResponseDto>,
        )
    ),
    tags(
        (name = "categories", description = "Category catalog"),
        (name = "designs", description = "Design gallery, submission and voting"),
        (name = "admin", description = "Moderation and aggregate stats"),
    )
)]
pub struct ApiDoc;

pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
