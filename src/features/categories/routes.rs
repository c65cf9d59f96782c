use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::modules::store::GalleryStore;
    use crate::shared::test_helpers::test_app;

    #[tokio::test]
    async fn listing_returns_categories_ordered_by_name() {
        let app = test_app();
        app.store
            .seed_categories(&["T-Shirts", "Hoodies"])
            .await
            .unwrap();

        let res = app.server.get("/api/categories").await;
        res.assert_status(StatusCode::OK);

        let body: Value = res.json();
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Hoodies", "T-Shirts"]);
    }

    #[tokio::test]
    async fn creating_a_category_returns_201() {
        let app = test_app();

        let res = app
            .server
            .post("/api/categories")
            .json(&json!({"name": "Mugs", "description": "Drinkware"}))
            .await;
        res.assert_status(StatusCode::CREATED);

        let body: Value = res.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["name"], json!("Mugs"));
    }

    #[tokio::test]
    async fn duplicate_category_name_answers_409() {
        let app = test_app();
        app.server
            .post("/api/categories")
            .json(&json!({"name": "Mugs"}))
            .await
            .assert_status(StatusCode::CREATED);

        let res = app
            .server
            .post("/api/categories")
            .json(&json!({"name": "Mugs"}))
            .await;
        res.assert_status(StatusCode::CONFLICT);

        // Only one category with that name exists
        let list: Value = app.server.get("/api/categories").await.json();
        assert_eq!(list["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_name_fails_validation() {
        let app = test_app();

        let res = app
            .server
            .post("/api/categories")
            .json(&json!({"name": ""}))
            .await;
        res.assert_status(StatusCode::BAD_REQUEST);
    }
}
