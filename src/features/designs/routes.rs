use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::designs::handlers;
use crate::features::designs::services::DesignService;

/// Create routes for the designs feature
///
/// `/api/designs/top` must be registered alongside `/api/designs/{id}/vote`;
/// axum routes literal segments before captures, so `top` never shadows an id.
pub fn routes(service: Arc<DesignService>) -> Router {
    Router::new()
        .route(
            "/api/designs",
            get(handlers::list_designs).post(handlers::submit_design),
        )
        .route("/api/designs/top", get(handlers::top_designs))
        .route("/api/designs/{id}/vote", post(handlers::vote_design))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use serde_json::Value;

    use crate::modules::store::GalleryStore;
    use crate::shared::test_helpers::{png_part, submission_form, test_app, TestApp, PNG_BYTES};

    async fn seeded_app() -> (TestApp, i64) {
        let app = test_app();
        app.store
            .seed_categories(&["T-Shirts", "Hoodies"])
            .await
            .unwrap();
        let category_id = app
            .store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .find(|c| c.name == "T-Shirts")
            .unwrap()
            .id;
        (app, category_id)
    }

    #[tokio::test]
    async fn submission_vote_and_top_scenario() {
        let (app, category_id) = seeded_app().await;

        // Submit a valid design
        let res = app
            .server
            .post("/api/designs")
            .multipart(submission_form("Logo A", category_id, "Ana"))
            .await;
        res.assert_status(StatusCode::CREATED);

        let body: Value = res.json();
        let design = &body["data"];
        assert_eq!(design["status"], "approved");
        assert_eq!(design["votes_count"], 0);
        assert_eq!(design["username"], "Ana");
        assert_eq!(design["category_name"], "T-Shirts");
        let id = design["id"].as_i64().unwrap();

        // Vote five times
        for _ in 0..5 {
            app.server
                .post(&format!("/api/designs/{}/vote", id))
                .await
                .assert_status(StatusCode::OK);
        }

        // The design tops the ranking with five votes
        let top: Value = app.server.get("/api/designs/top?limit=1").await.json();
        let entries = top["data"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["id"].as_i64().unwrap(), id);
        assert_eq!(entries[0]["votes_count"], 5);
    }

    #[tokio::test]
    async fn missing_title_fails_and_persists_nothing() {
        let (app, category_id) = seeded_app().await;

        let form = MultipartForm::new()
            .add_text("category_id", category_id.to_string())
            .add_part("image", png_part());

        let res = app.server.post("/api/designs").multipart(form).await;
        res.assert_status(StatusCode::BAD_REQUEST);

        let list: Value = app.server.get("/api/designs").await.json();
        assert!(list["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_image_fails_validation() {
        let (app, category_id) = seeded_app().await;

        let form = MultipartForm::new()
            .add_text("title", "Logo A")
            .add_text("category_id", category_id.to_string());

        let res = app.server.post("/api/designs").multipart(form).await;
        res.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_image_upload_is_rejected() {
        let (app, category_id) = seeded_app().await;

        let pdf = Part::bytes(b"%PDF-1.4".to_vec())
            .file_name("contract.pdf")
            .mime_type("application/pdf");
        let form = MultipartForm::new()
            .add_text("title", "Contract")
            .add_text("category_id", category_id.to_string())
            .add_part("image", pdf);

        let res = app.server.post("/api/designs").multipart(form).await;
        res.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn submission_with_nonexistent_category_is_accepted() {
        let (app, _) = seeded_app().await;

        let res = app
            .server
            .post("/api/designs")
            .multipart(submission_form("Orphan", 9999, "Ana"))
            .await;
        res.assert_status(StatusCode::CREATED);

        let body: Value = res.json();
        assert_eq!(body["data"]["category_name"], "Unknown");

        let list: Value = app.server.get("/api/designs").await.json();
        assert_eq!(list["data"][0]["category_name"], "Unknown");
    }

    #[tokio::test]
    async fn vote_on_unknown_design_answers_404() {
        let (app, _) = seeded_app().await;

        let res = app.server.post("/api/designs/9999/vote").await;
        res.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_filters_by_status_and_category() {
        let (app, category_id) = seeded_app().await;
        let other_id = app
            .store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .find(|c| c.name == "Hoodies")
            .unwrap()
            .id;

        let first: Value = app
            .server
            .post("/api/designs")
            .multipart(submission_form("Logo A", category_id, "Ana"))
            .await
            .json();
        app.server
            .post("/api/designs")
            .multipart(submission_form("Logo B", other_id, "Ben"))
            .await
            .assert_status(StatusCode::CREATED);

        // Reject the first design, then filter by status
        let first_id = first["data"]["id"].as_i64().unwrap();
        app.store
            .set_design_status(first_id, crate::features::designs::models::DesignStatus::Rejected)
            .await
            .unwrap();

        let approved: Value = app
            .server
            .get("/api/designs?status=approved")
            .await
            .json();
        let entries = approved["data"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["title"], "Logo B");

        let by_category: Value = app
            .server
            .get(&format!("/api/designs?category={}", category_id))
            .await
            .json();
        let entries = by_category["data"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["title"], "Logo A");
    }

    #[tokio::test]
    async fn limit_truncates_the_listing() {
        let (app, category_id) = seeded_app().await;

        for title in ["One", "Two", "Three"] {
            app.server
                .post("/api/designs")
                .multipart(submission_form(title, category_id, "Ana"))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let list: Value = app.server.get("/api/designs?limit=2").await.json();
        assert_eq!(list["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn submitted_image_round_trips_as_data_uri() {
        let (app, category_id) = seeded_app().await;

        let res: Value = app
            .server
            .post("/api/designs")
            .multipart(submission_form("Logo A", category_id, "Ana"))
            .await
            .json();

        let url = res["data"]["image_url"].as_str().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        use base64::prelude::*;
        let payload = url.strip_prefix("data:image/png;base64,").unwrap();
        assert_eq!(BASE64_STANDARD.decode(payload).unwrap(), PNG_BYTES);
    }
}
