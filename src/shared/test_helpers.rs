use std::sync::Arc;

use axum::Router;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;

use crate::features::admin::{self, AdminService};
use crate::features::categories::{self, CategoryService};
use crate::features::designs::{self, DesignService};
use crate::modules::images::DataUriImageStore;
use crate::modules::store::MemoryStore;

/// Smallest valid-enough PNG payload for upload tests (magic bytes only;
/// nothing in the service decodes the image)
pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub server: TestServer,
}

/// Full API wired against the in-memory store and data-URI image storage
pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());

    let category_service = Arc::new(CategoryService::new(store.clone()));
    let design_service = Arc::new(DesignService::new(store.clone(), Arc::new(DataUriImageStore)));
    let admin_service = Arc::new(AdminService::new(store.clone()));

    let app = Router::new()
        .merge(categories::routes(category_service))
        .merge(designs::routes(design_service))
        .merge(admin::routes(admin_service));

    TestApp {
        store,
        server: TestServer::new(app).expect("failed to start test server"),
    }
}

/// Multipart form for a valid PNG submission
pub fn submission_form(title: &str, category_id: i64, username: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title.to_string())
        .add_text("category_id", category_id.to_string())
        .add_text("username", username.to_string())
        .add_part("image", png_part())
}

pub fn png_part() -> Part {
    Part::bytes(PNG_BYTES.to_vec())
        .file_name("logo.png")
        .mime_type("image/png")
}
