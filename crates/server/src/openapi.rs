//! OpenAPI document served at `/api-docs/openapi.json`.
use std::collections::BTreeMap;

use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::routes::categories::{CategoryCreateRequest, CategoryUpdateRequest};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CategoryDoc {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub parent_name: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    #[schema(format = DateTime)]
    pub created_at: String,
    #[schema(format = DateTime)]
    pub updated_at: String,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CategoryPageDoc {
    pub items: Vec<CategoryDoc>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u64,
}

#[derive(ToSchema)]
pub struct CategoryEnvelopeDoc {
    #[schema(format = DateTime)]
    pub timestamp: String,
    #[schema(example = 200)]
    pub status: u16,
    pub message: String,
    pub data: CategoryDoc,
}

#[derive(ToSchema)]
pub struct CategoryListEnvelopeDoc {
    #[schema(format = DateTime)]
    pub timestamp: String,
    pub status: u16,
    pub message: String,
    pub data: Vec<CategoryDoc>,
}

#[derive(ToSchema)]
pub struct CategoryPageEnvelopeDoc {
    #[schema(format = DateTime)]
    pub timestamp: String,
    pub status: u16,
    pub message: String,
    pub data: CategoryPageDoc,
}

#[derive(ToSchema)]
pub struct BoolEnvelopeDoc {
    #[schema(format = DateTime)]
    pub timestamp: String,
    pub status: u16,
    pub message: String,
    pub data: bool,
}

#[derive(ToSchema)]
pub struct CountEnvelopeDoc {
    #[schema(format = DateTime)]
    pub timestamp: String,
    pub status: u16,
    pub message: String,
    pub data: u64,
}

#[derive(ToSchema)]
pub struct MessageEnvelopeDoc {
    #[schema(format = DateTime)]
    pub timestamp: String,
    pub status: u16,
    pub message: String,
}

/// Error shape: `errors` maps field names to messages on validation failures.
#[derive(ToSchema)]
pub struct ErrorEnvelopeDoc {
    #[schema(format = DateTime)]
    pub timestamp: String,
    #[schema(example = 400)]
    pub status: u16,
    pub message: String,
    #[schema(example = "/api/v1/categories")]
    pub path: Option<String>,
    pub errors: Option<BTreeMap<String, String>>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Product Service API", version = "1.0.0", description = "Grocery product catalog"),
    paths(
        crate::routes::health,
        crate::routes::categories::create,
        crate::routes::categories::get_by_id,
        crate::routes::categories::list,
        crate::routes::categories::list_active,
        crate::routes::categories::get_by_name,
        crate::routes::categories::search,
        crate::routes::categories::update,
        crate::routes::categories::delete,
        crate::routes::categories::activate,
        crate::routes::categories::deactivate,
        crate::routes::categories::exists_by_id,
        crate::routes::categories::exists_by_name,
        crate::routes::categories::count_active,
    ),
    components(
        schemas(
            HealthResponse,
            CategoryCreateRequest,
            CategoryUpdateRequest,
            CategoryDoc,
            CategoryPageDoc,
            CategoryEnvelopeDoc,
            CategoryListEnvelopeDoc,
            CategoryPageEnvelopeDoc,
            BoolEnvelopeDoc,
            CountEnvelopeDoc,
            MessageEnvelopeDoc,
            ErrorEnvelopeDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "categories", description = "Category management")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_category_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for p in [
            "/api/v1/categories",
            "/api/v1/categories/{id}",
            "/api/v1/categories/{id}/activate",
            "/api/v1/categories/count/active",
            "/health",
        ] {
            assert!(paths.contains_key(p), "missing {p}");
        }
        assert_eq!(doc.info.title, "Product Service API");
    }

    #[test]
    fn request_schema_carries_examples() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let name = &json["components"]["schemas"]["CategoryCreateRequest"]["properties"]["name"];
        assert_eq!(name["example"], "Rau củ quả");
    }
}
