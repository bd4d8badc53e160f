//! `/api/v1/categories` handlers.
use axum::extract::{OriginalUri, State};
use axum::http::Uri;
use axum::routing::{get, put};
use axum::Router;
use serde::Deserialize;
use service::category::{CategoryView, CreateCategory, UpdateCategory};
use service::errors::ServiceError;
use service::pagination::{Page, Pagination, Sort};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::envelope::ApiEnvelope;
use crate::errors::ApiError;
use crate::extract::{ApiPath, ApiQuery, CurrentActor, ValidatedJson};
use crate::state::ServerState;

pub const BASE: &str = "/api/v1/categories";

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreateRequest {
    #[validate(length(min = 2, max = 100, message = "Category name must be between 2 and 100 characters"))]
    #[schema(example = "Rau củ quả")]
    pub name: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    #[schema(example = "Các loại rau củ quả tươi")]
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub display_order: Option<i32>,
}

/// Every member is optional; only present members are applied.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdateRequest {
    #[validate(length(min = 2, max = 100, message = "Category name must be between 2 and 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 0-based page index, default 0
    pub page: Option<u32>,
    /// Page size, clamped to 1..=100
    pub size: Option<u32>,
    /// `field[,asc|desc]` with field one of name, displayOrder, createdAt, updatedAt
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    pub name: String,
}

impl From<CategoryCreateRequest> for CreateCategory {
    fn from(r: CategoryCreateRequest) -> Self {
        Self { name: r.name, description: r.description, parent_id: r.parent_id, display_order: r.display_order }
    }
}

impl From<CategoryUpdateRequest> for UpdateCategory {
    fn from(r: CategoryUpdateRequest) -> Self {
        Self { name: r.name, description: r.description, parent_id: r.parent_id, display_order: r.display_order }
    }
}

fn at(uri: &Uri) -> impl Fn(ServiceError) -> ApiError + '_ {
    move |e| ApiError::from(e).at(uri.path())
}

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(BASE, get(list).post(create))
        .route("/api/v1/categories/active", get(list_active))
        .route("/api/v1/categories/search", get(search))
        .route("/api/v1/categories/exists", get(exists_by_name))
        .route("/api/v1/categories/count/active", get(count_active))
        .route("/api/v1/categories/name/:name", get(get_by_name))
        .route("/api/v1/categories/:id", get(get_by_id).put(update).delete(delete))
        .route("/api/v1/categories/:id/activate", put(activate))
        .route("/api/v1/categories/:id/deactivate", put(deactivate))
        .route("/api/v1/categories/:id/exists", get(exists_by_id))
}

#[utoipa::path(post, path = "/api/v1/categories", tag = "categories", request_body = CategoryCreateRequest,
    responses((status = 201, description = "Created", body = crate::openapi::CategoryEnvelopeDoc), (status = 400, description = "Validation failed", body = crate::openapi::ErrorEnvelopeDoc), (status = 404, description = "Parent not found"), (status = 409, description = "Name already in use")))]
pub async fn create(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    CurrentActor(actor): CurrentActor,
    ValidatedJson(body): ValidatedJson<CategoryCreateRequest>,
) -> Result<ApiEnvelope<CategoryView>, ApiError> {
    info!(name = %body.name, "create category request");
    let view = state.categories.create(&actor, body.into()).await.map_err(at(&uri))?;
    Ok(ApiEnvelope::created("Category created successfully", view))
}

#[utoipa::path(get, path = "/api/v1/categories/{id}", tag = "categories", params(("id" = Uuid, Path, description = "Category id")),
    responses((status = 200, description = "Found", body = crate::openapi::CategoryEnvelopeDoc), (status = 400, description = "Malformed id"), (status = 404, description = "Not found", body = crate::openapi::ErrorEnvelopeDoc)))]
pub async fn get_by_id(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<ApiEnvelope<CategoryView>, ApiError> {
    let view = state.categories.get_by_id(id).await.map_err(at(&uri))?;
    Ok(ApiEnvelope::ok("Category retrieved successfully", view))
}

#[utoipa::path(get, path = "/api/v1/categories", tag = "categories", params(ListQuery),
    responses((status = 200, description = "One page of categories", body = crate::openapi::CategoryPageEnvelopeDoc), (status = 400, description = "Unknown sort key")))]
pub async fn list(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Result<ApiEnvelope<Page<CategoryView>>, ApiError> {
    let sort = match q.sort.as_deref() {
        Some(s) => s.parse::<Sort>().map_err(at(&uri))?,
        None => Sort::default(),
    };
    let pagination = Pagination::new(q.page.unwrap_or(0), q.size.unwrap_or(state.default_page_size));
    let page = state.categories.list(pagination, sort).await.map_err(at(&uri))?;
    Ok(ApiEnvelope::ok("Categories retrieved successfully", page))
}

#[utoipa::path(get, path = "/api/v1/categories/active", tag = "categories",
    responses((status = 200, description = "Active categories", body = crate::openapi::CategoryListEnvelopeDoc)))]
pub async fn list_active(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
) -> Result<ApiEnvelope<Vec<CategoryView>>, ApiError> {
    let items = state.categories.list_active().await.map_err(at(&uri))?;
    Ok(ApiEnvelope::ok("Active categories retrieved successfully", items))
}

#[utoipa::path(get, path = "/api/v1/categories/name/{name}", tag = "categories", params(("name" = String, Path, description = "Exact name, case-insensitive")),
    responses((status = 200, description = "Found", body = crate::openapi::CategoryEnvelopeDoc), (status = 404, description = "No active category with that name")))]
pub async fn get_by_name(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(name): ApiPath<String>,
) -> Result<ApiEnvelope<CategoryView>, ApiError> {
    let view = state.categories.get_by_name(&name).await.map_err(at(&uri))?;
    Ok(ApiEnvelope::ok("Category retrieved successfully", view))
}

#[utoipa::path(get, path = "/api/v1/categories/search", tag = "categories", params(NameQuery),
    responses((status = 200, description = "Active categories whose name contains the fragment", body = crate::openapi::CategoryListEnvelopeDoc), (status = 400, description = "Missing name")))]
pub async fn search(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiQuery(q): ApiQuery<NameQuery>,
) -> Result<ApiEnvelope<Vec<CategoryView>>, ApiError> {
    let items = state.categories.search(&q.name).await.map_err(at(&uri))?;
    info!(fragment = %q.name, hits = items.len(), "category search");
    Ok(ApiEnvelope::ok("Categories found", items))
}

#[utoipa::path(put, path = "/api/v1/categories/{id}", tag = "categories", params(("id" = Uuid, Path, description = "Category id")), request_body = CategoryUpdateRequest,
    responses((status = 200, description = "Updated", body = crate::openapi::CategoryEnvelopeDoc), (status = 400, description = "Validation failed", body = crate::openapi::ErrorEnvelopeDoc), (status = 404, description = "Not found"), (status = 409, description = "Name already in use")))]
pub async fn update(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    CurrentActor(actor): CurrentActor,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(body): ValidatedJson<CategoryUpdateRequest>,
) -> Result<ApiEnvelope<CategoryView>, ApiError> {
    let view = state.categories.update(&actor, id, body.into()).await.map_err(at(&uri))?;
    Ok(ApiEnvelope::ok("Category updated successfully", view))
}

#[utoipa::path(delete, path = "/api/v1/categories/{id}", tag = "categories", params(("id" = Uuid, Path, description = "Category id")),
    responses((status = 200, description = "Soft-deleted", body = crate::openapi::MessageEnvelopeDoc), (status = 404, description = "Not found")))]
pub async fn delete(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    CurrentActor(actor): CurrentActor,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<ApiEnvelope<()>, ApiError> {
    state.categories.delete(&actor, id).await.map_err(at(&uri))?;
    Ok(ApiEnvelope::message("Category deleted successfully"))
}

#[utoipa::path(put, path = "/api/v1/categories/{id}/activate", tag = "categories", params(("id" = Uuid, Path, description = "Category id")),
    responses((status = 200, description = "Active", body = crate::openapi::CategoryEnvelopeDoc), (status = 404, description = "Not found")))]
pub async fn activate(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    CurrentActor(actor): CurrentActor,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<ApiEnvelope<CategoryView>, ApiError> {
    let view = state.categories.activate(&actor, id).await.map_err(at(&uri))?;
    Ok(ApiEnvelope::ok("Category activated successfully", view))
}

#[utoipa::path(put, path = "/api/v1/categories/{id}/deactivate", tag = "categories", params(("id" = Uuid, Path, description = "Category id")),
    responses((status = 200, description = "Inactive", body = crate::openapi::CategoryEnvelopeDoc), (status = 404, description = "Not found")))]
pub async fn deactivate(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    CurrentActor(actor): CurrentActor,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<ApiEnvelope<CategoryView>, ApiError> {
    let view = state.categories.deactivate(&actor, id).await.map_err(at(&uri))?;
    Ok(ApiEnvelope::ok("Category deactivated successfully", view))
}

#[utoipa::path(get, path = "/api/v1/categories/{id}/exists", tag = "categories", params(("id" = Uuid, Path, description = "Category id")),
    responses((status = 200, description = "Whether a row with this id exists, active or not", body = crate::openapi::BoolEnvelopeDoc)))]
pub async fn exists_by_id(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<ApiEnvelope<bool>, ApiError> {
    let exists = state.categories.exists_by_id(id).await.map_err(at(&uri))?;
    Ok(ApiEnvelope::ok("Category existence checked", exists))
}

#[utoipa::path(get, path = "/api/v1/categories/exists", tag = "categories", params(NameQuery),
    responses((status = 200, description = "Whether an active category has this name", body = crate::openapi::BoolEnvelopeDoc)))]
pub async fn exists_by_name(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    ApiQuery(q): ApiQuery<NameQuery>,
) -> Result<ApiEnvelope<bool>, ApiError> {
    let exists = state.categories.exists_by_name(&q.name).await.map_err(at(&uri))?;
    Ok(ApiEnvelope::ok("Category existence checked", exists))
}

#[utoipa::path(get, path = "/api/v1/categories/count/active", tag = "categories",
    responses((status = 200, description = "Number of active categories", body = crate::openapi::CountEnvelopeDoc)))]
pub async fn count_active(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
) -> Result<ApiEnvelope<u64>, ApiError> {
    let count = state.categories.count_active().await.map_err(at(&uri))?;
    Ok(ApiEnvelope::ok("Active category count retrieved successfully", count))
}
