//! API route definitions

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use prepdesk::access::AccessPolicy;
use prepdesk::commands::CommandExecutor;
use prepdesk::domain::{ContentType, Material};
use prepdesk::query::MaterialQuery;
use prepdesk::storage::MaterialStore;
use prepdesk::{embed, subjects};

/// Shared application state
pub struct AppState<S: MaterialStore> {
    pub executor: CommandExecutor<S>,
    pub policy: AccessPolicy,
}

/// Header carrying the already-authenticated account id.
///
/// Authentication itself is out of scope; the deployment's auth proxy is
/// expected to set this header. The policy check here is the authorization
/// boundary.
const ACCOUNT_HEADER: &str = "x-account-id";

/// Create API routes
pub fn create_routes<S: MaterialStore + Send + Sync + 'static>(
    state: Arc<AppState<S>>,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/subjects", get(list_subjects))
        .route("/materials", get(list_materials::<S>))
        .route("/materials/:id", get(get_material::<S>))
        .route("/admin/materials", get(admin_list_materials::<S>))
        .route("/admin/materials", post(admin_create_material::<S>))
        .route(
            "/admin/materials/:id/visibility",
            patch(admin_set_visibility::<S>),
        )
        .route("/admin/materials/:id", put(admin_update_material::<S>))
        .route("/admin/materials/:id", delete(admin_delete_material::<S>))
        .with_state(state)
}

/// Map executor errors onto HTTP statuses.
fn error_status(e: &anyhow::Error) -> StatusCode {
    let msg = e.to_string().to_lowercase();
    if msg.contains("not found") {
        StatusCode::NOT_FOUND
    } else if msg.contains("unknown subject")
        || msg.contains("must not be empty")
        || msg.contains("ambiguous")
        || msg.contains("at least 4")
    {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Resolve the acting admin account or refuse the request.
///
/// 401 when the account header is missing, 403 when the account does not
/// hold the admin role. An empty policy fails closed: the network boundary
/// refuses admin calls until admins are configured.
fn require_admin(headers: &HeaderMap, policy: &AccessPolicy) -> Result<String, StatusCode> {
    let account = headers
        .get(ACCOUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if policy.is_admin(account) {
        Ok(account.to_string())
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "prepdesk-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Subject catalog
async fn list_subjects() -> impl IntoResponse {
    Json(subjects::catalog())
}

/// A material plus its display-ready links.
///
/// Presentation layers never re-derive embed links; they come precomputed.
#[derive(Debug, Serialize)]
pub struct MaterialView {
    #[serde(flatten)]
    pub material: Material,
    /// Normalized embeddable link for iframe display
    pub embed_url: String,
    /// Direct image link, present for mind maps only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<Material> for MaterialView {
    fn from(material: Material) -> Self {
        let embed_url = embed::to_embeddable(&material.url);
        let image_url = (material.content_type == ContentType::MindMap)
            .then(|| embed::image_url(&material.url));
        Self {
            material,
            embed_url,
            image_url,
        }
    }
}

/// Browse query parameters
#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    /// Filter by content type (notes, pyq, video, mindmap, pdf)
    content_type: Option<String>,
    /// Filter by subject id
    subject: Option<String>,
}

impl BrowseParams {
    fn to_query(&self) -> Result<MaterialQuery, StatusCode> {
        let mut query = MaterialQuery::new();
        if let Some(ref ct) = self.content_type {
            let content_type: ContentType =
                ct.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
            query = query.with_content_type(content_type);
        }
        if let Some(ref subject) = self.subject {
            query = query.with_subject(subject.clone());
        }
        Ok(query)
    }
}

/// List visible materials
async fn list_materials<S: MaterialStore>(
    Query(params): Query<BrowseParams>,
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<MaterialView>>, StatusCode> {
    let query = params.to_query()?;
    let materials = state.executor.list_materials(&query).map_err(|e| {
        tracing::error!("Failed to list materials: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(materials.into_iter().map(MaterialView::from).collect()))
}

/// Get a single visible material by ID
async fn get_material<S: MaterialStore>(
    Path(id): Path<String>,
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<MaterialView>, StatusCode> {
    let material = state
        .executor
        .show_material(&id)
        .map_err(|_| StatusCode::NOT_FOUND)?;

    // Hidden records are indistinguishable from absent ones on the
    // public surface.
    if !material.visible {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(MaterialView::from(material)))
}

/// List all materials regardless of visibility (admin)
async fn admin_list_materials<S: MaterialStore>(
    Query(params): Query<BrowseParams>,
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Json<Vec<MaterialView>>, StatusCode> {
    require_admin(&headers, &state.policy)?;

    let query = params.to_query()?.include_hidden();
    let materials = state.executor.list_materials(&query).map_err(|e| {
        tracing::error!("Failed to list materials: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(materials.into_iter().map(MaterialView::from).collect()))
}

/// Request body for creating a material
#[derive(Debug, Deserialize)]
pub struct CreateMaterial {
    pub title: String,
    pub subject: String,
    #[serde(rename = "contentType")]
    pub content_type: ContentType,
    pub url: String,
}

/// Create a material (admin)
async fn admin_create_material<S: MaterialStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(body): Json<CreateMaterial>,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    let account = require_admin(&headers, &state.policy)?;

    let id = state
        .executor
        .add_material(body.title, body.subject, body.content_type, body.url, account)
        .map_err(|e| {
            tracing::error!("Failed to create material: {:?}", e);
            error_status(&e)
        })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

/// Request body for toggling visibility
#[derive(Debug, Deserialize)]
pub struct VisibilityBody {
    pub visible: bool,
}

/// Toggle material visibility (admin)
async fn admin_set_visibility<S: MaterialStore>(
    Path(id): Path<String>,
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(body): Json<VisibilityBody>,
) -> Result<Json<MaterialView>, StatusCode> {
    require_admin(&headers, &state.policy)?;

    let material = state
        .executor
        .set_visibility(&id, body.visible)
        .map_err(|e| {
            tracing::error!("Failed to set visibility on {}: {:?}", id, e);
            error_status(&e)
        })?;

    Ok(Json(MaterialView::from(material)))
}

/// Request body for updating material metadata
#[derive(Debug, Deserialize)]
pub struct UpdateMaterial {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub url: Option<String>,
}

/// Update material metadata (admin)
async fn admin_update_material<S: MaterialStore>(
    Path(id): Path<String>,
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(body): Json<UpdateMaterial>,
) -> Result<Json<MaterialView>, StatusCode> {
    require_admin(&headers, &state.policy)?;

    let material = state
        .executor
        .update_material(&id, body.title, body.subject, body.url)
        .map_err(|e| {
            tracing::error!("Failed to update material {}: {:?}", id, e);
            error_status(&e)
        })?;

    Ok(Json(MaterialView::from(material)))
}

/// Delete a material (admin)
async fn admin_delete_material<S: MaterialStore>(
    Path(id): Path<String>,
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<StatusCode, StatusCode> {
    require_admin(&headers, &state.policy)?;

    state.executor.delete_material(&id).map_err(|e| {
        tracing::error!("Failed to delete material {}: {:?}", id, e);
        error_status(&e)
    })?;

    Ok(StatusCode::NO_CONTENT)
}
