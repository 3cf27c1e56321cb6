//! Role handlers. Reads are public; writes require an admin token.

use axum::{
    extract::{Extension, Path, State},
    middleware,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{NewRole, Role};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// Role creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 64, message = "Role name must be 1 to 64 characters"))]
    #[schema(example = "critic")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Publishes featured reviews")]
    pub description: String,
}

/// Create role routes
pub fn role_routes(state: AppState) -> Router<AppState> {
    let authenticated = || middleware::from_fn_with_state(state.clone(), auth_middleware);

    Router::new()
        .route(
            "/",
            get(list_roles).merge(post(create_role).route_layer(authenticated())),
        )
        .route(
            "/:id",
            get(get_role).merge(delete(delete_role).route_layer(authenticated())),
        )
}

/// List all roles
#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "Roles",
    responses((status = 200, description = "All roles", body = [Role]))
)]
pub async fn list_roles(State(state): State<AppState>) -> AppResult<Json<Vec<Role>>> {
    let roles = state.role_service.list().await?;
    Ok(Json(roles))
}

/// Get a role by ID
#[utoipa::path(
    get,
    path = "/api/roles/{id}",
    tag = "Roles",
    params(("id" = Uuid, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role found", body = Role),
        (status = 404, description = "Role not found")
    )
)]
pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Role>> {
    let role = state.role_service.get(id).await?;
    Ok(Json(role))
}

/// Create a role (admin only)
#[utoipa::path(
    post,
    path = "/api/roles",
    tag = "Roles",
    request_body = CreateRoleRequest,
    responses(
        (status = 201, description = "Role created", body = Role),
        (status = 400, description = "Invalid or duplicate name"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_role(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateRoleRequest>,
) -> AppResult<Created<Role>> {
    require_admin(&current_user)?;

    let role = state
        .role_service
        .create(NewRole {
            name: payload.name,
            description: payload.description,
        })
        .await?;

    Ok(Created(role))
}

/// Delete a role (admin only)
#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    tag = "Roles",
    params(("id" = Uuid, Path, description = "Role ID")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Role not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_role(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;

    state.role_service.delete(id).await?;
    Ok(NoContent)
}
