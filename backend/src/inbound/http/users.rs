//! User administration handlers.
//!
//! ```text
//! GET  /api/users
//! GET  /api/users/me
//! POST /api/users {"username":"editor","email":"e@example.com","name":"Ed","password":"pw"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{NewUserRequest, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth_cookie::AuthSession;
use crate::inbound::http::responses::DataResponse;
use crate::inbound::http::schemas::{ErrorSchema, UserListResponseSchema, UserResponseSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_user_validation_error;

/// Request body for `POST /api/users`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
}

/// List every stored user, ordered by username.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = UserListResponseSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    _session: AuthSession,
) -> ApiResult<web::Json<DataResponse<Vec<UserProfile>>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(DataResponse::new(users)))
}

/// Profile of the user the token was issued to.
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponseSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: AuthSession,
) -> ApiResult<web::Json<DataResponse<UserProfile>>> {
    let profile = state.users.current_user(session.username()).await?;
    Ok(web::Json(DataResponse::new(profile)))
}

/// Create an additional user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created user", body = UserResponseSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Username or email already taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    _session: AuthSession,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let CreateUserRequest {
        username,
        email,
        name,
        password,
    } = payload.into_inner();
    let request = NewUserRequest::try_from_parts(&username, &email, &name, &password)
        .map_err(map_user_validation_error)?;
    let profile = state.user_admin.create_user(request).await?;
    Ok(HttpResponse::Created().json(DataResponse::new(profile)))
}
