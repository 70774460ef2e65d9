//! User API handlers.
//!
//! ```text
//! POST /v1/users/me
//! ```

use actix_web::{HttpResponse, post};

use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, UserResponse};

/// Resolve the caller to a user record, creating it on first sight.
///
/// Responds `201 Created` when this request created the record and `200 OK`
/// when it already existed.
#[utoipa::path(
    post,
    path = "/v1/users/me",
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 200, description = "User already existed", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Concurrent creation could not be resolved", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "resolveCurrentUser"
)]
#[post("/users/me")]
pub async fn current_user(caller: AuthenticatedUser) -> ApiResult<HttpResponse> {
    let body = UserResponse {
        user: caller.user().into(),
    };
    let mut response = if caller.is_new() {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    Ok(response.json(body))
}
