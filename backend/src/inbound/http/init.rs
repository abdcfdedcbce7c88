//! Bootstrap handler.
//!
//! ```text
//! POST /api/init
//! ```

use actix_web::{post, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::MessageResponse;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponseSchema};
use crate::inbound::http::state::HttpState;

/// Ensure the default admin identity exists. Safe to call repeatedly.
#[utoipa::path(
    post,
    path = "/api/init",
    responses(
        (status = 200, description = "Default admin present", body = MessageResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "init",
    security([])
)]
#[post("/init")]
pub async fn init(state: web::Data<HttpState>) -> ApiResult<web::Json<MessageResponse>> {
    state.user_admin.ensure_default_admin().await?;
    Ok(web::Json(MessageResponse::new(
        "Database initialized. Default admin user created/verified.",
    )))
}
