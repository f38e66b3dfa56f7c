use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

/// Complete new order: every id of the collection exactly once.
#[derive(ToSchema)]
pub struct ReorderRequest { pub ids: Vec<Uuid> }

/// Drag `dragged` and drop it onto `target`.
#[derive(ToSchema)]
pub struct MoveRequest { pub dragged: Uuid, pub target: Uuid }

#[derive(ToSchema)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: Option<String>,
    pub budget: Option<String>,
    pub message: String,
}

#[derive(ToSchema)]
pub struct ContactInfoRequest {
    pub email: String,
    pub phone: String,
    pub location: String,
    pub availability: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::current_session,
        crate::routes::public::home,
        crate::routes::public::about,
        crate::routes::public::services,
        crate::routes::public::portfolio,
        crate::routes::public::stock_videos,
        crate::routes::collections::public_list,
        crate::routes::collections::list,
        crate::routes::collections::create,
        crate::routes::collections::update,
        crate::routes::collections::delete,
        crate::routes::collections::reorder,
        crate::routes::collections::move_record,
        crate::routes::collections::dashboard,
        crate::routes::contact::submit,
        crate::routes::contact::public_info,
        crate::routes::contact::get_info,
        crate::routes::contact::put_info,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            ReorderRequest,
            MoveRequest,
            ContactRequest,
            ContactInfoRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "public"),
        (name = "auth"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
