use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::teachers::TeacherList,
    error::AppResult,
    extract::AppQuery,
    middleware::auth::AuthUser,
    models::Teacher,
    response::ApiResponse,
    routes::params::Pagination,
    services::teacher_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teachers))
        .route("/me", get(get_my_teacher))
}

#[utoipa::path(
    get,
    path = "/teachers",
    params(Pagination),
    responses(
        (status = 200, description = "List teachers (admin only)", body = ApiResponse<TeacherList>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn list_teachers(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(pagination): AppQuery<Pagination>,
) -> AppResult<Json<ApiResponse<TeacherList>>> {
    let resp = teacher_service::list_teachers(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/teachers/me",
    responses(
        (status = 200, description = "Caller's teacher profile", body = ApiResponse<Teacher>),
        (status = 404, description = "Caller has no teacher profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
pub async fn get_my_teacher(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Teacher>>> {
    let resp = teacher_service::get_my_teacher(&state, &user).await?;
    Ok(Json(resp))
}
