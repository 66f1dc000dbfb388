use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::students::StudentList,
    error::AppResult,
    extract::{AppPath, AppQuery},
    middleware::auth::AuthUser,
    models::Student,
    response::ApiResponse,
    routes::params::Pagination,
    services::student_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students))
        .route("/me", get(get_my_student))
        .route("/{id}", get(get_student))
}

#[utoipa::path(
    get,
    path = "/students",
    params(Pagination),
    responses(
        (status = 200, description = "List students (admin, teacher)", body = ApiResponse<StudentList>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn list_students(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(pagination): AppQuery<Pagination>,
) -> AppResult<Json<ApiResponse<StudentList>>> {
    let resp = student_service::list_students(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/students/me",
    responses(
        (status = 200, description = "Caller's student profile", body = ApiResponse<Student>),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Caller has no student profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_my_student(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Student>>> {
    let resp = student_service::get_my_student(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student profile ID")),
    responses(
        (status = 200, description = "Student profile", body = ApiResponse<Student>),
        (status = 403, description = "Students may only read their own profile"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_student(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> AppResult<Json<ApiResponse<Student>>> {
    let resp = student_service::get_student(&state, &user, id).await?;
    Ok(Json(resp))
}
