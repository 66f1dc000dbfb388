use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::{
    dto::grades::{CreateGradeRequest, GradeList},
    error::AppResult,
    extract::{AppJson, AppQuery},
    middleware::auth::AuthUser,
    models::Grade,
    response::ApiResponse,
    routes::params::RecordListQuery,
    services::grade_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_grades).post(create_grade))
        .route("/me", get(list_my_grades))
}

#[utoipa::path(
    post,
    path = "/grades",
    request_body = CreateGradeRequest,
    responses(
        (status = 201, description = "Grade recorded (admin, teacher)", body = ApiResponse<Grade>),
        (status = 400, description = "Invalid grade, unknown student or course"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
pub async fn create_grade(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateGradeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Grade>>)> {
    let resp = grade_service::create_grade(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/grades",
    params(RecordListQuery),
    responses(
        (status = 200, description = "List grades (admin, teacher)", body = ApiResponse<GradeList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
pub async fn list_grades(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<RecordListQuery>,
) -> AppResult<Json<ApiResponse<GradeList>>> {
    let resp = grade_service::list_grades(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/grades/me",
    responses(
        (status = 200, description = "Caller's grades", body = ApiResponse<GradeList>),
        (status = 404, description = "Caller has no student profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
pub async fn list_my_grades(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<GradeList>>> {
    let resp = grade_service::list_my_grades(&state, &user).await?;
    Ok(Json(resp))
}
