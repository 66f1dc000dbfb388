use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::{
    dto::enrollments::{CreateEnrollmentRequest, EnrollmentList},
    error::AppResult,
    extract::{AppJson, AppQuery},
    middleware::auth::AuthUser,
    models::Enrollment,
    response::ApiResponse,
    routes::params::RecordListQuery,
    services::enrollment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_enrollments).post(create_enrollment))
        .route("/me", get(list_my_enrollments))
}

#[utoipa::path(
    post,
    path = "/enrollments",
    request_body = CreateEnrollmentRequest,
    responses(
        (status = 201, description = "Enrollment created", body = ApiResponse<Enrollment>),
        (status = 400, description = "Unknown student or course, or already enrolled"),
        (status = 403, description = "Students may only enroll themselves")
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
pub async fn create_enrollment(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateEnrollmentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Enrollment>>)> {
    let resp = enrollment_service::create_enrollment(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/enrollments",
    params(RecordListQuery),
    responses(
        (status = 200, description = "List enrollments (admin, teacher)", body = ApiResponse<EnrollmentList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
pub async fn list_enrollments(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<RecordListQuery>,
) -> AppResult<Json<ApiResponse<EnrollmentList>>> {
    let resp = enrollment_service::list_enrollments(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/enrollments/me",
    responses(
        (status = 200, description = "Caller's enrollments", body = ApiResponse<EnrollmentList>),
        (status = 404, description = "Caller has no student profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
pub async fn list_my_enrollments(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<EnrollmentList>>> {
    let resp = enrollment_service::list_my_enrollments(&state, &user).await?;
    Ok(Json(resp))
}
