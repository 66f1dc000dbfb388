use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        students::RegisterStudentRequest,
        teachers::RegisterTeacherRequest,
    },
    error::AppResult,
    extract::AppJson,
    models::{Student, Teacher},
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register/student", post(register_student))
        .route("/register/teacher", post(register_teacher))
        .route("/login", post(login))
}

#[utoipa::path(
    post,
    path = "/register/student",
    request_body = RegisterStudentRequest,
    responses(
        (status = 201, description = "Student account and profile created", body = ApiResponse<Student>),
        (status = 400, description = "Invalid input, email or student ID already registered")
    ),
    tag = "Auth"
)]
pub async fn register_student(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterStudentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Student>>)> {
    let resp = auth_service::register_student(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/register/teacher",
    request_body = RegisterTeacherRequest,
    responses(
        (status = 201, description = "Teacher account and profile created", body = ApiResponse<Teacher>),
        (status = 400, description = "Invalid input, email or teacher ID already registered")
    ),
    tag = "Auth"
)]
pub async fn register_teacher(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterTeacherRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Teacher>>)> {
    let resp = auth_service::register_teacher(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token and user", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login_user(&state, payload).await?;
    Ok(Json(resp))
}
