use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    dto::enrollments::{CreateEnrollmentRequest, EnrollmentList},
    entity::{
        Courses, Enrollments, Students, enrollments::ActiveModel as EnrollmentActive,
        enrollments::Column as EnrollmentCol,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_staff},
    models::{Enrollment, EnrollmentStatus, Role},
    response::ApiResponse,
    routes::params::RecordListQuery,
    services::{mapping::enrollments_with_relations, student_service::require_own_profile},
    state::AppState,
};

/// Staff may enroll any student with any status. Students may only enroll
/// themselves, and always as `active`.
pub async fn create_enrollment(
    state: &AppState,
    user: &AuthUser,
    payload: CreateEnrollmentRequest,
) -> AppResult<ApiResponse<Enrollment>> {
    let student = Students::find_by_id(payload.student_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::BadRequest("Student not found".into()))?;

    if user.role == Role::Student && student.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    let course = Courses::find_by_id(payload.course_id)
        .one(&state.orm)
        .await?;
    if course.is_none() {
        return Err(AppError::BadRequest("Course not found".into()));
    }

    let existing = Enrollments::find()
        .filter(EnrollmentCol::StudentId.eq(payload.student_id))
        .filter(EnrollmentCol::CourseId.eq(payload.course_id))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::BadRequest(
            "Student is already enrolled in this course".into(),
        ));
    }

    let status = match user.role {
        Role::Student => EnrollmentStatus::Active,
        _ => payload.status,
    };

    let enrollment = EnrollmentActive {
        id: Set(Uuid::new_v4()),
        student_id: Set(payload.student_id),
        course_id: Set(payload.course_id),
        enrollment_date: Set(Utc::now().date_naive()),
        status: Set(status.as_str().to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        enrollment_id = %enrollment.id,
        student_id = %enrollment.student_id,
        course_id = %enrollment.course_id,
        "enrollment created"
    );

    let data = enrollments_with_relations(&state.orm, vec![enrollment])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("enrollment vanished after insert")))?;
    Ok(ApiResponse::item("Enrollment created", data))
}

pub async fn list_enrollments(
    state: &AppState,
    user: &AuthUser,
    query: RecordListQuery,
) -> AppResult<ApiResponse<EnrollmentList>> {
    ensure_staff(user)?;
    let page = query.page();

    let mut condition = Condition::all();
    if let Some(student_id) = query.student_id {
        condition = condition.add(EnrollmentCol::StudentId.eq(student_id));
    }
    if let Some(course_id) = query.course_id {
        condition = condition.add(EnrollmentCol::CourseId.eq(course_id));
    }
    let finder = Enrollments::find()
        .filter(condition)
        .order_by_asc(EnrollmentCol::CreatedAt)
        .order_by_asc(EnrollmentCol::Id);

    let total = finder.clone().count(&state.orm).await?;
    let rows = finder
        .limit(page.limit as u64)
        .offset(page.skip as u64)
        .all(&state.orm)
        .await?;

    let data = EnrollmentList {
        items: enrollments_with_relations(&state.orm, rows).await?,
    };
    Ok(ApiResponse::page("Enrollments", data, page, total))
}

pub async fn list_my_enrollments(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<EnrollmentList>> {
    let student = require_own_profile(&state.orm, user).await?;
    let rows = Enrollments::find()
        .filter(EnrollmentCol::StudentId.eq(student.id))
        .order_by_desc(EnrollmentCol::EnrollmentDate)
        .order_by_desc(EnrollmentCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let data = EnrollmentList {
        items: enrollments_with_relations(&state.orm, rows).await?,
    };
    Ok(ApiResponse::item("Enrollments", data))
}
