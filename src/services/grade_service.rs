use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::grades::{CreateGradeRequest, GradeList},
    entity::{
        Courses, Grades, Students, grades::ActiveModel as GradeActive, grades::Column as GradeCol,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_staff},
    models::Grade,
    response::ApiResponse,
    routes::params::RecordListQuery,
    services::{mapping::grades_with_relations, student_service::require_own_profile},
    state::AppState,
};

pub async fn create_grade(
    state: &AppState,
    user: &AuthUser,
    payload: CreateGradeRequest,
) -> AppResult<ApiResponse<Grade>> {
    ensure_staff(user)?;
    payload.validate()?;

    let student = Students::find_by_id(payload.student_id)
        .one(&state.orm)
        .await?;
    if student.is_none() {
        return Err(AppError::BadRequest("Student not found".into()));
    }
    let course = Courses::find_by_id(payload.course_id)
        .one(&state.orm)
        .await?;
    if course.is_none() {
        return Err(AppError::BadRequest("Course not found".into()));
    }

    let grade = GradeActive {
        id: Set(Uuid::new_v4()),
        student_id: Set(payload.student_id),
        course_id: Set(payload.course_id),
        grade: Set(payload.grade),
        semester: Set(payload.semester.trim().to_string()),
        academic_year: Set(payload.academic_year.trim().to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        grade_id = %grade.id,
        student_id = %grade.student_id,
        course_id = %grade.course_id,
        recorded_by = %user.user_id,
        "grade recorded"
    );

    let data = grades_with_relations(&state.orm, vec![grade])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("grade vanished after insert")))?;
    Ok(ApiResponse::item("Grade recorded", data))
}

pub async fn list_grades(
    state: &AppState,
    user: &AuthUser,
    query: RecordListQuery,
) -> AppResult<ApiResponse<GradeList>> {
    ensure_staff(user)?;
    let page = query.page();

    let mut condition = Condition::all();
    if let Some(student_id) = query.student_id {
        condition = condition.add(GradeCol::StudentId.eq(student_id));
    }
    if let Some(course_id) = query.course_id {
        condition = condition.add(GradeCol::CourseId.eq(course_id));
    }
    let finder = Grades::find()
        .filter(condition)
        .order_by_asc(GradeCol::CreatedAt)
        .order_by_asc(GradeCol::Id);

    let total = finder.clone().count(&state.orm).await?;
    let rows = finder
        .limit(page.limit as u64)
        .offset(page.skip as u64)
        .all(&state.orm)
        .await?;

    let data = GradeList {
        items: grades_with_relations(&state.orm, rows).await?,
    };
    Ok(ApiResponse::page("Grades", data, page, total))
}

pub async fn list_my_grades(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<GradeList>> {
    let student = require_own_profile(&state.orm, user).await?;
    let rows = Grades::find()
        .filter(GradeCol::StudentId.eq(student.id))
        .order_by_desc(GradeCol::AcademicYear)
        .order_by_asc(GradeCol::Semester)
        .order_by_asc(GradeCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let data = GradeList {
        items: grades_with_relations(&state.orm, rows).await?,
    };
    Ok(ApiResponse::item("Grades", data))
}
