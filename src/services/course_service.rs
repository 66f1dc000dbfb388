use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::courses::{CourseList, CreateCourseRequest},
    entity::{Courses, Teachers, courses::ActiveModel as CourseActive, courses::Column as CourseCol},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_staff},
    models::Course,
    response::ApiResponse,
    routes::params::CourseListQuery,
    services::mapping::course_from_entity,
    state::AppState,
};

pub async fn list_courses(
    state: &AppState,
    query: CourseListQuery,
) -> AppResult<ApiResponse<CourseList>> {
    let page = query.page();

    let mut condition = Condition::all();
    if let Some(teacher_id) = query.teacher_id {
        condition = condition.add(CourseCol::TeacherId.eq(teacher_id));
    }
    let finder = Courses::find()
        .filter(condition)
        .order_by_asc(CourseCol::CreatedAt)
        .order_by_asc(CourseCol::Id);

    let total = finder.clone().count(&state.orm).await?;
    let items = finder
        .limit(page.limit as u64)
        .offset(page.skip as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(course_from_entity)
        .collect();

    Ok(ApiResponse::page("Courses", CourseList { items }, page, total))
}

pub async fn get_course(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Course>> {
    let course = Courses::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::item("Course", course_from_entity(course)))
}

pub async fn create_course(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCourseRequest,
) -> AppResult<ApiResponse<Course>> {
    ensure_staff(user)?;
    payload.validate()?;
    let course_code = payload.course_code.trim().to_string();

    let taken = Courses::find()
        .filter(CourseCol::CourseCode.eq(course_code.as_str()))
        .one(&state.orm)
        .await?;
    if taken.is_some() {
        return Err(AppError::BadRequest("Course code already exists".into()));
    }

    let teacher = Teachers::find_by_id(payload.teacher_id)
        .one(&state.orm)
        .await?;
    if teacher.is_none() {
        return Err(AppError::BadRequest("Teacher not found".into()));
    }

    let course = CourseActive {
        id: Set(Uuid::new_v4()),
        course_code: Set(course_code),
        course_name: Set(payload.course_name.trim().to_string()),
        description: Set(payload.description.filter(|d| !d.trim().is_empty())),
        credits: Set(payload.credits),
        teacher_id: Set(payload.teacher_id),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        course_id = %course.id,
        course_code = %course.course_code,
        created_by = %user.user_id,
        "course created"
    );

    Ok(ApiResponse::item("Course created", course_from_entity(course)))
}
