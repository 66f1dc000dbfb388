use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    dto::students::StudentList,
    entity::{Students, Users, students::Column as StudentCol, students::Model as StudentModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_staff},
    models::{Role, Student},
    response::ApiResponse,
    routes::params::Pagination,
    services::mapping::{student_from_entity, students_with_users},
    state::AppState,
};

/// The student profile owned by `user_id`, if any.
pub(crate) async fn find_by_user<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> AppResult<Option<StudentModel>> {
    let student = Students::find()
        .filter(StudentCol::UserId.eq(user_id))
        .one(conn)
        .await?;
    Ok(student)
}

pub(crate) async fn require_own_profile<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
) -> AppResult<StudentModel> {
    find_by_user(conn, user.user_id)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn list_students(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<StudentList>> {
    ensure_staff(user)?;
    let page = pagination.normalize();

    let total = Students::find().count(&state.orm).await?;
    let rows = Students::find()
        .order_by_asc(StudentCol::CreatedAt)
        .order_by_asc(StudentCol::Id)
        .limit(page.limit as u64)
        .offset(page.skip as u64)
        .find_also_related(Users)
        .all(&state.orm)
        .await?;

    let data = StudentList {
        items: students_with_users(rows)?,
    };
    Ok(ApiResponse::page("Students", data, page, total))
}

pub async fn get_my_student(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<Student>> {
    let student = require_own_profile(&state.orm, user).await?;
    let account = Users::find_by_id(student.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let data = student_from_entity(student, account)?;
    Ok(ApiResponse::item("Student", data))
}

/// Staff may read any student; a student may only read their own profile.
pub async fn get_student(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Student>> {
    let row = Students::find_by_id(id)
        .find_also_related(Users)
        .one(&state.orm)
        .await?;
    let (student, account) = match row {
        Some((s, Some(u))) => (s, u),
        Some((s, None)) => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "student {} has no backing user",
                s.id
            )));
        }
        None => return Err(AppError::NotFound),
    };

    if user.role == Role::Student && student.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    let data = student_from_entity(student, account)?;
    Ok(ApiResponse::item("Student", data))
}
