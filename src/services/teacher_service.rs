use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::{
    dto::teachers::TeacherList,
    entity::{Teachers, Users, teachers::Column as TeacherCol},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Teacher,
    response::ApiResponse,
    routes::params::Pagination,
    services::mapping::{teacher_from_entity, teachers_with_users},
    state::AppState,
};

pub async fn list_teachers(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<TeacherList>> {
    ensure_admin(user)?;
    let page = pagination.normalize();

    let total = Teachers::find().count(&state.orm).await?;
    let rows = Teachers::find()
        .order_by_asc(TeacherCol::CreatedAt)
        .order_by_asc(TeacherCol::Id)
        .limit(page.limit as u64)
        .offset(page.skip as u64)
        .find_also_related(Users)
        .all(&state.orm)
        .await?;

    let data = TeacherList {
        items: teachers_with_users(rows)?,
    };
    Ok(ApiResponse::page("Teachers", data, page, total))
}

pub async fn get_my_teacher(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<Teacher>> {
    let row = Teachers::find()
        .filter(TeacherCol::UserId.eq(user.user_id))
        .find_also_related(Users)
        .one(&state.orm)
        .await?;
    let data = match row {
        Some((teacher, Some(account))) => teacher_from_entity(teacher, account)?,
        _ => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::item("Teacher", data))
}
