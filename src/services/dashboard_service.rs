use crate::{
    db::DbPool,
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::{DashboardStats, RecentActivity},
    response::ApiResponse,
    state::AppState,
};

const RECENT_ACTIVITY_LIMIT: i64 = 5;

async fn count_totals(pool: &DbPool) -> AppResult<(i64, i64, i64, i64)> {
    let totals: (i64, i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM students),
            (SELECT COUNT(*) FROM teachers),
            (SELECT COUNT(*) FROM courses),
            (SELECT COUNT(*) FROM enrollments)
        "#,
    )
    .fetch_one(pool)
    .await?;
    Ok(totals)
}

async fn recent_enrollments(pool: &DbPool) -> AppResult<Vec<RecentActivity>> {
    let rows = sqlx::query_as::<_, RecentActivity>(
        r#"
        SELECT e.id AS enrollment_id,
               u.full_name AS student_name,
               c.course_name,
               e.status,
               e.enrollment_date
        FROM enrollments e
        JOIN students s ON s.id = e.student_id
        JOIN users u ON u.id = s.user_id
        JOIN courses c ON c.id = e.course_id
        ORDER BY e.enrollment_date DESC, e.created_at DESC
        LIMIT $1
        "#,
    )
    .bind(RECENT_ACTIVITY_LIMIT)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_stats(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<DashboardStats>> {
    ensure_admin(user)?;

    let (total_students, total_teachers, total_courses, total_enrollments) =
        count_totals(&state.pool).await?;
    let recent_activity = recent_enrollments(&state.pool).await?;

    let data = DashboardStats {
        total_students,
        total_teachers,
        total_courses,
        total_enrollments,
        recent_activity,
    };
    Ok(ApiResponse::item("Dashboard stats", data))
}
