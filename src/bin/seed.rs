use chrono::NaiveDate;
use student_management_api::{
    auth::password::hash_password,
    config::database_url_from_env,
    db::{create_pool, orm_from_pool, run_migrations},
    models::Role,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = database_url_from_env()?;

    let pool = create_pool(&database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm_from_pool(&pool)).await?;

    let admin_email =
        std::env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".into());
    let admin_password =
        std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());

    let admin_id = ensure_user(
        &pool,
        &admin_email,
        &admin_password,
        "System Administrator",
        Role::Admin,
    )
    .await?;
    let teacher_user_id = ensure_user(
        &pool,
        "teacher@example.com",
        "teacher123",
        "Grace Hopper",
        Role::Teacher,
    )
    .await?;
    let teacher_id = ensure_teacher(&pool, teacher_user_id).await?;
    seed_courses(&pool, teacher_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, Teacher profile ID: {teacher_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    full_name: &str,
    role: Role,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    // The upsert returns the id whether the row is new or already present.
    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, full_name, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn ensure_teacher(pool: &sqlx::PgPool, user_id: Uuid) -> anyhow::Result<Uuid> {
    let hire_date = NaiveDate::from_ymd_opt(2020, 8, 15)
        .ok_or_else(|| anyhow::anyhow!("invalid hire date"))?;

    sqlx::query(
        r#"
        INSERT INTO teachers (id, user_id, teacher_id, department, hire_date, specialization)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind("T-0001")
    .bind("Computer Science")
    .bind(hire_date)
    .bind("Compilers")
    .execute(pool)
    .await?;

    let (id,): (Uuid,) = sqlx::query_as("SELECT id FROM teachers WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(id)
}

async fn seed_courses(pool: &sqlx::PgPool, teacher_id: Uuid) -> anyhow::Result<()> {
    let courses = vec![
        ("CS101", "Introduction to Programming", "Variables, control flow and functions", 3),
        ("CS201", "Data Structures", "Lists, trees, graphs and hashing", 4),
        ("CS301", "Database Systems", "Relational modelling and SQL", 3),
    ];

    for (code, name, desc, credits) in courses {
        sqlx::query(
            r#"
            INSERT INTO courses (id, course_code, course_name, description, credits, teacher_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (course_code) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(code)
        .bind(name)
        .bind(desc)
        .bind(credits)
        .bind(teacher_id)
        .execute(pool)
        .await?;
    }

    println!("Seeded courses");
    Ok(())
}
