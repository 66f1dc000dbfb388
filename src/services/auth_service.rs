use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::password::{hash_password, verify_password},
    dto::{
        auth::{LoginRequest, LoginResponse},
        normalize_email,
        students::RegisterStudentRequest,
        teachers::RegisterTeacherRequest,
    },
    entity::{
        Students, Teachers, Users, students::ActiveModel as StudentActive,
        students::Column as StudentCol, students::Model as StudentModel,
        teachers::ActiveModel as TeacherActive, teachers::Column as TeacherCol,
        teachers::Model as TeacherModel, users::ActiveModel as UserActive,
        users::Column as UserCol, users::Model as UserModel,
    },
    error::{AppError, AppResult},
    models::{Role, Student, Teacher},
    response::ApiResponse,
    services::mapping::{student_from_entity, teacher_from_entity, user_from_entity},
    state::AppState,
};

async fn ensure_email_available<C: ConnectionTrait>(conn: &C, email: &str) -> AppResult<()> {
    let existing = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(conn)
        .await?;
    if existing.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }
    Ok(())
}

async fn create_account(
    txn: &DatabaseTransaction,
    email: String,
    password: &str,
    full_name: &str,
    role: Role,
) -> AppResult<UserModel> {
    let password_hash = hash_password(password)?;
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(password_hash),
        full_name: Set(full_name.trim().to_string()),
        role: Set(role.as_str().to_string()),
        created_at: NotSet,
    }
    .insert(txn)
    .await?;
    Ok(user)
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Inserts the user and the student profile in one transaction, without the
/// availability pre-checks. A failed profile insert rolls the user back.
pub async fn persist_student(
    orm: &DatabaseConnection,
    email: String,
    payload: RegisterStudentRequest,
) -> AppResult<(StudentModel, UserModel)> {
    let txn = orm.begin().await?;
    let user = create_account(
        &txn,
        email,
        &payload.password,
        &payload.full_name,
        Role::Student,
    )
    .await?;

    let student = StudentActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        student_id: Set(payload.student_id.trim().to_string()),
        date_of_birth: Set(payload.date_of_birth),
        address: Set(trimmed(payload.address)),
        phone: Set(trimmed(payload.phone)),
        enrollment_date: Set(payload.enrollment_date),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    Ok((student, user))
}

pub async fn register_student(
    state: &AppState,
    payload: RegisterStudentRequest,
) -> AppResult<ApiResponse<Student>> {
    payload.validate()?;
    let email = normalize_email(&payload.email);

    ensure_email_available(&state.orm, &email).await?;
    let taken = Students::find()
        .filter(StudentCol::StudentId.eq(payload.student_id.trim()))
        .one(&state.orm)
        .await?;
    if taken.is_some() {
        return Err(AppError::BadRequest("Student ID already registered".into()));
    }

    let (student, user) = persist_student(&state.orm, email, payload).await?;
    tracing::info!(user_id = %user.id, student_id = %student.student_id, "student registered");

    let data = student_from_entity(student, user)?;
    Ok(ApiResponse::item("Student registered", data))
}

/// Teacher counterpart of [`persist_student`].
pub async fn persist_teacher(
    orm: &DatabaseConnection,
    email: String,
    payload: RegisterTeacherRequest,
) -> AppResult<(TeacherModel, UserModel)> {
    let txn = orm.begin().await?;
    let user = create_account(
        &txn,
        email,
        &payload.password,
        &payload.full_name,
        Role::Teacher,
    )
    .await?;

    let teacher = TeacherActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        teacher_id: Set(payload.teacher_id.trim().to_string()),
        department: Set(payload.department.trim().to_string()),
        hire_date: Set(payload.hire_date),
        specialization: Set(trimmed(payload.specialization)),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    Ok((teacher, user))
}

pub async fn register_teacher(
    state: &AppState,
    payload: RegisterTeacherRequest,
) -> AppResult<ApiResponse<Teacher>> {
    payload.validate()?;
    let email = normalize_email(&payload.email);

    ensure_email_available(&state.orm, &email).await?;
    let taken = Teachers::find()
        .filter(TeacherCol::TeacherId.eq(payload.teacher_id.trim()))
        .one(&state.orm)
        .await?;
    if taken.is_some() {
        return Err(AppError::BadRequest("Teacher ID already registered".into()));
    }

    let (teacher, user) = persist_teacher(&state.orm, email, payload).await?;
    tracing::info!(user_id = %user.id, teacher_id = %teacher.teacher_id, "teacher registered");

    let data = teacher_from_entity(teacher, user)?;
    Ok(ApiResponse::item("Teacher registered", data))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    payload.validate()?;
    let email = normalize_email(&payload.email);

    let user = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) if verify_password(&payload.password, &u.password_hash) => u,
        _ => {
            tracing::info!("login rejected");
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }
    };

    let user = user_from_entity(user)?;
    let access_token = state.tokens.issue_access_token(user.id, user.role)?;

    tracing::info!(user_id = %user.id, role = %user.role, "user logged in");

    let resp = LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.tokens.ttl().num_seconds(),
        user,
    };

    Ok(ApiResponse::item("Logged in", resp))
}
