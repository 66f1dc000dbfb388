//! Entity → API model conversion and batched loading of nested relations.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    entity::{
        Courses, Students, Users, courses, enrollments, grades, students, teachers, users,
    },
    error::{AppError, AppResult},
    models::{Course, Enrollment, EnrollmentStatus, Grade, Role, Student, Teacher, User},
};

pub(crate) fn user_from_entity(model: users::Model) -> AppResult<User> {
    let role = model
        .role
        .parse::<Role>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    Ok(User {
        id: model.id,
        email: model.email,
        full_name: model.full_name,
        role,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

pub(crate) fn student_from_entity(model: students::Model, user: users::Model) -> AppResult<Student> {
    Ok(Student {
        id: model.id,
        user_id: model.user_id,
        student_id: model.student_id,
        date_of_birth: model.date_of_birth,
        address: model.address,
        phone: model.phone,
        enrollment_date: model.enrollment_date,
        user: user_from_entity(user)?,
    })
}

pub(crate) fn teacher_from_entity(model: teachers::Model, user: users::Model) -> AppResult<Teacher> {
    Ok(Teacher {
        id: model.id,
        user_id: model.user_id,
        teacher_id: model.teacher_id,
        department: model.department,
        hire_date: model.hire_date,
        specialization: model.specialization,
        user: user_from_entity(user)?,
    })
}

pub(crate) fn course_from_entity(model: courses::Model) -> Course {
    Course {
        id: model.id,
        course_code: model.course_code,
        course_name: model.course_name,
        description: model.description,
        credits: model.credits,
        teacher_id: model.teacher_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

/// Rows from `find_also_related(Users)`; a profile without its user breaks the 1:1 invariant.
pub(crate) fn students_with_users(
    rows: Vec<(students::Model, Option<users::Model>)>,
) -> AppResult<Vec<Student>> {
    rows.into_iter()
        .map(|(student, user)| {
            let user = user.ok_or_else(|| orphaned("student", student.id))?;
            student_from_entity(student, user)
        })
        .collect()
}

pub(crate) fn teachers_with_users(
    rows: Vec<(teachers::Model, Option<users::Model>)>,
) -> AppResult<Vec<Teacher>> {
    rows.into_iter()
        .map(|(teacher, user)| {
            let user = user.ok_or_else(|| orphaned("teacher", teacher.id))?;
            teacher_from_entity(teacher, user)
        })
        .collect()
}

fn orphaned(kind: &str, id: Uuid) -> AppError {
    AppError::Internal(anyhow::anyhow!("{kind} {id} has no backing user"))
}

async fn load_students<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, Student>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Students::find()
        .filter(students::Column::Id.is_in(ids))
        .find_also_related(Users)
        .all(conn)
        .await?;
    Ok(students_with_users(rows)?
        .into_iter()
        .map(|s| (s.id, s))
        .collect())
}

async fn load_courses<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, Course>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Courses::find()
        .filter(courses::Column::Id.is_in(ids))
        .all(conn)
        .await?;
    Ok(rows
        .into_iter()
        .map(|c| (c.id, course_from_entity(c)))
        .collect())
}

fn unique_ids(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = ids.collect();
    ids.sort();
    ids.dedup();
    ids
}

fn missing(kind: &str, id: Uuid) -> AppError {
    AppError::Internal(anyhow::anyhow!("dangling {kind} reference {id}"))
}

/// Embed student (with user) and course into each enrollment, preserving input order.
pub(crate) async fn enrollments_with_relations<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<enrollments::Model>,
) -> AppResult<Vec<Enrollment>> {
    let students = load_students(conn, unique_ids(rows.iter().map(|e| e.student_id))).await?;
    let courses = load_courses(conn, unique_ids(rows.iter().map(|e| e.course_id))).await?;

    rows.into_iter()
        .map(|row| {
            let student = students
                .get(&row.student_id)
                .cloned()
                .ok_or_else(|| missing("student", row.student_id))?;
            let course = courses
                .get(&row.course_id)
                .cloned()
                .ok_or_else(|| missing("course", row.course_id))?;
            let status = row
                .status
                .parse::<EnrollmentStatus>()
                .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
            Ok(Enrollment {
                id: row.id,
                student_id: row.student_id,
                course_id: row.course_id,
                enrollment_date: row.enrollment_date,
                status,
                student,
                course,
            })
        })
        .collect()
}

pub(crate) async fn grades_with_relations<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<grades::Model>,
) -> AppResult<Vec<Grade>> {
    let students = load_students(conn, unique_ids(rows.iter().map(|g| g.student_id))).await?;
    let courses = load_courses(conn, unique_ids(rows.iter().map(|g| g.course_id))).await?;

    rows.into_iter()
        .map(|row| {
            let student = students
                .get(&row.student_id)
                .cloned()
                .ok_or_else(|| missing("student", row.student_id))?;
            let course = courses
                .get(&row.course_id)
                .cloned()
                .ok_or_else(|| missing("course", row.course_id))?;
            Ok(Grade {
                id: row.id,
                student_id: row.student_id,
                course_id: row.course_id,
                grade: row.grade,
                semester: row.semester,
                academic_year: row.academic_year,
                student,
                course,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    fn user(id: Uuid, role: &str) -> users::Model {
        users::Model {
            id,
            email: "ada@example.com".into(),
            password_hash: "$argon2id$hidden".into(),
            full_name: "Ada Lovelace".into(),
            role: role.into(),
            created_at: FixedOffset::east_opt(3600)
                .unwrap()
                .with_ymd_and_hms(2024, 9, 1, 10, 0, 0)
                .unwrap(),
        }
    }

    fn student(user_id: Uuid) -> students::Model {
        students::Model {
            id: Uuid::new_v4(),
            user_id,
            student_id: "S-001".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2004, 2, 1).unwrap(),
            address: None,
            phone: Some("08012345678".into()),
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            created_at: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 9, 1, 9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn user_conversion_normalizes_to_utc_and_parses_role() {
        let id = Uuid::new_v4();
        let converted = user_from_entity(user(id, "teacher")).unwrap();
        assert_eq!(converted.id, id);
        assert_eq!(converted.role, Role::Teacher);
        assert_eq!(converted.created_at.to_rfc3339(), "2024-09-01T09:00:00+00:00");
    }

    #[test]
    fn unknown_stored_role_is_an_internal_error() {
        let err = user_from_entity(user(Uuid::new_v4(), "janitor")).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn student_embeds_its_user() {
        let user_id = Uuid::new_v4();
        let rows = vec![(student(user_id), Some(user(user_id, "student")))];
        let students = students_with_users(rows).unwrap();
        assert_eq!(students[0].user.id, user_id);
        assert_eq!(students[0].student_id, "S-001");
    }

    #[test]
    fn student_without_user_is_rejected() {
        let rows = vec![(student(Uuid::new_v4()), None)];
        assert!(students_with_users(rows).is_err());
    }
}
