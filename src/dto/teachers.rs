use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Teacher;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterTeacherRequest {
    #[validate(
        email(message = "Invalid email address"),
        length(max = 100, message = "email must be at most 100 characters")
    )]
    pub email: String,
    #[validate(
        length(max = 100, message = "full_name must be at most 100 characters"),
        custom(function = "super::not_blank")
    )]
    pub full_name: String,
    #[validate(length(
        min = 8,
        max = 128,
        message = "password must be between 8 and 128 characters"
    ))]
    pub password: String,
    #[validate(
        length(max = 20, message = "teacher_id must be at most 20 characters"),
        custom(function = "super::not_blank")
    )]
    pub teacher_id: String,
    #[validate(
        length(max = 100, message = "department must be at most 100 characters"),
        custom(function = "super::not_blank")
    )]
    pub department: String,
    pub hire_date: NaiveDate,
    #[validate(length(max = 100, message = "specialization must be at most 100 characters"))]
    pub specialization: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct TeacherList {
    #[schema(value_type = Vec<Teacher>)]
    pub items: Vec<Teacher>,
}
