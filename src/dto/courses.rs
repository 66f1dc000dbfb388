use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Course;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCourseRequest {
    #[validate(
        length(max = 20, message = "course_code must be at most 20 characters"),
        custom(function = "super::not_blank")
    )]
    pub course_code: String,
    #[validate(
        length(max = 100, message = "course_name must be at most 100 characters"),
        custom(function = "super::not_blank")
    )]
    pub course_name: String,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "credits must be positive"))]
    pub credits: i32,
    pub teacher_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CourseList {
    #[schema(value_type = Vec<Course>)]
    pub items: Vec<Course>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(credits: i32) -> CreateCourseRequest {
        CreateCourseRequest {
            course_code: "CS101".into(),
            course_name: "Introduction to Programming".into(),
            description: None,
            credits,
            teacher_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn credits_must_be_positive() {
        assert!(request(3).validate().is_ok());
        assert!(request(0).validate().is_err());
        assert!(request(-2).validate().is_err());
    }
}
