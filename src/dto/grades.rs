use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Grade;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGradeRequest {
    pub student_id: Uuid,
    pub course_id: Uuid,
    #[validate(range(min = 0.0, max = 100.0, message = "grade must be between 0 and 100"))]
    pub grade: f64,
    #[validate(
        length(max = 20, message = "semester must be at most 20 characters"),
        custom(function = "super::not_blank")
    )]
    pub semester: String,
    #[validate(
        length(max = 9, message = "academic_year must be at most 9 characters"),
        custom(function = "super::not_blank")
    )]
    pub academic_year: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct GradeList {
    #[schema(value_type = Vec<Grade>)]
    pub items: Vec<Grade>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(grade: f64) -> CreateGradeRequest {
        CreateGradeRequest {
            student_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            grade,
            semester: "Fall".into(),
            academic_year: "2024-2025".into(),
        }
    }

    #[test]
    fn grade_must_be_within_range() {
        assert!(request(0.0).validate().is_ok());
        assert!(request(87.5).validate().is_ok());
        assert!(request(100.0).validate().is_ok());
        assert!(request(-1.0).validate().is_err());
        assert!(request(100.5).validate().is_err());
    }
}
