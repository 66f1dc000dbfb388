use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::Student;

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[validate(schema(function = "born_before_enrollment"))]
pub struct RegisterStudentRequest {
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
        length(max = 20, message = "student_id must be at most 20 characters"),
        custom(function = "super::not_blank")
    )]
    pub student_id: String,
    pub date_of_birth: NaiveDate,
    #[validate(length(max = 255, message = "address must be at most 255 characters"))]
    pub address: Option<String>,
    #[validate(length(max = 15, message = "phone must be at most 15 characters"))]
    pub phone: Option<String>,
    pub enrollment_date: NaiveDate,
}

fn born_before_enrollment(req: &RegisterStudentRequest) -> Result<(), ValidationError> {
    if req.date_of_birth >= req.enrollment_date {
        return Err(ValidationError::new("dates")
            .with_message("date_of_birth must be before enrollment_date".into()));
    }
    Ok(())
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct StudentList {
    #[schema(value_type = Vec<Student>)]
    pub items: Vec<Student>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterStudentRequest {
        RegisterStudentRequest {
            email: "ada@example.com".into(),
            full_name: "Ada Lovelace".into(),
            password: "analytical-engine".into(),
            student_id: "S-001".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2004, 12, 10).unwrap(),
            address: None,
            phone: Some("08012345678".into()),
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        }
    }

    #[test]
    fn well_formed_registration_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn birth_date_must_precede_enrollment() {
        let mut req = request();
        req.date_of_birth = req.enrollment_date;
        assert!(req.validate().is_err());
    }

    #[test]
    fn field_shapes_are_checked() {
        let mut req = request();
        req.email = "ada.example.com".into();
        assert!(req.validate().is_err());

        let mut req = request();
        req.student_id = "   ".into();
        assert!(req.validate().is_err());

        let mut req = request();
        req.phone = Some("+2348012345678901".into());
        assert!(req.validate().is_err());
    }
}
