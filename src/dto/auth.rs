use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::User;

/// Login only checks that both fields are present. Anything stricter could
/// lock out an account that registration accepted.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email must not be empty"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::dto::students::RegisterStudentRequest;

    fn registration(password: &str) -> RegisterStudentRequest {
        RegisterStudentRequest {
            email: "ada@example.com".into(),
            full_name: "Ada Lovelace".into(),
            password: password.into(),
            student_id: "S-001".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2004, 12, 10).unwrap(),
            address: None,
            phone: None,
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        }
    }

    fn login(password: &str) -> LoginRequest {
        LoginRequest {
            email: "ada@example.com".into(),
            password: password.into(),
        }
    }

    #[test]
    fn every_password_accepted_at_registration_passes_login_validation() {
        // Registration accepts 8..=128 characters, stored untrimmed.
        let boundary = [
            "x".repeat(8),
            "x".repeat(128),
            " ".repeat(8),
            "  padded  ".to_string(),
        ];
        for password in boundary {
            assert!(registration(&password).validate().is_ok(), "{password:?}");
            assert!(login(&password).validate().is_ok(), "{password:?}");
        }
    }

    #[test]
    fn passwords_outside_the_length_window_are_refused_at_registration() {
        let too_short = "x".repeat(7);
        let too_long = "x".repeat(129);
        assert!(registration(&too_short).validate().is_err());
        assert!(registration(&too_long).validate().is_err());
    }

    #[test]
    fn login_requires_both_fields() {
        assert!(login("").validate().is_err());
        let no_email = LoginRequest {
            email: String::new(),
            password: "analytical-engine".into(),
        };
        assert!(no_email.validate().is_err());
    }
}
