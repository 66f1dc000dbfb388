use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Enrollment, EnrollmentStatus};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEnrollmentRequest {
    pub student_id: Uuid,
    pub course_id: Uuid,
    #[serde(default)]
    pub status: EnrollmentStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct EnrollmentList {
    #[schema(value_type = Vec<Enrollment>)]
    pub items: Vec<Enrollment>,
}
